/*!
 * # storyreel - automated short-form story video assembly
 *
 * A Rust library for turning a text story into a vertical video with
 * word-synced subtitles.
 *
 * ## Features
 *
 * - Fetch stories from post URLs or load them from local files
 * - Synthesize narration through a speech service
 * - Align narration to word-level timestamps
 * - Build fast, gap-free subtitle cues and render them as SRT
 * - Fit a title and hashtags into a length-bounded caption
 * - Assemble the final timeline through a video-editing automation API
 * - Import the finished draft into a desktop editor's project directory
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `alignment`: Word-level alignment model from the speech service
 * - `subtitle_builder`: Cue segmentation and SRT rendering
 * - `caption_builder`: Length-bounded caption assembly
 * - `story`: Story acquisition and narration text
 * - `media_probe`: Media duration probing
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `providers`: Clients for the remote services:
 *   - `providers::editor`: Video-editing automation API client
 *   - `providers::speech`: Speech synthesis and alignment client
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod alignment;
pub mod app_config;
pub mod app_controller;
pub mod caption_builder;
pub mod errors;
pub mod file_utils;
pub mod media_probe;
pub mod providers;
pub mod story;
pub mod subtitle_builder;

// Re-export main types for easier usage
pub use alignment::{Transcription, WordTiming};
pub use app_config::Config;
pub use caption_builder::{build_caption, generate_caption};
pub use errors::{AppError, ServiceError, SubtitleError};
pub use story::Story;
pub use subtitle_builder::{SubtitleCue, SubtitleTrack};
