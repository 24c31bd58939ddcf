use anyhow::{Result, Context, anyhow};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle, MultiProgress};
use rand::Rng;

use crate::app_config::Config;
use crate::caption_builder::generate_caption;
use crate::file_utils::{self, FileManager};
use crate::media_probe::MediaProbe;
use crate::providers::RemoteService;
use crate::providers::editor::{EditorClient, AddVideoRequest, AddImageRequest, AddAudioRequest};
use crate::providers::speech::SpeechClient;
use crate::story::{self, Story};
use crate::subtitle_builder::SubtitleTrack;

// @module: Application controller for story video generation

/// Main application controller for the generation pipeline
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let controller = Self {
            config,
        };

        Ok(controller)
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.editor.endpoint.is_empty() && !self.config.speech.endpoint.is_empty()
    }

    /// Offset applied to every subtitle cue, in seconds.
    ///
    /// Cues must start when the narration does, so this is always the
    /// narration's timeline position; a separate subtitle offset would let
    /// captions drift away from the audio.
    pub fn subtitle_offset(&self) -> f64 {
        self.config.editor.voice_track.target_start
    }

    /// Test version of run method that simulates the process without remote calls
    pub async fn test_run(&self, story_source: &str, background_video: PathBuf, force_overwrite: bool) -> Result<()> {
        info!("Test run initiated for story: {}", story_source);
        info!("Background video: {:?}", background_video);
        info!("Force overwrite: {}", force_overwrite);

        if !self.is_initialized() {
            return Err(anyhow!("Controller not properly initialized"));
        }

        Ok(())
    }

    /// Test version of run_folder method that simulates folder processing
    pub async fn test_run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        info!("Test run folder initiated for directory: {:?}", input_dir);
        info!("Force overwrite: {}", force_overwrite);

        if !self.is_initialized() {
            return Err(anyhow!("Controller not properly initialized"));
        }

        Ok(())
    }

    /// Run the full generation pipeline for one story.
    ///
    /// `story_source` is either a post URL (fetched) or a local story file.
    pub async fn run(&self, story_source: &str, background_video: PathBuf, force_overwrite: bool) -> Result<()> {
        let multi_progress = MultiProgress::new();
        self.run_with_progress(story_source, background_video, &multi_progress, force_overwrite).await
    }

    /// Run the pipeline with progress reporting
    async fn run_with_progress(
        &self,
        story_source: &str,
        background_video: PathBuf,
        multi_progress: &MultiProgress,
        force_overwrite: bool,
    ) -> Result<()> {
        // Start timing the process
        let start_time = std::time::Instant::now();

        if !background_video.exists() {
            return Err(anyhow!("Background video does not exist: {:?}", background_video));
        }

        // Resolve the story first so outputs can be named after it
        let story = self.load_story(story_source).await?;
        let slug = story_slug(&story.title);
        let story_dir = PathBuf::from(&self.config.output_dir).join(&slug);

        let srt_path = story_dir.join("subtitles.srt");
        if srt_path.exists() && !force_overwrite {
            warn!("Skipping story, outputs already exist (use -f to force overwrite)");
            return Ok(());
        }

        FileManager::ensure_dir(&story_dir)?;

        // Per-story progress bar over the pipeline stages
        let progress_bar = multi_progress.add(ProgressBar::new(7));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} steps ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));

        info!("🚀 storyreel: {}", story.title);

        // Build the clients up front and verify both services answer
        let editor = EditorClient::new_with_retries(
            &self.config.editor.endpoint,
            self.config.editor.timeout_secs,
            self.config.editor.retry_count,
            self.config.editor.retry_backoff_ms,
        )?;
        let speech = SpeechClient::new(&self.config.speech.endpoint, self.config.speech.timeout_secs)?;

        progress_bar.set_message("Checking services");
        self.preflight(&editor, &speech).await?;
        progress_bar.inc(1);

        // Caption is pure text work; write it alongside the media artifacts
        let caption = generate_caption(
            &self.config.caption.label,
            &story.title,
            &self.config.caption.hashtags,
            self.config.caption.max_length,
        );
        FileManager::write_to_file(story_dir.join("caption.txt"), &caption)?;
        debug!("Caption ({} chars): {}", caption.chars().count(), caption);

        // Synthesize the narration
        progress_bar.set_message("Synthesizing narration");
        let narration_text = story.narration_text();
        let audio = speech
            .synthesize(&narration_text, &self.config.speech.voice_id(), self.config.speech.speed)
            .await?;
        let narration_path = story_dir.join("narration.wav");
        FileManager::write_bytes(&narration_path, &audio)?;
        let narration_path = narration_path
            .canonicalize()
            .with_context(|| format!("Failed to resolve narration path: {:?}", narration_path))?;
        progress_bar.inc(1);

        // Align it to word timestamps
        progress_bar.set_message("Aligning narration");
        let transcription = speech.align(&narration_path.to_string_lossy()).await?;
        info!("Aligned {} words", transcription.word_count());
        progress_bar.inc(1);

        // Generate the subtitle track
        progress_bar.set_message("Building subtitles");
        let words = transcription.flatten_words();
        let track = SubtitleTrack::from_words(
            &words,
            self.config.subtitle.words_per_cue,
            self.subtitle_offset(),
        )?;
        track.write_to_srt(&srt_path)?;
        let srt_path = srt_path
            .canonicalize()
            .with_context(|| format!("Failed to resolve subtitle path: {:?}", srt_path))?;
        if track.is_empty() {
            warn!("Alignment produced no words; subtitle track is empty");
        }
        progress_bar.inc(1);

        // Work out how much background video the timeline needs
        progress_bar.set_message("Probing media");
        let probe = MediaProbe::new(self.config.editor.background.probe_timeout_secs);
        let background_secs = probe.duration_seconds(&background_video).await?;
        let narration_secs = probe.duration_seconds(&narration_path).await?;
        let voice_end = self.config.editor.voice_track.target_start + narration_secs;
        let clip_secs = voice_end.max(self.config.editor.title_card.duration_secs);
        let (window_start, window_end) = select_background_window(
            background_secs,
            clip_secs,
            self.config.editor.background.lead_in_secs,
        )?;
        debug!(
            "Background window: {:.0}s - {:.0}s of {:.3}s source",
            window_start, window_end, background_secs
        );
        progress_bar.inc(1);

        // Assemble the timeline through the editor API
        progress_bar.set_message("Composing timeline");
        let draft_id = editor.create_draft(self.config.editor.width, self.config.editor.height).await?;
        info!("Draft created: {}", draft_id);

        let background_cfg = &self.config.editor.background;
        editor
            .add_video(&AddVideoRequest {
                draft_id: draft_id.clone(),
                video_url: background_video.to_string_lossy().to_string(),
                track_name: background_cfg.track_name.clone(),
                speed: background_cfg.speed,
                scale_x: background_cfg.scale,
                scale_y: background_cfg.scale,
                volume: background_cfg.volume,
                target_start: 0.0,
                relative_index: 0,
                start: Some(window_start),
                end: Some(window_end),
            })
            .await?;

        let title_card = &self.config.editor.title_card;
        if let Some(image_path) = &title_card.image_path {
            editor
                .add_image(&AddImageRequest {
                    draft_id: draft_id.clone(),
                    image_url: image_path.clone(),
                    track_name: title_card.track_name.clone(),
                    scale_x: title_card.scale,
                    scale_y: title_card.scale,
                    start: 0.0,
                    end: title_card.duration_secs,
                    relative_index: 0,
                })
                .await?;
        } else {
            debug!("No title card image configured, skipping overlay");
        }

        let voice_cfg = &self.config.editor.voice_track;
        editor
            .add_audio(&AddAudioRequest {
                draft_id: draft_id.clone(),
                audio_url: narration_path.to_string_lossy().to_string(),
                start: 0.0,
                target_start: voice_cfg.target_start,
                volume: voice_cfg.volume,
                speed: voice_cfg.speed,
                track_name: voice_cfg.track_name.clone(),
                end: None,
            })
            .await?;

        editor
            .add_subtitle(&draft_id, &srt_path.to_string_lossy(), &self.config.subtitle.style.to_style())
            .await?;
        progress_bar.inc(1);

        // Save the draft and import it into the desktop editor
        progress_bar.set_message("Importing draft");
        let import_dir = self.resolve_draft_import_dir()?;
        editor.save_draft(&draft_id, Some(&import_dir.to_string_lossy())).await?;

        let draft_dir = find_draft_dir(Path::new(&self.config.editor.workspace_dir), &draft_id)?;
        let dest = import_dir.join(draft_dir.file_name().unwrap_or_default());
        FileManager::remove_dir_if_exists(&dest)?;
        FileManager::copy_dir_all(&draft_dir, &dest)?;
        progress_bar.inc(1);

        progress_bar.finish_and_clear();

        let elapsed = start_time.elapsed();
        info!("Success: draft imported at {}", dest.display());
        info!("Video generation completed in {}.", Self::format_duration(elapsed));

        let (hits, misses) = probe.stats();
        debug!("Probe cache: {} hits, {} misses", hits, misses);

        Ok(())
    }

    /// Resolve a story source to a Story value
    async fn load_story(&self, story_source: &str) -> Result<Story> {
        if story_source.starts_with("http") {
            let story = story::fetch_story(
                story_source,
                &self.config.story.user_agent,
                self.config.story.timeout_secs,
            )
            .await?;
            Ok(story)
        } else {
            Story::from_file(story_source)
        }
    }

    /// Verify both remote services answer before any media work starts
    async fn preflight(&self, editor: &EditorClient, speech: &SpeechClient) -> Result<()> {
        let services: [&dyn RemoteService; 2] = [editor, speech];
        let checks = join_all(services.iter().map(|s| s.health_check())).await;

        for (service, result) in services.iter().zip(checks) {
            if let Err(e) = result {
                error!("{} service preflight failed: {}", service.name(), e);
                return Err(anyhow!("{} service is unavailable: {}", service.name(), e));
            }
            debug!("{} service is up", service.name());
        }

        Ok(())
    }

    /// Directory the finished draft is copied into
    fn resolve_draft_import_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.config.editor.draft_dir {
            return Ok(PathBuf::from(dir));
        }

        let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
        let import_dir = home
            .join("AppData")
            .join("Local")
            .join("CapCut")
            .join("User Data")
            .join("Projects")
            .join("com.lveditor.draft");

        if !import_dir.exists() {
            return Err(anyhow!(
                "Editor draft directory does not exist at {:?}. Set editor.draft_dir explicitly.",
                import_dir
            ));
        }

        Ok(import_dir)
    }

    // Format duration in a human-readable format (HH:MM:SS)
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }

    /// Run the workflow in folder mode, processing all story files in a directory
    /// Stories that already have generated outputs will be skipped
    pub async fn run_folder(&self, input_dir: PathBuf, background_video: PathBuf, force_overwrite: bool) -> Result<()> {
        // Start timing the process
        let start_time = std::time::Instant::now();

        if !input_dir.exists() {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        // Find all story files in the directory (recursive)
        let mut story_files = Vec::new();
        for ext in &["txt", "md", "json"] {
            let mut files = file_utils::FileManager::find_files(&input_dir, ext)?;
            story_files.append(&mut files);
        }
        story_files.sort();

        if story_files.is_empty() {
            return Err(anyhow!("No story files found in directory: {:?}", input_dir));
        }

        // Create multi-progress instance for multiple story processing
        let multi_progress = MultiProgress::new();

        let folder_pb = multi_progress.add(ProgressBar::new(story_files.len() as u64));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} stories ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Processing stories");

        // Track success and failure counts
        let mut success_count = 0;
        let mut error_count = 0;
        let mut skip_count = 0;

        for story_file in story_files.iter() {
            let file_name = story_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());

            folder_pb.set_message(format!("Processing: {}", file_name));

            // Check for existing outputs before doing any media work
            if !force_overwrite {
                if let Ok(story) = Story::from_file(story_file) {
                    let srt_path = PathBuf::from(&self.config.output_dir)
                        .join(story_slug(&story.title))
                        .join("subtitles.srt");
                    if srt_path.exists() {
                        warn!("Skipping story, outputs already exist (use -f to force overwrite)");
                        skip_count += 1;
                        folder_pb.inc(1);
                        continue;
                    }
                }
            }

            let source = story_file.to_string_lossy();
            match self.run_with_progress(&source, background_video.clone(), &multi_progress, force_overwrite).await {
                Ok(_) => {
                    success_count += 1;
                }
                Err(e) => {
                    error!("Error processing story {}: {}", file_name, e);
                    error_count += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        let duration = start_time.elapsed();

        // Give summary results - important for batch operations
        let summary_message = format!(
            "Folder processing completed: {} generated, {} skipped, {} errors",
            success_count, skip_count, error_count
        );
        info!("{}", summary_message);

        // Append the summary to the run log
        let log_file_path = PathBuf::from(&self.config.output_dir).join("storyreel.issues.log");
        let log_line = format!("{} - Duration: {}", summary_message, Self::format_duration(duration));
        if let Err(e) = FileManager::append_to_log_file(&log_file_path, &log_line) {
            warn!("Failed to write folder logs to file: {}", e);
        } else {
            info!("Folder processing logs written to {}", log_file_path.display());
        }

        Ok(())
    }
}

/// Draw a random background window of `clip_secs` length.
///
/// The start is an integer-second uniform draw over `[lead_in_secs,
/// original_secs - clip_secs]`. A source too short to fit the clip after the
/// lead-in is a hard error; a silently shortened clip would end the video
/// before the narration does.
pub fn select_background_window(original_secs: f64, clip_secs: f64, lead_in_secs: f64) -> Result<(f64, f64)> {
    let lead_in = lead_in_secs.ceil() as i64;
    let max_start = (original_secs - clip_secs).floor() as i64;

    if max_start < lead_in {
        return Err(anyhow!(
            "Background video too short: need {:.1}s after a {:.0}s lead-in, have {:.1}s",
            clip_secs,
            lead_in_secs,
            original_secs
        ));
    }

    let start = rand::rng().random_range(lead_in..=max_start) as f64;
    Ok((start, start + clip_secs))
}

/// Locate the materialized draft folder for a draft id inside the workspace
pub fn find_draft_dir(workspace_dir: &Path, draft_id: &str) -> Result<PathBuf> {
    if !workspace_dir.exists() {
        return Err(anyhow!("Editor workspace directory does not exist: {:?}", workspace_dir));
    }

    for entry in std::fs::read_dir(workspace_dir)
        .with_context(|| format!("Failed to read workspace directory: {:?}", workspace_dir))?
    {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with("dfd_") && name.contains(draft_id) {
            return Ok(entry.path());
        }
    }

    Err(anyhow!("Could not find draft folder for {} in {:?}", draft_id, workspace_dir))
}

/// Derive a filesystem-safe output folder name from a story title
pub fn story_slug(title: &str) -> String {
    let mut slug = String::new();
    let mut last_dash = true;

    for c in title.chars() {
        if slug.len() >= 48 {
            break;
        }
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }

    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "story".to_string()
    } else {
        slug
    }
}
