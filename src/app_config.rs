use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use url::Url;

use crate::providers::editor::SubtitleStyle;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Directory for generated artifacts (narration audio, SRT files)
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Story acquisition settings
    #[serde(default)]
    pub story: StoryConfig,

    /// Speech service settings
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Subtitle generation settings
    #[serde(default)]
    pub subtitle: SubtitleConfig,

    /// Caption settings
    #[serde(default)]
    pub caption: CaptionConfig,

    /// Editor API and timeline settings
    #[serde(default)]
    pub editor: EditorConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Story fetch configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoryConfig {
    /// User-Agent header sent when fetching story posts
    #[serde(default = "default_story_user_agent")]
    pub user_agent: String,

    /// Fetch timeout in seconds
    #[serde(default = "default_story_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            user_agent: default_story_user_agent(),
            timeout_secs: default_story_timeout_secs(),
        }
    }
}

/// Speech service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpeechConfig {
    /// Speech service endpoint URL
    #[serde(default = "default_speech_endpoint")]
    pub endpoint: String,

    /// Narrator gender marker, "f" or "m"
    #[serde(default = "default_speech_gender")]
    pub gender: String,

    /// Voice name within the selected gender
    #[serde(default = "default_speech_voice")]
    pub voice: String,

    /// Narration speed multiplier
    #[serde(default = "default_speech_speed")]
    pub speed: f64,

    /// Request timeout in seconds; synthesis of a full story is slow
    #[serde(default = "default_speech_timeout_secs")]
    pub timeout_secs: u64,
}

impl SpeechConfig {
    /// Wire voice id for the configured narrator, e.g. "af_heart"
    pub fn voice_id(&self) -> String {
        crate::providers::speech::voice_id(&self.gender, &self.voice)
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            endpoint: default_speech_endpoint(),
            gender: default_speech_gender(),
            voice: default_speech_voice(),
            speed: default_speech_speed(),
            timeout_secs: default_speech_timeout_secs(),
        }
    }
}

/// Configuration for subtitle generation
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SubtitleConfig {
    /// Words per subtitle cue; 1 gives the fast single-word caption style
    #[serde(default = "default_words_per_cue")]
    pub words_per_cue: usize,

    /// Burn-in styling passed to the editor
    #[serde(default)]
    pub style: SubtitleStyleConfig,
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            words_per_cue: default_words_per_cue(),
            style: SubtitleStyleConfig::default(),
        }
    }
}

/// Subtitle burn-in styling
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SubtitleStyleConfig {
    /// Font family name
    #[serde(default = "default_subtitle_font")]
    pub font: String,

    /// Font size in editor units
    #[serde(default = "default_subtitle_font_size")]
    pub font_size: f64,

    /// Font color as #RRGGBB
    #[serde(default = "default_subtitle_font_color")]
    pub font_color: String,

    /// Vertical position (-1.0 bottom to 1.0 top)
    #[serde(default = "default_subtitle_transform_y")]
    pub transform_y: f64,

    /// Uniform scale applied to the subtitle layer
    #[serde(default = "default_subtitle_scale")]
    pub scale: f64,

    /// Outline width in editor units
    #[serde(default = "default_subtitle_border_width")]
    pub border_width: f64,

    /// Outline color as #RRGGBB
    #[serde(default = "default_subtitle_border_color")]
    pub border_color: String,

    /// Outline opacity (0.0 to 1.0)
    #[serde(default = "default_subtitle_border_alpha")]
    pub border_alpha: f64,

    /// Whether to render bold
    #[serde(default = "default_true")]
    pub bold: bool,
}

impl SubtitleStyleConfig {
    /// Convert to the wire-level style sent to the editor
    pub fn to_style(&self) -> SubtitleStyle {
        SubtitleStyle {
            font: self.font.clone(),
            font_size: self.font_size,
            font_color: self.font_color.clone(),
            transform_y: self.transform_y,
            scale: self.scale,
            border_width: self.border_width,
            border_color: self.border_color.clone(),
            border_alpha: self.border_alpha,
            bold: self.bold,
        }
    }
}

impl Default for SubtitleStyleConfig {
    fn default() -> Self {
        Self {
            font: default_subtitle_font(),
            font_size: default_subtitle_font_size(),
            font_color: default_subtitle_font_color(),
            transform_y: default_subtitle_transform_y(),
            scale: default_subtitle_scale(),
            border_width: default_subtitle_border_width(),
            border_color: default_subtitle_border_color(),
            border_alpha: default_subtitle_border_alpha(),
            bold: true,
        }
    }
}

/// Caption configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CaptionConfig {
    /// Literal label prepended to every caption
    #[serde(default = "default_caption_label")]
    pub label: String,

    /// Maximum caption length in characters, label included
    #[serde(default = "default_caption_max_length")]
    pub max_length: usize,

    /// Space-delimited hashtag string appended after the title
    #[serde(default = "default_caption_hashtags")]
    pub hashtags: String,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            label: default_caption_label(),
            max_length: default_caption_max_length(),
            hashtags: default_caption_hashtags(),
        }
    }
}

/// Editor API and timeline configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EditorConfig {
    /// Editor API endpoint URL
    #[serde(default = "default_editor_endpoint")]
    pub endpoint: String,

    /// Canvas width in pixels
    #[serde(default = "default_canvas_width")]
    pub width: u32,

    /// Canvas height in pixels
    #[serde(default = "default_canvas_height")]
    pub height: u32,

    /// Request timeout in seconds
    #[serde(default = "default_editor_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry count for failed requests
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Backoff multiplier for retries (in milliseconds)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Workspace directory where the editor materializes saved drafts
    #[serde(default = "default_workspace_dir")]
    pub workspace_dir: String,

    /// Desktop editor's project directory for draft import; resolved
    /// relative to the home directory when unset
    #[serde(default)]
    pub draft_dir: Option<String>,

    /// Background video track settings
    #[serde(default)]
    pub background: BackgroundConfig,

    /// Title card track settings
    #[serde(default)]
    pub title_card: TitleCardConfig,

    /// Narration track settings
    #[serde(default)]
    pub voice_track: VoiceTrackConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_editor_endpoint(),
            width: default_canvas_width(),
            height: default_canvas_height(),
            timeout_secs: default_editor_timeout_secs(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            workspace_dir: default_workspace_dir(),
            draft_dir: None,
            background: BackgroundConfig::default(),
            title_card: TitleCardConfig::default(),
            voice_track: VoiceTrackConfig::default(),
        }
    }
}

/// Background video track settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BackgroundConfig {
    /// Track to place the background clip on
    #[serde(default = "default_background_track")]
    pub track_name: String,

    /// Background volume (0.0 to 1.0)
    #[serde(default = "default_background_volume")]
    pub volume: f64,

    /// Playback speed multiplier
    #[serde(default = "default_unit_speed")]
    pub speed: f64,

    /// Scale factor that crops the background to the vertical canvas
    #[serde(default = "default_background_scale")]
    pub scale: f64,

    /// Seconds excluded from the start of the source video when drawing a window
    #[serde(default = "default_background_lead_in")]
    pub lead_in_secs: f64,

    /// ffprobe timeout in seconds
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            track_name: default_background_track(),
            volume: default_background_volume(),
            speed: default_unit_speed(),
            scale: default_background_scale(),
            lead_in_secs: default_background_lead_in(),
            probe_timeout_secs: default_probe_timeout_secs(),
        }
    }
}

/// Title card track settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TitleCardConfig {
    /// Track to place the title card on
    #[serde(default = "default_title_card_track")]
    pub track_name: String,

    /// How long the title card stays on screen in seconds
    #[serde(default = "default_title_card_duration")]
    pub duration_secs: f64,

    /// Uniform scale applied to the card
    #[serde(default = "default_title_card_scale")]
    pub scale: f64,

    /// Path to the title card image; the card is skipped when unset
    #[serde(default)]
    pub image_path: Option<String>,
}

impl Default for TitleCardConfig {
    fn default() -> Self {
        Self {
            track_name: default_title_card_track(),
            duration_secs: default_title_card_duration(),
            scale: default_title_card_scale(),
            image_path: None,
        }
    }
}

/// Narration track settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VoiceTrackConfig {
    /// Track to place the narration on
    #[serde(default = "default_voice_track")]
    pub track_name: String,

    /// Narration volume (0.0 to 1.0)
    #[serde(default = "default_unit_volume")]
    pub volume: f64,

    /// Playback speed multiplier
    #[serde(default = "default_unit_speed")]
    pub speed: f64,

    /// Position of the narration on the timeline in seconds. Subtitle cues
    /// are shifted by the same amount so captions stay on the narration.
    #[serde(default)]
    pub target_start: f64,
}

impl Default for VoiceTrackConfig {
    fn default() -> Self {
        Self {
            track_name: default_voice_track(),
            volume: default_unit_volume(),
            speed: default_unit_speed(),
            target_start: 0.0,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_output_dir() -> String {
    "results".to_string()
}

fn default_story_user_agent() -> String {
    "storyreel:story_fetcher:v1.0".to_string()
}

fn default_story_timeout_secs() -> u64 {
    30
}

fn default_speech_endpoint() -> String {
    "http://localhost:8880".to_string()
}

fn default_speech_gender() -> String {
    "f".to_string()
}

fn default_speech_voice() -> String {
    "heart".to_string()
}

fn default_speech_speed() -> f64 {
    1.15
}

fn default_speech_timeout_secs() -> u64 {
    300 // Synthesizing several minutes of narration takes a while
}

fn default_words_per_cue() -> usize {
    1
}

fn default_subtitle_font() -> String {
    "Nunito".to_string()
}

fn default_subtitle_font_size() -> f64 {
    5.0
}

fn default_subtitle_font_color() -> String {
    "#FFFFFF".to_string()
}

fn default_subtitle_transform_y() -> f64 {
    -0.8
}

fn default_subtitle_scale() -> f64 {
    0.8
}

fn default_subtitle_border_width() -> f64 {
    70.0
}

fn default_subtitle_border_color() -> String {
    "#000000".to_string()
}

fn default_subtitle_border_alpha() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

fn default_caption_label() -> String {
    "[FULL STORY] ".to_string()
}

fn default_caption_max_length() -> usize {
    150
}

fn default_caption_hashtags() -> String {
    "#stories #reddit #storytime".to_string()
}

fn default_editor_endpoint() -> String {
    "http://localhost:9001".to_string()
}

fn default_canvas_width() -> u32 {
    1080
}

fn default_canvas_height() -> u32 {
    1920
}

fn default_editor_timeout_secs() -> u64 {
    30
}

fn default_retry_count() -> u32 {
    3 // Default to 3 retries
}

fn default_retry_backoff_ms() -> u64 {
    1000 // 1 second base backoff time, doubled on each retry
}

fn default_workspace_dir() -> String {
    "vectcut".to_string()
}

fn default_background_track() -> String {
    "main".to_string()
}

fn default_background_volume() -> f64 {
    0.2
}

fn default_unit_speed() -> f64 {
    1.0
}

fn default_unit_volume() -> f64 {
    1.0
}

fn default_background_scale() -> f64 {
    3.2 // Crops a 16:9 source to the 9:16 canvas
}

fn default_background_lead_in() -> f64 {
    5.0
}

fn default_probe_timeout_secs() -> u64 {
    60
}

fn default_title_card_track() -> String {
    "reddit_frame".to_string()
}

fn default_title_card_duration() -> f64 {
    3.0
}

fn default_title_card_scale() -> f64 {
    0.8
}

fn default_voice_track() -> String {
    "voice".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.editor.endpoint)
            .map_err(|e| anyhow!("Invalid editor endpoint '{}': {}", self.editor.endpoint, e))?;
        Url::parse(&self.speech.endpoint)
            .map_err(|e| anyhow!("Invalid speech endpoint '{}': {}", self.speech.endpoint, e))?;

        if self.subtitle.words_per_cue == 0 {
            return Err(anyhow!("subtitle.words_per_cue must be at least 1"));
        }

        if self.caption.max_length == 0 {
            return Err(anyhow!("caption.max_length must be at least 1"));
        }

        if self.speech.gender != "f" && self.speech.gender != "m" {
            return Err(anyhow!("speech.gender must be 'f' or 'm', got '{}'", self.speech.gender));
        }

        if self.speech.speed <= 0.0 {
            return Err(anyhow!("speech.speed must be positive"));
        }

        if self.editor.width == 0 || self.editor.height == 0 {
            return Err(anyhow!("editor canvas dimensions must be positive"));
        }

        if self.editor.background.speed <= 0.0 {
            return Err(anyhow!("editor.background.speed must be positive"));
        }

        if self.editor.voice_track.speed <= 0.0 {
            return Err(anyhow!("editor.voice_track.speed must be positive"));
        }

        if !(0.0..=1.0).contains(&self.editor.background.volume) {
            return Err(anyhow!("editor.background.volume must be between 0.0 and 1.0"));
        }

        if self.editor.background.lead_in_secs < 0.0 {
            return Err(anyhow!("editor.background.lead_in_secs must not be negative"));
        }

        if self.editor.title_card.duration_secs <= 0.0 {
            return Err(anyhow!("editor.title_card.duration_secs must be positive"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            output_dir: default_output_dir(),
            story: StoryConfig::default(),
            speech: SpeechConfig::default(),
            subtitle: SubtitleConfig::default(),
            caption: CaptionConfig::default(),
            editor: EditorConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
