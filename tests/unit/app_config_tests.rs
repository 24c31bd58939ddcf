/*!
 * Tests for application configuration
 */

use anyhow::Result;
use storyreel::app_config::{Config, LogLevel};

#[test]
fn test_defaultConfig_shouldCarryExpectedEndpointsAndTracks() {
    let config = Config::default();

    assert_eq!(config.output_dir, "results");
    assert_eq!(config.editor.endpoint, "http://localhost:9001");
    assert_eq!(config.speech.endpoint, "http://localhost:8880");
    assert_eq!(config.editor.width, 1080);
    assert_eq!(config.editor.height, 1920);
    assert_eq!(config.editor.workspace_dir, "vectcut");
    assert_eq!(config.editor.background.track_name, "main");
    assert_eq!(config.editor.title_card.track_name, "reddit_frame");
    assert_eq!(config.editor.voice_track.track_name, "voice");
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_defaultConfig_shouldCarryExpectedGenerationSettings() {
    let config = Config::default();

    assert_eq!(config.subtitle.words_per_cue, 1);
    assert_eq!(config.editor.voice_track.target_start, 0.0);
    assert_eq!(config.subtitle.style.font, "Nunito");
    assert_eq!(config.caption.label, "[FULL STORY] ");
    assert_eq!(config.caption.max_length, 150);
    assert_eq!(config.caption.hashtags, "#stories #reddit #storytime");
    assert_eq!(config.speech.speed, 1.15);
    assert_eq!(config.speech.voice_id(), "af_heart");
    assert_eq!(config.editor.background.lead_in_secs, 5.0);
    assert_eq!(config.editor.title_card.duration_secs, 3.0);
}

#[test]
fn test_deserialize_withEmptyObject_shouldFillEveryDefault() -> Result<()> {
    let config: Config = serde_json::from_str("{}")?;

    assert_eq!(config.editor.endpoint, Config::default().editor.endpoint);
    assert_eq!(config.caption.max_length, 150);
    assert_eq!(config.editor.retry_count, 3);
    assert_eq!(config.editor.retry_backoff_ms, 1000);
    Ok(())
}

#[test]
fn test_deserialize_withPartialSections_shouldKeepOtherDefaults() -> Result<()> {
    let json = r#"{
        "speech": {"gender": "m", "voice": "adam"},
        "subtitle": {"words_per_cue": 3}
    }"#;
    let config: Config = serde_json::from_str(json)?;

    assert_eq!(config.speech.voice_id(), "am_adam");
    assert_eq!(config.speech.speed, 1.15);
    assert_eq!(config.subtitle.words_per_cue, 3);
    assert_eq!(config.subtitle.style.font_color, "#FFFFFF");
    Ok(())
}

#[test]
fn test_serializeDeserialize_shouldRoundTrip() -> Result<()> {
    let mut config = Config::default();
    config.caption.hashtags = "#custom".to_string();
    config.editor.title_card.image_path = Some("cards/frame.png".to_string());

    let json = serde_json::to_string(&config)?;
    let parsed: Config = serde_json::from_str(&json)?;

    assert_eq!(parsed.caption.hashtags, "#custom");
    assert_eq!(parsed.editor.title_card.image_path.as_deref(), Some("cards/frame.png"));
    Ok(())
}

#[test]
fn test_validate_withDefaultConfig_shouldSucceed() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_validate_withInvalidEndpoint_shouldFail() {
    let mut config = Config::default();
    config.editor.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withZeroWordsPerCue_shouldFail() {
    let mut config = Config::default();
    config.subtitle.words_per_cue = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withZeroCaptionLength_shouldFail() {
    let mut config = Config::default();
    config.caption.max_length = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withUnknownGender_shouldFail() {
    let mut config = Config::default();
    config.speech.gender = "x".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withZeroBackgroundSpeed_shouldFail() {
    let mut config = Config::default();
    config.editor.background.speed = 0.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withNegativeVoiceTrackSpeed_shouldFail() {
    let mut config = Config::default();
    config.editor.voice_track.speed = -1.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withOutOfRangeBackgroundVolume_shouldFail() {
    let mut config = Config::default();
    config.editor.background.volume = 1.5;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withNegativeLeadIn_shouldFail() {
    let mut config = Config::default();
    config.editor.background.lead_in_secs = -1.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_logLevel_serde_shouldUseLowercaseNames() -> Result<()> {
    let level: LogLevel = serde_json::from_str("\"debug\"")?;
    assert_eq!(level, LogLevel::Debug);
    assert_eq!(serde_json::to_string(&LogLevel::Warn)?, "\"warn\"");
    Ok(())
}
