/*!
 * Tests for the service client implementations
 */

use anyhow::Result;
use storyreel::providers::RemoteService;
use storyreel::providers::editor::{AddAudioRequest, AddVideoRequest, EditorClient, SubtitleStyle};
use storyreel::providers::speech::{voice_id, SpeechClient};

#[test]
fn test_voiceId_withGenderAndName_shouldComposeWireId() {
    assert_eq!(voice_id("f", "heart"), "af_heart");
    assert_eq!(voice_id("m", "adam"), "am_adam");
}

#[test]
fn test_editorClient_withValidEndpoint_shouldTrimTrailingSlash() -> Result<()> {
    let client = EditorClient::new("http://localhost:9001/", 30)?;
    assert_eq!(client.endpoint(), "http://localhost:9001");

    let client = EditorClient::new("http://localhost:9001", 30)?;
    assert_eq!(client.endpoint(), "http://localhost:9001");
    Ok(())
}

#[test]
fn test_editorClient_withInvalidEndpoint_shouldFail() {
    assert!(EditorClient::new("not a url", 30).is_err());
    assert!(EditorClient::new("", 30).is_err());
}

#[test]
fn test_editorClient_name_shouldIdentifyService() -> Result<()> {
    let client = EditorClient::new("http://localhost:9001", 30)?;
    assert_eq!(client.name(), "Editor");
    Ok(())
}

#[test]
fn test_speechClient_withValidEndpoint_shouldTrimTrailingSlash() -> Result<()> {
    let client = SpeechClient::new("http://localhost:8880/", 300)?;
    assert_eq!(client.endpoint(), "http://localhost:8880");
    Ok(())
}

#[test]
fn test_speechClient_withInvalidEndpoint_shouldFail() {
    assert!(SpeechClient::new("::nope::", 300).is_err());
}

#[test]
fn test_speechClient_name_shouldIdentifyService() -> Result<()> {
    let client = SpeechClient::new("http://localhost:8880", 300)?;
    assert_eq!(client.name(), "Speech");
    Ok(())
}

#[test]
fn test_addVideoRequest_withoutTrimWindow_shouldOmitStartAndEnd() -> Result<()> {
    let request = AddVideoRequest {
        draft_id: "abc".to_string(),
        video_url: "/videos/bg.mp4".to_string(),
        track_name: "main".to_string(),
        speed: 1.0,
        scale_x: 3.2,
        scale_y: 3.2,
        volume: 0.2,
        target_start: 0.0,
        relative_index: 0,
        start: None,
        end: None,
    };

    let json = serde_json::to_value(&request)?;
    assert!(json.get("start").is_none());
    assert!(json.get("end").is_none());
    assert_eq!(json["track_name"], "main");
    Ok(())
}

#[test]
fn test_addVideoRequest_withTrimWindow_shouldIncludeStartAndEnd() -> Result<()> {
    let request = AddVideoRequest {
        draft_id: "abc".to_string(),
        video_url: "/videos/bg.mp4".to_string(),
        track_name: "main".to_string(),
        speed: 1.0,
        scale_x: 3.2,
        scale_y: 3.2,
        volume: 0.2,
        target_start: 0.0,
        relative_index: 0,
        start: Some(12.0),
        end: Some(72.0),
    };

    let json = serde_json::to_value(&request)?;
    assert_eq!(json["start"], 12.0);
    assert_eq!(json["end"], 72.0);
    Ok(())
}

#[test]
fn test_addAudioRequest_withoutEnd_shouldOmitEndField() -> Result<()> {
    let request = AddAudioRequest {
        draft_id: "abc".to_string(),
        audio_url: "/audio/narration.wav".to_string(),
        start: 0.0,
        target_start: 0.0,
        volume: 1.0,
        speed: 1.0,
        track_name: "voice".to_string(),
        end: None,
    };

    let json = serde_json::to_value(&request)?;
    assert!(json.get("end").is_none());
    assert_eq!(json["track_name"], "voice");
    Ok(())
}

#[test]
fn test_subtitleStyle_serialize_shouldCarryAllStylingFields() -> Result<()> {
    let style = SubtitleStyle {
        font: "Nunito".to_string(),
        font_size: 5.0,
        font_color: "#FFFFFF".to_string(),
        transform_y: -0.8,
        scale: 0.8,
        border_width: 70.0,
        border_color: "#000000".to_string(),
        border_alpha: 1.0,
        bold: true,
    };

    let json = serde_json::to_value(&style)?;
    assert_eq!(json["font"], "Nunito");
    assert_eq!(json["transform_y"], -0.8);
    assert_eq!(json["bold"], true);
    Ok(())
}
