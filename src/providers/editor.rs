use std::time::Duration;
use async_trait::async_trait;
use log::{error, debug};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::errors::ServiceError;
use crate::providers::RemoteService;

/// Client for the video-editing automation API
///
/// The API takes a timeline apart: a draft is created first, then clips are
/// attached to named tracks one request at a time, then the draft is saved
/// into a workspace folder. Every endpoint answers the same JSON envelope
/// `{"success": bool, "error": string, "output": object}`.
#[derive(Debug)]
pub struct EditorClient {
    /// Base URL of the editor API
    base_url: String,
    /// HTTP client for making requests
    client: Client,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

/// Request for creating a new draft project
#[derive(Debug, Serialize)]
pub struct CreateDraftRequest {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
}

/// Request for attaching a video clip to a draft track
#[derive(Debug, Serialize)]
pub struct AddVideoRequest {
    /// Draft the clip belongs to
    pub draft_id: String,
    /// Path or URL of the source video
    pub video_url: String,
    /// Track to place the clip on
    pub track_name: String,
    /// Playback speed multiplier
    pub speed: f64,
    /// Horizontal scale factor
    pub scale_x: f64,
    /// Vertical scale factor
    pub scale_y: f64,
    /// Clip volume (0.0 to 1.0)
    pub volume: f64,
    /// Position on the timeline in seconds
    pub target_start: f64,
    /// Layering index within the track
    pub relative_index: i32,
    /// Trim start within the source in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    /// Trim end within the source in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
}

/// Request for attaching a still image to a draft track
#[derive(Debug, Serialize)]
pub struct AddImageRequest {
    /// Draft the clip belongs to
    pub draft_id: String,
    /// Path or URL of the source image
    pub image_url: String,
    /// Track to place the clip on
    pub track_name: String,
    /// Horizontal scale factor
    pub scale_x: f64,
    /// Vertical scale factor
    pub scale_y: f64,
    /// Timeline start in seconds
    pub start: f64,
    /// Timeline end in seconds
    pub end: f64,
    /// Layering index within the track
    pub relative_index: i32,
}

/// Request for attaching an audio clip to a draft track
#[derive(Debug, Serialize)]
pub struct AddAudioRequest {
    /// Draft the clip belongs to
    pub draft_id: String,
    /// Path or URL of the source audio
    pub audio_url: String,
    /// Trim start within the source in seconds
    pub start: f64,
    /// Position on the timeline in seconds
    pub target_start: f64,
    /// Clip volume (0.0 to 1.0)
    pub volume: f64,
    /// Playback speed multiplier
    pub speed: f64,
    /// Track to place the clip on
    pub track_name: String,
    /// Trim end within the source in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
}

/// Styling for burned-in subtitles, passed through to the editor verbatim
#[derive(Debug, Clone, Serialize)]
pub struct SubtitleStyle {
    /// Font family name
    pub font: String,
    /// Font size in editor units
    pub font_size: f64,
    /// Font color as #RRGGBB
    pub font_color: String,
    /// Vertical position (-1.0 bottom to 1.0 top)
    pub transform_y: f64,
    /// Uniform scale applied to the subtitle layer
    pub scale: f64,
    /// Outline width in editor units
    pub border_width: f64,
    /// Outline color as #RRGGBB
    pub border_color: String,
    /// Outline opacity (0.0 to 1.0)
    pub border_alpha: f64,
    /// Whether to render bold
    pub bold: bool,
}

/// Request for burning an SRT track into a draft
#[derive(Debug, Serialize)]
struct AddSubtitleRequest<'a> {
    draft_id: &'a str,
    srt: &'a str,
    time_offset: f64,
    font: &'a str,
    font_size: f64,
    font_color: &'a str,
    transform_y: f64,
    scale_x: f64,
    scale_y: f64,
    border_width: f64,
    border_color: &'a str,
    border_alpha: f64,
    bold: bool,
}

/// Request for saving a draft into a workspace folder
#[derive(Debug, Serialize)]
struct SaveDraftRequest<'a> {
    draft_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    draft_folder: Option<&'a str>,
}

impl EditorClient {
    /// Create a new editor client for the given base URL
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Result<Self, ServiceError> {
        Self::new_with_retries(endpoint, timeout_secs, 3, 1000)
    }

    /// Create a new editor client with explicit retry configuration
    pub fn new_with_retries(
        endpoint: impl Into<String>,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ServiceError> {
        let endpoint = endpoint.into();
        let url = Url::parse(&endpoint)
            .map_err(|e| ServiceError::ConnectionError(format!("Invalid editor endpoint '{}': {}", endpoint, e)))?;

        Ok(Self {
            base_url: url.as_str().trim_end_matches('/').to_string(),
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            max_retries,
            backoff_base_ms,
        })
    }

    /// Base URL this client talks to
    pub fn endpoint(&self) -> &str {
        &self.base_url
    }

    /// Create a new draft project and return its draft id
    pub async fn create_draft(&self, width: u32, height: u32) -> Result<String, ServiceError> {
        let output = self
            .post_envelope("create_draft", &CreateDraftRequest { width, height })
            .await?;

        output
            .get("draft_id")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| ServiceError::ParseError("create_draft output is missing draft_id".to_string()))
    }

    /// Attach a video clip to the draft
    pub async fn add_video(&self, request: &AddVideoRequest) -> Result<(), ServiceError> {
        self.post_envelope("add_video", request).await?;
        Ok(())
    }

    /// Attach a still image to the draft
    pub async fn add_image(&self, request: &AddImageRequest) -> Result<(), ServiceError> {
        self.post_envelope("add_image", request).await?;
        Ok(())
    }

    /// Attach an audio clip to the draft
    pub async fn add_audio(&self, request: &AddAudioRequest) -> Result<(), ServiceError> {
        self.post_envelope("add_audio", request).await?;
        Ok(())
    }

    /// Burn an SRT subtitle file into the draft with the given styling.
    ///
    /// Cue times are already baked into the SRT by the subtitle builder, so
    /// the wire-level `time_offset` is always zero here.
    pub async fn add_subtitle(
        &self,
        draft_id: &str,
        srt_path: &str,
        style: &SubtitleStyle,
    ) -> Result<(), ServiceError> {
        let request = AddSubtitleRequest {
            draft_id,
            srt: srt_path,
            time_offset: 0.0,
            font: &style.font,
            font_size: style.font_size,
            font_color: &style.font_color,
            transform_y: style.transform_y,
            scale_x: style.scale,
            scale_y: style.scale,
            border_width: style.border_width,
            border_color: &style.border_color,
            border_alpha: style.border_alpha,
            bold: style.bold,
        };
        self.post_envelope("add_subtitle", &request).await?;
        Ok(())
    }

    /// Save the draft, optionally materializing it under a target folder
    pub async fn save_draft(&self, draft_id: &str, draft_folder: Option<&str>) -> Result<(), ServiceError> {
        let request = SaveDraftRequest { draft_id, draft_folder };
        self.post_envelope("save_draft", &request).await?;
        Ok(())
    }

    /// POST a payload to an endpoint and unwrap the response envelope.
    ///
    /// Network failures and 5xx responses are retried with exponential
    /// backoff; 4xx responses and envelope-level rejections are final.
    async fn post_envelope<T: Serialize>(&self, endpoint: &str, payload: &T) -> Result<Value, ServiceError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let mut attempt = 0;
        let mut last_error = None;

        while attempt <= self.max_retries {
            let response_result = self.client.post(&url).json(payload).send().await;

            match response_result {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let envelope: Value = response
                            .json()
                            .await
                            .map_err(|e| ServiceError::ParseError(format!("{} returned invalid JSON: {}", endpoint, e)))?;

                        let success = envelope.get("success").and_then(|v| v.as_bool()).unwrap_or(false);
                        if !success {
                            let message = envelope
                                .get("error")
                                .and_then(|v| v.as_str())
                                .unwrap_or("Unknown error")
                                .to_string();
                            return Err(ServiceError::Rejected(format!("{}: {}", endpoint, message)));
                        }

                        debug!("Editor call succeeded: {}", endpoint);
                        return Ok(envelope.get("output").cloned().unwrap_or(Value::Null));
                    } else if status.is_server_error() {
                        // Server error - can retry
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Failed to get error response text".to_string());
                        error!(
                            "Editor API error ({}): {} - attempt {}/{}",
                            status, error_text, attempt + 1, self.max_retries + 1
                        );
                        last_error = Some(ServiceError::ApiError {
                            status_code: status.as_u16(),
                            message: error_text,
                        });
                    } else {
                        // Client error - don't retry
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Failed to get error response text".to_string());
                        error!("Editor API error ({}): {}", status, error_text);
                        return Err(ServiceError::ApiError {
                            status_code: status.as_u16(),
                            message: error_text,
                        });
                    }
                }
                Err(e) => {
                    // Network error - can retry
                    error!(
                        "Editor API network error: {} - attempt {}/{}",
                        e, attempt + 1, self.max_retries + 1
                    );
                    last_error = Some(ServiceError::RequestFailed(format!("Request to {} failed: {}", endpoint, e)));
                }
            }

            attempt += 1;

            if attempt <= self.max_retries {
                let backoff_ms = self.backoff_base_ms * (1u64 << (attempt - 1));
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ServiceError::RequestFailed(format!(
                "Request to {} failed after {} attempts",
                endpoint,
                self.max_retries + 1
            ))
        }))
    }
}

#[async_trait]
impl RemoteService for EditorClient {
    fn name(&self) -> &str {
        "Editor"
    }

    /// Any HTTP answer from the base URL counts as reachable; the editor API
    /// has no dedicated health endpoint.
    async fn health_check(&self) -> Result<(), ServiceError> {
        self.client
            .get(&self.base_url)
            .send()
            .await
            .map_err(|e| ServiceError::ConnectionError(format!("Editor unreachable at {}: {}", self.base_url, e)))?;
        Ok(())
    }
}
