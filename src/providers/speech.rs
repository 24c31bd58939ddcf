use std::time::Duration;
use async_trait::async_trait;
use bytes::Bytes;
use log::{error, debug};
use reqwest::Client;
use serde::Serialize;
use url::Url;

use crate::alignment::Transcription;
use crate::errors::ServiceError;
use crate::providers::RemoteService;

/// Client for the speech service
///
/// The service synthesizes narration audio from text and aligns finished
/// audio back to word-level timestamps. Voices are addressed by a compact id
/// of the form `a<gender>_<name>`, e.g. `af_heart` or `am_adam`.
#[derive(Debug)]
pub struct SpeechClient {
    /// Base URL of the speech service
    base_url: String,
    /// HTTP client for making requests
    client: Client,
}

/// Synthesis request sent to the speech service
#[derive(Debug, Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
    voice: &'a str,
    speed: f64,
}

/// Alignment request sent to the speech service
#[derive(Debug, Serialize)]
struct AlignRequest<'a> {
    audio_url: &'a str,
}

/// Build the wire voice id from a gender marker and a voice name
pub fn voice_id(gender: &str, name: &str) -> String {
    format!("a{}_{}", gender, name)
}

impl SpeechClient {
    /// Create a new speech client for the given base URL.
    ///
    /// Synthesis of a full story takes a while, so the timeout should be
    /// generous compared to ordinary API calls.
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Result<Self, ServiceError> {
        let endpoint = endpoint.into();
        let url = Url::parse(&endpoint)
            .map_err(|e| ServiceError::ConnectionError(format!("Invalid speech endpoint '{}': {}", endpoint, e)))?;

        Ok(Self {
            base_url: url.as_str().trim_end_matches('/').to_string(),
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
        })
    }

    /// Base URL this client talks to
    pub fn endpoint(&self) -> &str {
        &self.base_url
    }

    /// Synthesize narration audio and return the WAV payload
    pub async fn synthesize(&self, text: &str, voice: &str, speed: f64) -> Result<Bytes, ServiceError> {
        let url = format!("{}/synthesize", self.base_url);
        let request = SynthesizeRequest { text, voice, speed };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ServiceError::RequestFailed(format!("Synthesis request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Speech API error ({}): {}", status, error_text);
            return Err(ServiceError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| ServiceError::ParseError(format!("Failed to read synthesized audio: {}", e)))?;

        debug!("Synthesized {} bytes of narration audio", audio.len());
        Ok(audio)
    }

    /// Align a narration file to word-level timestamps
    pub async fn align(&self, audio_path: &str) -> Result<Transcription, ServiceError> {
        let url = format!("{}/align", self.base_url);
        let request = AlignRequest { audio_url: audio_path };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ServiceError::RequestFailed(format!("Alignment request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Speech API error ({}): {}", status, error_text);
            return Err(ServiceError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        response
            .json::<Transcription>()
            .await
            .map_err(|e| ServiceError::ParseError(format!("Failed to parse alignment response: {}", e)))
    }
}

#[async_trait]
impl RemoteService for SpeechClient {
    fn name(&self) -> &str {
        "Speech"
    }

    async fn health_check(&self) -> Result<(), ServiceError> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ServiceError::ConnectionError(format!("Speech service unreachable at {}: {}", self.base_url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::ApiError {
                status_code: status.as_u16(),
                message: "Health check failed".to_string(),
            });
        }
        Ok(())
    }
}
