use std::path::Path;
use anyhow::{Result, Context};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ServiceError;
use crate::file_utils::FileManager;

// @module: Story acquisition and narration text assembly

/// One story to narrate: a title and a body text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    /// Story title, used for the caption and the title card
    pub title: String,

    /// Story body, read by the narrator after the title
    #[serde(default)]
    pub body: String,
}

impl Story {
    /// Creates a new story
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Story {
            title: title.into(),
            body: body.into(),
        }
    }

    /// The full text handed to the narrator.
    ///
    /// The voice reads the title first, then the body; the title card overlay
    /// covers the title read-out period in the composed video.
    pub fn narration_text(&self) -> String {
        if self.body.trim().is_empty() {
            self.title.trim().to_string()
        } else {
            format!("{}\n\n{}", self.title.trim(), self.body.trim())
        }
    }

    /// Load a story from a local file.
    ///
    /// JSON files must carry a `title` field and may carry a `body`. Plain
    /// text files use their first non-empty line as the title and the rest as
    /// the body.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;

        let is_json = path
            .extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse story file: {:?}", path))
        } else {
            Self::from_text(&content)
                .with_context(|| format!("Story file has no content: {:?}", path))
        }
    }

    /// Parse a plain-text story: first non-empty line is the title
    pub fn from_text(content: &str) -> Result<Self> {
        let mut lines = content.lines();
        let title = lines
            .by_ref()
            .find(|line| !line.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("Story text is empty"))?;

        let body = lines.collect::<Vec<_>>().join("\n");
        Ok(Story::new(title.trim(), body.trim()))
    }
}

/// Fetch a story from a reddit-style post URL.
///
/// The post's JSON view is requested by appending `.json` to the URL, and the
/// title and selftext are pulled out of the first child of the first listing.
pub async fn fetch_story(url: &str, user_agent: &str, timeout_secs: u64) -> Result<Story, ServiceError> {
    if !url.starts_with("http") {
        return Err(ServiceError::RequestFailed(format!("Invalid story URL: {}", url)));
    }

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_default();

    let json_url = format!("{}.json", url.trim_end_matches('/'));
    debug!("Fetching story from {}", json_url);

    let response = client
        .get(&json_url)
        .header("User-Agent", user_agent)
        .send()
        .await
        .map_err(|e| ServiceError::RequestFailed(format!("Story fetch failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ServiceError::ApiError {
            status_code: status.as_u16(),
            message: format!("Story fetch returned {}", status),
        });
    }

    let data: Value = response
        .json()
        .await
        .map_err(|e| ServiceError::ParseError(format!("Story response is not valid JSON: {}", e)))?;

    let post = data
        .get(0)
        .and_then(|listing| listing.get("data"))
        .and_then(|d| d.get("children"))
        .and_then(|children| children.get(0))
        .and_then(|child| child.get("data"))
        .ok_or_else(|| ServiceError::ParseError("Story response has no post data".to_string()))?;

    let title = post.get("title").and_then(|v| v.as_str()).unwrap_or("").to_string();
    let body = post.get("selftext").and_then(|v| v.as_str()).unwrap_or("").to_string();

    if title.is_empty() {
        return Err(ServiceError::ParseError("Story post has no title".to_string()));
    }

    Ok(Story::new(title, body))
}
