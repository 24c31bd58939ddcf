use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use anyhow::{Result, anyhow, Context};
use log::{error, debug};
use parking_lot::RwLock;
use serde_json::Value;
use tokio::process::Command;

// @module: Media duration probing with a per-path memo cache

/// Probes media files for their duration via ffprobe.
///
/// Background videos are probed once per run even when several stories draw
/// windows from the same file, so results are memoized per path.
pub struct MediaProbe {
    /// Probed durations by absolute path
    cache: Arc<RwLock<HashMap<PathBuf, f64>>>,

    /// Cache hit counter
    hits: Arc<RwLock<usize>>,

    /// Cache miss counter
    misses: Arc<RwLock<usize>>,

    /// Probe timeout in seconds
    timeout_secs: u64,
}

impl MediaProbe {
    /// Create a new probe with the given timeout
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(RwLock::new(0)),
            misses: Arc::new(RwLock::new(0)),
            timeout_secs,
        }
    }

    /// Duration of a media file in seconds
    pub async fn duration_seconds<P: AsRef<Path>>(&self, path: P) -> Result<f64> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(anyhow!("Media file not found: {:?}", path));
        }

        {
            let cache = self.cache.read();
            if let Some(duration) = cache.get(path) {
                let mut hits = self.hits.write();
                *hits += 1;
                debug!("Probe cache hit for {:?}: {:.3}s", path, duration);
                return Ok(*duration);
            }
        }

        {
            let mut misses = self.misses.write();
            *misses += 1;
        }

        let duration = Self::probe_duration(path, self.timeout_secs).await?;

        let mut cache = self.cache.write();
        cache.insert(path.to_path_buf(), duration);

        Ok(duration)
    }

    /// Cache statistics as (hits, misses)
    pub fn stats(&self) -> (usize, usize) {
        (*self.hits.read(), *self.misses.read())
    }

    /// Run ffprobe against a file and parse the format duration
    async fn probe_duration(path: &Path, timeout_secs: u64) -> Result<f64> {
        // Add timeout to prevent hanging on problematic files
        let ffprobe_future = Command::new("ffprobe")
            .args([
                "-v", "error",
                "-show_entries", "format=duration",
                "-of", "json",
                path.to_str().unwrap_or(""),
            ])
            .output();

        let timeout_duration = std::time::Duration::from_secs(timeout_secs);
        let output = tokio::select! {
            result = ffprobe_future => {
                result.map_err(|e| anyhow!("Failed to execute ffprobe command: {}", e))?
            },
            _ = tokio::time::sleep(timeout_duration) => {
                return Err(anyhow!("ffprobe command timed out after {} seconds", timeout_secs));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("ffprobe failed: {}", stderr);
            return Err(anyhow!("ffprobe command failed: {}", stderr));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let json: Value = serde_json::from_str(&stdout)
            .context("Failed to parse ffprobe JSON output")?;

        let duration_str = json
            .get("format")
            .and_then(|f| f.get("duration"))
            .and_then(|d| d.as_str())
            .ok_or_else(|| anyhow!("ffprobe output has no format duration for {:?}", path))?;

        duration_str
            .parse::<f64>()
            .with_context(|| format!("Invalid duration '{}' from ffprobe", duration_str))
    }
}

impl Default for MediaProbe {
    fn default() -> Self {
        Self::new(60)
    }
}
