use std::fs;
use std::path::Path;
use anyhow::{Result, Context};
use serde::{Deserialize, Serialize};

// @module: Word-level alignment model produced by the speech aligner

/// One transcribed word with its start and end time in seconds.
///
/// Word text is kept verbatim, including any whitespace or punctuation the
/// aligner attached. Timestamps are trusted as delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordTiming {
    /// The word as recognized
    #[serde(rename = "word")]
    pub text: String,

    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,
}

impl WordTiming {
    /// Creates a new word timing
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        WordTiming {
            text: text.into(),
            start,
            end,
        }
    }
}

/// One recognized speech unit holding its aligned words
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlignedSegment {
    /// Words in temporal order
    #[serde(default)]
    pub words: Vec<WordTiming>,
}

/// Full alignment result for one narration track
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcription {
    /// Segments in temporal order
    #[serde(default)]
    pub segments: Vec<AlignedSegment>,
}

impl Transcription {
    /// Parse an alignment result from its JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse alignment JSON")
    }

    /// Load an alignment result from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read alignment file: {:?}", path.as_ref()))?;
        Self::from_json_str(&content)
    }

    /// Flatten all segment word lists into one ordered sequence.
    ///
    /// Order is preserved exactly as the aligner emitted it; nothing is
    /// re-sorted.
    pub fn flatten_words(&self) -> Vec<WordTiming> {
        self.segments
            .iter()
            .flat_map(|segment| segment.words.iter().cloned())
            .collect()
    }

    /// Total number of aligned words across all segments
    pub fn word_count(&self) -> usize {
        self.segments.iter().map(|segment| segment.words.len()).sum()
    }
}
