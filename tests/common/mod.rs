/*!
 * Common test utilities for the storyreel test suite
 */

use std::path::PathBuf;
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

use storyreel::alignment::{Transcription, WordTiming};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Word timings for a short three-word narration
pub fn sample_words() -> Vec<WordTiming> {
    vec![
        WordTiming::new("Hello", 0.0, 0.5),
        WordTiming::new("world", 0.5, 1.0),
        WordTiming::new("today", 1.0, 1.6),
    ]
}

/// Alignment JSON in the shape the speech service returns
pub fn sample_alignment_json() -> &'static str {
    r#"{
  "segments": [
    {
      "words": [
        {"word": "Hello", "start": 0.0, "end": 0.5},
        {"word": "world", "start": 0.5, "end": 1.0}
      ]
    },
    {
      "words": [
        {"word": "today", "start": 1.0, "end": 1.6}
      ]
    }
  ]
}"#
}

/// Creates a sample alignment file for testing
pub fn create_test_alignment(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, sample_alignment_json())
}

/// Parses the sample alignment JSON into a transcription
pub fn sample_transcription() -> Transcription {
    Transcription::from_json_str(sample_alignment_json()).expect("sample alignment should parse")
}
