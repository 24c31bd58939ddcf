/*!
 * Tests for word alignment parsing
 */

use anyhow::Result;
use storyreel::alignment::Transcription;
use crate::common;

#[test]
fn test_fromJsonStr_withServiceOutput_shouldParseSegmentsAndWords() -> Result<()> {
    let transcription = Transcription::from_json_str(common::sample_alignment_json())?;

    assert_eq!(transcription.segments.len(), 2);
    assert_eq!(transcription.segments[0].words.len(), 2);
    assert_eq!(transcription.segments[0].words[0].text, "Hello");
    assert_eq!(transcription.segments[0].words[0].start, 0.0);
    assert_eq!(transcription.segments[0].words[0].end, 0.5);
    Ok(())
}

#[test]
fn test_flattenWords_acrossSegments_shouldPreserveOrder() {
    let transcription = common::sample_transcription();
    let words: Vec<String> = transcription
        .flatten_words()
        .into_iter()
        .map(|w| w.text)
        .collect();

    assert_eq!(words, vec!["Hello", "world", "today"]);
}

#[test]
fn test_wordCount_withSampleAlignment_shouldCountAcrossSegments() {
    let transcription = common::sample_transcription();
    assert_eq!(transcription.word_count(), 3);
}

#[test]
fn test_fromJsonStr_withMissingSegments_shouldGiveEmptyTranscription() -> Result<()> {
    let transcription = Transcription::from_json_str("{}")?;

    assert!(transcription.segments.is_empty());
    assert_eq!(transcription.word_count(), 0);
    Ok(())
}

#[test]
fn test_fromJsonStr_withExtraFields_shouldIgnoreThem() -> Result<()> {
    let json = r#"{
        "segments": [
            {"text": "hi there", "words": [{"word": "hi", "start": 0.0, "end": 0.2, "score": 0.99}]}
        ],
        "language": "en"
    }"#;
    let transcription = Transcription::from_json_str(json)?;

    assert_eq!(transcription.word_count(), 1);
    assert_eq!(transcription.segments[0].words[0].text, "hi");
    Ok(())
}

#[test]
fn test_fromJsonStr_withMalformedJson_shouldFail() {
    assert!(Transcription::from_json_str("not json").is_err());
}

#[test]
fn test_fromFile_withAlignmentFile_shouldRoundTripThroughDisk() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_alignment(&temp_dir.path().to_path_buf(), "alignment.json")?;

    let transcription = Transcription::from_file(&path)?;
    assert_eq!(transcription.word_count(), 3);
    Ok(())
}
