/*!
 * Tests for caption fitting
 */

use storyreel::caption_builder::{build_caption, generate_caption};

#[test]
fn test_buildCaption_withinBudget_shouldKeepTitleAndHashtags() {
    let caption = build_caption("Short title", "#a #b #c", 150);
    assert_eq!(caption, "Short title #a #b #c");
}

#[test]
fn test_buildCaption_withTitleLongerThanBudget_shouldHardCutTitle() {
    let caption = build_caption("abcdefghij", "#x", 5);
    assert_eq!(caption, "abcde");
}

#[test]
fn test_buildCaption_withTitleExactlyAtBudget_shouldDropHashtags() {
    let caption = build_caption("abcdefghij", "#x", 10);
    assert_eq!(caption, "abcdefghij");
}

#[test]
fn test_buildCaption_withPartialHashtagRoom_shouldCropAtWordBoundary() {
    // Budget lands mid-hashtag; the cut must fall back to the last space
    let caption = build_caption("Hello", "#one #two #three", 12);
    assert_eq!(caption, "Hello #one");
}

#[test]
fn test_buildCaption_withNoRoomForAnyHashtag_shouldReturnTitleAlone() {
    // The crop point falls on the title/hashtag separator itself
    let caption = build_caption("Hello", "#one #two", 7);
    assert_eq!(caption, "Hello");
}

#[test]
fn test_buildCaption_onItsOwnCroppedOutput_shouldBeStable() {
    let hashtags = "#one #two #three";
    let first = build_caption("Hello", hashtags, 12);
    let second = build_caption(&first, hashtags, 12);
    assert_eq!(first, second);
}

#[test]
fn test_buildCaption_withMultibyteTitle_shouldCountCharactersNotBytes() {
    let caption = build_caption("ábcdé", "#x", 3);
    assert_eq!(caption, "ábc");
}

#[test]
fn test_buildCaption_withZeroBudget_shouldReturnEmpty() {
    let caption = build_caption("Title", "#x", 0);
    assert_eq!(caption, "");
}

#[test]
fn test_buildCaption_withWhitespacePaddedInputs_shouldTrimThem() {
    let caption = build_caption("  Title  ", " #a #b ", 150);
    assert_eq!(caption, "Title #a #b");
}

#[test]
fn test_generateCaption_withDefaults_shouldPrependLabel() {
    let caption = generate_caption("[FULL STORY] ", "My story", "#stories", 150);
    assert_eq!(caption, "[FULL STORY] My story #stories");
}

#[test]
fn test_generateCaption_withTightBudget_shouldFitLabelIncluded() {
    let label = "[FULL STORY] ";
    let caption = generate_caption(label, "A somewhat longer story title", "#one #two", 30);

    assert!(caption.starts_with(label));
    assert!(caption.chars().count() <= 30);
}

#[test]
fn test_generateCaption_withBudgetSmallerThanLabel_shouldReturnBareLabel() {
    let label = "[FULL STORY] ";
    let caption = generate_caption(label, "Title", "#x", 5);
    assert_eq!(caption, label);
}
