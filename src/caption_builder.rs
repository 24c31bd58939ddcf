// @module: Length-bounded caption assembly for published videos

/// Fit a title and a space-delimited hashtag string into a character budget.
///
/// The trimmed title always wins over hashtags: a title at or over the
/// budget is hard-cut to exactly `max_length` characters and the hashtags
/// are dropped. Otherwise hashtags are appended after a single space and the
/// result is cut back to the last whole hashtag that fits; when not even one
/// fits, the title is returned alone. Lengths are counted in characters, so
/// multi-byte text never splits inside a code point.
///
/// Every input yields a caption; `max_length == 0` yields an empty one.
pub fn build_caption(title: &str, hashtags: &str, max_length: usize) -> String {
    let title = title.trim();
    let title_len = title.chars().count();
    if title_len >= max_length {
        return title.chars().take(max_length).collect();
    }

    let combined = format!("{} {}", title, hashtags.trim());
    let combined_chars: Vec<char> = combined.chars().collect();
    if combined_chars.len() <= max_length {
        return combined;
    }

    let cropped = &combined_chars[..max_length];
    // A last space at or before the title boundary means no hashtag survives the crop
    match cropped.iter().rposition(|&c| c == ' ') {
        Some(last_space) if last_space > title_len => cropped[..last_space].iter().collect(),
        _ => title.to_string(),
    }
}

/// Build the final caption with a fixed leading label.
///
/// The label is prepended verbatim and its length is reserved out of the
/// budget before the title and hashtags are fitted. A budget smaller than
/// the label leaves nothing for the body, so the caption degrades to the
/// bare label.
pub fn generate_caption(label: &str, title: &str, hashtags: &str, max_length: usize) -> String {
    let body_budget = max_length.saturating_sub(label.chars().count());
    format!("{}{}", label, build_caption(title, hashtags, body_budget))
}
