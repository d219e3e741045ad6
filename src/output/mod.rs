// Output formatting: CSV export and terminal display.

pub mod csv;
pub mod terminal;

/// Cut a candidate word down to `max_chars` characters, appending "..." when
/// shortened, so one long token (a URL or a run-together word from a review)
/// doesn't push the rest of the match table out of its columns.
///
/// Counts characters, not bytes, so accented words are never split mid-char.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("battery", 10), "battery");
        assert_eq!(truncate_chars("brightness", 6), "bright...");
        assert_eq!(truncate_chars("ééééé", 2), "éé...");
        assert_eq!(truncate_chars("screen", 6), "screen");
    }
}
