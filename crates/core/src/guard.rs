//! Length caps applied to text before it is drawn or used as a name.

use std::borrow::Cow;

/// Default ceiling, in characters, for titles, notes and single-string frames.
pub const DEFAULT_MAX_TEXT_LEN: usize = 1000;

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Cap `text` at `max_chars` characters, appending [`ELLIPSIS`] when cut.
///
/// Counts Unicode scalar values, not bytes, so multi-byte text is never
/// split inside a character.
pub fn truncate(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => Cow::Owned(format!("{}{}", &text[..cut], ELLIPSIS)),
        None => Cow::Borrowed(text),
    }
}

/// Truncate an owned string in place. Returns true if it was cut.
pub fn truncate_in_place(text: &mut String, max_chars: usize) -> bool {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            text.truncate(cut);
            text.push_str(ELLIPSIS);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_borrowed() {
        let out = truncate("short", 10);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, "short");
    }

    #[test]
    fn test_exact_length_is_untouched() {
        assert_eq!(truncate("abcde", 5), "abcde");
    }

    #[test]
    fn test_long_text_gets_ellipsis() {
        assert_eq!(truncate("abcdef", 5), "abcde...");
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let text = "あいうえおかきくけこ";
        assert_eq!(truncate(text, 3), "あいう...");
    }

    #[test]
    fn test_default_ceiling() {
        let long = "x".repeat(DEFAULT_MAX_TEXT_LEN + 50);
        let out = truncate(&long, DEFAULT_MAX_TEXT_LEN);
        assert_eq!(out.chars().count(), DEFAULT_MAX_TEXT_LEN + ELLIPSIS.len());
        assert!(out.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_in_place() {
        let mut text = String::from("abcdef");
        assert!(truncate_in_place(&mut text, 2));
        assert_eq!(text, "ab...");

        let mut text = String::from("ab");
        assert!(!truncate_in_place(&mut text, 2));
        assert_eq!(text, "ab");
    }
}
