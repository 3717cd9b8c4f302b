//! File names for delivered decks.

use chrono::NaiveDateTime;

/// Name used when a title has no usable characters.
pub const FALLBACK_STEM: &str = "Untitled_Presentation";

/// Suggested `.pptx` file name: the title reduced to alphanumerics, spaces
/// and underscores, with spaces as underscores, then a timestamp suffix.
pub fn suggested_file_name(title: &str, at: NaiveDateTime) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '_')
        .collect();
    let kept = kept.trim_end();

    let stem = if kept.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        kept.replace(' ', "_")
    };

    format!("{}_{}.pptx", stem, at.format("%Y%m%d%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 10)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap()
    }

    #[test]
    fn test_basic_name() {
        assert_eq!(
            suggested_file_name("Sales Plan: Q3/Q4!", at()),
            "Sales_Plan_Q3Q4_20250910140509.pptx"
        );
    }

    #[test]
    fn test_unicode_letters_are_kept() {
        assert_eq!(
            suggested_file_name("営業 提案", at()),
            "営業_提案_20250910140509.pptx"
        );
    }

    #[test]
    fn test_empty_title_falls_back() {
        assert_eq!(
            suggested_file_name("!!! ", at()),
            "Untitled_Presentation_20250910140509.pptx"
        );
    }

    #[test]
    fn test_leading_spaces_are_kept() {
        assert_eq!(suggested_file_name(" a ", at()), "_a_20250910140509.pptx");
    }
}
