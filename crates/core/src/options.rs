//! Layout configuration.

use crate::guard::DEFAULT_MAX_TEXT_LEN;
use unicode_normalization::UnicodeNormalization;

/// Keywords that mark a content slide as an agenda by default.
pub const DEFAULT_AGENDA_KEYWORDS: [&str; 2] = ["アジェンダ", "Agenda"];

/// Decides whether a content slide is an agenda, whose points are drawn bold.
///
/// Matching is a substring test after NFKC normalization and lowercasing,
/// so `ＡＧＥＮＤＡ` and `agenda` both match `Agenda`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaPredicate {
    keywords: Vec<String>,
}

impl AgendaPredicate {
    /// A predicate matching any of `keywords`. Empty keywords are ignored.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| fold(k.as_ref()))
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// A predicate that never matches.
    pub fn never() -> Self {
        Self {
            keywords: Vec::new(),
        }
    }

    /// Whether `title` names an agenda slide.
    pub fn matches(&self, title: &str) -> bool {
        if self.keywords.is_empty() {
            return false;
        }
        let title = fold(title);
        self.keywords.iter().any(|k| title.contains(k.as_str()))
    }
}

impl Default for AgendaPredicate {
    fn default() -> Self {
        Self::new(DEFAULT_AGENDA_KEYWORDS)
    }
}

fn fold(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}

/// Options applied to every slide during layout.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Maximum characters for titles, notes and single-string frames.
    pub max_text_len: usize,

    /// Agenda detection for content slides.
    pub agenda: AgendaPredicate,
}

impl LayoutOptions {
    pub fn new() -> Self {
        Self {
            max_text_len: DEFAULT_MAX_TEXT_LEN,
            agenda: AgendaPredicate::default(),
        }
    }

    /// Set the text length ceiling.
    pub fn with_max_text_len(mut self, max: usize) -> Self {
        self.max_text_len = max;
        self
    }

    /// Replace the agenda keyword list.
    pub fn with_agenda_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.agenda = AgendaPredicate::new(keywords);
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keywords() {
        let agenda = AgendaPredicate::default();
        assert!(agenda.matches("本日のアジェンダ"));
        assert!(agenda.matches("Agenda"));
        assert!(!agenda.matches("Overview"));
    }

    #[test]
    fn test_case_and_width_variants() {
        let agenda = AgendaPredicate::default();
        assert!(agenda.matches("today's agenda"));
        assert!(agenda.matches("ＡＧＥＮＤＡ"));
        // Half-width katakana normalizes to full-width.
        assert!(agenda.matches("ｱｼﾞｪﾝﾀﾞ"));
    }

    #[test]
    fn test_custom_keywords() {
        let options = LayoutOptions::new().with_agenda_keywords(["Outline", ""]);
        assert!(options.agenda.matches("Outline of the talk"));
        assert!(!options.agenda.matches("Agenda"));
        assert!(!AgendaPredicate::never().matches("Agenda"));
    }

    #[test]
    fn test_builder() {
        let options = LayoutOptions::default().with_max_text_len(20);
        assert_eq!(options.max_text_len, 20);
    }
}
