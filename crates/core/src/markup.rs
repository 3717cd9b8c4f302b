//! Inline emphasis markup: `**bold**` and `[[highlight]]`.
//!
//! Highlight spans are bold and drawn in the accent color. Markers do not
//! nest, matching is non-greedy, and anything that is not a complete
//! marker pair passes through as literal text.

use crate::geometry::{palette, Color};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Matches one complete bold or highlight span, shortest first.
static SPAN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*.*?\*\*|\[\[.*?\]\]").unwrap());

/// A run of text with uniform styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
    /// Overrides the paragraph color when set.
    pub color: Option<Color>,
}

impl TextRun {
    /// An unstyled run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            color: None,
        }
    }

    /// A bold run in the paragraph color.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            color: None,
        }
    }

    /// A bold run in the accent color.
    pub fn highlight(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            color: Some(palette::ACCENT),
        }
    }
}

/// Split `text` into styled runs.
///
/// Empty input gives no runs. Runs with empty text (for example from
/// `****`) are dropped; they carry nothing to draw.
pub fn parse(text: &str) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut cursor = 0;

    for span in SPAN_REGEX.find_iter(text) {
        if span.start() > cursor {
            runs.push(TextRun::plain(&text[cursor..span.start()]));
        }

        let token = span.as_str();
        let inner = &token[2..token.len() - 2];
        if !inner.is_empty() {
            if token.starts_with("**") {
                runs.push(TextRun::bold(inner));
            } else {
                runs.push(TextRun::highlight(inner));
            }
        }
        cursor = span.end();
    }

    if cursor < text.len() {
        runs.push(TextRun::plain(&text[cursor..]));
    }

    runs
}

/// Concatenated text of `runs`, ignoring style.
pub fn plain_text(runs: &[TextRun]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}
