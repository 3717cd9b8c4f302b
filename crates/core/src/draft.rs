//! Rule-based first draft of a deck from free text.
//!
//! Blocks separated by blank lines become slides: the first block is the
//! cover, every later block a content slide whose first line is the title
//! and whose remaining lines are bullet points.

use crate::payload::format_date;
use crate::types::{ContentSlide, Presentation, Slide, TitleSlide};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Runs of spaces, collapsed to one.
static SPACE_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());

/// A numbered list prefix such as `1. `.
static NUMBERED_ITEM_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s").unwrap());

/// Cover title used when the input has no text.
pub const PLACEHOLDER_TITLE: &str = "プレゼンテーションタイトル";

/// Speaker notes attached to the generated cover.
pub const COVER_NOTES: &str = "これは自動生成されたプレゼンテーションの表紙です。";

/// Options for the draft converter.
#[derive(Debug, Clone)]
pub struct DraftOptions {
    /// Date printed on the cover.
    pub date: NaiveDate,

    /// Author recorded on the drafted presentation.
    pub author: String,
}

impl DraftOptions {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            author: crate::payload::DEFAULT_AUTHOR.to_string(),
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }
}

/// Normalize raw text before splitting it into slides.
///
/// - Line endings become LF
/// - NFKC folds full-width forms
/// - Tabs become spaces and space runs collapse
/// - Smart quotes become ASCII quotes
pub fn normalize(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let text: String = text
        .nfkc()
        .map(|c| match c {
            '\t' => ' ',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2018}' | '\u{2019}' => '\'',
            other => other,
        })
        .collect();
    SPACE_RUN_REGEX.replace_all(&text, " ").into_owned()
}

/// Speaker notes for a drafted content slide.
pub fn content_notes(title: &str) -> String {
    format!("このスライドは「{}」について説明します。", title)
}

/// Strip a list marker (`- `, `* `, `1. `) from a trimmed line.
fn point_text(line: &str) -> &str {
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return rest.trim();
    }
    match NUMBERED_ITEM_REGEX.find(line) {
        Some(m) => line[m.end()..].trim(),
        None => line,
    }
}

fn content_slide(block: &str) -> Slide {
    let mut lines = block.split('\n');
    let title = lines.next().unwrap_or_default().trim().to_string();
    let points = lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| point_text(line).to_string())
        .collect();

    Slide::Content(ContentSlide {
        notes: Some(content_notes(&title)),
        title,
        subhead: None,
        points: Some(points),
        two_column: None,
        columns: None,
        images: None,
    })
}

/// Convert free text into a first-draft slide list.
pub fn draft_slides(text: &str, options: &DraftOptions) -> Vec<Slide> {
    let normalized = normalize(text);
    let blocks: Vec<&str> = normalized
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect();

    let mut slides = Vec::with_capacity(blocks.len().max(1));
    slides.push(Slide::Title(TitleSlide {
        title: blocks.first().copied().unwrap_or(PLACEHOLDER_TITLE).to_string(),
        date: format_date(options.date),
        notes: Some(COVER_NOTES.to_string()),
    }));
    slides.extend(blocks.iter().skip(1).map(|block| content_slide(block)));
    slides
}

/// Convert free text into a draft presentation titled after its cover.
pub fn draft_presentation(text: &str, options: &DraftOptions) -> Presentation {
    let slides = draft_slides(text, options);
    let title = slides
        .first()
        .and_then(Slide::title)
        .unwrap_or(PLACEHOLDER_TITLE)
        .to_string();

    let mut presentation = Presentation::new(title, options.author.clone());
    for slide in slides {
        presentation.add_slide(slide);
    }
    presentation
}
