//! Section divider: a large accent number beside the section title.

use super::LayoutContext;
use crate::element::{Align, Anchor, DrawableElement, Paragraph, Role, TextFrame};
use crate::geometry::{font, inches, palette, Rect, CONTENT_WIDTH, MARGIN_LEFT};
use crate::types::SectionSlide;
use regex::Regex;
use std::sync::LazyLock;

/// A leading "1.", "2:", "3-" or bare "4 " numbering prefix.
static NUMBER_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.:\-]?\s*").unwrap());

/// Remove a leading numbering prefix; the number is drawn separately.
pub fn strip_number_prefix(title: &str) -> &str {
    match NUMBER_PREFIX_REGEX.find(title) {
        Some(m) => &title[m.end()..],
        None => title,
    }
}

pub fn layout(slide: &SectionSlide, ctx: &LayoutContext<'_>) -> Vec<DrawableElement> {
    let number_width = inches(2.0);
    let gap = inches(0.5);
    let top = inches(3.0);
    let height = inches(3.0);

    let number = Paragraph::literal(ctx.section_no.to_string())
        .align(Align::Right)
        .size(font::SECTION_NUMBER)
        .bold()
        .color(palette::ACCENT)
        .face(font::HEADLINE_FACE);

    let title = Paragraph::markup(&ctx.cap(strip_number_prefix(&slide.title)))
        .align(Align::Left)
        .size(font::TITLE)
        .bold()
        .color(palette::TEXT)
        .face(font::HEADLINE_FACE);

    vec![
        DrawableElement::text(
            Role::SectionNumber,
            Rect::new(MARGIN_LEFT, top, number_width, height),
            TextFrame::single(number).anchor(Anchor::Middle),
        ),
        DrawableElement::text(
            Role::Title,
            Rect::new(
                MARGIN_LEFT + number_width + gap,
                top,
                CONTENT_WIDTH - number_width - gap,
                height,
            ),
            TextFrame::single(title).anchor(Anchor::Middle),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::LayoutOptions;

    #[test]
    fn test_strip_number_prefix() {
        assert_eq!(strip_number_prefix("1. Intro"), "Intro");
        assert_eq!(strip_number_prefix("02:Design"), "Design");
        assert_eq!(strip_number_prefix("3- Plan"), "Plan");
        assert_eq!(strip_number_prefix("4 Results"), "Results");
        assert_eq!(strip_number_prefix("Intro 1."), "Intro 1.");
        assert_eq!(strip_number_prefix("2025"), "");
    }

    #[test]
    fn test_number_and_title_panes() {
        let options = LayoutOptions::new();
        let ctx = LayoutContext::new(&options).with_section_no(3);
        let slide = SectionSlide {
            title: "3. Roadmap".into(),
            section_no: None,
            notes: None,
        };
        let elements = layout(&slide, &ctx);

        assert_eq!(elements[0].text_content(), "3");
        assert_eq!(elements[0].rect, Rect::new(inches(1.0), inches(3.0), inches(2.0), inches(3.0)));
        assert_eq!(elements[1].text_content(), "Roadmap");
        assert_eq!(elements[1].rect.x, inches(3.5));
        assert_eq!(elements[1].rect.cx, inches(11.5));
    }
}
