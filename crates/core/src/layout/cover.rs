//! Title and closing slides.

use super::LayoutContext;
use crate::element::{Align, DrawableElement, Paragraph, Role, TextFrame};
use crate::geometry::{font, inches, palette, Rect, SLIDE_WIDTH};
use crate::types::{ClosingSlide, TitleSlide};

/// Literal body of the closing slide.
pub const CLOSING_TEXT: &str = "Thank you";

fn headline_rect() -> Rect {
    Rect::new(inches(1.0), inches(3.5), SLIDE_WIDTH - inches(2.0), inches(2.0))
}

fn headline(paragraph: Paragraph) -> DrawableElement {
    let paragraph = paragraph
        .align(Align::Center)
        .size(font::TITLE)
        .bold()
        .color(palette::TEXT)
        .face(font::HEADLINE_FACE);
    DrawableElement::text(Role::Title, headline_rect(), TextFrame::single(paragraph))
}

/// Centered 60pt title with a right-aligned date near the bottom edge.
pub fn title(slide: &TitleSlide, ctx: &LayoutContext<'_>) -> Vec<DrawableElement> {
    let date = Paragraph::literal(ctx.cap(&slide.date).into_owned())
        .align(Align::Right)
        .size(font::CAPTION)
        .face(font::BODY_FACE);

    vec![
        headline(Paragraph::markup(&ctx.cap(&slide.title))),
        DrawableElement::text(
            Role::Date,
            Rect::new(inches(1.0), inches(8.0), SLIDE_WIDTH - inches(2.0), inches(0.5)),
            TextFrame::single(date),
        ),
    ]
}

/// The fixed "Thank you" slide.
pub fn closing(_slide: &ClosingSlide, _ctx: &LayoutContext<'_>) -> Vec<DrawableElement> {
    vec![headline(Paragraph::literal(CLOSING_TEXT))]
}
