//! Grid of rounded, colored cards.

use super::{header, LayoutContext};
use crate::element::{Align, Anchor, DrawableElement, Paragraph, Role, ShapeGeometry, TextFrame};
use crate::geometry::{column_width, font, inches, palette, Rect, CONTENT_WIDTH, MARGIN_LEFT};
use crate::types::{CardItem, CardsSlide};
use log::warn;

const CARD_TEXT_SIZE: u32 = 24;
const DEFAULT_COLUMNS: i64 = 2;

/// Column count actually used for a requested value. Only 2 and 3 are
/// honored; anything else falls back to 2.
pub fn effective_columns(requested: Option<i64>) -> i64 {
    match requested {
        None => DEFAULT_COLUMNS,
        Some(c @ (2 | 3)) => c,
        Some(other) => {
            warn!("Invalid cards column count {}; using {}", other, DEFAULT_COLUMNS);
            DEFAULT_COLUMNS
        }
    }
}

fn card_line(text: &str, face: &'static str, ctx: &LayoutContext<'_>) -> Paragraph {
    Paragraph::markup(&ctx.cap(text))
        .align(Align::Center)
        .size(CARD_TEXT_SIZE)
        .bold()
        .color(palette::WHITE)
        .face(face)
}

pub fn layout(slide: &CardsSlide, ctx: &LayoutContext<'_>) -> Vec<DrawableElement> {
    let (mut elements, body_top) = header(&slide.title, slide.subhead.as_deref(), ctx);

    if slide.items.is_empty() {
        warn!("Cards slide '{}' has no items; drawing title only", slide.title);
        return elements;
    }

    let columns = effective_columns(slide.columns);
    let gap = inches(0.3);
    let width = column_width(CONTENT_WIDTH, columns, gap);
    let height = inches(2.5);
    let start_y = body_top + inches(0.5);

    for (i, item) in slide.items.iter().enumerate() {
        let row = i as i64 / columns;
        let col = i as i64 % columns;

        let paragraphs = match item {
            CardItem::Text(text) => vec![card_line(text, font::BODY_FACE, ctx)],
            CardItem::Detailed { title, desc } => {
                let mut lines = vec![card_line(title, font::HEADLINE_FACE, ctx)];
                if let Some(desc) = desc.as_deref().filter(|d| !d.is_empty()) {
                    lines.push(card_line(desc, font::BODY_FACE, ctx));
                }
                lines
            }
        };

        elements.push(DrawableElement::labelled_shape(
            Role::Card,
            Rect::new(
                MARGIN_LEFT + col * (width + gap),
                start_y + row * (height + gap),
                width,
                height,
            ),
            ShapeGeometry::RoundedRectangle,
            palette::card(i),
            TextFrame::new(paragraphs).anchor(Anchor::Middle),
        ));
    }

    elements
}
