//! Bullet slides in one or two columns.

use super::{bullets, title_box, LayoutContext};
use crate::element::{DrawableElement, Paragraph, Role, TextFrame};
use crate::geometry::{column_width, font, inches, remaining_height, Rect, BODY_TOP, CONTENT_WIDTH, MARGIN_LEFT};
use crate::types::ContentSlide;
use log::debug;

/// Size of one-column points.
const POINT_SIZE: u32 = 36;

pub fn layout(slide: &ContentSlide, ctx: &LayoutContext<'_>) -> Vec<DrawableElement> {
    let mut elements = vec![title_box(&slide.title, ctx)];
    let body_height = remaining_height(BODY_TOP);

    if slide.two_column.unwrap_or(false) {
        let gap = inches(0.5);
        let width = column_width(CONTENT_WIDTH, 2, gap);
        let columns = slide.columns.as_deref().unwrap_or_default();
        let empty = Vec::new();

        for side in 0..2 {
            let items = columns.get(side).unwrap_or(&empty);
            let x = MARGIN_LEFT + side as i64 * (width + gap);
            elements.push(DrawableElement::text(
                Role::Column,
                Rect::new(x, BODY_TOP, width, body_height),
                TextFrame::new(bullets(items, font::BODY, ctx)),
            ));
        }
        return elements;
    }

    let mut paragraphs = Vec::new();
    if let Some(subhead) = &slide.subhead {
        paragraphs.push(
            Paragraph::markup(&ctx.cap(subhead))
                .size(font::SUBHEAD)
                .face(font::BODY_FACE)
                .space_after(12),
        );
    }

    if let Some(points) = &slide.points {
        let agenda = ctx.options.agenda.matches(&slide.title);
        if agenda {
            debug!("Content slide '{}' is an agenda; points drawn bold", slide.title);
        }
        for point in bullets(points, POINT_SIZE, ctx) {
            paragraphs.push(if agenda { point.bold() } else { point });
        }
    }

    if !paragraphs.is_empty() {
        elements.push(DrawableElement::text(
            Role::Body,
            Rect::new(MARGIN_LEFT, BODY_TOP, CONTENT_WIDTH, body_height),
            TextFrame::new(paragraphs),
        ));
    }

    elements
}
