//! Mirrored two-column comparison.

use super::{bullets, header, LayoutContext};
use crate::element::{Align, DrawableElement, Paragraph, Role, TextFrame};
use crate::geometry::{column_width, font, inches, palette, remaining_height, Rect, CONTENT_WIDTH, MARGIN_LEFT};
use crate::types::CompareSlide;

const ITEM_SIZE: u32 = 24;

pub fn layout(slide: &CompareSlide, ctx: &LayoutContext<'_>) -> Vec<DrawableElement> {
    let (mut elements, body_top) = header(&slide.title, slide.subhead.as_deref(), ctx);

    let gap = inches(0.5);
    let width = column_width(CONTENT_WIDTH, 2, gap);
    let bar_height = inches(0.5);
    let list_offset = inches(0.6);
    let list_height = remaining_height(body_top) - list_offset;

    let sides = [
        (&slide.left_title, &slide.left_items),
        (&slide.right_title, &slide.right_items),
    ];
    for (side, (heading, items)) in sides.into_iter().enumerate() {
        let x = MARGIN_LEFT + side as i64 * (width + gap);

        let heading = Paragraph::markup(&ctx.cap(heading))
            .align(Align::Center)
            .size(font::SUBHEAD)
            .bold()
            .color(palette::WHITE)
            .face(font::HEADLINE_FACE);
        elements.push(DrawableElement::filled_text(
            Role::ColumnHeader,
            Rect::new(x, body_top, width, bar_height),
            TextFrame::single(heading),
            palette::DARK_GRAY,
        ));

        elements.push(DrawableElement::text(
            Role::Column,
            Rect::new(x, body_top + list_offset, width, list_height),
            TextFrame::new(bullets(items, ITEM_SIZE, ctx)),
        ));
    }

    elements
}
