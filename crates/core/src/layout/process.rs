//! Horizontal flow of square steps joined by right arrows.
//!
//! The free horizontal space is split into `2·(N−1)` equal gaps, one on
//! each side of every connector. Offsets are accumulated from the exact
//! rational position and rounded once, so the row always spans the
//! content width exactly.

use super::{header, LayoutContext};
use crate::element::{Align, Anchor, DrawableElement, Paragraph, Role, ShapeGeometry, TextFrame};
use crate::geometry::{font, inches, palette, remaining_height, Emu, Rect, CONTENT_WIDTH, MARGIN_LEFT};
use crate::types::ProcessSlide;
use log::warn;

const STEP_TEXT_SIZE: u32 = 24;

pub fn step_size() -> Emu {
    inches(1.5)
}

pub fn connector_width() -> Emu {
    inches(0.8)
}

pub fn connector_height() -> Emu {
    inches(0.2)
}

/// Space left over for gaps once `count` steps and their connectors are placed.
pub fn free_width(count: usize) -> Emu {
    if count == 0 {
        return CONTENT_WIDTH;
    }
    let n = count as Emu;
    CONTENT_WIDTH - n * step_size() - (n - 1) * connector_width()
}

/// Width of one gap, rounded. Zero for a single step.
pub fn gap_width(count: usize) -> Emu {
    if count < 2 {
        return 0;
    }
    rounded_share(free_width(count), 1, 2 * (count as Emu - 1))
}

/// `round(total · parts / whole)` without accumulating rounding error.
fn rounded_share(total: Emu, parts: Emu, whole: Emu) -> Emu {
    ((total as f64) * (parts as f64) / (whole as f64)).round() as Emu
}

pub fn layout(slide: &ProcessSlide, ctx: &LayoutContext<'_>) -> Vec<DrawableElement> {
    let (mut elements, body_top) = header(&slide.title, slide.subhead.as_deref(), ctx);

    let count = slide.steps.len();
    if count == 0 {
        warn!("Process slide '{}' has no steps; drawing title only", slide.title);
        return elements;
    }

    let step = step_size();
    let conn = connector_width();
    let free = free_width(count);
    let gaps = 2 * (count as Emu - 1);
    let top = body_top + (remaining_height(body_top) - step) / 2;

    for (i, text) in slide.steps.iter().enumerate() {
        let i = i as Emu;
        let x = if count > 1 {
            MARGIN_LEFT + i * (step + conn) + rounded_share(free, 2 * i, gaps)
        } else {
            MARGIN_LEFT
        };

        let label = Paragraph::markup(&ctx.cap(text))
            .align(Align::Center)
            .size(STEP_TEXT_SIZE)
            .color(palette::WHITE)
            .face(font::BODY_FACE);
        elements.push(DrawableElement::labelled_shape(
            Role::Step,
            Rect::new(x, top, step, step),
            ShapeGeometry::Rectangle,
            palette::DARK_GRAY,
            TextFrame::single(label).anchor(Anchor::Middle),
        ));

        if (i as usize) + 1 < count {
            let arrow_x =
                MARGIN_LEFT + (i + 1) * step + i * conn + rounded_share(free, 2 * i + 1, gaps);
            elements.push(DrawableElement::shape(
                Role::Connector,
                Rect::new(
                    arrow_x,
                    top + step / 2 - connector_height() / 2,
                    conn,
                    connector_height(),
                ),
                ShapeGeometry::RightArrow,
                palette::TEXT,
            ));
        }
    }

    elements
}
