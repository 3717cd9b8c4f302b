//! Labelled horizontal progress bars.

use super::{header, LayoutContext};
use crate::element::{DrawableElement, Paragraph, Role, ShapeGeometry, TextFrame};
use crate::geometry::{font, inches, palette, Emu, Rect, MARGIN_LEFT};
use crate::types::ProgressSlide;
use log::warn;

/// Bar length for `percent`, clamped so the bar never overflows or inverts.
pub fn fill_width(bar_width: Emu, percent: f64) -> Emu {
    let clamped = if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 100.0) };
    ((bar_width as f64) * clamped / 100.0).round() as Emu
}

/// 2^53, the largest magnitude below which every whole f64 is exact.
const MAX_EXACT_WHOLE: f64 = 9_007_199_254_740_992.0;

/// The percent label as given, without a trailing `.0` for whole numbers.
pub fn percent_label(percent: f64) -> String {
    if percent.fract() == 0.0 && percent.abs() <= MAX_EXACT_WHOLE {
        format!("{}%", percent as i64)
    } else {
        format!("{}%", percent)
    }
}

pub fn layout(slide: &ProgressSlide, ctx: &LayoutContext<'_>) -> Vec<DrawableElement> {
    let (mut elements, body_top) = header(&slide.title, slide.subhead.as_deref(), ctx);

    if slide.items.is_empty() {
        warn!("Progress slide '{}' has no items; drawing title only", slide.title);
        return elements;
    }

    let row_height = inches(0.8);
    let row_gap = inches(0.2);
    let bar_width = inches(8.0);
    let bar_height = inches(0.2);
    let bar_x = MARGIN_LEFT + inches(4.5);

    let mut y = body_top + inches(0.5);
    for item in &slide.items {
        if !(0.0..=100.0).contains(&item.percent) {
            warn!(
                "Progress item '{}' has percent {} outside 0..=100; clamping bar",
                item.label, item.percent
            );
        }

        let label = Paragraph::literal(ctx.cap(&item.label).into_owned())
            .size(font::BODY)
            .bold()
            .face(font::BODY_FACE);
        elements.push(DrawableElement::text(
            Role::ProgressLabel,
            Rect::new(MARGIN_LEFT, y, inches(4.0), row_height),
            TextFrame::single(label),
        ));

        let bar_y = y + (row_height - bar_height) / 2;
        elements.push(DrawableElement::shape(
            Role::ProgressTrack,
            Rect::new(bar_x, bar_y, bar_width, bar_height),
            ShapeGeometry::Rectangle,
            palette::LIGHT_GRAY,
        ));
        elements.push(DrawableElement::shape(
            Role::ProgressFill,
            Rect::new(bar_x, bar_y, fill_width(bar_width, item.percent), bar_height),
            ShapeGeometry::Rectangle,
            palette::ACCENT,
        ));

        let value = Paragraph::literal(percent_label(item.percent))
            .size(font::BODY)
            .face(font::BODY_FACE);
        elements.push(DrawableElement::text(
            Role::ProgressValue,
            Rect::new(bar_x + bar_width + inches(0.2), y, inches(1.0), row_height),
            TextFrame::single(value),
        ));

        y += row_height + row_gap;
    }

    elements
}
