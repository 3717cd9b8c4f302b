//! Milestones on a horizontal baseline, descriptions alternating below
//! and above the line.

use super::{title_box, LayoutContext};
use crate::element::{Align, DrawableElement, Paragraph, Role, ShapeGeometry, TextFrame};
use crate::geometry::{
    font, inches, palette, remaining_height, Color, Emu, Rect, BODY_TOP, CONTENT_WIDTH, MARGIN_LEFT,
};
use crate::types::{MilestoneState, TimelineSlide};
use log::warn;

/// Marker fill for a milestone state. Milestones without a state are done.
pub fn marker_color(state: Option<MilestoneState>) -> Color {
    match state {
        None | Some(MilestoneState::Done) => palette::ACCENT,
        Some(MilestoneState::Next) => palette::ORANGE,
        Some(MilestoneState::Todo) => palette::LIGHT_GRAY,
    }
}

pub fn layout(slide: &TimelineSlide, ctx: &LayoutContext<'_>) -> Vec<DrawableElement> {
    let mut elements = vec![title_box(&slide.title, ctx)];

    let mut body_top = BODY_TOP;
    match &slide.subhead {
        Some(subhead) => {
            let paragraph = Paragraph::markup(&ctx.cap(subhead))
                .size(font::BODY)
                .color(palette::TEXT)
                .face(font::BODY_FACE);
            elements.push(DrawableElement::text(
                Role::Subhead,
                Rect::new(MARGIN_LEFT, body_top, CONTENT_WIDTH, inches(0.8)),
                TextFrame::single(paragraph),
            ));
            body_top += inches(1.0);
        }
        None => body_top += inches(0.2),
    }

    let line_y = body_top + remaining_height(body_top) / 2;
    let thickness = inches(0.05);
    elements.push(DrawableElement::shape(
        Role::Baseline,
        Rect::new(MARGIN_LEFT, line_y - thickness / 2, CONTENT_WIDTH, thickness),
        ShapeGeometry::Rectangle,
        palette::TEXT,
    ));

    let count = slide.milestones.len();
    if count == 0 {
        warn!("Timeline slide '{}' has no milestones", slide.title);
        return elements;
    }

    let marker = inches(0.5);
    let desc_width = inches(3.5);
    let desc_height = inches(1.5);
    let offset = inches(0.7);
    let date_height = inches(0.5);

    for (i, milestone) in slide.milestones.iter().enumerate() {
        let center_x = marker_center(i, count);

        elements.push(DrawableElement::shape(
            Role::Marker,
            Rect::new(center_x - marker / 2, line_y - marker / 2, marker, marker),
            ShapeGeometry::Oval,
            marker_color(milestone.state),
        ));

        let (desc_y, date_y) = if i % 2 == 0 {
            (line_y + offset, line_y - offset)
        } else {
            let desc_y = line_y - offset - desc_height;
            (desc_y, desc_y - inches(0.4))
        };

        let date = Paragraph::literal(ctx.cap(&milestone.date).into_owned())
            .align(Align::Center)
            .size(font::CAPTION)
            .bold()
            .face(font::BODY_FACE);
        elements.push(DrawableElement::text(
            Role::MilestoneDate,
            Rect::new(center_x - desc_width / 2, date_y, desc_width, date_height),
            TextFrame::single(date),
        ));

        let label = Paragraph::literal(ctx.cap(&milestone.label).into_owned())
            .align(Align::Center)
            .size(font::BODY)
            .face(font::BODY_FACE);
        elements.push(DrawableElement::text(
            Role::MilestoneLabel,
            Rect::new(center_x - desc_width / 2, desc_y, desc_width, desc_height),
            TextFrame::single(label),
        ));
    }

    elements
}

/// Horizontal center of marker `index` of `count`: evenly spread from the
/// left margin to the right margin, or centered when alone.
fn marker_center(index: usize, count: usize) -> Emu {
    if count > 1 {
        let share = (CONTENT_WIDTH as f64) * (index as f64) / ((count - 1) as f64);
        MARGIN_LEFT + share.round() as Emu
    } else {
        MARGIN_LEFT + CONTENT_WIDTH / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::testing::by_role;
    use crate::options::LayoutOptions;
    use crate::types::Milestone;

    fn slide(count: usize) -> TimelineSlide {
        TimelineSlide {
            title: "Plan".into(),
            subhead: None,
            milestones: (0..count)
                .map(|i| Milestone {
                    label: format!("Phase {}", i),
                    date: format!("2025.0{}", i + 1),
                    state: None,
                })
                .collect(),
            images: None,
            notes: None,
        }
    }

    #[test]
    fn test_descriptions_alternate() {
        let options = LayoutOptions::new();
        let ctx = LayoutContext::new(&options);
        let elements = layout(&slide(4), &ctx);

        let line = by_role(&elements, Role::Baseline)[0];
        let line_y = line.rect.center_y();
        let labels = by_role(&elements, Role::MilestoneLabel);
        let dates = by_role(&elements, Role::MilestoneDate);
        assert_eq!(labels.len(), 4);

        for (i, label) in labels.iter().enumerate() {
            if i % 2 == 0 {
                assert!(label.rect.y > line_y, "label {} should be below", i);
                assert!(dates[i].rect.bottom() < line_y);
            } else {
                assert!(label.rect.bottom() < line_y, "label {} should be above", i);
                assert!(dates[i].rect.y < label.rect.y);
            }
        }
    }

    #[test]
    fn test_markers_span_margins() {
        let options = LayoutOptions::new();
        let ctx = LayoutContext::new(&options);
        let elements = layout(&slide(3), &ctx);
        let markers = by_role(&elements, Role::Marker);

        assert_eq!(markers[0].rect.center_x(), MARGIN_LEFT);
        assert_eq!(markers[1].rect.center_x(), MARGIN_LEFT + CONTENT_WIDTH / 2);
        assert_eq!(markers[2].rect.center_x(), MARGIN_LEFT + CONTENT_WIDTH);
    }

    #[test]
    fn test_single_milestone_is_centered() {
        let options = LayoutOptions::new();
        let ctx = LayoutContext::new(&options);
        let elements = layout(&slide(1), &ctx);
        let marker = by_role(&elements, Role::Marker)[0];
        assert_eq!(marker.rect.center_x(), inches(8.0));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let options = LayoutOptions::new();
        let ctx = LayoutContext::new(&options);
        let s = slide(5);
        assert_eq!(layout(&s, &ctx), layout(&s, &ctx));
    }

    #[test]
    fn test_subhead_shifts_line() {
        let options = LayoutOptions::new();
        let ctx = LayoutContext::new(&options);

        let plain = layout(&slide(2), &ctx);
        let mut with_sub = slide(2);
        with_sub.subhead = Some("H1".into());
        let shifted = layout(&with_sub, &ctx);

        let y = |els: &[DrawableElement]| by_role(els, Role::Baseline)[0].rect.center_y();
        assert!(y(&shifted) > y(&plain));
        assert_eq!(by_role(&shifted, Role::Subhead)[0].rect.cy, inches(0.8));
    }

    #[test]
    fn test_marker_colors_follow_state() {
        assert_eq!(marker_color(None), palette::ACCENT);
        assert_eq!(marker_color(Some(MilestoneState::Next)), palette::ORANGE);
        assert_eq!(marker_color(Some(MilestoneState::Todo)), palette::LIGHT_GRAY);
    }

    #[test]
    fn test_no_milestones_keeps_baseline() {
        let options = LayoutOptions::new();
        let ctx = LayoutContext::new(&options);
        let elements = layout(&slide(0), &ctx);
        assert_eq!(elements.len(), 2);
        assert_eq!(by_role(&elements, Role::Marker).len(), 0);
    }
}
