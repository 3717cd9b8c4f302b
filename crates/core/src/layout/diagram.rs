//! Swim lanes: equal-height bands with a title pane and an item list.

use super::{bullets, header, LayoutContext};
use crate::element::{Align, Anchor, DrawableElement, Paragraph, Role, TextFrame};
use crate::geometry::{font, inches, remaining_height, Rect, CONTENT_WIDTH, MARGIN_LEFT};
use crate::types::DiagramSlide;
use log::warn;

pub fn layout(slide: &DiagramSlide, ctx: &LayoutContext<'_>) -> Vec<DrawableElement> {
    let (mut elements, body_top) = header(&slide.title, slide.subhead.as_deref(), ctx);

    if slide.lanes.is_empty() {
        warn!("Diagram slide '{}' has no lanes; drawing title only", slide.title);
        return elements;
    }

    let lane_height = remaining_height(body_top) / slide.lanes.len() as i64;
    let title_width = inches(2.0);
    let items_offset = inches(2.2);

    for (i, lane) in slide.lanes.iter().enumerate() {
        let y = body_top + i as i64 * lane_height;

        let title = Paragraph::literal(ctx.cap(&lane.title).into_owned())
            .align(Align::Center)
            .size(font::SUBHEAD)
            .bold()
            .face(font::HEADLINE_FACE);
        elements.push(DrawableElement::text(
            Role::LaneTitle,
            Rect::new(MARGIN_LEFT, y, title_width, lane_height),
            TextFrame::single(title).anchor(Anchor::Middle),
        ));

        elements.push(DrawableElement::text(
            Role::LaneItems,
            Rect::new(MARGIN_LEFT + items_offset, y, CONTENT_WIDTH - items_offset, lane_height),
            TextFrame::new(bullets(&lane.items, font::BODY, ctx)),
        ));
    }

    elements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BODY_TOP, MARGIN_BOTTOM, SLIDE_HEIGHT};
    use crate::layout::testing::by_role;
    use crate::options::LayoutOptions;
    use crate::types::Lane;

    #[test]
    fn test_lanes_fill_body() {
        let options = LayoutOptions::new();
        let ctx = LayoutContext::new(&options);
        let slide = DiagramSlide {
            title: "Org".into(),
            subhead: None,
            lanes: vec![
                Lane { title: "Sales".into(), items: vec!["lead".into()] },
                Lane { title: "Ops".into(), items: vec!["ship".into(), "bill".into()] },
            ],
            images: None,
            notes: None,
        };
        let elements = layout(&slide, &ctx);

        let titles = by_role(&elements, Role::LaneTitle);
        let items = by_role(&elements, Role::LaneItems);
        assert_eq!(titles.len(), 2);
        assert_eq!(titles[0].rect.y, BODY_TOP);
        assert_eq!(titles[1].rect.bottom(), SLIDE_HEIGHT - MARGIN_BOTTOM);
        assert_eq!(items[1].rect.x, MARGIN_LEFT + inches(2.2));
        assert_eq!(items[1].text_content(), "ship\nbill");
    }

    #[test]
    fn test_no_lanes() {
        let options = LayoutOptions::new();
        let ctx = LayoutContext::new(&options);
        let slide = DiagramSlide {
            title: "Empty".into(),
            subhead: None,
            lanes: Vec::new(),
            images: None,
            notes: None,
        };
        assert_eq!(layout(&slide, &ctx).len(), 1);
    }
}
