//! Slide kind selection.

use crate::element::DrawableElement;
use crate::layout::{self, LayoutContext};
use crate::types::Slide;
use log::warn;
use serde::Serialize;

/// The closed set of slide kinds the engine can lay out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    Title,
    Section,
    Closing,
    Content,
    Compare,
    Process,
    Timeline,
    Diagram,
    Cards,
    Table,
    Progress,
}

impl SlideKind {
    /// Every kind, in schema order.
    pub const ALL: [SlideKind; 11] = [
        SlideKind::Title,
        SlideKind::Section,
        SlideKind::Closing,
        SlideKind::Content,
        SlideKind::Compare,
        SlideKind::Process,
        SlideKind::Timeline,
        SlideKind::Diagram,
        SlideKind::Cards,
        SlideKind::Table,
        SlideKind::Progress,
    ];

    /// The `type` discriminant used in JSON.
    pub fn tag(&self) -> &'static str {
        match self {
            SlideKind::Title => "title",
            SlideKind::Section => "section",
            SlideKind::Closing => "closing",
            SlideKind::Content => "content",
            SlideKind::Compare => "compare",
            SlideKind::Process => "process",
            SlideKind::Timeline => "timeline",
            SlideKind::Diagram => "diagram",
            SlideKind::Cards => "cards",
            SlideKind::Table => "table",
            SlideKind::Progress => "progress",
        }
    }

    /// Look up a kind by its discriminant. Matching is exact.
    pub fn from_tag(tag: &str) -> Option<SlideKind> {
        SlideKind::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

/// Select the layout algorithm for a declared kind.
///
/// Unknown kinds are logged and yield `None`; the caller leaves that slide
/// blank and carries on.
pub fn dispatch(tag: &str) -> Option<SlideKind> {
    let kind = SlideKind::from_tag(tag);
    if kind.is_none() {
        warn!("No layout for slide type '{}'; leaving it blank", tag);
    }
    kind
}

/// Lay out a validated slide with the algorithm for its kind.
pub fn layout_slide(slide: &Slide, ctx: &LayoutContext<'_>) -> Vec<DrawableElement> {
    match slide {
        Slide::Title(s) => layout::cover::title(s, ctx),
        Slide::Section(s) => layout::section::layout(s, ctx),
        Slide::Closing(s) => layout::cover::closing(s, ctx),
        Slide::Content(s) => layout::content::layout(s, ctx),
        Slide::Compare(s) => layout::compare::layout(s, ctx),
        Slide::Process(s) => layout::process::layout(s, ctx),
        Slide::Timeline(s) => layout::timeline::layout(s, ctx),
        Slide::Diagram(s) => layout::diagram::layout(s, ctx),
        Slide::Cards(s) => layout::cards::layout(s, ctx),
        Slide::Table(s) => layout::table::layout(s, ctx),
        Slide::Progress(s) => layout::progress::layout(s, ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for kind in SlideKind::ALL {
            assert_eq!(SlideKind::from_tag(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn test_unknown_and_case_sensitive() {
        assert_eq!(dispatch("bogus"), None);
        assert_eq!(dispatch("Title"), None);
        assert_eq!(dispatch("timeline"), Some(SlideKind::Timeline));
    }
}
