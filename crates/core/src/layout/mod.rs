//! Per-kind layout algorithms.
//!
//! Each algorithm is a pure function from typed slide data to drawable
//! elements. Nothing here touches a document; the PPTX writer realizes
//! the result.

pub mod cards;
pub mod compare;
pub mod content;
pub mod cover;
pub mod diagram;
pub mod process;
pub mod progress;
pub mod section;
pub mod table;
pub mod timeline;

use crate::element::{DrawableElement, Paragraph, Role, TextFrame};
use crate::geometry::{font, inches, palette, Emu, Rect, BODY_TOP, CONTENT_WIDTH, MARGIN_LEFT, MARGIN_TOP};
use crate::guard;
use crate::options::LayoutOptions;
use std::borrow::Cow;

/// Per-slide inputs beyond the slide data itself.
#[derive(Debug, Clone, Copy)]
pub struct LayoutContext<'a> {
    pub options: &'a LayoutOptions,
    /// Section number for this slide, from the assembler's counter.
    pub section_no: i64,
}

impl<'a> LayoutContext<'a> {
    pub fn new(options: &'a LayoutOptions) -> Self {
        Self {
            options,
            section_no: 1,
        }
    }

    pub fn with_section_no(mut self, section_no: i64) -> Self {
        self.section_no = section_no;
        self
    }

    /// Cap text destined for a single-string frame.
    pub fn cap<'t>(&self, text: &'t str) -> Cow<'t, str> {
        guard::truncate(text, self.options.max_text_len)
    }
}

/// Standard slide title: full content width at the top margin, 36pt bold.
pub(crate) fn title_box(title: &str, ctx: &LayoutContext<'_>) -> DrawableElement {
    let paragraph = Paragraph::markup(&ctx.cap(title))
        .size(font::SLIDE_TITLE)
        .bold()
        .color(palette::TEXT)
        .face(font::HEADLINE_FACE);
    DrawableElement::text(
        Role::Title,
        Rect::new(MARGIN_LEFT, MARGIN_TOP, CONTENT_WIDTH, inches(1.0)),
        TextFrame::single(paragraph),
    )
}

/// Title plus optional accent subhead. Returns the elements and the top of
/// the remaining body region.
pub(crate) fn header(
    title: &str,
    subhead: Option<&str>,
    ctx: &LayoutContext<'_>,
) -> (Vec<DrawableElement>, Emu) {
    let mut elements = vec![title_box(title, ctx)];
    let mut body_top = BODY_TOP;

    if let Some(subhead) = subhead {
        let paragraph = Paragraph::markup(&ctx.cap(subhead))
            .size(font::CAPTION)
            .color(palette::ACCENT)
            .face(font::BODY_FACE);
        elements.push(DrawableElement::text(
            Role::Subhead,
            Rect::new(MARGIN_LEFT, body_top, CONTENT_WIDTH, inches(0.5)),
            TextFrame::single(paragraph),
        ));
        body_top += inches(0.6);
    }

    (elements, body_top)
}

/// Level-1 bullet paragraphs with markup.
pub(crate) fn bullets(items: &[String], size: u32, ctx: &LayoutContext<'_>) -> Vec<Paragraph> {
    items
        .iter()
        .map(|item| {
            Paragraph::markup(&ctx.cap(item))
                .size(size)
                .face(font::BODY_FACE)
                .level(1)
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::element::{DrawableElement, Role};

    /// Elements with `role`, in drawing order.
    pub fn by_role(elements: &[DrawableElement], role: Role) -> Vec<&DrawableElement> {
        elements.iter().filter(|e| e.role == role).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_without_subhead() {
        let options = LayoutOptions::new();
        let ctx = LayoutContext::new(&options);
        let (elements, body_top) = header("Heading", None, &ctx);

        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].role, Role::Title);
        assert_eq!(elements[0].rect, Rect::new(inches(1.0), inches(0.8), inches(14.0), inches(1.0)));
        assert_eq!(body_top, inches(2.0));
    }

    #[test]
    fn test_subhead_moves_body_down() {
        let options = LayoutOptions::new();
        let ctx = LayoutContext::new(&options);
        let (elements, body_top) = header("Heading", Some("Sub"), &ctx);

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[1].rect.y, inches(2.0));
        assert_eq!(body_top, inches(2.6));
    }

    #[test]
    fn test_title_is_capped() {
        let options = LayoutOptions::new().with_max_text_len(4);
        let ctx = LayoutContext::new(&options);
        let title = title_box("abcdefgh", &ctx);
        assert_eq!(title.text_content(), "abcd...");
    }
}
