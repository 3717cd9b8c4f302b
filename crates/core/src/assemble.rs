//! Fold a presentation into per-slide layouts.

use crate::dispatch::{dispatch, layout_slide};
use crate::element::SlideLayout;
use crate::guard;
use crate::layout::LayoutContext;
use crate::options::LayoutOptions;
use crate::types::{Presentation, Slide, SlideRecord};
use log::{debug, info, warn};
use serde::Serialize;

/// A laid-out deck, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckLayout {
    pub title: String,
    pub author: String,
    pub slides: Vec<SlideLayout>,
}

impl DeckLayout {
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

/// State carried from one slide to the next.
#[derive(Debug, Default)]
struct Fold {
    section_no: i64,
}

impl Fold {
    /// Number for the next section slide. An explicit number resets the
    /// counter; otherwise it advances by one, stopping at `i64::MAX`.
    fn next_section(&mut self, explicit: Option<i64>) -> i64 {
        self.section_no = match explicit {
            Some(no) => no,
            None => self.section_no.checked_add(1).unwrap_or_else(|| {
                warn!("Section counter is at its maximum; repeating {}", self.section_no);
                self.section_no
            }),
        };
        self.section_no
    }
}

/// Lay out every slide in input order.
///
/// Titles and notes are capped at `options.max_text_len` before use.
/// Unknown kinds produce a blank slide that keeps its notes.
pub fn assemble(presentation: &Presentation, options: &LayoutOptions) -> DeckLayout {
    let max = options.max_text_len;
    let mut fold = Fold::default();
    let mut slides = Vec::with_capacity(presentation.slides.len());

    info!(
        "Laying out '{}' ({} slides)",
        presentation.title,
        presentation.slides.len()
    );

    for (idx, record) in presentation.slides.iter().enumerate() {
        let tag = guard::truncate(record.kind_tag(), max);
        let name = format!("Slide_{}_{}", idx + 1, tag);
        debug!("Processing slide {}: type='{}'", idx + 1, tag);

        let notes = record
            .notes()
            .map(|n| guard::truncate(n, max).into_owned());

        let elements = match (dispatch(record.kind_tag()), record) {
            (None, _) => Vec::new(),
            (Some(_), SlideRecord::Known(slide)) => {
                let mut slide = slide.clone();
                if let Some(title) = slide.title_field_mut() {
                    if guard::truncate_in_place(title, max) {
                        warn!("Slide {} title truncated to {} characters", idx + 1, max);
                    }
                }

                let mut ctx = LayoutContext::new(options);
                if let Slide::Section(section) = &slide {
                    ctx = ctx.with_section_no(fold.next_section(section.section_no));
                }
                layout_slide(&slide, &ctx)
            }
            (Some(_), SlideRecord::Unknown(unknown)) => {
                warn!("Slide {} of known type '{}' was not validated; leaving it blank", idx + 1, unknown.kind);
                Vec::new()
            }
        };

        slides.push(SlideLayout {
            name,
            elements,
            notes,
        });
    }

    DeckLayout {
        title: guard::truncate(&presentation.title, max).into_owned(),
        author: guard::truncate(&presentation.author, max).into_owned(),
        slides,
    }
}
