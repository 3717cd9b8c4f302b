//! Serialize a laid-out deck into a PPTX package.

use crate::package;
use crate::slide;
use chrono::{DateTime, Utc};
use deck_core::{DeckLayout, Error, Result};
use std::io::{Cursor, Seek, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Application name recorded in the document properties.
pub const DEFAULT_APPLICATION: &str = "deck-render";

/// Options for package serialization.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Creation time written to the core properties. Left out when unset.
    pub created: Option<DateTime<Utc>>,

    /// Application name written to the extended properties.
    pub application: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            created: None,
            application: DEFAULT_APPLICATION.to_string(),
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    pub fn with_application(mut self, application: impl Into<String>) -> Self {
        self.application = application.into();
        self
    }
}

fn zip_error(e: zip::result::ZipError) -> Error {
    Error::ZipError(e.to_string())
}

/// Writer for PPTX (Office Open XML) packages.
#[derive(Debug, Clone, Default)]
pub struct PptxWriter {
    options: RenderOptions,
}

impl PptxWriter {
    /// Create a new PPTX writer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Write `deck` into `sink` and hand the sink back.
    ///
    /// Entry timestamps are fixed, so identical input gives identical bytes.
    pub fn write<W: Write + Seek>(&self, deck: &DeckLayout, sink: W) -> Result<W> {
        let slide_count = deck.slide_count();
        let notes: Vec<usize> = deck
            .slides
            .iter()
            .enumerate()
            .filter(|(_, s)| slide::has_notes(s))
            .map(|(idx, _)| idx + 1)
            .collect();

        log::debug!(
            "Writing package: {} slides, {} notes pages",
            slide_count,
            notes.len()
        );

        let mut archive = ZipWriter::new(sink);
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default());

        let put = |out: &mut ZipWriter<W>, path: &str, bytes: &[u8]| -> Result<()> {
            out.start_file(path, options).map_err(zip_error)?;
            out.write_all(bytes)?;
            Ok(())
        };

        put(&mut archive, "[Content_Types].xml", &package::content_types(slide_count, &notes)?)?;
        put(&mut archive, "_rels/.rels", &package::root_relationships()?)?;
        put(
            &mut archive,
            "docProps/app.xml",
            &package::app_properties(&self.options.application, slide_count, notes.len())?,
        )?;
        put(
            &mut archive,
            "docProps/core.xml",
            &package::core_properties(&deck.title, &deck.author, self.options.created)?,
        )?;
        put(&mut archive, "ppt/presentation.xml", &package::presentation(slide_count)?)?;
        put(
            &mut archive,
            "ppt/_rels/presentation.xml.rels",
            &package::presentation_relationships(slide_count)?,
        )?;

        for (idx, layout) in deck.slides.iter().enumerate() {
            let number = idx + 1;
            let with_notes = slide::has_notes(layout);

            put(
                &mut archive,
                &format!("ppt/slides/slide{}.xml", number),
                &slide::slide_xml(layout)?,
            )?;
            put(
                &mut archive,
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                &slide::slide_relationships(number, with_notes)?,
            )?;

            if let Some(text) = layout.notes.as_deref().filter(|_| with_notes) {
                put(
                    &mut archive,
                    &format!("ppt/notesSlides/notesSlide{}.xml", number),
                    &slide::notes_xml(text)?,
                )?;
                put(
                    &mut archive,
                    &format!("ppt/notesSlides/_rels/notesSlide{}.xml.rels", number),
                    &slide::notes_relationships(number)?,
                )?;
            }
        }

        for (path, bytes) in package::fixed_parts()? {
            put(&mut archive, path, &bytes)?;
        }

        archive.finish().map_err(zip_error)
    }

    /// Write `deck` into memory.
    pub fn to_bytes(&self, deck: &DeckLayout) -> Result<Vec<u8>> {
        Ok(self.write(deck, Cursor::new(Vec::new()))?.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::element::{Paragraph, Role, TextFrame};
    use deck_core::geometry::Rect;
    use deck_core::{DrawableElement, SlideLayout};
    use std::io::Read;
    use zip::ZipArchive;

    fn deck() -> DeckLayout {
        DeckLayout {
            title: "Plan".into(),
            author: "Team".into(),
            slides: vec![
                SlideLayout {
                    name: "Slide_1_title".into(),
                    elements: vec![DrawableElement::text(
                        Role::Title,
                        Rect::new(0, 0, 100, 100),
                        TextFrame::single(Paragraph::literal("Hello")),
                    )],
                    notes: Some("say hi".into()),
                },
                SlideLayout {
                    name: "Slide_2_closing".into(),
                    elements: Vec::new(),
                    notes: None,
                },
            ],
        }
    }

    fn entry(bytes: &[u8], name: &str) -> Option<String> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).ok()?;
        let mut text = String::new();
        file.read_to_string(&mut text).unwrap();
        Some(text)
    }

    #[test]
    fn test_package_contains_required_parts() {
        let bytes = PptxWriter::default().to_bytes(&deck()).unwrap();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/app.xml",
            "docProps/core.xml",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/notesSlides/notesSlide1.xml",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/notesMasters/notesMaster1.xml",
            "ppt/theme/theme1.xml",
        ] {
            assert!(entry(&bytes, part).is_some(), "missing {}", part);
        }
        assert!(entry(&bytes, "ppt/notesSlides/notesSlide2.xml").is_none());
    }

    #[test]
    fn test_properties_carry_title_and_counts() {
        let bytes = PptxWriter::default().to_bytes(&deck()).unwrap();
        let core = entry(&bytes, "docProps/core.xml").unwrap();
        assert!(core.contains("<dc:title>Plan</dc:title>"));
        assert!(core.contains("<dc:creator>Team</dc:creator>"));

        let app = entry(&bytes, "docProps/app.xml").unwrap();
        assert!(app.contains("<Slides>2</Slides>"));
        assert!(app.contains("<Notes>1</Notes>"));
        assert!(app.contains("<Application>deck-render</Application>"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let writer = PptxWriter::new(RenderOptions::new());
        assert_eq!(writer.to_bytes(&deck()).unwrap(), writer.to_bytes(&deck()).unwrap());
    }
}
