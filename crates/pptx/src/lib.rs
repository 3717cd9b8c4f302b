//! PPTX (Office Open XML) backend for laid-out slide decks.
//!
//! Writes a [`DeckLayout`] as a .pptx package (a ZIP archive of XML parts)
//! and reads packages back into per-slide summaries.

mod package;
pub mod reader;
mod slide;
pub mod writer;
mod xml;

pub use reader::{DeckSummary, PptxReader, ShapeSummary, SlideSummary};
pub use writer::{PptxWriter, RenderOptions};

use deck_core::{assemble, DeckLayout, LayoutOptions, Presentation, Result};

/// Lay out `presentation` and serialize it to PPTX bytes.
pub fn render_presentation(
    presentation: &Presentation,
    layout: &LayoutOptions,
    render: &RenderOptions,
) -> Result<Vec<u8>> {
    let deck: DeckLayout = assemble(presentation, layout);
    PptxWriter::new(render.clone()).to_bytes(&deck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{Error, Intake};
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn render(json: &str, intake: Intake) -> Vec<u8> {
        let deck = Presentation::from_json(json, intake).unwrap();
        render_presentation(&deck, &LayoutOptions::new(), &RenderOptions::new()).unwrap()
    }

    fn read(bytes: Vec<u8>) -> DeckSummary {
        PptxReader::new().read(Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn test_title_and_closing() {
        let json = r#"{"title":"Deck","author":"Me","slides":[
            {"type":"title","title":"Hello","date":"2025.09.10","notes":"opening\nwelcome"},
            {"type":"closing"}
        ]}"#;
        let deck = read(render(json, Intake::Strict));

        assert_eq!(deck.title.as_deref(), Some("Deck"));
        assert_eq!(deck.author.as_deref(), Some("Me"));
        assert_eq!(deck.slides.len(), 2);

        let cover = &deck.slides[0];
        assert_eq!(cover.name, "Slide_1_title");
        assert!(cover.shapes.iter().any(|s| s.text == "Hello"));
        assert!(cover.shapes.iter().any(|s| s.text == "2025.09.10"));
        assert_eq!(cover.notes.as_deref(), Some("opening\nwelcome"));

        let closing = &deck.slides[1];
        assert_eq!(closing.name, "Slide_2_closing");
        assert!(closing.shapes.iter().any(|s| s.text == "Thank you"));
        assert_eq!(closing.notes, None);
    }

    #[test]
    fn test_process_steps_and_connectors() {
        let json = r#"{"title":"Flow","author":"Me","slides":[
            {"type":"process","title":"How it works","steps":["Plan","**Build**","Ship"]}
        ]}"#;
        let deck = read(render(json, Intake::Strict));
        let slide = &deck.slides[0];

        let steps: Vec<&ShapeSummary> = slide.shapes_named("Step").collect();
        assert_eq!(steps.len(), 3);
        assert_eq!(slide.shapes_named("Connector").count(), 2);
        assert_eq!(steps[1].text, "Build");
        assert!(steps.windows(2).all(|w| w[0].x < w[1].x));
        assert!(steps.iter().all(|s| s.y == steps[0].y));
    }

    #[test]
    fn test_unknown_kind_does_not_abort_in_lenient_mode() {
        let json = r#"{"title":"Mixed","author":"Me","slides":[
            {"type":"bogus","title":"??","notes":"still here"},
            {"type":"closing"}
        ]}"#;
        let deck = read(render(json, Intake::Lenient));

        assert_eq!(deck.slides.len(), 2);
        assert_eq!(deck.slides[0].name, "Slide_1_bogus");
        assert!(deck.slides[0].shapes.is_empty());
        assert_eq!(deck.slides[0].notes.as_deref(), Some("still here"));
        assert!(deck.slides[1].shapes.iter().any(|s| s.text == "Thank you"));
    }

    #[test]
    fn test_unknown_kind_is_rejected_in_strict_mode() {
        let json = r#"{"title":"Mixed","author":"Me","slides":[{"type":"bogus"}]}"#;
        let err = Presentation::from_json(json, Intake::Strict).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_table_reads_back_as_cells() {
        let json = r#"{"title":"T","author":"A","slides":[
            {"type":"table","title":"Plan","headers":["Item","Owner"],"rows":[["Docs","Ann"],["Tests","Bo"]]}
        ]}"#;
        let deck = read(render(json, Intake::Strict));
        let table = deck.slides[0].shapes_named("Table").next().unwrap();
        assert_eq!(table.text, "Item\tOwner\nDocs\tAnn\nTests\tBo");
    }

    #[test]
    fn test_control_characters_never_reach_the_package() {
        let json = r#"{"title":"Deck\u0002","author":"Me","slides":[
            {"type":"title","title":"Hi\u0001there\u000bX","date":"2025.09.10","notes":"a\u0007b\u000bc"}
        ]}"#;
        let bytes = render(json, Intake::Strict);

        let mut archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let mut slide = String::new();
        archive.by_name("ppt/slides/slide1.xml").unwrap().read_to_string(&mut slide).unwrap();
        assert!(!slide.chars().any(|c| c < ' ' && !matches!(c, '\t' | '\n' | '\r')));

        let deck = read(bytes);
        assert_eq!(deck.title.as_deref(), Some("Deck"));
        let cover = &deck.slides[0];
        assert!(cover.shapes.iter().any(|s| s.text == "Hithere\nX"));
        assert_eq!(cover.notes.as_deref(), Some("ab\nc"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let json = r#"{"title":"T","author":"A","slides":[
            {"type":"section","title":"Intro"},
            {"type":"timeline","title":"Road","milestones":[{"label":"Start","date":"2025.01","state":"done"}]}
        ]}"#;
        assert_eq!(render(json, Intake::Strict), render(json, Intake::Strict));
    }
}
