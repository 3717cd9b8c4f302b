//! Domain types for describing a slide deck.
//!
//! The slide union mirrors the JSON schema the text-to-structure service
//! produces: a `type` discriminant plus per-kind fields in camelCase.

use crate::dispatch::SlideKind;
use crate::error::{Result, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An entire deck description, in presentation order.
#[derive(Debug, Clone, Serialize)]
pub struct Presentation {
    /// Document title, written to the package properties.
    pub title: String,

    /// Document author, written to the package properties.
    pub author: String,

    /// Slides in presentation order.
    pub slides: Vec<SlideRecord>,
}

/// How strictly slide kinds are checked on intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Intake {
    /// Unknown `type` values are a validation error.
    #[default]
    Strict,
    /// Unknown `type` values are kept and left for the dispatcher to skip.
    Lenient,
}

impl Presentation {
    /// Create an empty presentation.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            slides: Vec::new(),
        }
    }

    /// Append a slide.
    pub fn add_slide(&mut self, slide: impl Into<SlideRecord>) {
        self.slides.push(slide.into());
    }

    /// Parse and validate a deck from JSON text.
    pub fn from_json(json: &str, intake: Intake) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| ValidationError::document(format!("Malformed JSON: {}", e)))?;
        Self::from_value(value, intake)
    }

    /// Validate an already-parsed JSON value against the slide schema.
    ///
    /// Every slide is checked before anything is returned, so a caller never
    /// sees a partially valid deck.
    pub fn from_value(value: Value, intake: Intake) -> Result<Self> {
        let raw: RawPresentation = serde_json::from_value(value)
            .map_err(|e| ValidationError::document(e.to_string()))?;

        let mut presentation = Presentation::new(raw.title, raw.author);
        for (idx, slide) in raw.slides.into_iter().enumerate() {
            presentation.add_slide(parse_slide(idx, slide, intake)?);
        }

        Ok(presentation)
    }
}

#[derive(Deserialize)]
struct RawPresentation {
    title: String,
    author: String,
    slides: Vec<Value>,
}

fn parse_slide(idx: usize, value: Value, intake: Intake) -> Result<SlideRecord> {
    let Some(object) = value.as_object() else {
        return Err(ValidationError::slide(idx, None, "slide must be a JSON object").into());
    };

    let tag = match object.get("type") {
        Some(Value::String(tag)) => tag.clone(),
        Some(_) => {
            return Err(ValidationError::slide(idx, None, "field `type` must be a string").into());
        }
        None => return Err(ValidationError::slide(idx, None, "missing field `type`").into()),
    };

    if SlideKind::from_tag(&tag).is_none() {
        return match intake {
            Intake::Strict => Err(ValidationError::slide(
                idx,
                Some(&tag),
                format!("unknown slide type '{}'", tag),
            )
            .into()),
            Intake::Lenient => {
                let text = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);
                Ok(SlideRecord::Unknown(UnknownSlide {
                    kind: tag.clone(),
                    title: text("title"),
                    notes: text("notes"),
                }))
            }
        };
    }

    serde_json::from_value::<Slide>(value)
        .map(SlideRecord::Known)
        .map_err(|e| ValidationError::slide(idx, Some(&tag), e.to_string()).into())
}

/// One entry in the slide sequence: a recognised slide, or a record whose
/// kind the engine does not know.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SlideRecord {
    /// A slide of a known kind that passed validation.
    Known(Slide),
    /// A slide of an unrecognised kind, kept only in lenient intake.
    Unknown(UnknownSlide),
}

impl From<Slide> for SlideRecord {
    fn from(slide: Slide) -> Self {
        SlideRecord::Known(slide)
    }
}

impl SlideRecord {
    /// The declared `type` tag.
    pub fn kind_tag(&self) -> &str {
        match self {
            SlideRecord::Known(slide) => slide.kind().tag(),
            SlideRecord::Unknown(unknown) => &unknown.kind,
        }
    }

    /// Speaker notes, if any.
    pub fn notes(&self) -> Option<&str> {
        match self {
            SlideRecord::Known(slide) => slide.notes(),
            SlideRecord::Unknown(unknown) => unknown.notes.as_deref(),
        }
    }
}

/// A slide whose `type` was not recognised.
#[derive(Debug, Clone, Serialize)]
pub struct UnknownSlide {
    /// The unrecognised discriminant.
    #[serde(rename = "type")]
    pub kind: String,

    /// Title text, if the record had a string `title`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Notes text, if the record had a string `notes`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The closed union of slide kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Slide {
    Title(TitleSlide),
    Section(SectionSlide),
    Closing(ClosingSlide),
    Content(ContentSlide),
    Compare(CompareSlide),
    Process(ProcessSlide),
    Timeline(TimelineSlide),
    Diagram(DiagramSlide),
    Cards(CardsSlide),
    Table(TableSlide),
    Progress(ProgressSlide),
}

impl Slide {
    /// The kind selected by this variant.
    pub fn kind(&self) -> SlideKind {
        match self {
            Slide::Title(_) => SlideKind::Title,
            Slide::Section(_) => SlideKind::Section,
            Slide::Closing(_) => SlideKind::Closing,
            Slide::Content(_) => SlideKind::Content,
            Slide::Compare(_) => SlideKind::Compare,
            Slide::Process(_) => SlideKind::Process,
            Slide::Timeline(_) => SlideKind::Timeline,
            Slide::Diagram(_) => SlideKind::Diagram,
            Slide::Cards(_) => SlideKind::Cards,
            Slide::Table(_) => SlideKind::Table,
            Slide::Progress(_) => SlideKind::Progress,
        }
    }

    /// The slide title. Closing slides have none.
    pub fn title(&self) -> Option<&str> {
        self.title_field().map(String::as_str)
    }

    /// Speaker notes, if any.
    pub fn notes(&self) -> Option<&str> {
        self.notes_field().as_deref()
    }

    pub(crate) fn title_field_mut(&mut self) -> Option<&mut String> {
        match self {
            Slide::Title(s) => Some(&mut s.title),
            Slide::Section(s) => Some(&mut s.title),
            Slide::Closing(_) => None,
            Slide::Content(s) => Some(&mut s.title),
            Slide::Compare(s) => Some(&mut s.title),
            Slide::Process(s) => Some(&mut s.title),
            Slide::Timeline(s) => Some(&mut s.title),
            Slide::Diagram(s) => Some(&mut s.title),
            Slide::Cards(s) => Some(&mut s.title),
            Slide::Table(s) => Some(&mut s.title),
            Slide::Progress(s) => Some(&mut s.title),
        }
    }

    fn title_field(&self) -> Option<&String> {
        match self {
            Slide::Title(s) => Some(&s.title),
            Slide::Section(s) => Some(&s.title),
            Slide::Closing(_) => None,
            Slide::Content(s) => Some(&s.title),
            Slide::Compare(s) => Some(&s.title),
            Slide::Process(s) => Some(&s.title),
            Slide::Timeline(s) => Some(&s.title),
            Slide::Diagram(s) => Some(&s.title),
            Slide::Cards(s) => Some(&s.title),
            Slide::Table(s) => Some(&s.title),
            Slide::Progress(s) => Some(&s.title),
        }
    }

    fn notes_field(&self) -> &Option<String> {
        match self {
            Slide::Title(s) => &s.notes,
            Slide::Section(s) => &s.notes,
            Slide::Closing(s) => &s.notes,
            Slide::Content(s) => &s.notes,
            Slide::Compare(s) => &s.notes,
            Slide::Process(s) => &s.notes,
            Slide::Timeline(s) => &s.notes,
            Slide::Diagram(s) => &s.notes,
            Slide::Cards(s) => &s.notes,
            Slide::Table(s) => &s.notes,
            Slide::Progress(s) => &s.notes,
        }
    }
}

/// Cover slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleSlide {
    pub title: String,
    /// Date in `YYYY.MM.DD` form; drawn verbatim.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Chapter divider with a large section number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSlide {
    pub title: String,
    /// Explicit number; auto-numbered when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_no: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Final "Thank you" slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClosingSlide {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Bullet slide, one or two columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSlide {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subhead: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two_column: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ImageRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Side-by-side comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareSlide {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subhead: Option<String>,
    pub left_title: String,
    pub right_title: String,
    pub left_items: Vec<String>,
    pub right_items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ImageRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Horizontal flow of steps joined by arrows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessSlide {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subhead: Option<String>,
    pub steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ImageRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Milestones along a horizontal baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSlide {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subhead: Option<String>,
    pub milestones: Vec<Milestone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ImageRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One dated point on a timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub label: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<MilestoneState>,
}

/// Progress state of a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneState {
    Done,
    Next,
    Todo,
}

/// Swim-lane diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramSlide {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subhead: Option<String>,
    pub lanes: Vec<Lane>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ImageRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A horizontal band of a diagram slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub title: String,
    pub items: Vec<String>,
}

/// Grid of colored cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardsSlide {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subhead: Option<String>,
    /// Requested column count. Anything but 2 or 3 is laid out as 2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<i64>,
    pub items: Vec<CardItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ImageRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A card's content: a bare line or a title with an optional description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardItem {
    Text(String),
    Detailed {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        desc: Option<String>,
    },
}

/// Table with an optional header row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSlide {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subhead: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Labelled progress bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSlide {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subhead: Option<String>,
    pub items: Vec<ProgressItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One progress bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressItem {
    pub label: String,
    pub percent: f64,
}

/// An image reference. Accepted for schema compatibility; never fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageRef {
    Url(String),
    Captioned {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_deck() {
        let json = r#"{"title":"T","author":"A","slides":[
            {"type":"title","title":"Hello","date":"2025.01.01"},
            {"type":"closing"}
        ]}"#;
        let deck = Presentation::from_json(json, Intake::Strict).unwrap();

        assert_eq!(deck.title, "T");
        assert_eq!(deck.slides.len(), 2);
        assert_eq!(deck.slides[0].kind_tag(), "title");
        assert_eq!(deck.slides[1].kind_tag(), "closing");
    }

    #[test]
    fn test_camel_case_fields() {
        let json = r#"{"title":"T","author":"A","slides":[
            {"type":"section","title":"Intro","sectionNo":4},
            {"type":"compare","title":"C","leftTitle":"L","rightTitle":"R",
             "leftItems":["a"],"rightItems":["b"]}
        ]}"#;
        let deck = Presentation::from_json(json, Intake::Strict).unwrap();

        match &deck.slides[0] {
            SlideRecord::Known(Slide::Section(s)) => assert_eq!(s.section_no, Some(4)),
            other => panic!("unexpected record: {:?}", other),
        }
        match &deck.slides[1] {
            SlideRecord::Known(Slide::Compare(s)) => {
                assert_eq!(s.left_title, "L");
                assert_eq!(s.right_items, vec!["b"]);
            }
            other => panic!("unexpected record: {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let json = r#"{"title":"T","author":"A","slides":[
            {"type":"closing"},
            {"type":"process","title":"P"}
        ]}"#;
        let err = Presentation::from_json(json, Intake::Strict).unwrap_err();

        match err {
            crate::Error::Validation(v) => {
                assert_eq!(v.slide_index, Some(1));
                assert_eq!(v.kind.as_deref(), Some("process"));
                assert!(v.message.contains("steps"), "message was {}", v.message);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_field_type_is_rejected() {
        let json = r#"{"title":"T","author":"A","slides":[
            {"type":"progress","title":"P","items":[{"label":"x","percent":"half"}]}
        ]}"#;
        assert!(matches!(
            Presentation::from_json(json, Intake::Strict),
            Err(crate::Error::Validation(_))
        ));
    }

    #[test]
    fn test_missing_author_is_rejected() {
        let json = r#"{"title":"T","slides":[]}"#;
        let err = Presentation::from_json(json, Intake::Strict).unwrap_err();
        match err {
            crate::Error::Validation(v) => {
                assert_eq!(v.slide_index, None);
                assert!(v.message.contains("author"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_kind_strict_vs_lenient() {
        let json = r#"{"title":"T","author":"A","slides":[
            {"type":"bogus","notes":"still here"},
            {"type":"closing"}
        ]}"#;

        assert!(Presentation::from_json(json, Intake::Strict).is_err());

        let deck = Presentation::from_json(json, Intake::Lenient).unwrap();
        assert_eq!(deck.slides.len(), 2);
        match &deck.slides[0] {
            SlideRecord::Unknown(u) => {
                assert_eq!(u.kind, "bogus");
                assert_eq!(u.notes.as_deref(), Some("still here"));
            }
            other => panic!("unexpected record: {:?}", other),
        }
    }

    #[test]
    fn test_lenient_still_rejects_bad_known_kind() {
        let json = r#"{"title":"T","author":"A","slides":[{"type":"table","title":"x"}]}"#;
        assert!(Presentation::from_json(json, Intake::Lenient).is_err());
    }

    #[test]
    fn test_card_items_and_images_are_untagged() {
        let json = r#"{"title":"T","author":"A","slides":[
            {"type":"cards","title":"C","columns":3,
             "items":["plain",{"title":"t","desc":"d"},{"title":"only"}],
             "images":["http://x/a.png",{"url":"http://x/b.png","caption":"b"}]}
        ]}"#;
        let deck = Presentation::from_json(json, Intake::Strict).unwrap();
        let SlideRecord::Known(Slide::Cards(cards)) = &deck.slides[0] else {
            panic!("expected cards slide");
        };

        assert_eq!(cards.items[0], CardItem::Text("plain".into()));
        assert_eq!(
            cards.items[1],
            CardItem::Detailed {
                title: "t".into(),
                desc: Some("d".into())
            }
        );
        assert_eq!(
            cards.items[2],
            CardItem::Detailed {
                title: "only".into(),
                desc: None
            }
        );
        assert_eq!(cards.images.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_milestone_state() {
        let json = r#"{"title":"T","author":"A","slides":[
            {"type":"timeline","title":"TL","milestones":[
                {"label":"a","date":"Q1","state":"done"},
                {"label":"b","date":"Q2"}
            ]}
        ]}"#;
        let deck = Presentation::from_json(json, Intake::Strict).unwrap();
        let SlideRecord::Known(Slide::Timeline(tl)) = &deck.slides[0] else {
            panic!("expected timeline slide");
        };
        assert_eq!(tl.milestones[0].state, Some(MilestoneState::Done));
        assert_eq!(tl.milestones[1].state, None);
    }

    #[test]
    fn test_slide_serializes_with_type_tag() {
        let slide = Slide::Process(ProcessSlide {
            title: "P".into(),
            subhead: None,
            steps: vec!["a".into()],
            images: None,
            notes: None,
        });
        let value = serde_json::to_value(&slide).unwrap();
        assert_eq!(value["type"], "process");
        assert_eq!(value["steps"][0], "a");
        assert!(value.get("subhead").is_none());
    }
}
