//! Drawable element descriptors produced by the layout algorithms.
//!
//! Layouts only describe what to draw. The PPTX writer realizes these
//! descriptors, so geometry can be tested without a document backend.

use crate::geometry::{Color, Emu, Rect};
use crate::markup::{self, TextRun};
use serde::Serialize;

/// What an element is for. Also names the shape in the written document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    Title,
    Subhead,
    Date,
    Body,
    Column,
    SectionNumber,
    ColumnHeader,
    Step,
    Connector,
    Baseline,
    Marker,
    MilestoneDate,
    MilestoneLabel,
    LaneTitle,
    LaneItems,
    Card,
    Table,
    ProgressLabel,
    ProgressTrack,
    ProgressFill,
    ProgressValue,
}

impl Role {
    /// Human-readable shape name prefix.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Title => "Title",
            Role::Subhead => "Subhead",
            Role::Date => "Date",
            Role::Body => "Body",
            Role::Column => "Column",
            Role::SectionNumber => "Section Number",
            Role::ColumnHeader => "Column Header",
            Role::Step => "Step",
            Role::Connector => "Connector",
            Role::Baseline => "Baseline",
            Role::Marker => "Marker",
            Role::MilestoneDate => "Milestone Date",
            Role::MilestoneLabel => "Milestone Label",
            Role::LaneTitle => "Lane Title",
            Role::LaneItems => "Lane Items",
            Role::Card => "Card",
            Role::Table => "Table",
            Role::ProgressLabel => "Progress Label",
            Role::ProgressTrack => "Progress Track",
            Role::ProgressFill => "Progress Fill",
            Role::ProgressValue => "Progress Value",
        }
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Vertical anchoring of text inside its frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Anchor {
    #[default]
    Top,
    Middle,
}

/// Preset outline of a filled shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShapeGeometry {
    Rectangle,
    RoundedRectangle,
    Oval,
    RightArrow,
}

/// A paragraph of styled runs. Paragraph-level style applies to every run
/// unless the run overrides it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    pub runs: Vec<TextRun>,
    pub align: Option<Align>,
    /// Font size in points.
    pub size: Option<u32>,
    pub bold: bool,
    pub color: Option<Color>,
    pub face: Option<&'static str>,
    /// Outline level; 0 is the top level.
    pub level: u8,
    /// Space after the paragraph, in points.
    pub space_after: Option<u32>,
}

impl Paragraph {
    pub fn new(runs: Vec<TextRun>) -> Self {
        Self {
            runs,
            align: None,
            size: None,
            bold: false,
            color: None,
            face: None,
            level: 0,
            space_after: None,
        }
    }

    /// A paragraph from text carrying inline markup.
    pub fn markup(text: &str) -> Self {
        Self::new(markup::parse(text))
    }

    /// A paragraph drawn verbatim, without markup parsing.
    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Self::new(Vec::new())
        } else {
            Self::new(vec![TextRun::plain(text)])
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn face(mut self, face: &'static str) -> Self {
        self.face = Some(face);
        self
    }

    pub fn level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn space_after(mut self, points: u32) -> Self {
        self.space_after = Some(points);
        self
    }

    /// Text of all runs, without style.
    pub fn text(&self) -> String {
        markup::plain_text(&self.runs)
    }
}

/// Paragraphs laid into a frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextFrame {
    pub paragraphs: Vec<Paragraph>,
    pub anchor: Anchor,
    pub wrap: bool,
}

impl TextFrame {
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self {
            paragraphs,
            anchor: Anchor::Top,
            wrap: true,
        }
    }

    pub fn single(paragraph: Paragraph) -> Self {
        Self::new(vec![paragraph])
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Paragraph texts joined by newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One table cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCell {
    pub paragraph: Paragraph,
    pub anchor: Anchor,
}

/// A table grid with explicit track sizes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableGrid {
    pub column_widths: Vec<Emu>,
    pub row_heights: Vec<Emu>,
    /// Row-major cells; every row has `column_widths.len()` cells.
    pub rows: Vec<Vec<TableCell>>,
    /// Whether the first row is a header row.
    pub header: bool,
}

impl TableGrid {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }
}

/// The visual payload of an element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Content {
    /// A text box, optionally with a solid background.
    Text { frame: TextFrame, fill: Option<Color> },
    /// A filled preset shape, optionally holding text.
    Shape {
        geometry: ShapeGeometry,
        fill: Color,
        text: Option<TextFrame>,
    },
    /// A table.
    Table(TableGrid),
}

/// A positioned, styled visual primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawableElement {
    pub role: Role,
    pub rect: Rect,
    pub content: Content,
}

impl DrawableElement {
    /// A transparent text box.
    pub fn text(role: Role, rect: Rect, frame: TextFrame) -> Self {
        Self {
            role,
            rect,
            content: Content::Text { frame, fill: None },
        }
    }

    /// A text box with a solid background.
    pub fn filled_text(role: Role, rect: Rect, frame: TextFrame, fill: Color) -> Self {
        Self {
            role,
            rect,
            content: Content::Text {
                frame,
                fill: Some(fill),
            },
        }
    }

    /// A filled shape without text.
    pub fn shape(role: Role, rect: Rect, geometry: ShapeGeometry, fill: Color) -> Self {
        Self {
            role,
            rect,
            content: Content::Shape {
                geometry,
                fill,
                text: None,
            },
        }
    }

    /// A filled shape carrying text.
    pub fn labelled_shape(
        role: Role,
        rect: Rect,
        geometry: ShapeGeometry,
        fill: Color,
        frame: TextFrame,
    ) -> Self {
        Self {
            role,
            rect,
            content: Content::Shape {
                geometry,
                fill,
                text: Some(frame),
            },
        }
    }

    pub fn table(rect: Rect, grid: TableGrid) -> Self {
        Self {
            role: Role::Table,
            rect,
            content: Content::Table(grid),
        }
    }

    /// Visible text of the element, paragraphs joined by newlines.
    /// Table cells are joined row by row with tabs.
    pub fn text_content(&self) -> String {
        match &self.content {
            Content::Text { frame, .. } => frame.text(),
            Content::Shape { text, .. } => text.as_ref().map(TextFrame::text).unwrap_or_default(),
            Content::Table(grid) => grid
                .rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|cell| cell.paragraph.text())
                        .collect::<Vec<_>>()
                        .join("\t")
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// The layout of one slide, ready to be realized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideLayout {
    /// Deterministic slide identifier, `Slide_<ordinal>_<kind>`.
    pub name: String,
    pub elements: Vec<DrawableElement>,
    /// Speaker notes for the notes page.
    pub notes: Option<String>,
}

impl SlideLayout {
    /// Elements with the given role, in drawing order.
    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &DrawableElement> + '_ {
        self.elements.iter().filter(move |e| e.role == role)
    }

    /// Number of elements with the given role.
    pub fn count(&self, role: Role) -> usize {
        self.with_role(role).count()
    }
}
