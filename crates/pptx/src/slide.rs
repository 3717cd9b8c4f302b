//! Realize laid-out slides as DrawingML slide and notes parts.

use crate::package::{relationships, Relationship, REL_NOTES_MASTER, REL_NOTES_SLIDE, REL_SLIDE, REL_SLIDE_LAYOUT};
use crate::xml::{XmlBuilder, PML_NAMESPACES};
use deck_core::element::{Align, Anchor, Content, Paragraph, ShapeGeometry, TableGrid, TextFrame};
use deck_core::geometry::{Color, Rect};
use deck_core::markup::TextRun;
use deck_core::{Result, SlideLayout};

/// Built-in "Medium Style 2 - Accent 1" table style.
const TABLE_STYLE_ID: &str = "{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}";
const TABLE_URI: &str = "http://schemas.openxmlformats.org/drawingml/2006/table";
const TEXT_LANG: &str = "ja-JP";

fn preset(geometry: ShapeGeometry) -> &'static str {
    match geometry {
        ShapeGeometry::Rectangle => "rect",
        ShapeGeometry::RoundedRectangle => "roundRect",
        ShapeGeometry::Oval => "ellipse",
        ShapeGeometry::RightArrow => "rightArrow",
    }
}

fn align_value(align: Align) -> &'static str {
    match align {
        Align::Left => "l",
        Align::Center => "ctr",
        Align::Right => "r",
    }
}

fn anchor_value(anchor: Anchor) -> &'static str {
    match anchor {
        Anchor::Top => "t",
        Anchor::Middle => "ctr",
    }
}

/// Whether a slide gets a notes part.
pub(crate) fn has_notes(slide: &SlideLayout) -> bool {
    slide.notes.as_deref().is_some_and(|n| !n.is_empty())
}

fn solid_fill(b: &mut XmlBuilder, color: Color) -> Result<()> {
    b.start("a:solidFill", &[])?;
    b.empty("a:srgbClr", &[("val", &color.hex())])?;
    b.end("a:solidFill")
}

fn transform(b: &mut XmlBuilder, tag: &str, rect: &Rect) -> Result<()> {
    b.start(tag, &[])?;
    b.empty("a:off", &[("x", &rect.x.to_string()), ("y", &rect.y.to_string())])?;
    b.empty("a:ext", &[("cx", &rect.cx.to_string()), ("cy", &rect.cy.to_string())])?;
    b.end(tag)
}

fn run_properties(b: &mut XmlBuilder, tag: &str, paragraph: &Paragraph, run: Option<&TextRun>) -> Result<()> {
    let size = paragraph.size.map(|s| (s * 100).to_string());
    let bold = paragraph.bold || run.is_some_and(|r| r.bold);
    let color = run.and_then(|r| r.color).or(paragraph.color);

    let mut attrs = vec![("lang", TEXT_LANG)];
    if let Some(size) = &size {
        attrs.push(("sz", size.as_str()));
    }
    if bold {
        attrs.push(("b", "1"));
    }

    if color.is_none() && paragraph.face.is_none() {
        return b.empty(tag, &attrs);
    }
    b.start(tag, &attrs)?;
    if let Some(color) = color {
        solid_fill(b, color)?;
    }
    if let Some(face) = paragraph.face {
        b.empty("a:latin", &[("typeface", face)])?;
        b.empty("a:ea", &[("typeface", face)])?;
    }
    b.end(tag)
}

fn paragraph(b: &mut XmlBuilder, paragraph: &Paragraph) -> Result<()> {
    b.start("a:p", &[])?;

    let level = paragraph.level.to_string();
    let mut attrs = Vec::new();
    if paragraph.level > 0 {
        attrs.push(("lvl", level.as_str()));
    }
    if let Some(align) = paragraph.align {
        attrs.push(("algn", align_value(align)));
    }
    match paragraph.space_after {
        Some(points) => {
            b.start("a:pPr", &attrs)?;
            b.start("a:spcAft", &[])?;
            b.empty("a:spcPts", &[("val", &(points * 100).to_string())])?;
            b.end("a:spcAft")?;
            b.end("a:pPr")?;
        }
        None if !attrs.is_empty() => b.empty("a:pPr", &attrs)?,
        None => {}
    }

    for run in &paragraph.runs {
        // A vertical tab is a soft line break, as in PowerPoint.
        for (i, line) in run.text.split(['\n', '\u{b}']).enumerate() {
            if i > 0 {
                b.empty("a:br", &[])?;
            }
            if line.is_empty() {
                continue;
            }
            b.start("a:r", &[])?;
            run_properties(b, "a:rPr", paragraph, Some(run))?;
            b.leaf("a:t", &[], line)?;
            b.end("a:r")?;
        }
    }

    if paragraph.runs.is_empty() {
        run_properties(b, "a:endParaRPr", paragraph, None)?;
    }
    b.end("a:p")
}

fn text_body(b: &mut XmlBuilder, tag: &str, frame: &TextFrame) -> Result<()> {
    b.start(tag, &[])?;
    b.empty(
        "a:bodyPr",
        &[
            ("wrap", if frame.wrap { "square" } else { "none" }),
            ("rtlCol", "0"),
            ("anchor", anchor_value(frame.anchor)),
        ],
    )?;
    b.empty("a:lstStyle", &[])?;
    if frame.paragraphs.is_empty() {
        b.start("a:p", &[])?;
        b.empty("a:endParaRPr", &[("lang", TEXT_LANG)])?;
        b.end("a:p")?;
    }
    for p in &frame.paragraphs {
        paragraph(b, p)?;
    }
    b.end(tag)
}

/// How a non-table element is drawn.
struct ShapeStyle<'a> {
    geometry: ShapeGeometry,
    fill: Option<Color>,
    frame: Option<&'a TextFrame>,
    text_box: bool,
}

fn shape(b: &mut XmlBuilder, id: &str, name: &str, rect: &Rect, style: ShapeStyle<'_>) -> Result<()> {
    let ShapeStyle {
        geometry,
        fill,
        frame,
        text_box,
    } = style;

    b.start("p:sp", &[])?;
    b.start("p:nvSpPr", &[])?;
    b.empty("p:cNvPr", &[("id", id), ("name", name)])?;
    if text_box {
        b.empty("p:cNvSpPr", &[("txBox", "1")])?;
    } else {
        b.empty("p:cNvSpPr", &[])?;
    }
    b.empty("p:nvPr", &[])?;
    b.end("p:nvSpPr")?;

    b.start("p:spPr", &[])?;
    transform(b, "a:xfrm", rect)?;
    b.start("a:prstGeom", &[("prst", preset(geometry))])?;
    b.empty("a:avLst", &[])?;
    b.end("a:prstGeom")?;
    match fill {
        Some(color) => solid_fill(b, color)?,
        None => b.empty("a:noFill", &[])?,
    }
    if !text_box {
        b.start("a:ln", &[])?;
        b.empty("a:noFill", &[])?;
        b.end("a:ln")?;
    }
    b.end("p:spPr")?;

    if let Some(frame) = frame {
        text_body(b, "p:txBody", frame)?;
    }
    b.end("p:sp")
}

fn table(b: &mut XmlBuilder, id: &str, name: &str, rect: &Rect, grid: &TableGrid) -> Result<()> {
    b.start("p:graphicFrame", &[])?;
    b.start("p:nvGraphicFramePr", &[])?;
    b.empty("p:cNvPr", &[("id", id), ("name", name)])?;
    b.start("p:cNvGraphicFramePr", &[])?;
    b.empty("a:graphicFrameLocks", &[("noGrp", "1")])?;
    b.end("p:cNvGraphicFramePr")?;
    b.empty("p:nvPr", &[])?;
    b.end("p:nvGraphicFramePr")?;
    transform(b, "p:xfrm", rect)?;

    b.start("a:graphic", &[])?;
    b.start("a:graphicData", &[("uri", TABLE_URI)])?;
    b.start("a:tbl", &[])?;
    let first_row = if grid.header { "1" } else { "0" };
    b.start("a:tblPr", &[("firstRow", first_row), ("bandRow", "1")])?;
    b.leaf("a:tableStyleId", &[], TABLE_STYLE_ID)?;
    b.end("a:tblPr")?;

    b.start("a:tblGrid", &[])?;
    for width in &grid.column_widths {
        b.empty("a:gridCol", &[("w", &width.to_string())])?;
    }
    b.end("a:tblGrid")?;

    for (row, height) in grid.rows.iter().zip(&grid.row_heights) {
        b.start("a:tr", &[("h", &height.to_string())])?;
        for cell in row {
            b.start("a:tc", &[])?;
            b.start("a:txBody", &[])?;
            b.empty("a:bodyPr", &[])?;
            b.empty("a:lstStyle", &[])?;
            paragraph(b, &cell.paragraph)?;
            b.end("a:txBody")?;
            b.empty("a:tcPr", &[("anchor", anchor_value(cell.anchor))])?;
            b.end("a:tc")?;
        }
        b.end("a:tr")?;
    }

    b.end("a:tbl")?;
    b.end("a:graphicData")?;
    b.end("a:graphic")?;
    b.end("p:graphicFrame")
}

fn group_header(b: &mut XmlBuilder) -> Result<()> {
    b.start("p:nvGrpSpPr", &[])?;
    b.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    b.empty("p:cNvGrpSpPr", &[])?;
    b.empty("p:nvPr", &[])?;
    b.end("p:nvGrpSpPr")?;
    b.start("p:grpSpPr", &[])?;
    b.start("a:xfrm", &[])?;
    for (tag, a, v) in [("a:off", "x", "y"), ("a:ext", "cx", "cy"), ("a:chOff", "x", "y"), ("a:chExt", "cx", "cy")] {
        b.empty(tag, &[(a, "0"), (v, "0")])?;
    }
    b.end("a:xfrm")?;
    b.end("p:grpSpPr")
}

fn color_map_override(b: &mut XmlBuilder) -> Result<()> {
    b.start("p:clrMapOvr", &[])?;
    b.empty("a:masterClrMapping", &[])?;
    b.end("p:clrMapOvr")
}

/// Slide part for one laid-out slide. Shapes are numbered from 2 in
/// drawing order and named `<role> <n>`.
pub(crate) fn slide_xml(slide: &SlideLayout) -> Result<Vec<u8>> {
    let mut b = XmlBuilder::new()?;
    b.start("p:sld", &PML_NAMESPACES)?;
    b.start("p:cSld", &[("name", &slide.name)])?;
    b.start("p:spTree", &[])?;
    group_header(&mut b)?;

    for (n, element) in slide.elements.iter().enumerate() {
        let id = (n + 2).to_string();
        let name = format!("{} {}", element.role.label(), n + 1);
        let style = match &element.content {
            Content::Table(grid) => {
                table(&mut b, &id, &name, &element.rect, grid)?;
                continue;
            }
            Content::Text { frame, fill } => ShapeStyle {
                geometry: ShapeGeometry::Rectangle,
                fill: *fill,
                frame: Some(frame),
                text_box: true,
            },
            Content::Shape { geometry, fill, text } => ShapeStyle {
                geometry: *geometry,
                fill: Some(*fill),
                frame: text.as_ref(),
                text_box: false,
            },
        };
        shape(&mut b, &id, &name, &element.rect, style)?;
    }

    b.end("p:spTree")?;
    b.end("p:cSld")?;
    color_map_override(&mut b)?;
    b.end("p:sld")?;
    Ok(b.finish())
}

/// Relationships of slide `number`.
pub(crate) fn slide_relationships(number: usize, with_notes: bool) -> Result<Vec<u8>> {
    let notes_target = format!("../notesSlides/notesSlide{}.xml", number);
    let mut rels = vec![Relationship {
        id: "rId1",
        kind: REL_SLIDE_LAYOUT,
        target: "../slideLayouts/slideLayout1.xml",
    }];
    if with_notes {
        rels.push(Relationship {
            id: "rId2",
            kind: REL_NOTES_SLIDE,
            target: &notes_target,
        });
    }
    relationships(&rels)
}

fn placeholder(b: &mut XmlBuilder, id: &str, name: &str, ph: &[(&str, &str)], locks: &[(&str, &str)]) -> Result<()> {
    b.start("p:nvSpPr", &[])?;
    b.empty("p:cNvPr", &[("id", id), ("name", name)])?;
    b.start("p:cNvSpPr", &[])?;
    b.empty("a:spLocks", locks)?;
    b.end("p:cNvSpPr")?;
    b.start("p:nvPr", &[])?;
    b.empty("p:ph", ph)?;
    b.end("p:nvPr")?;
    b.end("p:nvSpPr")?;
    b.empty("p:spPr", &[])
}

/// Notes part: a slide image placeholder and a body placeholder with one
/// paragraph per line of `notes`.
pub(crate) fn notes_xml(notes: &str) -> Result<Vec<u8>> {
    let mut b = XmlBuilder::new()?;
    b.start("p:notes", &PML_NAMESPACES)?;
    b.start("p:cSld", &[])?;
    b.start("p:spTree", &[])?;
    group_header(&mut b)?;

    b.start("p:sp", &[])?;
    placeholder(
        &mut b,
        "2",
        "Slide Image Placeholder 1",
        &[("type", "sldImg")],
        &[("noGrp", "1"), ("noRot", "1"), ("noChangeAspect", "1")],
    )?;
    b.end("p:sp")?;

    b.start("p:sp", &[])?;
    placeholder(
        &mut b,
        "3",
        "Notes Placeholder 2",
        &[("type", "body"), ("idx", "1")],
        &[("noGrp", "1")],
    )?;
    let frame = TextFrame::new(notes.split('\n').map(Paragraph::literal).collect());
    text_body(&mut b, "p:txBody", &frame)?;
    b.end("p:sp")?;

    b.end("p:spTree")?;
    b.end("p:cSld")?;
    color_map_override(&mut b)?;
    b.end("p:notes")?;
    Ok(b.finish())
}

/// Relationships of the notes part for slide `number`.
pub(crate) fn notes_relationships(number: usize) -> Result<Vec<u8>> {
    let slide_target = format!("../slides/slide{}.xml", number);
    relationships(&[
        Relationship {
            id: "rId1",
            kind: REL_NOTES_MASTER,
            target: "../notesMasters/notesMaster1.xml",
        },
        Relationship {
            id: "rId2",
            kind: REL_SLIDE,
            target: &slide_target,
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::element::{Role, TableCell};
    use deck_core::DrawableElement;
    use deck_core::geometry::{inches, palette};

    fn render(elements: Vec<DrawableElement>) -> String {
        let slide = SlideLayout {
            name: "Slide_1_content".into(),
            elements,
            notes: None,
        };
        String::from_utf8(slide_xml(&slide).unwrap()).unwrap()
    }

    fn rect() -> Rect {
        Rect::new(inches(1.0), inches(2.0), inches(3.0), inches(1.0))
    }

    #[test]
    fn test_text_box_runs_and_style() {
        let p = Paragraph::markup("plain **bold** [[key]]").size(20).color(palette::TEXT);
        let xml = render(vec![DrawableElement::text(Role::Body, rect(), TextFrame::single(p))]);

        assert!(xml.contains(r#"<p:cSld name="Slide_1_content">"#));
        assert!(xml.contains(r#"<p:cNvPr id="2" name="Body 1"/>"#));
        assert!(xml.contains(r#"<p:cNvSpPr txBox="1"/>"#));
        assert!(xml.contains(r#"<a:off x="914400" y="1828800"/>"#));
        assert!(xml.contains(r#"sz="2000" b="1"><a:solidFill><a:srgbClr val="4285F4"/>"#));
        assert!(xml.contains("<a:t>key</a:t>"));
        assert!(xml.contains("<a:noFill/>"));
    }

    #[test]
    fn test_shape_has_preset_and_no_outline() {
        let xml = render(vec![DrawableElement::shape(
            Role::Connector,
            rect(),
            ShapeGeometry::RightArrow,
            palette::DARK_GRAY,
        )]);
        assert!(xml.contains(r#"<a:prstGeom prst="rightArrow">"#));
        assert!(xml.contains(r#"<a:srgbClr val="404040"/>"#));
        assert!(xml.contains("<a:ln><a:noFill/></a:ln>"));
        assert!(!xml.contains("p:txBody"));
    }

    #[test]
    fn test_embedded_newline_becomes_break() {
        let frame = TextFrame::single(Paragraph::literal("2025.01\nKickoff"));
        let xml = render(vec![DrawableElement::text(Role::Marker, rect(), frame)]);
        assert!(xml.contains("<a:t>2025.01</a:t></a:r><a:br/><a:r>"));
    }

    #[test]
    fn test_vertical_tab_becomes_break_and_controls_are_dropped() {
        let frame = TextFrame::single(Paragraph::literal("Hi\u{1}there\u{b}X"));
        let xml = render(vec![DrawableElement::text(Role::Title, rect(), frame)]);
        assert!(xml.contains("<a:t>Hithere</a:t></a:r><a:br/><a:r>"));
        assert!(xml.contains("<a:t>X</a:t>"));
        assert!(!xml.contains('\u{1}') && !xml.contains('\u{b}'));

        let notes = String::from_utf8(notes_xml("say\u{7}hi\u{b}then go").unwrap()).unwrap();
        assert!(notes.contains("<a:t>sayhi</a:t></a:r><a:br/>"));
        assert!(!notes.contains('\u{7}'));
    }

    #[test]
    fn test_table_frame() {
        let cell = |t: &str| TableCell {
            paragraph: Paragraph::literal(t),
            anchor: Anchor::Middle,
        };
        let grid = TableGrid {
            column_widths: vec![100, 200],
            row_heights: vec![50, 50],
            rows: vec![vec![cell("A"), cell("B")], vec![cell("1"), cell("2")]],
            header: true,
        };
        let xml = render(vec![DrawableElement::table(rect(), grid)]);

        assert!(xml.contains(r#"<p:cNvPr id="2" name="Table 1"/>"#));
        assert!(xml.contains(r#"<a:tblPr firstRow="1" bandRow="1">"#));
        assert!(xml.contains(r#"<a:gridCol w="200"/>"#));
        assert_eq!(xml.matches("<a:tr ").count(), 2);
        assert_eq!(xml.matches("<a:tc>").count(), 4);
        assert!(xml.contains(r#"<a:tcPr anchor="ctr"/>"#));
    }

    #[test]
    fn test_notes_are_split_into_paragraphs() {
        let xml = String::from_utf8(notes_xml("first\nsecond").unwrap()).unwrap();
        assert!(xml.contains(r#"<p:ph type="body" idx="1"/>"#));
        assert!(xml.contains("<a:t>first</a:t>"));
        assert!(xml.contains("<a:t>second</a:t>"));
        assert_eq!(xml.matches("<a:p>").count(), 2);
    }

    #[test]
    fn test_slide_relationships() {
        let xml = String::from_utf8(slide_relationships(3, true).unwrap()).unwrap();
        assert!(xml.contains("../notesSlides/notesSlide3.xml"));
        let xml = String::from_utf8(slide_relationships(3, false).unwrap()).unwrap();
        assert!(!xml.contains("notesSlide"));
    }
}
