//! Package-level parts: content types, relationships, presentation,
//! document properties, and the fixed master/layout/theme parts.

use crate::xml::{XmlBuilder, NS_PACKAGE_RELS, PML_NAMESPACES};
use chrono::{DateTime, Utc};
use deck_core::geometry::{SLIDE_HEIGHT, SLIDE_WIDTH};
use deck_core::Result;

pub(crate) const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
pub(crate) const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
pub(crate) const CT_NOTES_SLIDE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.notesSlide+xml";

pub(crate) const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub(crate) const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
pub(crate) const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
pub(crate) const REL_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
pub(crate) const REL_NOTES_SLIDE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesSlide";
pub(crate) const REL_NOTES_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesMaster";
pub(crate) const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";

/// Relationship ids fixed in `ppt/_rels/presentation.xml.rels`. Slides
/// follow from [`FIRST_SLIDE_REL`].
const MASTER_REL_ID: &str = "rId1";
const THEME_REL_ID: &str = "rId2";
const NOTES_MASTER_REL_ID: &str = "rId3";
const FIRST_SLIDE_REL: usize = 4;

/// Relationship id of slide `number` (1-based) in the presentation part.
pub(crate) fn slide_rel_id(number: usize) -> String {
    format!("rId{}", FIRST_SLIDE_REL + number - 1)
}

/// One relationship entry.
pub(crate) struct Relationship<'a> {
    pub id: &'a str,
    pub kind: &'a str,
    pub target: &'a str,
}

/// A relationships part.
pub(crate) fn relationships(rels: &[Relationship<'_>]) -> Result<Vec<u8>> {
    let mut b = XmlBuilder::new()?;
    b.start("Relationships", &[("xmlns", NS_PACKAGE_RELS)])?;
    for rel in rels {
        b.empty(
            "Relationship",
            &[("Id", rel.id), ("Type", rel.kind), ("Target", rel.target)],
        )?;
    }
    b.end("Relationships")?;
    Ok(b.finish())
}

/// `[Content_Types].xml` for `slide_count` slides, with notes parts for
/// the 1-based slide numbers in `notes`.
pub(crate) fn content_types(slide_count: usize, notes: &[usize]) -> Result<Vec<u8>> {
    let mut overrides: Vec<(String, &str)> = vec![
        ("/ppt/presentation.xml".into(), CT_PRESENTATION),
        (
            "/ppt/slideMasters/slideMaster1.xml".into(),
            "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml",
        ),
        (
            "/ppt/slideLayouts/slideLayout1.xml".into(),
            "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml",
        ),
        (
            "/ppt/notesMasters/notesMaster1.xml".into(),
            "application/vnd.openxmlformats-officedocument.presentationml.notesMaster+xml",
        ),
        ("/ppt/theme/theme1.xml".into(), "application/vnd.openxmlformats-officedocument.theme+xml"),
        ("/ppt/theme/theme2.xml".into(), "application/vnd.openxmlformats-officedocument.theme+xml"),
        (
            "/docProps/app.xml".into(),
            "application/vnd.openxmlformats-officedocument.extended-properties+xml",
        ),
        (
            "/docProps/core.xml".into(),
            "application/vnd.openxmlformats-package.core-properties+xml",
        ),
    ];
    for n in 1..=slide_count {
        overrides.push((format!("/ppt/slides/slide{}.xml", n), CT_SLIDE));
    }
    for n in notes {
        overrides.push((format!("/ppt/notesSlides/notesSlide{}.xml", n), CT_NOTES_SLIDE));
    }

    let mut b = XmlBuilder::new()?;
    b.start(
        "Types",
        &[("xmlns", "http://schemas.openxmlformats.org/package/2006/content-types")],
    )?;
    b.empty(
        "Default",
        &[
            ("Extension", "rels"),
            ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
        ],
    )?;
    b.empty("Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;
    for (part, content_type) in &overrides {
        b.empty("Override", &[("PartName", part.as_str()), ("ContentType", *content_type)])?;
    }
    b.end("Types")?;
    Ok(b.finish())
}

/// `_rels/.rels`.
pub(crate) fn root_relationships() -> Result<Vec<u8>> {
    relationships(&[
        Relationship {
            id: "rId1",
            kind: REL_OFFICE_DOCUMENT,
            target: "ppt/presentation.xml",
        },
        Relationship {
            id: "rId2",
            kind: "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties",
            target: "docProps/app.xml",
        },
        Relationship {
            id: "rId3",
            kind: "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties",
            target: "docProps/core.xml",
        },
    ])
}

/// `ppt/_rels/presentation.xml.rels`.
pub(crate) fn presentation_relationships(slide_count: usize) -> Result<Vec<u8>> {
    let slide_ids: Vec<(String, String)> = (1..=slide_count)
        .map(|n| (slide_rel_id(n), format!("slides/slide{}.xml", n)))
        .collect();

    let mut rels = vec![
        Relationship {
            id: MASTER_REL_ID,
            kind: REL_SLIDE_MASTER,
            target: "slideMasters/slideMaster1.xml",
        },
        Relationship {
            id: THEME_REL_ID,
            kind: REL_THEME,
            target: "theme/theme1.xml",
        },
        Relationship {
            id: NOTES_MASTER_REL_ID,
            kind: REL_NOTES_MASTER,
            target: "notesMasters/notesMaster1.xml",
        },
    ];
    rels.extend(slide_ids.iter().map(|(id, target)| Relationship {
        id,
        kind: REL_SLIDE,
        target,
    }));
    relationships(&rels)
}

/// `ppt/presentation.xml` with the 16:9 slide size.
pub(crate) fn presentation(slide_count: usize) -> Result<Vec<u8>> {
    let mut b = XmlBuilder::new()?;
    let mut attrs = PML_NAMESPACES.to_vec();
    attrs.push(("saveSubsetFonts", "1"));
    b.start("p:presentation", &attrs)?;

    b.start("p:sldMasterIdLst", &[])?;
    b.empty("p:sldMasterId", &[("id", "2147483648"), ("r:id", MASTER_REL_ID)])?;
    b.end("p:sldMasterIdLst")?;

    b.start("p:notesMasterIdLst", &[])?;
    b.empty("p:notesMasterId", &[("r:id", NOTES_MASTER_REL_ID)])?;
    b.end("p:notesMasterIdLst")?;

    if slide_count > 0 {
        b.start("p:sldIdLst", &[])?;
        for n in 1..=slide_count {
            b.empty(
                "p:sldId",
                &[("id", &(255 + n).to_string()), ("r:id", &slide_rel_id(n))],
            )?;
        }
        b.end("p:sldIdLst")?;
    }

    b.empty(
        "p:sldSz",
        &[("cx", &SLIDE_WIDTH.to_string()), ("cy", &SLIDE_HEIGHT.to_string())],
    )?;
    b.empty("p:notesSz", &[("cx", "6858000"), ("cy", "9144000")])?;
    b.end("p:presentation")?;
    Ok(b.finish())
}

/// `docProps/app.xml`.
pub(crate) fn app_properties(application: &str, slide_count: usize, notes_count: usize) -> Result<Vec<u8>> {
    let mut b = XmlBuilder::new()?;
    b.start(
        "Properties",
        &[
            (
                "xmlns",
                "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
            ),
            (
                "xmlns:vt",
                "http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes",
            ),
        ],
    )?;
    b.leaf("TotalTime", &[], "0")?;
    b.leaf("Application", &[], application)?;
    b.leaf("PresentationFormat", &[], "Custom")?;
    b.leaf("Slides", &[], &slide_count.to_string())?;
    b.leaf("Notes", &[], &notes_count.to_string())?;
    b.leaf("HiddenSlides", &[], "0")?;
    b.leaf("ScaleCrop", &[], "false")?;
    b.leaf("LinksUpToDate", &[], "false")?;
    b.leaf("SharedDoc", &[], "false")?;
    b.leaf("HyperlinksChanged", &[], "false")?;
    b.end("Properties")?;
    Ok(b.finish())
}

/// `docProps/core.xml`. Timestamps are written only when supplied.
pub(crate) fn core_properties(title: &str, author: &str, created: Option<DateTime<Utc>>) -> Result<Vec<u8>> {
    let mut b = XmlBuilder::new()?;
    b.start(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:dcmitype", "http://purl.org/dc/dcmitype/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    b.leaf("dc:title", &[], title)?;
    b.leaf("dc:creator", &[], author)?;
    b.leaf("cp:lastModifiedBy", &[], author)?;
    b.leaf("cp:revision", &[], "1")?;
    if let Some(created) = created {
        let stamp = created.format("%Y-%m-%dT%H:%M:%SZ").to_string();
        b.leaf("dcterms:created", &[("xsi:type", "dcterms:W3CDTF")], &stamp)?;
        b.leaf("dcterms:modified", &[("xsi:type", "dcterms:W3CDTF")], &stamp)?;
    }
    b.end("cp:coreProperties")?;
    Ok(b.finish())
}

pub(crate) const SLIDE_LAYOUT: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="blank" preserve="1">
  <p:cSld name="Blank">
    <p:spTree>
      <p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
      <p:grpSpPr/>
    </p:spTree>
  </p:cSld>
  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sldLayout>"#;

pub(crate) const SLIDE_MASTER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:cSld>
    <p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>
    <p:spTree>
      <p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
      <p:grpSpPr/>
    </p:spTree>
  </p:cSld>
  <p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
  <p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>
</p:sldMaster>"#;

pub(crate) const NOTES_MASTER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:notesMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:cSld>
    <p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>
    <p:spTree>
      <p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
      <p:grpSpPr/>
    </p:spTree>
  </p:cSld>
  <p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
</p:notesMaster>"#;

/// Theme shared by slides and notes. Brand accent first; Meiryo UI for
/// both headline and body text.
pub(crate) const THEME: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Deck">
  <a:themeElements>
    <a:clrScheme name="Deck">
      <a:dk1><a:srgbClr val="202124"/></a:dk1>
      <a:lt1><a:srgbClr val="FFFFFF"/></a:lt1>
      <a:dk2><a:srgbClr val="404040"/></a:dk2>
      <a:lt2><a:srgbClr val="DCDCDC"/></a:lt2>
      <a:accent1><a:srgbClr val="4285F4"/></a:accent1>
      <a:accent2><a:srgbClr val="FF0000"/></a:accent2>
      <a:accent3><a:srgbClr val="FFA500"/></a:accent3>
      <a:accent4><a:srgbClr val="008000"/></a:accent4>
      <a:accent5><a:srgbClr val="404040"/></a:accent5>
      <a:accent6><a:srgbClr val="DCDCDC"/></a:accent6>
      <a:hlink><a:srgbClr val="4285F4"/></a:hlink>
      <a:folHlink><a:srgbClr val="404040"/></a:folHlink>
    </a:clrScheme>
    <a:fontScheme name="Deck">
      <a:majorFont><a:latin typeface="Meiryo UI"/><a:ea typeface="Meiryo UI"/><a:cs typeface=""/></a:majorFont>
      <a:minorFont><a:latin typeface="Meiryo UI"/><a:ea typeface="Meiryo UI"/><a:cs typeface=""/></a:minorFont>
    </a:fontScheme>
    <a:fmtScheme name="Deck">
      <a:fillStyleLst>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
      </a:fillStyleLst>
      <a:lnStyleLst>
        <a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
        <a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
        <a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
      </a:lnStyleLst>
      <a:effectStyleLst>
        <a:effectStyle><a:effectLst/></a:effectStyle>
        <a:effectStyle><a:effectLst/></a:effectStyle>
        <a:effectStyle><a:effectLst/></a:effectStyle>
      </a:effectStyleLst>
      <a:bgFillStyleLst>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
      </a:bgFillStyleLst>
    </a:fmtScheme>
  </a:themeElements>
</a:theme>"#;

/// Fixed parts and their relationship parts, as `(path, bytes)`.
pub(crate) fn fixed_parts() -> Result<Vec<(&'static str, Vec<u8>)>> {
    Ok(vec![
        ("ppt/slideLayouts/slideLayout1.xml", SLIDE_LAYOUT.as_bytes().to_vec()),
        (
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            relationships(&[Relationship {
                id: "rId1",
                kind: REL_SLIDE_MASTER,
                target: "../slideMasters/slideMaster1.xml",
            }])?,
        ),
        ("ppt/slideMasters/slideMaster1.xml", SLIDE_MASTER.as_bytes().to_vec()),
        (
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            relationships(&[
                Relationship {
                    id: "rId1",
                    kind: REL_SLIDE_LAYOUT,
                    target: "../slideLayouts/slideLayout1.xml",
                },
                Relationship {
                    id: "rId2",
                    kind: REL_THEME,
                    target: "../theme/theme1.xml",
                },
            ])?,
        ),
        ("ppt/notesMasters/notesMaster1.xml", NOTES_MASTER.as_bytes().to_vec()),
        (
            "ppt/notesMasters/_rels/notesMaster1.xml.rels",
            relationships(&[Relationship {
                id: "rId1",
                kind: REL_THEME,
                target: "../theme/theme2.xml",
            }])?,
        ),
        ("ppt/theme/theme1.xml", THEME.as_bytes().to_vec()),
        ("ppt/theme/theme2.xml", THEME.as_bytes().to_vec()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_presentation_has_sixteen_by_nine_size() {
        let xml = text(presentation(2).unwrap());
        assert!(xml.contains(r#"<p:sldSz cx="14630400" cy="8229600"/>"#));
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId4"/>"#));
        assert!(xml.contains(r#"<p:sldId id="257" r:id="rId5"/>"#));
    }

    #[test]
    fn test_empty_deck_omits_slide_list() {
        let xml = text(presentation(0).unwrap());
        assert!(!xml.contains("sldIdLst"));
    }

    #[test]
    fn test_content_types_list_notes() {
        let xml = text(content_types(3, &[2]).unwrap());
        assert!(xml.contains("/ppt/slides/slide3.xml"));
        assert!(xml.contains("/ppt/notesSlides/notesSlide2.xml"));
        assert!(!xml.contains("/ppt/notesSlides/notesSlide1.xml"));
    }

    #[test]
    fn test_core_properties_escape_and_time() {
        let xml = text(core_properties("R&D <plan>", "Team", None).unwrap());
        assert!(xml.contains("<dc:title>R&amp;D &lt;plan&gt;</dc:title>"));
        assert!(!xml.contains("dcterms:created"));

        let at = DateTime::parse_from_rfc3339("2025-09-10T01:02:03Z").unwrap().with_timezone(&Utc);
        let xml = text(core_properties("T", "A", Some(at)).unwrap());
        assert!(xml.contains(">2025-09-10T01:02:03Z</dcterms:created>"));
    }
}
