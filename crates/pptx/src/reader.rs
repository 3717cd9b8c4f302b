//! Read a PPTX package back into a per-slide summary of its shapes and
//! speaker notes.

use deck_core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// A shape as found on a slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeSummary {
    pub name: String,
    /// Offset in EMU.
    pub x: i64,
    pub y: i64,
    /// Paragraphs joined by newlines; table cells by tabs within a row.
    pub text: String,
}

/// One slide of a read-back deck.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideSummary {
    pub name: String,
    pub shapes: Vec<ShapeSummary>,
    pub notes: Option<String>,
}

impl SlideSummary {
    /// Shapes whose name starts with `prefix` followed by a space.
    pub fn shapes_named<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a ShapeSummary> + 'a {
        self.shapes.iter().filter(move |s| {
            s.name
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with(' '))
        })
    }
}

/// A read-back deck.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckSummary {
    pub title: Option<String>,
    pub author: Option<String>,
    pub slides: Vec<SlideSummary>,
}

/// Reader for PPTX (Office Open XML) packages.
pub struct PptxReader;

impl PptxReader {
    /// Create a new PPTX reader.
    pub fn new() -> Self {
        Self
    }

    /// Read a package from a reader.
    pub fn read<R: Read + Seek>(&self, reader: R) -> Result<DeckSummary> {
        let mut archive =
            ZipArchive::new(reader).map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let (title, author) = match self.read_file_from_archive(&mut archive, "docProps/core.xml") {
            Ok(xml) => core_properties(&xml)?,
            Err(_) => (None, None),
        };

        let mut slides = Vec::new();
        for slide_path in self.get_slide_order(&mut archive)? {
            slides.push(self.read_slide(&mut archive, &slide_path)?);
        }

        Ok(DeckSummary {
            title,
            author,
            slides,
        })
    }

    /// Get the ordered list of slide paths from the presentation relationships.
    fn get_slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels = self.read_file_from_archive(archive, "ppt/_rels/presentation.xml.rels")?;
        let mut slides: Vec<(String, Option<usize>)> = relationships(&rels)?
            .into_iter()
            .filter(|rel| rel.kind.ends_with("/slide"))
            .map(|rel| {
                let order = extract_slide_number(&rel.id).or_else(|| extract_slide_number(&rel.target));
                (resolve("ppt", &rel.target), order)
            })
            .collect();

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }

    fn read_slide<R: Read + Seek>(&self, archive: &mut ZipArchive<R>, slide_path: &str) -> Result<SlideSummary> {
        let content = self.read_file_from_archive(archive, slide_path)?;
        let part = extract_part(&content)?;

        let notes = match self.notes_path(archive, slide_path)? {
            Some(path) => {
                let notes = extract_part(&self.read_file_from_archive(archive, &path)?)?;
                notes
                    .shapes
                    .into_iter()
                    .find(|s| s.placeholder.as_deref() == Some("body"))
                    .map(|s| s.summary.text)
            }
            None => None,
        };

        Ok(SlideSummary {
            name: part.name.unwrap_or_default(),
            shapes: part.shapes.into_iter().map(|s| s.summary).collect(),
            notes,
        })
    }

    /// Path of the notes part related to `slide_path`, if any.
    fn notes_path<R: Read + Seek>(&self, archive: &mut ZipArchive<R>, slide_path: &str) -> Result<Option<String>> {
        let (dir, file) = slide_path.rsplit_once('/').unwrap_or(("", slide_path));
        let rels_path = format!("{}/_rels/{}.rels", dir, file);
        let rels = match self.read_file_from_archive(archive, &rels_path) {
            Ok(rels) => rels,
            Err(_) => return Ok(None),
        };

        Ok(relationships(&rels)?
            .into_iter()
            .find(|rel| rel.kind.ends_with("/notesSlide"))
            .map(|rel| resolve(dir, &rel.target)))
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(&self, archive: &mut ZipArchive<R>, path: &str) -> Result<String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for PptxReader {
    fn default() -> Self {
        Self::new()
    }
}

struct Rel {
    id: String,
    kind: String,
    target: String,
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}

fn relationships(xml: &str) -> Result<Vec<Rel>> {
    let mut rels = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) if e.name().as_ref() == b"Relationship" => {
                rels.push(Rel {
                    id: attribute(e, b"Id").unwrap_or_default(),
                    kind: attribute(e, b"Type").unwrap_or_default(),
                    target: attribute(e, b"Target").unwrap_or_default(),
                });
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!("Error parsing relationships: {}", e)));
            }
            _ => {}
        }
    }

    Ok(rels)
}

/// Resolve a relationship target against the directory of its source part.
fn resolve(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }
    let mut parts: Vec<&str> = base_dir.split('/').filter(|p| !p.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            ".." => {
                parts.pop();
            }
            "." | "" => {}
            other => parts.push(other),
        }
    }
    parts.join("/")
}

fn core_properties(xml: &str) -> Result<(Option<String>, Option<String>)> {
    let mut reader = Reader::from_str(xml);
    let mut title = None;
    let mut author = None;
    let mut current: Option<Vec<u8>> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => current = Some(local_name(e.name().as_ref()).to_vec()),
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().map_err(|e| Error::XmlError(e.to_string()))?;
                match current.as_deref() {
                    Some(b"title") => title = Some(text.into_owned()),
                    Some(b"creator") => author = Some(text.into_owned()),
                    _ => {}
                }
            }
            Ok(Event::End(_)) => current = None,
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlError(format!("Error parsing core properties: {}", e))),
            _ => {}
        }
    }

    Ok((title, author))
}

/// A shape and its placeholder type, if it is a placeholder.
struct RawShape {
    summary: ShapeSummary,
    placeholder: Option<String>,
}

/// Shapes and the `cSld` name of a slide or notes part.
struct Part {
    name: Option<String>,
    shapes: Vec<RawShape>,
}

fn extract_part(xml: &str) -> Result<Part> {
    let mut reader = Reader::from_str(xml);
    // Run text keeps its spaces.
    reader.trim_text(false);

    let mut part = Part {
        name: None,
        shapes: Vec::new(),
    };
    let mut current: Option<RawShape> = None;
    let mut in_run_text = false;
    let mut first_para = true;
    let mut in_cell = false;
    let mut first_row = true;
    let mut first_cell = true;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if local_name(e.name().as_ref()) == b"t" => in_run_text = true,
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"cSld" => part.name = attribute(e, b"name"),
                    b"sp" | b"graphicFrame" | b"pic" | b"cxnSp" => {
                        current = Some(RawShape {
                            summary: ShapeSummary {
                                name: String::new(),
                                x: 0,
                                y: 0,
                                text: String::new(),
                            },
                            placeholder: None,
                        });
                        first_para = true;
                        first_row = true;
                    }
                    b"cNvPr" => {
                        if let Some(shape) = current.as_mut() {
                            shape.summary.name = attribute(e, b"name").unwrap_or_default();
                        }
                    }
                    b"ph" => {
                        if let Some(shape) = current.as_mut() {
                            shape.placeholder = Some(attribute(e, b"type").unwrap_or_else(|| "body".into()));
                        }
                    }
                    b"off" => {
                        if let Some(shape) = current.as_mut() {
                            shape.summary.x = attribute(e, b"x").and_then(|v| v.parse().ok()).unwrap_or(0);
                            shape.summary.y = attribute(e, b"y").and_then(|v| v.parse().ok()).unwrap_or(0);
                        }
                    }
                    b"tr" => {
                        if let Some(shape) = current.as_mut() {
                            if !first_row {
                                shape.summary.text.push('\n');
                            }
                        }
                        first_row = false;
                        first_cell = true;
                    }
                    b"tc" => {
                        if let Some(shape) = current.as_mut() {
                            if !first_cell {
                                shape.summary.text.push('\t');
                            }
                        }
                        first_cell = false;
                        in_cell = true;
                    }
                    b"p" if !in_cell => {
                        if let Some(shape) = current.as_mut() {
                            if !first_para {
                                shape.summary.text.push('\n');
                            }
                        }
                        first_para = false;
                    }
                    b"br" => {
                        if let Some(shape) = current.as_mut() {
                            shape.summary.text.push('\n');
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                if in_run_text {
                    if let Some(shape) = current.as_mut() {
                        let text = e.unescape().map_err(|e| Error::XmlError(e.to_string()))?;
                        shape.summary.text.push_str(&text);
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"sp" | b"graphicFrame" | b"pic" | b"cxnSp" => {
                        if let Some(shape) = current.take() {
                            part.shapes.push(shape);
                        }
                    }
                    b"tc" => in_cell = false,
                    b"t" => in_run_text = false,
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!("Error parsing slide: {}", e)));
            }
            _ => {}
        }
    }

    Ok(part)
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "rId2" or "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}
