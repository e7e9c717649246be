//! PPTX file parser implementation.
//!
//! Walks the archive's XML parts with an event reader and builds the
//! document tree: shapes with placeholder roles, paragraphs with their
//! indentation levels and explicit bullet attributes, picture metadata,
//! and per-slide speaker notes. All optional metadata is resolved here,
//! once, so the heuristics downstream never probe for attributes.

use outline_core::{
    BulletHint, Document, Error, Paragraph, PictureShape, Result, Shape, Slide, TextShape,
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Parser for PPTX (Office Open XML) files.
pub struct PptxParser;

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse a PPTX file from a reader.
    pub fn parse<R: Read + Seek>(&self, reader: R, filename: &str) -> Result<Document> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::Zip(format!("Failed to open ZIP: {}", e)))?;

        let mut document = Document::new(filename);

        let slide_order = self.slide_order(&mut archive)?;

        for (idx, slide_path) in slide_order.iter().enumerate() {
            let slide = self.parse_slide(&mut archive, slide_path, idx + 1)?;
            document.add_slide(slide);
        }

        Ok(document)
    }

    /// Get the ordered list of slide paths from the presentation
    /// relationships part.
    fn slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels_content =
            self.read_file_from_archive(archive, "ppt/_rels/presentation.xml.rels")?;
        let mut slides: Vec<(String, Option<usize>)> = Vec::new();

        let mut reader = Reader::from_str(&rels_content);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let mut rel_type = String::new();
                    let mut target = String::new();
                    let mut id = String::new();

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Type" => rel_type = String::from_utf8_lossy(&attr.value).to_string(),
                            b"Target" => target = String::from_utf8_lossy(&attr.value).to_string(),
                            b"Id" => id = String::from_utf8_lossy(&attr.value).to_string(),
                            _ => {}
                        }
                    }

                    if rel_type.contains("/slide")
                        && !rel_type.contains("slideLayout")
                        && !rel_type.contains("slideMaster")
                        && !rel_type.contains("notesSlide")
                    {
                        let order_num =
                            extract_slide_number(&id).or_else(|| extract_slide_number(&target));
                        slides.push((resolve_part_path("ppt", &target), order_num));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!("Error parsing relationships: {}", e)));
                }
                _ => {}
            }
        }

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }

    /// Parse a single slide part, including its notes slide if one is
    /// linked. Notes failures are logged and leave the field empty.
    fn parse_slide<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        slide_path: &str,
        slide_number: usize,
    ) -> Result<Slide> {
        let content = self.read_file_from_archive(archive, slide_path)?;
        let mut slide = Slide::new(slide_number);
        slide.shapes = parse_shapes(&content)?;

        match self.notes_part_path(archive, slide_path) {
            Ok(Some(notes_path)) => match self.read_file_from_archive(archive, &notes_path) {
                Ok(notes_xml) => {
                    slide.notes = parse_notes(&notes_xml);
                }
                Err(e) => {
                    log::warn!("Slide {}: could not read notes part: {}", slide_number, e);
                }
            },
            Ok(None) => {}
            Err(e) => {
                log::warn!("Slide {}: could not read slide rels: {}", slide_number, e);
            }
        }

        Ok(slide)
    }

    /// Find the notes-slide part linked from a slide's relationships,
    /// if any.
    fn notes_part_path<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        slide_path: &str,
    ) -> Result<Option<String>> {
        let rels_path = match slide_path.rsplit_once('/') {
            Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
            None => format!("_rels/{}.rels", slide_path),
        };

        if archive.by_name(&rels_path).is_err() {
            return Ok(None);
        }
        let rels_content = self.read_file_from_archive(archive, &rels_path)?;

        let base_dir = slide_path.rsplit_once('/').map(|(d, _)| d).unwrap_or("");

        let mut reader = Reader::from_str(&rels_content);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let mut rel_type = String::new();
                    let mut target = String::new();

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Type" => rel_type = String::from_utf8_lossy(&attr.value).to_string(),
                            b"Target" => target = String::from_utf8_lossy(&attr.value).to_string(),
                            _ => {}
                        }
                    }

                    if rel_type.contains("notesSlide") {
                        return Ok(Some(resolve_part_path(base_dir, &target)));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!("Error parsing slide rels: {}", e)));
                }
                _ => {}
            }
        }

        Ok(None)
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| Error::Zip(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::Zip(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for PptxParser {
    fn default() -> Self {
        Self::new()
    }
}

/// A shape being accumulated while walking slide XML.
enum PendingShape {
    Text(TextShape),
    Picture(PictureShape),
}

/// A paragraph being accumulated inside a text body.
#[derive(Default)]
struct PendingParagraph {
    text: String,
    level: usize,
    bullet: Option<BulletHint>,
}

impl PendingParagraph {
    /// Record a bullet signal without letting weaker ones override
    /// stronger ones (a literal glyph beats suppression beats a bare
    /// has-bullet marker; buFont next to buChar must not demote it).
    fn record_bullet(&mut self, hint: BulletHint) {
        let rank = |h: &BulletHint| match h {
            BulletHint::Char(_) => 3,
            BulletHint::Suppressed => 2,
            BulletHint::Unspecified => 1,
        };
        match &self.bullet {
            Some(existing) if rank(existing) >= rank(&hint) => {}
            _ => self.bullet = Some(hint),
        }
    }

    fn finish(self) -> Paragraph {
        Paragraph {
            text: self.text,
            level: self.level,
            bullet: self.bullet,
        }
    }
}

/// Extract the ordered shapes of one slide part.
fn parse_shapes(xml_content: &str) -> Result<Vec<Shape>> {
    let mut shapes = Vec::new();
    // No trim_text here: run text inside `a:t` must keep its exact
    // spacing, and accumulation is gated on `in_text_run` instead.
    let mut reader = Reader::from_str(xml_content);

    let mut current: Option<PendingShape> = None;
    let mut in_text_body = false;
    let mut in_paragraph_props = false;
    let mut in_text_run = false;
    let mut paragraph: Option<PendingParagraph> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"sp" => {
                        current = Some(PendingShape::Text(TextShape::new("")));
                    }
                    b"pic" => {
                        current = Some(PendingShape::Picture(PictureShape::new("")));
                    }
                    b"txBody" => {
                        in_text_body = true;
                    }
                    b"p" if in_text_body => {
                        paragraph = Some(PendingParagraph::default());
                    }
                    b"t" => {
                        in_text_run = true;
                    }
                    b"pPr" => {
                        apply_paragraph_props(e, paragraph.as_mut());
                        in_paragraph_props = true;
                    }
                    other => {
                        apply_metadata_attrs(other, e, current.as_mut());
                        apply_bullet_element(other, e, in_paragraph_props, paragraph.as_mut());
                    }
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"pPr" => {
                        apply_paragraph_props(e, paragraph.as_mut());
                    }
                    other => {
                        apply_metadata_attrs(other, e, current.as_mut());
                        apply_bullet_element(other, e, in_paragraph_props, paragraph.as_mut());
                    }
                }
            }
            Ok(Event::Text(ref e)) => {
                if in_text_run {
                    if let Some(ref mut para) = paragraph {
                        let text = e.unescape().unwrap_or_default();
                        para.text.push_str(&text);
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"sp" | b"pic" => {
                        if let Some(pending) = current.take() {
                            shapes.push(match pending {
                                PendingShape::Text(shape) => Shape::Text(shape),
                                PendingShape::Picture(shape) => Shape::Picture(shape),
                            });
                        }
                        in_text_body = false;
                        in_paragraph_props = false;
                        in_text_run = false;
                        paragraph = None;
                    }
                    b"txBody" => {
                        in_text_body = false;
                    }
                    b"t" => {
                        in_text_run = false;
                    }
                    b"pPr" => {
                        in_paragraph_props = false;
                    }
                    b"p" => {
                        if let Some(pending) = paragraph.take() {
                            if let Some(PendingShape::Text(ref mut shape)) = current {
                                if !shape.raw_text.is_empty() {
                                    shape.raw_text.push('\n');
                                }
                                shape.raw_text.push_str(&pending.text);
                                shape.paragraphs.push(pending.finish());
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("XML parsing error (continuing): {}", e);
            }
            _ => {}
        }
    }

    Ok(shapes)
}

/// Read `lvl` from paragraph properties.
fn apply_paragraph_props(e: &BytesStart, paragraph: Option<&mut PendingParagraph>) {
    let Some(para) = paragraph else { return };
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"lvl" {
            if let Ok(level) = String::from_utf8_lossy(&attr.value).parse::<usize>() {
                para.level = level;
            }
        }
    }
}

/// Map bullet-formatting child elements of `pPr` onto the pending
/// paragraph. Anything malformed simply leaves no signal behind.
fn apply_bullet_element(
    name: &[u8],
    e: &BytesStart,
    in_paragraph_props: bool,
    paragraph: Option<&mut PendingParagraph>,
) {
    if !in_paragraph_props {
        return;
    }
    let Some(para) = paragraph else { return };

    match name {
        b"buChar" => {
            let glyph = e.attributes().flatten().find_map(|attr| {
                if attr.key.as_ref() == b"char" {
                    Some(String::from_utf8_lossy(&attr.value).to_string())
                } else {
                    None
                }
            });
            match glyph {
                Some(c) if !c.trim().is_empty() => para.record_bullet(BulletHint::Char(c)),
                _ => para.record_bullet(BulletHint::Unspecified),
            }
        }
        b"buNone" => para.record_bullet(BulletHint::Suppressed),
        b"buAutoNum" | b"buFont" | b"buBlip" => para.record_bullet(BulletHint::Unspecified),
        _ => {}
    }
}

/// Collect name / alt-text / title metadata from non-visual property
/// elements into the pending shape.
fn apply_metadata_attrs(name: &[u8], e: &BytesStart, current: Option<&mut PendingShape>) {
    let Some(pending) = current else { return };
    let is_cnvpr = name == b"cNvPr";

    for attr in e.attributes().flatten() {
        let value = String::from_utf8_lossy(&attr.value).to_string();
        if value.is_empty() {
            continue;
        }
        match (attr.key.as_ref(), &mut *pending) {
            (b"name", PendingShape::Text(shape)) if is_cnvpr && shape.name.is_empty() => {
                shape.name = value;
            }
            (b"name", PendingShape::Picture(shape)) if is_cnvpr && shape.name.is_empty() => {
                shape.name = value;
            }
            (b"descr", PendingShape::Picture(shape)) => {
                if is_cnvpr && shape.alt_text.is_none() {
                    shape.alt_text = Some(value);
                } else if !is_cnvpr && shape.description.is_none() {
                    shape.description = Some(value);
                }
            }
            (b"title", PendingShape::Picture(shape)) if is_cnvpr && shape.title.is_none() => {
                shape.title = Some(value);
            }
            (b"type", PendingShape::Text(shape)) if name == b"ph" => {
                if value == "title" || value == "ctrTitle" {
                    shape.is_title_placeholder = true;
                }
                shape.placeholder = Some(value);
            }
            (b"idx", PendingShape::Text(shape)) if name == b"ph" => {
                if value == "0" {
                    shape.is_title_placeholder = true;
                }
            }
            _ => {}
        }
    }
}

/// Extract the speaker-notes text from a notes-slide part: the text of
/// body-placeholder shapes, one line per paragraph.
fn parse_notes(xml_content: &str) -> Option<String> {
    let shapes = match parse_shapes(xml_content) {
        Ok(shapes) => shapes,
        Err(e) => {
            log::warn!("Notes parsing error: {}", e);
            return None;
        }
    };

    let mut lines: Vec<String> = Vec::new();
    for shape in shapes {
        if let Shape::Text(text_shape) = shape {
            // Notes slides carry slide-image and slide-number
            // placeholders alongside the body; skip them by role so
            // legitimate numeric notes lines survive.
            if matches!(
                text_shape.placeholder.as_deref(),
                Some("sldNum") | Some("sldImg")
            ) {
                continue;
            }
            for para in &text_shape.paragraphs {
                let line = para.text.trim();
                if line.is_empty() {
                    continue;
                }
                lines.push(line.to_string());
            }
        }
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Resolve a relationship target against the directory of the part
/// that references it ("../notesSlides/notesSlide1.xml" from
/// "ppt/slides" becomes "ppt/notesSlides/notesSlide1.xml").
fn resolve_part_path(base_dir: &str, target: &str) -> String {
    if let Some(stripped) = target.strip_prefix('/') {
        return stripped.to_string();
    }

    let mut parts: Vec<&str> = base_dir.split('/').filter(|p| !p.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    parts.join("/")
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
