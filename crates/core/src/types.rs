//! Domain types for the presentation document tree and extracted output.
//!
//! The input side (`Document`, `Slide`, `Shape`, `Paragraph`) is built
//! once by a parser backend and is read-only to the heuristics. All
//! optional metadata is resolved to `Option` fields at parse time, so
//! the heuristics never probe for attribute presence themselves.

use serde::{Deserialize, Serialize};

/// An entire parsed presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Original filename (without path).
    pub filename: String,

    /// Slides in presentation order.
    pub slides: Vec<Slide>,
}

impl Document {
    /// Create a new document with the given filename.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            slides: Vec::new(),
        }
    }

    /// Add a slide to the document.
    pub fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }
}

/// A single slide: ordered shapes plus optional speaker notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slide {
    /// 1-based slide number.
    pub number: usize,

    /// Shapes in document order.
    pub shapes: Vec<Shape>,

    /// Speaker notes text, if the slide has a notes part.
    pub notes: Option<String>,
}

impl Slide {
    /// Create a new slide with the given number.
    pub fn new(number: usize) -> Self {
        Self {
            number,
            shapes: Vec::new(),
            notes: None,
        }
    }

    /// Add a shape to this slide.
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }
}

/// A visual element on a slide: either text-bearing or a picture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Shape {
    Text(TextShape),
    Picture(PictureShape),
}

/// A text-bearing shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextShape {
    /// Shape name from the document (may be empty).
    pub name: String,

    /// True when the layout tags this shape as the title placeholder.
    pub is_title_placeholder: bool,

    /// Raw placeholder role from the layout ("title", "body",
    /// "sldNum", ...), when the shape is a placeholder at all.
    pub placeholder: Option<String>,

    /// Structured paragraph list. Empty means the shape only exposes
    /// a flat text blob and `raw_text` is used instead.
    pub paragraphs: Vec<Paragraph>,

    /// Newline-delimited fallback text for shapes without paragraph
    /// structure.
    pub raw_text: String,
}

impl TextShape {
    /// Create an empty text shape with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_title_placeholder: false,
            placeholder: None,
            paragraphs: Vec::new(),
            raw_text: String::new(),
        }
    }

    /// All text of this shape as a single string, for title extraction.
    pub fn full_text(&self) -> String {
        if self.paragraphs.is_empty() {
            self.raw_text.clone()
        } else {
            self.paragraphs
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

/// A picture shape with its optional accessibility metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PictureShape {
    /// Shape name from the document (often auto-generated, e.g. "Picture 3").
    pub name: String,

    /// Explicit alt-text attribute on the shape itself.
    pub alt_text: Option<String>,

    /// Description field found in the shape's property metadata.
    pub description: Option<String>,

    /// Title field in the same metadata element.
    pub title: Option<String>,
}

impl PictureShape {
    /// Create a picture shape with no metadata.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alt_text: None,
            description: None,
            title: None,
        }
    }
}

/// One paragraph of text within a shape's text container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paragraph {
    /// Paragraph text, runs already concatenated.
    pub text: String,

    /// Indentation level, 0-based.
    pub level: usize,

    /// Explicit bullet formatting carried by the paragraph, if any.
    /// `None` means the document gave no signal either way.
    pub bullet: Option<BulletHint>,
}

impl Paragraph {
    /// Create a paragraph with no explicit bullet formatting.
    pub fn new(text: impl Into<String>, level: usize) -> Self {
        Self {
            text: text.into(),
            level,
            bullet: None,
        }
    }

    /// Attach an explicit bullet hint.
    pub fn with_bullet(mut self, bullet: BulletHint) -> Self {
        self.bullet = Some(bullet);
        self
    }
}

/// Explicit bullet formatting read from paragraph properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletHint {
    /// List formatting explicitly disabled (`buNone`).
    Suppressed,

    /// A literal bullet glyph (`buChar`).
    Char(String),

    /// Bullet formatting is present (autonumber, bullet font, picture
    /// bullet, or run-level hints) but no literal glyph was given.
    Unspecified,
}

/// The extracted outline of one slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideRecord {
    /// 1-based slide number.
    pub number: usize,

    /// Title text; empty when the slide has no title placeholder.
    pub title: String,

    /// Rendered content lines in source order.
    pub content: Vec<String>,

    /// Image descriptions in source order.
    pub images: Vec<String>,

    /// Speaker notes; empty when absent.
    pub notes: String,
}

impl SlideRecord {
    /// Create an empty record for the given slide number.
    pub fn new(number: usize) -> Self {
        Self {
            number,
            title: String::new(),
            content: Vec::new(),
            images: Vec::new(),
            notes: String::new(),
        }
    }

    /// True when the record carries no extracted content at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.content.is_empty()
            && self.images.is_empty()
            && self.notes.is_empty()
    }
}
