//! Shape text assembly: turns one text shape into ordered rendered lines.
//!
//! A shape is processed in exactly one of two modes, chosen by whether
//! it exposes a structured paragraph list. Both modes feed the same
//! bullet resolver, so one heuristic governs the whole output.

use crate::bullet::{starts_with_bullet, BulletResolver};
use crate::error::{Error, Result};
use crate::types::{Paragraph, TextShape};

/// Maximum paragraph indentation level allowed by OOXML. Anything
/// deeper indicates a corrupt tree node.
const MAX_INDENT_LEVEL: usize = 8;

/// Assembles the rendered text lines of a single shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeTextAssembler {
    resolver: BulletResolver,
}

impl ShapeTextAssembler {
    /// Create a new assembler.
    pub fn new() -> Self {
        Self {
            resolver: BulletResolver::new(),
        }
    }

    /// Render the lines of `shape` in source order.
    ///
    /// Recomputed fresh on every call; no state is carried between
    /// shapes.
    pub fn assemble(&self, shape: &TextShape) -> Result<Vec<String>> {
        if shape.paragraphs.is_empty() {
            self.assemble_flat(&shape.raw_text)
        } else {
            self.assemble_structured(&shape.paragraphs)
        }
    }

    /// Structured mode: one rendered line per non-empty paragraph.
    fn assemble_structured(&self, paragraphs: &[Paragraph]) -> Result<Vec<String>> {
        let mut lines: Vec<String> = Vec::new();

        for paragraph in paragraphs {
            if paragraph.text.trim().is_empty() {
                continue;
            }
            if paragraph.level > MAX_INDENT_LEVEL {
                return Err(Error::Shape(format!(
                    "paragraph level {} exceeds the OOXML maximum of {}",
                    paragraph.level, MAX_INDENT_LEVEL
                )));
            }

            let resolved = self.resolver.resolve(paragraph, &lines);
            lines.push(render_line(paragraph.level, &resolved.glyph, &resolved.text));
        }

        Ok(lines)
    }

    /// Flat mode: the shape only exposes a newline-delimited blob.
    /// Indentation level is estimated from the leading-whitespace run
    /// (two characters per level). Lines that already carry a bullet
    /// character are emitted verbatim, stripped of indentation; all
    /// others go through the resolver as synthetic paragraphs.
    fn assemble_flat(&self, raw_text: &str) -> Result<Vec<String>> {
        let mut lines: Vec<String> = Vec::new();

        for raw_line in raw_text.lines() {
            let line = raw_line.trim_end();
            let stripped = line.trim_start();
            if stripped.is_empty() {
                continue;
            }

            if starts_with_bullet(stripped) {
                lines.push(stripped.to_string());
                continue;
            }

            let leading = line.chars().take_while(|c| c.is_whitespace()).count();
            let level = (leading / 2).min(MAX_INDENT_LEVEL);

            let paragraph = Paragraph::new(stripped, level);
            let resolved = self.resolver.resolve(&paragraph, &lines);
            lines.push(render_line(level, &resolved.glyph, &resolved.text));
        }

        Ok(lines)
    }
}

/// Render `indent + glyph + text` with two spaces per level.
fn render_line(level: usize, glyph: &str, text: &str) -> String {
    format!("{}{}{}", "  ".repeat(level), glyph, text)
}
