//! Per-slide orchestration: title detection, shape routing, notes.

use crate::alt_text::AltTextResolver;
use crate::assemble::ShapeTextAssembler;
use crate::error::Result;
use crate::types::{Document, Shape, Slide, SlideRecord};

/// Output of processing one non-title shape.
enum ShapeOutput {
    Lines(Vec<String>),
    Image(String),
}

/// Assembles one `SlideRecord` per slide.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlideAssembler {
    shapes: ShapeTextAssembler,
    alt_text: AltTextResolver,
}

impl SlideAssembler {
    /// Create a new assembler.
    pub fn new() -> Self {
        Self {
            shapes: ShapeTextAssembler::new(),
            alt_text: AltTextResolver::new(),
        }
    }

    /// Assemble records for every slide of a document, in order.
    pub fn assemble_all(&self, document: &Document) -> Vec<SlideRecord> {
        document.slides.iter().map(|s| self.assemble(s)).collect()
    }

    /// Assemble the outline record for one slide.
    ///
    /// A failure in one shape is logged as a warning and never stops
    /// the remaining shapes of the slide from being processed.
    pub fn assemble(&self, slide: &Slide) -> SlideRecord {
        let mut record = SlideRecord::new(slide.number);

        // First title-placeholder shape with non-empty text becomes
        // the title and is excluded from content.
        let mut title_index = None;
        for (index, shape) in slide.shapes.iter().enumerate() {
            if let Shape::Text(text_shape) = shape {
                if text_shape.is_title_placeholder {
                    let text = text_shape.full_text();
                    let text = text.trim();
                    if !text.is_empty() {
                        record.title = text.to_string();
                        title_index = Some(index);
                        break;
                    }
                }
            }
        }

        for (index, shape) in slide.shapes.iter().enumerate() {
            if Some(index) == title_index {
                continue;
            }

            match self.process_shape(shape, record.images.len() + 1) {
                Ok(ShapeOutput::Lines(lines)) => record.content.extend(lines),
                Ok(ShapeOutput::Image(description)) => record.images.push(description),
                Err(e) => {
                    log::warn!("Slide {}: skipped shape due to error: {}", slide.number, e);
                }
            }
        }

        if let Some(notes) = &slide.notes {
            let notes = notes.trim();
            if !notes.is_empty() {
                record.notes = notes.to_string();
            }
        }

        record
    }

    fn process_shape(&self, shape: &Shape, image_ordinal: usize) -> Result<ShapeOutput> {
        match shape {
            Shape::Text(text_shape) => {
                Ok(ShapeOutput::Lines(self.shapes.assemble(text_shape)?))
            }
            Shape::Picture(picture) => Ok(ShapeOutput::Image(
                self.alt_text.resolve(picture, image_ordinal),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BulletHint, Paragraph, PictureShape, TextShape};

    fn title_shape(text: &str) -> Shape {
        let mut shape = TextShape::new("Title 1");
        shape.is_title_placeholder = true;
        shape.paragraphs.push(Paragraph::new(text, 0));
        Shape::Text(shape)
    }

    fn content_shape(paragraphs: Vec<Paragraph>) -> Shape {
        let mut shape = TextShape::new("Content Placeholder 2");
        shape.paragraphs = paragraphs;
        Shape::Text(shape)
    }

    #[test]
    fn test_title_is_detected_and_excluded_from_content() {
        let mut slide = Slide::new(1);
        slide.add_shape(title_shape("Quarterly Review"));
        slide.add_shape(content_shape(vec![
            Paragraph::new("Align decisions", 0).with_bullet(BulletHint::Char("•".to_string())),
            Paragraph::new("Coordinate shared roadmap", 0),
        ]));

        let record = SlideAssembler::new().assemble(&slide);
        assert_eq!(record.title, "Quarterly Review");
        assert_eq!(
            record.content,
            vec!["• Align decisions", "- Coordinate shared roadmap"]
        );
    }

    #[test]
    fn test_empty_title_placeholder_is_passed_over() {
        let mut slide = Slide::new(1);
        slide.add_shape(title_shape("   "));
        slide.add_shape(title_shape("Actual Title"));

        let record = SlideAssembler::new().assemble(&slide);
        assert_eq!(record.title, "Actual Title");
    }

    #[test]
    fn test_missing_title_yields_empty_field() {
        let mut slide = Slide::new(2);
        slide.add_shape(content_shape(vec![Paragraph::new("Body text", 0)]));

        let record = SlideAssembler::new().assemble(&slide);
        assert_eq!(record.title, "");
        assert_eq!(record.content, vec!["Body text"]);
    }

    #[test]
    fn test_pictures_are_routed_to_image_list() {
        let mut slide = Slide::new(3);
        let mut pic = PictureShape::new("Picture 3");
        pic.alt_text = None;
        slide.add_shape(Shape::Picture(pic));

        let record = SlideAssembler::new().assemble(&slide);
        assert_eq!(record.images, vec!["[No alt-text] Picture 3"]);
        assert!(record.content.is_empty());
    }

    #[test]
    fn test_shape_failure_does_not_abort_the_slide() {
        let mut slide = Slide::new(4);
        slide.add_shape(content_shape(vec![Paragraph::new("Before the fault", 0)]));
        slide.add_shape(content_shape(vec![Paragraph::new("Corrupt", 99)]));
        slide.add_shape(content_shape(vec![Paragraph::new("After the fault", 0)]));

        let record = SlideAssembler::new().assemble(&slide);
        assert_eq!(record.content, vec!["Before the fault", "After the fault"]);
    }

    #[test]
    fn test_notes_are_trimmed_and_recorded() {
        let mut slide = Slide::new(5);
        slide.notes = Some("  Remember to follow up.  ".to_string());

        let record = SlideAssembler::new().assemble(&slide);
        assert_eq!(record.notes, "Remember to follow up.");
    }

    #[test]
    fn test_blank_notes_stay_empty() {
        let mut slide = Slide::new(6);
        slide.notes = Some("   \n  ".to_string());

        let record = SlideAssembler::new().assemble(&slide);
        assert_eq!(record.notes, "");
    }

    #[test]
    fn test_shape_order_is_preserved() {
        let mut slide = Slide::new(7);
        slide.add_shape(content_shape(vec![Paragraph::new("First shape", 0)]));
        let mut pic = PictureShape::new("");
        pic.description = Some("A diagram".to_string());
        slide.add_shape(Shape::Picture(pic));
        slide.add_shape(content_shape(vec![Paragraph::new("Second shape", 0)]));

        let record = SlideAssembler::new().assemble(&slide);
        assert_eq!(record.content, vec!["First shape", "Second shape"]);
        assert_eq!(record.images, vec!["A diagram"]);
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let mut slide = Slide::new(8);
        slide.add_shape(title_shape("Title"));
        slide.add_shape(content_shape(vec![
            Paragraph::new("Align decisions", 0).with_bullet(BulletHint::Unspecified),
            Paragraph::new("Coordinate shared roadmap", 0),
        ]));
        slide.add_shape(Shape::Picture(PictureShape::new("Picture 1")));

        let assembler = SlideAssembler::new();
        let first = assembler.assemble(&slide);
        let second = assembler.assemble(&slide);
        assert_eq!(first, second);
    }
}
