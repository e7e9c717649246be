//! Textual report output.
//!
//! Serializes slide records into a sectioned plain-text report:
//!
//! ```text
//! === SLIDE 1 ===
//! Title:
//! Quarterly Review
//!
//! Content:
//! • Align decisions
//! ```
//!
//! Sections with no content are omitted entirely, header included.

use crate::types::SlideRecord;

/// Formatter for the sectioned outline report.
#[derive(Debug, Clone)]
pub struct ReportFormatter {
    /// Whether to include the Notes section.
    include_notes: bool,
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self {
            include_notes: true,
        }
    }
}

impl ReportFormatter {
    /// Create a formatter that includes speaker notes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the Notes section is emitted.
    pub fn with_notes(mut self, include: bool) -> Self {
        self.include_notes = include;
        self
    }

    /// Format one slide record.
    pub fn format_slide(&self, record: &SlideRecord) -> String {
        let mut out: Vec<String> = Vec::new();

        out.push(format!("=== SLIDE {} ===", record.number));

        if !record.title.is_empty() {
            out.push("Title:".to_string());
            out.push(record.title.clone());
            out.push(String::new());
        }

        if !record.content.is_empty() {
            out.push("Content:".to_string());
            out.extend(record.content.iter().cloned());
            out.push(String::new());
        }

        if !record.images.is_empty() {
            out.push("Images:".to_string());
            for (i, description) in record.images.iter().enumerate() {
                out.push(format!("Image {}: {}", i + 1, description));
            }
            out.push(String::new());
        }

        if self.include_notes && !record.notes.is_empty() {
            out.push("Notes:".to_string());
            out.push(record.notes.clone());
            out.push(String::new());
        }

        out.join("\n")
    }

    /// Format a whole presentation's records in order.
    pub fn format(&self, records: &[SlideRecord]) -> String {
        records
            .iter()
            .map(|r| self.format_slide(r))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format and add a trailing newline.
    pub fn format_with_newline(&self, records: &[SlideRecord]) -> String {
        let formatted = self.format(records);
        if formatted.is_empty() {
            formatted
        } else {
            format!("{}\n", formatted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> SlideRecord {
        let mut record = SlideRecord::new(1);
        record.title = "Quarterly Review".to_string();
        record.content = vec!["• Align decisions".to_string()];
        record.images = vec!["Team photo".to_string()];
        record.notes = "Follow up next week.".to_string();
        record
    }

    #[test]
    fn test_full_slide_layout() {
        let output = ReportFormatter::new().format_slide(&full_record());
        let expected = "=== SLIDE 1 ===\n\
                        Title:\n\
                        Quarterly Review\n\
                        \n\
                        Content:\n\
                        • Align decisions\n\
                        \n\
                        Images:\n\
                        Image 1: Team photo\n\
                        \n\
                        Notes:\n\
                        Follow up next week.\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let mut record = SlideRecord::new(2);
        record.content = vec!["Only content".to_string()];

        let output = ReportFormatter::new().format_slide(&record);
        assert_eq!(output, "=== SLIDE 2 ===\nContent:\nOnly content\n");
        assert!(!output.contains("Title:"));
        assert!(!output.contains("Images:"));
        assert!(!output.contains("Notes:"));
    }

    #[test]
    fn test_bare_slide_is_just_the_header() {
        let record = SlideRecord::new(3);
        let output = ReportFormatter::new().format_slide(&record);
        assert_eq!(output, "=== SLIDE 3 ===");
    }

    #[test]
    fn test_images_are_numbered_from_one() {
        let mut record = SlideRecord::new(4);
        record.images = vec!["First".to_string(), "Second".to_string()];

        let output = ReportFormatter::new().format_slide(&record);
        assert!(output.contains("Image 1: First"));
        assert!(output.contains("Image 2: Second"));
    }

    #[test]
    fn test_notes_can_be_suppressed() {
        let output = ReportFormatter::new()
            .with_notes(false)
            .format_slide(&full_record());
        assert!(!output.contains("Notes:"));
        assert!(output.contains("Title:"));
    }

    #[test]
    fn test_multiple_slides_in_order() {
        let mut first = SlideRecord::new(1);
        first.title = "One".to_string();
        let mut second = SlideRecord::new(2);
        second.title = "Two".to_string();

        let output = ReportFormatter::new().format(&[first, second]);
        let pos_one = output.find("=== SLIDE 1 ===").unwrap();
        let pos_two = output.find("=== SLIDE 2 ===").unwrap();
        assert!(pos_one < pos_two);
    }

    #[test]
    fn test_format_with_newline() {
        let output = ReportFormatter::new().format_with_newline(&[full_record()]);
        assert!(output.ends_with('\n'));
        assert_eq!(ReportFormatter::new().format_with_newline(&[]), "");
    }
}
