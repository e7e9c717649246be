//! Best-effort description resolution for picture shapes.

use crate::types::PictureShape;
use regex::Regex;
use std::sync::LazyLock;

/// Auto-generated shape names like "Picture 3" carry no author intent
/// and are rejected as descriptions.
static GENERIC_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:Picture|Image|Graphic)\s+\d+$").unwrap());

/// Resolves a human-readable description for a picture shape.
///
/// Walks an ordered fallback chain over the shape's accessibility
/// metadata and never returns an empty string: when no real alt text
/// exists, the absence itself is reported via a sentinel.
#[derive(Debug, Clone, Copy, Default)]
pub struct AltTextResolver;

impl AltTextResolver {
    /// Create a new resolver.
    pub fn new() -> Self {
        Self
    }

    /// Resolve the description for `shape`. `ordinal` is the 1-based
    /// position of this image on its slide, used for the synthesized
    /// placeholder name when the shape is nameless.
    pub fn resolve(&self, shape: &PictureShape, ordinal: usize) -> String {
        for candidate in [&shape.alt_text, &shape.description, &shape.title] {
            if let Some(text) = candidate {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    return trimmed.to_string();
                }
            }
        }

        let name = shape.name.trim();
        if !name.is_empty() && !GENERIC_NAME_REGEX.is_match(name) {
            return name.to_string();
        }

        let fallback = if name.is_empty() {
            format!("Image_{}", ordinal)
        } else {
            name.to_string()
        };
        format!("[No alt-text] {}", fallback)
    }
}
