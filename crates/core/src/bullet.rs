//! Bullet marker resolution for a single paragraph.
//!
//! Decides whether a paragraph gets a bullet glyph, and which one,
//! from a fixed priority of signals: a glyph already embedded in the
//! text, explicit bullet formatting attributes, the indentation
//! level, and finally a contextual continuation heuristic for level-0
//! lines whose list formatting was stripped by document
//! round-tripping. The result is a pure function of the paragraph and
//! the lines already rendered for the same shape.

use crate::types::{BulletHint, Paragraph};

/// Bullet characters recognized when embedded at the start of text.
pub const BULLET_CHARS: &[char] = &['•', '◦', '▪', '-', '*'];

/// Default glyphs per indentation level. Levels past the table get a
/// plain dash.
const LEVEL_GLYPHS: &[&str] = &["• ", "◦ ", "▪ "];

/// Glyph used when the continuation heuristic synthesizes a bullet.
const CONTINUATION_GLYPH: &str = "- ";

/// Outcome of resolving one paragraph: the glyph to prefix (empty for
/// none) and the text with any embedded glyph stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub glyph: String,
    pub text: String,
}

impl Resolution {
    fn new(glyph: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            glyph: glyph.into(),
            text: text.into(),
        }
    }
}

/// Resolves bullet presence and glyph for paragraphs.
#[derive(Debug, Clone, Copy, Default)]
pub struct BulletResolver;

impl BulletResolver {
    /// Create a new resolver.
    pub fn new() -> Self {
        Self
    }

    /// Resolve the bullet glyph for `paragraph`, given the lines
    /// already rendered for the same shape (used only by the level-0
    /// continuation heuristic).
    ///
    /// Priority, first match wins:
    /// 1. A bullet character embedded at the start of the text is
    ///    authoritative; it is stripped from the text and reused.
    /// 2. Explicitly suppressed bullets emit no glyph.
    /// 3. An explicit bullet attribute supplies its glyph, or the
    ///    per-level default when it names no character.
    /// 4. Indentation above level 0 implies list membership.
    /// 5. The continuation heuristic may synthesize a dash bullet.
    pub fn resolve(&self, paragraph: &Paragraph, preceding: &[String]) -> Resolution {
        let trimmed = paragraph.text.trim();

        if let Some(&ch) = BULLET_CHARS.iter().find(|&&c| trimmed.starts_with(c)) {
            let rest = trimmed[ch.len_utf8()..].trim_start();
            return Resolution::new(format!("{} ", ch), rest);
        }

        match &paragraph.bullet {
            Some(BulletHint::Suppressed) => return Resolution::new("", trimmed),
            Some(BulletHint::Char(c)) if !c.trim().is_empty() => {
                return Resolution::new(format!("{} ", c.trim()), trimmed);
            }
            Some(BulletHint::Char(_)) | Some(BulletHint::Unspecified) => {
                return Resolution::new(level_glyph(paragraph.level), trimmed);
            }
            None => {}
        }

        if paragraph.level > 0 {
            return Resolution::new(level_glyph(paragraph.level), trimmed);
        }

        if continues_list(trimmed, preceding) {
            return Resolution::new(CONTINUATION_GLYPH, trimmed);
        }

        Resolution::new("", trimmed)
    }
}

/// Default glyph for an indentation level.
fn level_glyph(level: usize) -> &'static str {
    LEVEL_GLYPHS.get(level).copied().unwrap_or("- ")
}

/// Check whether `line` starts with a known bullet character, ignoring
/// leading indentation.
pub fn starts_with_bullet(line: &str) -> bool {
    line.trim_start()
        .chars()
        .next()
        .is_some_and(|c| BULLET_CHARS.contains(&c))
}

/// Level-0 continuation heuristic.
///
/// Recovers bullets whose formatting metadata was lost: a substantial
/// line (more than 2 words, not a colon header) is treated as a list
/// item when it follows either a short header-like line (at most 3
/// words, no trailing colon) or a line that already carries a bullet.
fn continues_list(text: &str, preceding: &[String]) -> bool {
    let Some(prev) = preceding
        .iter()
        .rev()
        .map(|l| l.trim())
        .find(|l| !l.is_empty())
    else {
        return false;
    };

    if word_count(text) <= 2 || text.ends_with(':') {
        return false;
    }

    let after_header = word_count(prev) <= 3 && !prev.ends_with(':');
    after_header || starts_with_bullet(prev)
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(paragraph: &Paragraph, preceding: &[&str]) -> Resolution {
        let preceding: Vec<String> = preceding.iter().map(|s| s.to_string()).collect();
        BulletResolver::new().resolve(paragraph, &preceding)
    }

    #[test]
    fn test_embedded_glyph_is_authoritative() {
        let para = Paragraph::new("• Align decisions", 0);
        let res = resolve(&para, &[]);
        assert_eq!(res.glyph, "• ");
        assert_eq!(res.text, "Align decisions");
    }

    #[test]
    fn test_embedded_glyph_beats_explicit_attributes() {
        let para = Paragraph::new("- Item", 2).with_bullet(BulletHint::Char("•".to_string()));
        let res = resolve(&para, &[]);
        assert_eq!(res.glyph, "- ");
        assert_eq!(res.text, "Item");
    }

    #[test]
    fn test_all_recognized_bullet_chars() {
        for ch in ['•', '◦', '▪', '-', '*'] {
            let para = Paragraph::new(format!("{} text here", ch), 0);
            let res = resolve(&para, &[]);
            assert_eq!(res.glyph, format!("{} ", ch));
            assert_eq!(res.text, "text here");
        }
    }

    #[test]
    fn test_suppressed_emits_no_glyph_even_when_indented() {
        let para = Paragraph::new("Plain line", 2).with_bullet(BulletHint::Suppressed);
        let res = resolve(&para, &[]);
        assert_eq!(res.glyph, "");
        assert_eq!(res.text, "Plain line");
    }

    #[test]
    fn test_explicit_char_hint() {
        let para = Paragraph::new("Item", 0).with_bullet(BulletHint::Char("➤".to_string()));
        let res = resolve(&para, &[]);
        assert_eq!(res.glyph, "➤ ");
    }

    #[test]
    fn test_unspecified_hint_uses_level_table() {
        for (level, glyph) in [(0, "• "), (1, "◦ "), (2, "▪ "), (3, "- "), (7, "- ")] {
            let para = Paragraph::new("Item", level).with_bullet(BulletHint::Unspecified);
            let res = resolve(&para, &[]);
            assert_eq!(res.glyph, glyph, "level {}", level);
        }
    }

    #[test]
    fn test_empty_char_hint_falls_back_to_level_table() {
        let para = Paragraph::new("Item", 1).with_bullet(BulletHint::Char(" ".to_string()));
        let res = resolve(&para, &[]);
        assert_eq!(res.glyph, "◦ ");
    }

    #[test]
    fn test_indentation_alone_implies_bullet() {
        let para = Paragraph::new("Nested item", 1);
        let res = resolve(&para, &[]);
        assert_eq!(res.glyph, "◦ ");
    }

    #[test]
    fn test_level_zero_no_signal_no_context_is_plain() {
        let para = Paragraph::new("A plain standalone paragraph", 0);
        let res = resolve(&para, &[]);
        assert_eq!(res.glyph, "");
    }

    #[test]
    fn test_continuation_after_short_header() {
        let para = Paragraph::new("Use incremental delivery throughout", 0);
        let res = resolve(&para, &["Key Practices"]);
        assert_eq!(res.glyph, "- ");
    }

    #[test]
    fn test_no_continuation_after_colon_header() {
        let para = Paragraph::new("Use incremental delivery throughout", 0);
        let res = resolve(&para, &["Key Practices:"]);
        assert_eq!(res.glyph, "");
    }

    #[test]
    fn test_no_continuation_after_long_preceding_line() {
        let para = Paragraph::new("Use incremental delivery throughout", 0);
        let res = resolve(&para, &["This preceding line is much too long to be a header"]);
        assert_eq!(res.glyph, "");
    }

    #[test]
    fn test_continuation_after_bullet_line() {
        let para = Paragraph::new("Coordinate shared roadmap", 0);
        let res = resolve(&para, &["• Align decisions"]);
        assert_eq!(res.glyph, "- ");
    }

    #[test]
    fn test_short_text_never_continues() {
        let para = Paragraph::new("Item two", 0);
        let res = resolve(&para, &["- Item one"]);
        assert_eq!(res.glyph, "");
        assert_eq!(res.text, "Item two");
    }

    #[test]
    fn test_colon_ending_text_never_continues() {
        let para = Paragraph::new("The following points matter:", 0);
        let res = resolve(&para, &["• First point"]);
        assert_eq!(res.glyph, "");
    }

    #[test]
    fn test_continuation_skips_blank_context_lines() {
        let para = Paragraph::new("Coordinate shared roadmap", 0);
        let res = resolve(&para, &["• Align decisions", "   "]);
        assert_eq!(res.glyph, "- ");
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let para = Paragraph::new("Coordinate shared roadmap", 0);
        let ctx = ["• Align decisions".to_string()];
        let first = BulletResolver::new().resolve(&para, &ctx);
        for _ in 0..10 {
            assert_eq!(BulletResolver::new().resolve(&para, &ctx), first);
        }
    }
}
