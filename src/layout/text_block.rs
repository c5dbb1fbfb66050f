//! Input blocks and merged lines.
//!
//! A [`Block`] is one visually distinct line as delivered by the external
//! extractor. A [`MergedLine`] is one or more adjacent blocks joined into a
//! logical line or paragraph fragment; it owns its text and keeps the font
//! attributes of its dominant source block.

use crate::text::markers::{escape_body_line, render_header};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;

/// One line of extracted text with its typographic attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// 1-based page number; non-decreasing across a document
    pub page: u32,

    /// Raw text of the line
    pub text: String,

    /// Font size in points. Missing or null values deserialize to NaN,
    /// which the merger treats as "does not match anything".
    #[serde(default = "missing_metric", deserialize_with = "nullable_metric")]
    pub font_size: f32,

    /// Bold font
    #[serde(default)]
    pub is_bold: bool,

    /// Every cased letter is uppercase
    #[serde(default)]
    pub is_all_caps: bool,

    /// Vertical position on the page (NaN when unknown)
    #[serde(default = "missing_metric", deserialize_with = "nullable_metric")]
    pub vertical_position: f32,
}

fn missing_metric() -> f32 {
    f32::NAN
}

fn nullable_metric<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or(f32::NAN))
}

impl Block {
    /// Create a regular-weight block with no vertical position.
    pub fn new(page: u32, text: impl Into<String>, font_size: f32) -> Self {
        Self {
            page,
            text: text.into(),
            font_size,
            is_bold: false,
            is_all_caps: false,
            vertical_position: f32::NAN,
        }
    }

    /// Set the bold flag.
    pub fn bold(mut self, is_bold: bool) -> Self {
        self.is_bold = is_bold;
        self
    }

    /// Set the all-caps flag.
    pub fn all_caps(mut self, is_all_caps: bool) -> Self {
        self.is_all_caps = is_all_caps;
        self
    }

    /// Set the vertical position.
    pub fn at(mut self, vertical_position: f32) -> Self {
        self.vertical_position = vertical_position;
        self
    }

    /// Whether the font size is usable for comparisons.
    pub fn has_valid_font(&self) -> bool {
        is_valid_font_size(self.font_size)
    }

    /// Whether the block carries any non-whitespace text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A logical line built from one or more adjacent blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedLine {
    /// Merged text (no header marker)
    pub text: String,

    /// Page all source blocks came from
    pub page: u32,

    /// Font size of the dominant source block
    pub font_size: f32,

    /// Bold flag of the dominant source block
    pub is_bold: bool,

    /// All-caps flag of the dominant source block
    pub is_all_caps: bool,

    /// Classified as a header by the scorer
    pub is_header: bool,

    /// Header level (1 = top), 0 for body text
    pub header_level: u8,

    /// A paragraph break precedes this line
    pub starts_paragraph: bool,

    /// Number of source blocks merged into this line
    pub block_count: usize,

    /// Weighted header score from the last scoring pass
    pub header_score: f32,
}

impl MergedLine {
    /// Start a merged line from a single block.
    pub fn from_block(block: &Block) -> Self {
        Self {
            text: single_line(&block.text).into_owned(),
            page: block.page,
            font_size: block.font_size,
            is_bold: block.is_bold,
            is_all_caps: block.is_all_caps,
            is_header: false,
            header_level: 0,
            starts_paragraph: false,
            block_count: 1,
            header_score: 0.0,
        }
    }

    /// Length of the text in characters.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the font size is usable for comparisons.
    pub fn has_valid_font(&self) -> bool {
        is_valid_font_size(self.font_size)
    }

    /// The text as it appears in the marked-up stream: headers carry their
    /// level marker, body lines that look like a marker are escaped.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_chunker::layout::{Block, MergedLine};
    ///
    /// let mut line = MergedLine::from_block(&Block::new(1, "SECURITY POLICY", 18.0));
    /// line.is_header = true;
    /// line.header_level = 1;
    /// assert_eq!(line.marked_text(), "## SECURITY POLICY");
    /// ```
    pub fn marked_text(&self) -> Cow<'_, str> {
        if self.is_header && self.header_level > 0 {
            Cow::Owned(render_header(self.header_level, &self.text))
        } else {
            escape_body_line(&self.text)
        }
    }
}

/// Trim block text and fold any embedded line breaks into single spaces.
///
/// A merged line is always one line of the marked-up stream.
///
/// # Examples
///
/// ```
/// use pdf_chunker::layout::text_block::single_line;
///
/// assert_eq!(single_line("  SECURITY\nPOLICY "), "SECURITY POLICY");
/// assert_eq!(single_line("a \r\n\n b"), "a b");
/// ```
pub fn single_line(text: &str) -> Cow<'_, str> {
    let text = text.trim();
    if !text.contains(['\n', '\r']) {
        return Cow::Borrowed(text);
    }
    let parts: Vec<&str> = text
        .split(['\n', '\r'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    Cow::Owned(parts.join(" "))
}

/// A font size is valid when it is finite and positive.
pub fn is_valid_font_size(size: f32) -> bool {
    size.is_finite() && size > 0.0
}

/// Two font sizes match when both are valid and differ by at most
/// `tolerance` relative to the larger one.
///
/// # Examples
///
/// ```
/// use pdf_chunker::layout::text_block::font_sizes_match;
///
/// assert!(font_sizes_match(12.0, 12.5, 0.1));
/// assert!(!font_sizes_match(12.0, 16.0, 0.1));
/// assert!(!font_sizes_match(12.0, f32::NAN, 0.1));
/// ```
pub fn font_sizes_match(a: f32, b: f32, tolerance: f32) -> bool {
    is_valid_font_size(a) && is_valid_font_size(b) && (a - b).abs() <= tolerance * a.max(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_builder() {
        let block = Block::new(2, "TITLE", 18.0).bold(true).all_caps(true).at(72.0);
        assert_eq!(block.page, 2);
        assert!(block.is_bold);
        assert!(block.is_all_caps);
        assert_eq!(block.vertical_position, 72.0);
        assert!(block.has_valid_font());
    }

    #[test]
    fn test_invalid_fonts() {
        assert!(!Block::new(1, "x", 0.0).has_valid_font());
        assert!(!Block::new(1, "x", -3.0).has_valid_font());
        assert!(!Block::new(1, "x", f32::INFINITY).has_valid_font());
        assert!(!Block::new(1, "x", f32::NAN).has_valid_font());
    }

    #[test]
    fn test_block_deserializes_missing_metadata() {
        let block: Block = serde_json::from_str(r#"{"page": 1, "text": "hello"}"#).unwrap();
        assert!(block.font_size.is_nan());
        assert!(block.vertical_position.is_nan());
        assert!(!block.is_bold);
        assert!(!block.is_all_caps);
    }

    #[test]
    fn test_block_deserializes_null_font() {
        let block: Block =
            serde_json::from_str(r#"{"page": 1, "text": "hi", "font_size": null, "is_bold": true}"#)
                .unwrap();
        assert!(!block.has_valid_font());
        assert!(block.is_bold);
    }

    #[test]
    fn test_block_is_empty() {
        assert!(Block::new(1, "  \t ", 12.0).is_empty());
        assert!(!Block::new(1, " a ", 12.0).is_empty());
    }

    #[test]
    fn test_merged_line_from_block_trims() {
        let line = MergedLine::from_block(&Block::new(1, "  body text  ", 11.0));
        assert_eq!(line.text, "body text");
        assert_eq!(line.block_count, 1);
        assert!(!line.is_header);
        assert_eq!(line.header_level, 0);
        assert_eq!(line.marked_text(), "body text");
    }

    #[test]
    fn test_embedded_line_breaks_fold() {
        let line = MergedLine::from_block(&Block::new(1, "SECURITY\nPOLICY", 18.0));
        assert_eq!(line.text, "SECURITY POLICY");
        assert_eq!(single_line("one\r\ntwo"), "one two");
        assert_eq!(single_line("  plain  "), "plain");
    }

    #[test]
    fn test_body_line_with_marker_is_escaped() {
        let body = MergedLine::from_block(&Block::new(1, "## not a heading", 11.0));
        assert_eq!(body.marked_text(), "\\## not a heading");

        let mut header = body.clone();
        header.is_header = true;
        header.header_level = 2;
        assert_eq!(header.marked_text(), "### ## not a heading");
    }

    #[test]
    fn test_font_match_is_relative() {
        assert!(font_sizes_match(20.0, 21.5, 0.1));
        assert!(!font_sizes_match(10.0, 11.5, 0.1));
        assert!(font_sizes_match(10.0, 10.0, 0.0));
    }
}
