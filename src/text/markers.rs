//! Header marker syntax.
//!
//! A header of level `L` is written as `L + 1` marker characters, a space and
//! the header text, so level 1 is `## Title`, level 2 is `### Title` and so on.
//! Later stages detect headers with a single prefix check and never re-score.

use std::borrow::Cow;

/// Character repeated to form a header marker.
pub const MARKER_CHAR: char = '#';

/// Render a header line for the given level (levels start at 1).
///
/// # Examples
///
/// ```
/// use pdf_chunker::text::markers::render_header;
///
/// assert_eq!(render_header(1, "SECURITY POLICY"), "## SECURITY POLICY");
/// assert_eq!(render_header(3, "Scope"), "#### Scope");
/// ```
pub fn render_header(level: u8, text: &str) -> String {
    let level = level.max(1) as usize;
    let mut line = String::with_capacity(text.len() + level + 2);
    for _ in 0..=level {
        line.push(MARKER_CHAR);
    }
    line.push(' ');
    line.push_str(text.trim());
    line
}

/// A header marker parsed from a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMarker<'a> {
    /// Header level (1 = top)
    pub level: u8,
    /// Header text without the marker
    pub text: &'a str,
}

/// Parse a header marker at the start of a line.
///
/// Returns `None` for body lines, including a lone `#` (a level-0 marker does
/// not exist) and markers with no text after them.
pub fn parse_header(line: &str) -> Option<HeaderMarker<'_>> {
    let line = line.trim_end_matches(['\n', '\r']);
    let hashes = line.chars().take_while(|&c| c == MARKER_CHAR).count();
    if hashes < 2 || hashes > u8::MAX as usize {
        return None;
    }
    let rest = line[hashes..].strip_prefix(' ')?;
    let text = rest.trim();
    if text.is_empty() {
        return None;
    }
    Some(HeaderMarker {
        level: (hashes - 1) as u8,
        text,
    })
}

/// Check whether a line carries a header marker.
pub fn is_header_line(line: &str) -> bool {
    parse_header(line).is_some()
}

/// Character that neutralizes a marker at the start of a body line.
pub const ESCAPE_CHAR: char = '\\';

/// Escape a body line that would otherwise read as a header marker.
///
/// Only the scorer decides what is a header, so body text that happens to
/// start with `## ` is written with a leading backslash.
///
/// # Examples
///
/// ```
/// use pdf_chunker::text::markers::{escape_body_line, is_header_line};
///
/// let escaped = escape_body_line("## not a heading");
/// assert_eq!(escaped, "\\## not a heading");
/// assert!(!is_header_line(&escaped));
/// assert_eq!(escape_body_line("plain body"), "plain body");
/// ```
pub fn escape_body_line(line: &str) -> Cow<'_, str> {
    if is_header_line(line) {
        let mut escaped = String::with_capacity(line.len() + 1);
        escaped.push(ESCAPE_CHAR);
        escaped.push_str(line);
        Cow::Owned(escaped)
    } else {
        Cow::Borrowed(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_levels() {
        let m = parse_header("## SECURITY POLICY").unwrap();
        assert_eq!(m.level, 1);
        assert_eq!(m.text, "SECURITY POLICY");

        let m = parse_header("#### 1.1.1 Scope\n").unwrap();
        assert_eq!(m.level, 3);
        assert_eq!(m.text, "1.1.1 Scope");
    }

    #[test]
    fn test_parse_rejects_body_lines() {
        assert!(parse_header("# Single hash").is_none());
        assert!(parse_header("##NoSpace").is_none());
        assert!(parse_header("##   ").is_none());
        assert!(parse_header("Issue #42 is fixed").is_none());
        assert!(parse_header("").is_none());
    }

    #[test]
    fn test_render_then_parse_keeps_level() {
        for level in 1..=5u8 {
            let line = render_header(level, "Heading");
            assert_eq!(parse_header(&line).unwrap().level, level);
        }
    }

    #[test]
    fn test_render_clamps_level_zero() {
        assert_eq!(render_header(0, "Top"), "## Top");
    }

    #[test]
    fn test_escape_body_line() {
        assert_eq!(escape_body_line("### Methods"), "\\### Methods");
        assert_eq!(escape_body_line("# one hash"), "# one hash");
        assert_eq!(escape_body_line("Issue ## 4"), "Issue ## 4");
        assert!(parse_header(&escape_body_line("## Scope")).is_none());
    }
}
