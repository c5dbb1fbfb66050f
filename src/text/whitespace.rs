//! Whitespace normalization and page-marker removal.
//!
//! These are the individual passes the [`TextCleaner`](crate::text::cleaner::TextCleaner)
//! chains together. Each one only ever removes or replaces characters; none of
//! them can grow the text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Dashed page markers injected by extractors: "--- Page 3 ---", "-- page 3 of 10 --"
    static ref RE_DASHED_PAGE: Regex =
        Regex::new(r"(?i)-+[^\S\n]*page[^\S\n]+\d+(?:[^\S\n]+of[^\S\n]+\d+)?[^\S\n]*-+").unwrap();

    /// "Page N of M" anywhere in a line
    static ref RE_PAGE_OF: Regex =
        Regex::new(r"(?i)\bpage[^\S\n]+\d+[^\S\n]+of[^\S\n]+\d+\b").unwrap();

    /// "Page N" alone on its line
    static ref RE_PAGE_LINE: Regex = Regex::new(r"(?im)^[^\S\n]*page[^\S\n]+\d+[^\S\n]*$").unwrap();

    /// Runs of horizontal whitespace (anything whitespace except newline)
    static ref RE_HORIZONTAL_WS: Regex = Regex::new(r"[^\S\n]+").unwrap();

    /// Three or more newlines, i.e. two or more blank lines
    static ref RE_MULTI_NEWLINE: Regex = Regex::new(r"\n{3,}").unwrap();
}

/// Convert `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Remove injected page markers, case-insensitively.
///
/// Removes dashed markers (`--- Page 3 ---`), `Page N of M` wherever it
/// appears, and lines that contain nothing but `Page N`. Inline references
/// such as "see page 4 for details" are left alone.
///
/// # Examples
///
/// ```
/// use pdf_chunker::text::whitespace::remove_page_markers;
///
/// let output = remove_page_markers("end of clause PAGE 3 OF 10 next clause");
/// assert_eq!(output, "end of clause  next clause");
/// ```
pub fn remove_page_markers(text: &str) -> String {
    let result = RE_DASHED_PAGE.replace_all(text, "");
    let result = RE_PAGE_OF.replace_all(&result, "");
    RE_PAGE_LINE.replace_all(&result, "").into_owned()
}

/// Collapse every run of horizontal whitespace to a single space.
///
/// # Examples
///
/// ```
/// use pdf_chunker::text::whitespace::collapse_horizontal_whitespace;
///
/// assert_eq!(collapse_horizontal_whitespace("The  quick\t\tbrown fox"), "The quick brown fox");
/// ```
pub fn collapse_horizontal_whitespace(text: &str) -> String {
    RE_HORIZONTAL_WS.replace_all(text, " ").into_owned()
}

/// Strip leading and trailing whitespace from every line.
pub fn strip_lines(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            result.push('\n');
        }
        result.push_str(line.trim());
    }
    result
}

/// Limit consecutive blank lines to at most one.
///
/// # Examples
///
/// ```
/// use pdf_chunker::text::whitespace::limit_blank_lines;
///
/// assert_eq!(limit_blank_lines("Line 1\n\n\n\n\nLine 2"), "Line 1\n\nLine 2");
/// ```
pub fn limit_blank_lines(text: &str) -> String {
    RE_MULTI_NEWLINE.replace_all(text, "\n\n").into_owned()
}

/// Number of non-whitespace characters in the text.
pub fn count_non_whitespace(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}
