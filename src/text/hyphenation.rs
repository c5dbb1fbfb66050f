//! Hyphenation-aware joining of line fragments.
//!
//! When the merger glues two fragments into one logical line it has to decide
//! what goes between them:
//!
//! - "Govern\u{00AD}" + "ment" → "Government" (soft hyphen marks an optional break)
//! - "self-" + "evident" → "self-evident" (hard hyphen is kept, no space)
//! - "maintain records and" + "shall not" → "maintain records and shall not"

/// Soft hyphen (U+00AD).
pub const SOFT_HYPHEN: char = '\u{00AD}';

/// Check if a fragment ends with a continuation hyphen.
///
/// A continuation hyphen is a soft hyphen, or a hard hyphen directly after a
/// letter. A hyphen after whitespace ("- item") is not a continuation.
///
/// # Examples
///
/// ```
/// use pdf_chunker::text::hyphenation::is_continuation_hyphen;
///
/// assert!(is_continuation_hyphen("Govern-"));
/// assert!(is_continuation_hyphen("Govern\u{00AD}"));
/// assert!(!is_continuation_hyphen("items -"));
/// assert!(!is_continuation_hyphen("plain"));
/// ```
pub fn is_continuation_hyphen(text: &str) -> bool {
    let trimmed = text.trim_end();
    let before = match trimmed.strip_suffix(SOFT_HYPHEN) {
        Some(rest) => rest,
        None => match trimmed.strip_suffix('-') {
            Some(rest) => rest,
            None => return false,
        },
    };
    before.chars().last().is_some_and(|c| c.is_alphabetic())
}

/// Join two fragments of the same logical line.
///
/// The left fragment's trailing whitespace and the right fragment's leading
/// whitespace are replaced by the join.
pub fn join_fragments(left: &str, right: &str) -> String {
    let left = left.trim_end();
    let right = right.trim_start();
    let mut joined = String::with_capacity(left.len() + right.len() + 1);

    if let Some(stem) = left.strip_suffix(SOFT_HYPHEN) {
        if is_continuation_hyphen(left) {
            joined.push_str(stem);
            joined.push_str(right);
            return joined;
        }
    }

    let right_is_lower = right.chars().next().is_some_and(|c| c.is_lowercase());
    joined.push_str(left);
    if !(is_continuation_hyphen(left) && right_is_lower) {
        joined.push(' ');
    }
    joined.push_str(right);
    joined
}
