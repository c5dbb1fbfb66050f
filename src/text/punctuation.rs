//! Sentence and clause punctuation rules shared by the merger, scorer and splitter.

/// Characters that end a sentence.
pub const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Characters that close a clause strongly enough that a line ending with them
/// never absorbs the next line.
pub const CLAUSE_TERMINATORS: [char; 2] = [':', ';'];

/// Closing punctuation allowed after a terminator (`end."`, `(see above.)`).
pub const CLOSING_PUNCTUATION: [char; 8] = ['"', '\'', ')', ']', '}', '\u{201D}', '\u{2019}', '\u{00BB}'];

/// Words that, at the end of a line, leave the thought open.
pub const CONTINUATION_WORDS: [&str; 15] = [
    "and", "or", "the", "a", "an", "of", "to", "in", "for", "with", "by", "at", "from", "but",
    "as",
];

/// Conjunctions that continue a thought even when capitalized at line start.
pub const LEADING_CONJUNCTIONS: [&str; 4] = ["and", "or", "but", "nor"];

/// Check whether `text` ends a sentence: a terminator optionally followed by
/// closing punctuation.
///
/// # Examples
///
/// ```
/// use pdf_chunker::text::punctuation::ends_sentence;
///
/// assert!(ends_sentence("All employees must badge in."));
/// assert!(ends_sentence("He said \"stop!\""));
/// assert!(!ends_sentence("Terms and conditions,"));
/// ```
pub fn ends_sentence(text: &str) -> bool {
    last_significant_char(text).is_some_and(|c| SENTENCE_TERMINATORS.contains(&c))
}

/// Like [`ends_sentence`] but also accepts `:` and `;`.
pub fn ends_clause(text: &str) -> bool {
    last_significant_char(text)
        .is_some_and(|c| SENTENCE_TERMINATORS.contains(&c) || CLAUSE_TERMINATORS.contains(&c))
}

/// Last character that is not trailing whitespace or closing punctuation.
fn last_significant_char(text: &str) -> Option<char> {
    text.trim_end()
        .chars()
        .rev()
        .find(|c| !CLOSING_PUNCTUATION.contains(c))
}

/// Check whether the text ends with a comma, hyphen, opening bracket, `&`,
/// or an open continuation word.
pub fn ends_mid_clause(text: &str) -> bool {
    let trimmed = text.trim_end();
    match trimmed.chars().last() {
        None => false,
        Some(',' | '-' | '\u{00AD}' | '(' | '[' | '&') => true,
        Some(_) => trimmed
            .rsplit(char::is_whitespace)
            .next()
            .is_some_and(|word| CONTINUATION_WORDS.contains(&word.to_lowercase().as_str())),
    }
}

/// Check whether the text opens with a lowercase letter or a conjunction.
pub fn starts_continuation(text: &str) -> bool {
    let trimmed = text.trim_start();
    if trimmed.chars().next().is_some_and(|c| c.is_lowercase()) {
        return true;
    }
    trimmed
        .split(char::is_whitespace)
        .next()
        .map(|word| word.trim_end_matches(|c: char| !c.is_alphanumeric()))
        .is_some_and(|word| LEADING_CONJUNCTIONS.contains(&word.to_lowercase().as_str()))
}
