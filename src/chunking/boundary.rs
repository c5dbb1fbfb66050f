//! Split-point strategies for the size-bounding splitter.
//!
//! A split point `s` is an index into the section's characters; the chunk
//! ends just before `s`. Each [`BoundaryFinder`] recognizes one kind of
//! boundary and reports the rightmost one inside a window. The
//! [`BoundaryChain`] asks its finders in order and the first one with any
//! candidate wins, so a paragraph break anywhere in the window is preferred
//! over a sentence end closer to the limit.

use crate::text::punctuation::{CLOSING_PUNCTUATION, SENTENCE_TERMINATORS};

/// One kind of boundary the splitter may cut at.
pub trait BoundaryFinder: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Whether a chunk may end just before `split`. Callers guarantee
    /// `0 < split < text.len()`.
    fn is_boundary(&self, text: &[char], split: usize) -> bool;

    /// Rightmost boundary `s` with `lo <= s <= hi`.
    fn rightmost(&self, text: &[char], lo: usize, hi: usize) -> Option<usize> {
        let lo = lo.max(1);
        let hi = hi.min(text.len().saturating_sub(1));
        if lo > hi {
            return None;
        }
        (lo..=hi).rev().find(|&s| self.is_boundary(text, s))
    }
}

/// After a blank line: the chunk ends with the paragraph separator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParagraphBreak;

impl BoundaryFinder for ParagraphBreak {
    fn name(&self) -> &'static str {
        "paragraph"
    }

    fn is_boundary(&self, text: &[char], split: usize) -> bool {
        if text[split - 1] != '\n' {
            return false;
        }
        // The line that ends at split - 1 must be blank.
        for &c in text[..split - 1].iter().rev() {
            if c == '\n' {
                return true;
            }
            if !c.is_whitespace() {
                return false;
            }
        }
        false
    }
}

/// After any newline.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineBreak;

impl BoundaryFinder for LineBreak {
    fn name(&self) -> &'static str {
        "line"
    }

    fn is_boundary(&self, text: &[char], split: usize) -> bool {
        text[split - 1] == '\n'
    }
}

/// After the whitespace that follows a sentence terminator (optionally
/// followed by closing quotes or brackets).
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceEnd;

impl BoundaryFinder for SentenceEnd {
    fn name(&self) -> &'static str {
        "sentence"
    }

    fn is_boundary(&self, text: &[char], split: usize) -> bool {
        if split < 2 || !text[split - 1].is_whitespace() {
            return false;
        }
        text[..split - 1]
            .iter()
            .rev()
            .find(|c| !CLOSING_PUNCTUATION.contains(c))
            .is_some_and(|c| SENTENCE_TERMINATORS.contains(c))
    }
}

/// Next to any whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordBoundary;

impl BoundaryFinder for WordBoundary {
    fn name(&self) -> &'static str {
        "word"
    }

    fn is_boundary(&self, text: &[char], split: usize) -> bool {
        text[split - 1].is_whitespace() || text[split].is_whitespace()
    }
}

/// Ordered list of boundary finders.
pub struct BoundaryChain {
    finders: Vec<Box<dyn BoundaryFinder>>,
}

impl std::fmt::Debug for BoundaryChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.finders.iter().map(|finder| finder.name()))
            .finish()
    }
}

impl Default for BoundaryChain {
    /// Paragraph, line, sentence, word.
    fn default() -> Self {
        Self::new()
            .with_finder(ParagraphBreak)
            .with_finder(LineBreak)
            .with_finder(SentenceEnd)
            .with_finder(WordBoundary)
    }
}

impl BoundaryChain {
    /// An empty chain that never finds a boundary.
    pub fn new() -> Self {
        Self {
            finders: Vec::new(),
        }
    }

    /// Append a finder; it is consulted after every finder already present.
    pub fn with_finder<F: BoundaryFinder + 'static>(mut self, finder: F) -> Self {
        self.finders.push(Box::new(finder));
        self
    }

    /// Names of the finders in consultation order.
    pub fn names(&self) -> Vec<&'static str> {
        self.finders.iter().map(|finder| finder.name()).collect()
    }

    /// Rightmost split in `[lo, hi]` from the first finder that has one.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_chunker::chunking::boundary::BoundaryChain;
    ///
    /// let text: Vec<char> = "One. Two three.\n\nFour five".chars().collect();
    /// let chain = BoundaryChain::default();
    /// // A paragraph break wins over the later word boundaries.
    /// assert_eq!(chain.find(&text, 1, 20), Some((17, "paragraph")));
    /// // Without one in the window the sentence end is used.
    /// assert_eq!(chain.find(&text, 1, 12), Some((5, "sentence")));
    /// ```
    pub fn find(&self, text: &[char], lo: usize, hi: usize) -> Option<(usize, &'static str)> {
        self.finders
            .iter()
            .find_map(|finder| finder.rightmost(text, lo, hi).map(|s| (s, finder.name())))
    }
}
