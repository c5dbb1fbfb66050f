//! Size-bounding splitter with overlap.
//!
//! The splitter works on character indices so that sizes and overlaps are
//! counted in characters regardless of encoding. It never rewrites text:
//! every piece is a slice of the input, and the part of each piece past its
//! overlap begins exactly where the previous piece ended.

use crate::chunking::boundary::BoundaryChain;

/// One piece produced by the splitter, as character offsets into its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitPiece {
    /// First character of the piece, overlap included
    pub start: usize,
    /// One past the last character
    pub end: usize,
    /// Leading characters shared with the previous piece
    pub overlap: usize,
    /// A whitespace-free run longer than the limit; the piece is that run
    pub oversized: bool,
}

impl SplitPiece {
    /// Length in characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the piece is empty.
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Splits text into pieces of at most `max_chunk_size` characters.
#[derive(Debug)]
pub struct TextSplitter {
    max_chunk_size: usize,
    chunk_overlap: usize,
    boundaries: BoundaryChain,
}

impl TextSplitter {
    /// Create a splitter. Callers validate that `chunk_overlap < max_chunk_size`.
    pub fn new(max_chunk_size: usize, chunk_overlap: usize, boundaries: BoundaryChain) -> Self {
        Self {
            max_chunk_size: max_chunk_size.max(1),
            chunk_overlap: chunk_overlap.min(max_chunk_size.saturating_sub(1)),
            boundaries,
        }
    }

    /// Split `text` into bounded pieces.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_chunker::chunking::boundary::BoundaryChain;
    /// use pdf_chunker::chunking::splitter::TextSplitter;
    ///
    /// let text: Vec<char> = "alpha beta gamma delta".chars().collect();
    /// let splitter = TextSplitter::new(12, 3, BoundaryChain::default());
    /// let pieces = splitter.split(&text);
    ///
    /// let first: String = text[pieces[0].start..pieces[0].end].iter().collect();
    /// assert_eq!(first, "alpha beta ");
    /// assert_eq!(pieces[1].overlap, 3);
    /// ```
    pub fn split(&self, text: &[char]) -> Vec<SplitPiece> {
        let n = text.len();
        let max = self.max_chunk_size;
        let mut pieces = Vec::new();
        let mut start = 0;
        let mut prev_end = 0;

        while prev_end < n {
            if n - start <= max {
                pieces.push(SplitPiece {
                    start,
                    end: n,
                    overlap: prev_end - start,
                    oversized: false,
                });
                break;
            }

            let mut found = self.find_split(text, start, prev_end);
            if found.is_none() && start < prev_end {
                log::trace!("No boundary inside overlap window at {}; dropping overlap", start);
                start = prev_end;
                if n - start <= max {
                    pieces.push(SplitPiece {
                        start,
                        end: n,
                        overlap: 0,
                        oversized: false,
                    });
                    break;
                }
                found = self.find_split(text, start, prev_end);
            }

            let (end, oversized) = match found {
                Some(split) => (split, false),
                None => {
                    let run_end = (start..n).find(|&i| text[i].is_whitespace()).unwrap_or(n);
                    log::debug!(
                        "Unsplittable run of {} characters exceeds limit of {}",
                        run_end - start,
                        max
                    );
                    (run_end.max(start + 1), true)
                },
            };

            pieces.push(SplitPiece {
                start,
                end,
                overlap: prev_end - start,
                oversized,
            });
            prev_end = end;
            start = end.saturating_sub(self.chunk_overlap).max(start);
        }

        pieces
    }

    /// Rightmost split in the window after the previous piece's end and within
    /// the size limit from `start`.
    fn find_split(&self, text: &[char], start: usize, prev_end: usize) -> Option<usize> {
        let lo = (prev_end + 1).max(start + 1);
        let hi = start + self.max_chunk_size;
        if lo > hi {
            return None;
        }
        let (split, kind) = self.boundaries.find(text, lo, hi)?;
        log::trace!("Split at {} on {} boundary", split, kind);
        Some(split)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str, max: usize, overlap: usize) -> (Vec<char>, Vec<SplitPiece>) {
        let chars: Vec<char> = text.chars().collect();
        let pieces = TextSplitter::new(max, overlap, BoundaryChain::default()).split(&chars);
        (chars, pieces)
    }

    fn slice(chars: &[char], piece: &SplitPiece) -> String {
        chars[piece.start..piece.end].iter().collect()
    }

    fn reconstruct(chars: &[char], pieces: &[SplitPiece]) -> String {
        pieces
            .iter()
            .map(|p| chars[p.start + p.overlap..p.end].iter().collect::<String>())
            .collect()
    }

    #[test]
    fn test_empty_text() {
        let (_, pieces) = split("", 10, 2);
        assert!(pieces.is_empty());
    }

    #[test]
    fn test_fits_in_one_piece() {
        let (_, pieces) = split("short text", 10, 2);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].overlap, 0);
        assert!(!pieces[0].oversized);
    }

    #[test]
    fn test_prefers_paragraph_break() {
        let text = "one two three.\n\nfour five six seven eight nine";
        let (chars, pieces) = split(text, 30, 5);
        assert_eq!(slice(&chars, &pieces[0]), "one two three.\n\n");
        assert_eq!(pieces[1].start, 16 - 5);
        assert_eq!(reconstruct(&chars, &pieces), text);
    }

    #[test]
    fn test_overlap_counts_characters() {
        let text = "ééé ééé ééé ééé ééé";
        let (chars, pieces) = split(text, 8, 2);
        assert!(pieces.len() > 1);
        for piece in &pieces {
            assert!(piece.len() <= 8);
        }
        assert_eq!(reconstruct(&chars, &pieces), text);
    }

    #[test]
    fn test_oversized_token_is_whole() {
        let token = "x".repeat(200);
        let (_, pieces) = split(&token, 100, 10);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].len(), 200);
        assert!(pieces[0].oversized);
    }

    #[test]
    fn test_oversized_token_between_words() {
        let text = format!("intro words {} outro words", "y".repeat(40));
        let (chars, pieces) = split(&text, 15, 4);
        let token: Vec<&SplitPiece> = pieces.iter().filter(|p| p.oversized).collect();
        assert_eq!(token.len(), 1);
        assert_eq!(slice(&chars, token[0]), "y".repeat(40));
        assert_eq!(token[0].overlap, 0);
        for piece in pieces.iter().filter(|p| !p.oversized) {
            assert!(piece.len() <= 15);
        }
        assert_eq!(reconstruct(&chars, &pieces), text);
    }

    #[test]
    fn test_every_piece_makes_progress() {
        let text = "a b c d e f g h i j k l m n o p";
        let (chars, pieces) = split(text, 4, 3);
        let mut prev_end = 0;
        for piece in &pieces {
            assert!(piece.end > prev_end);
            assert_eq!(piece.start + piece.overlap, prev_end);
            prev_end = piece.end;
        }
        assert_eq!(prev_end, chars.len());
    }
}
