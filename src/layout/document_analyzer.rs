//! Document-level font statistics.
//!
//! The merger and the header scorer both compare font sizes against the
//! document's body font. That number is computed once per document in a
//! pre-pass and handed to each stage explicitly, so neither stage depends on
//! hidden shared state.
//!
//! ## Approach
//!
//! Body text dominates most documents by volume, so the body font is the
//! character-weighted mode of all font sizes. Sizes are bucketed to half a
//! point before counting so that extractor jitter (11.98pt vs 12.02pt) does not
//! split one font into several buckets. When no characters carry weight the
//! median of the valid sizes is used instead.

use crate::layout::text_block::{is_valid_font_size, Block, MergedLine};
use std::collections::BTreeMap;

/// Bucket width used when counting font sizes (points).
const FONT_BUCKET_WIDTH: f32 = 0.5;

/// Font statistics of one document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentProperties {
    /// Estimated body font size (character-weighted mode).
    ///
    /// `None` when no sample carried a valid font size.
    pub body_font_size: Option<f32>,

    /// Median of all valid font sizes.
    pub median_font_size: Option<f32>,

    /// Number of samples with a valid font size.
    pub valid_samples: usize,

    /// Number of samples whose font size was missing or invalid.
    pub invalid_samples: usize,
}

impl DocumentProperties {
    /// Analyze raw blocks, as the merger sees them.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_chunker::layout::{Block, DocumentProperties};
    ///
    /// let blocks = vec![
    ///     Block::new(1, "TITLE", 18.0),
    ///     Block::new(1, "A long line of regular body text.", 11.0),
    ///     Block::new(1, "Another long line of body text here.", 11.0),
    /// ];
    /// let props = DocumentProperties::from_blocks(&blocks);
    /// assert_eq!(props.body_font_size, Some(11.0));
    /// ```
    pub fn from_blocks(blocks: &[Block]) -> Self {
        Self::analyze(
            blocks
                .iter()
                .map(|b| (b.font_size, b.text.trim().chars().count())),
        )
    }

    /// Analyze merged lines, as the header scorer sees them.
    pub fn from_lines(lines: &[MergedLine]) -> Self {
        Self::analyze(lines.iter().map(|l| (l.font_size, l.char_count())))
    }

    /// Analyze `(font_size, character_count)` samples.
    pub fn analyze<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = (f32, usize)>,
    {
        let mut sizes = Vec::new();
        let mut invalid_samples = 0;
        // bucket -> (total chars, char-weighted size sum)
        let mut buckets: BTreeMap<i32, (usize, f64)> = BTreeMap::new();

        for (size, chars) in samples {
            if !is_valid_font_size(size) {
                invalid_samples += 1;
                continue;
            }
            sizes.push(size);
            let bucket = (size / FONT_BUCKET_WIDTH).round() as i32;
            let entry = buckets.entry(bucket).or_insert((0, 0.0));
            entry.0 += chars;
            entry.1 += size as f64 * chars as f64;
        }

        let median_font_size = median(&mut sizes);
        let body_font_size = Self::weighted_mode(&buckets).or(median_font_size);

        if invalid_samples > 0 {
            log::debug!("Font analysis skipped {} samples with invalid font size", invalid_samples);
        }

        Self {
            body_font_size,
            median_font_size,
            valid_samples: sizes.len(),
            invalid_samples,
        }
    }

    /// Heaviest bucket; ties go to the smaller size since iteration is ascending
    /// and only a strictly heavier bucket replaces the current best.
    fn weighted_mode(buckets: &BTreeMap<i32, (usize, f64)>) -> Option<f32> {
        let mut best: Option<(usize, f64)> = None;
        for &(chars, weighted_sum) in buckets.values() {
            if chars == 0 {
                continue;
            }
            if best.map_or(true, |(best_chars, _)| chars > best_chars) {
                best = Some((chars, weighted_sum));
            }
        }
        best.map(|(chars, weighted_sum)| (weighted_sum / chars as f64) as f32)
    }

    /// Ratio of `font_size` to the body font, if both are valid.
    pub fn font_ratio(&self, font_size: f32) -> Option<f32> {
        match self.body_font_size {
            Some(body) if is_valid_font_size(font_size) => Some(font_size / body),
            _ => None,
        }
    }
}

fn median(sizes: &mut [f32]) -> Option<f32> {
    if sizes.is_empty() {
        return None;
    }
    sizes.sort_by(|a, b| crate::utils::safe_float_cmp(*a, *b));
    Some(sizes[sizes.len() / 2])
}
