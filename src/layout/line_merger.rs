//! Merging extracted blocks into logical lines.
//!
//! Extractors emit one block per visual line, so a sentence that wraps across
//! three lines arrives as three blocks. The merger walks the blocks in order
//! and joins a block onto the line being accumulated only when every merge
//! condition holds and there is positive evidence that the thought is
//! unfinished. Absence of a terminator alone is not enough: headers, table
//! cells and list items rarely end with punctuation either.
//!
//! The merger never reorders text and never merges across a page boundary.

use crate::error::Warning;
use crate::layout::text_block::{
    font_sizes_match, is_valid_font_size, single_line, Block, MergedLine,
};
use crate::pipeline::config::LineMergeConfig;
use crate::text::hyphenation::join_fragments;
use crate::text::punctuation::{ends_clause, ends_mid_clause, ends_sentence, starts_continuation};

/// Merged lines plus the warnings raised while building them.
#[derive(Debug, Clone, Default)]
pub struct MergeOutput {
    /// Logical lines in source order
    pub lines: Vec<MergedLine>,
    /// Malformed-input diagnostics
    pub warnings: Vec<Warning>,
}

/// Line being accumulated.
struct Accumulator<'a> {
    line: MergedLine,
    /// Most recently absorbed block
    last: &'a Block,
    /// Character count of the block the line takes its attributes from
    dominant_chars: usize,
}

impl<'a> Accumulator<'a> {
    fn start(block: &'a Block) -> Self {
        Self {
            line: MergedLine::from_block(block),
            last: block,
            dominant_chars: single_line(&block.text).chars().count(),
        }
    }

    fn absorb(&mut self, block: &'a Block) {
        let fragment = single_line(&block.text);
        self.line.text = join_fragments(&self.line.text, &fragment);
        self.line.block_count += 1;

        let chars = fragment.chars().count();
        if chars > self.dominant_chars {
            self.dominant_chars = chars;
            self.line.font_size = block.font_size;
            self.line.is_bold = block.is_bold;
            self.line.is_all_caps = block.is_all_caps;
        }
        self.last = block;
    }
}

/// Joins consecutive blocks into [`MergedLine`]s.
#[derive(Debug, Clone)]
pub struct LineMerger {
    config: LineMergeConfig,
    font_tolerance: f32,
}

impl Default for LineMerger {
    fn default() -> Self {
        Self::new(LineMergeConfig::default(), 0.1)
    }
}

impl LineMerger {
    /// Create a merger.
    ///
    /// `font_tolerance` is the relative difference under which two font sizes
    /// count as the same font.
    pub fn new(config: LineMergeConfig, font_tolerance: f32) -> Self {
        Self {
            config,
            font_tolerance,
        }
    }

    /// Merge blocks into logical lines.
    ///
    /// `body_font_size` comes from the document pre-pass and is used to spot
    /// lines whose larger font marks them as header candidates.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_chunker::layout::{Block, LineMerger};
    ///
    /// let blocks = vec![
    ///     Block::new(1, "Visitors must sign the register,", 11.0),
    ///     Block::new(1, "show photo identification and wear a badge.", 11.0),
    /// ];
    /// let output = LineMerger::default().merge(&blocks, Some(11.0));
    /// assert_eq!(output.lines.len(), 1);
    /// assert_eq!(
    ///     output.lines[0].text,
    ///     "Visitors must sign the register, show photo identification and wear a badge."
    /// );
    /// ```
    pub fn merge(&self, blocks: &[Block], body_font_size: Option<f32>) -> MergeOutput {
        let mut output = MergeOutput::default();
        let mut current: Option<Accumulator<'_>> = None;
        let mut previous: Option<&Block> = None;

        for (index, block) in blocks.iter().enumerate() {
            if block.is_empty() {
                log::trace!("Dropping empty block {} on page {}", index, block.page);
                continue;
            }

            if let Some(prev) = previous {
                if block.page < prev.page {
                    let warning = Warning::PageOrder {
                        index,
                        previous: prev.page,
                        page: block.page,
                    };
                    log::warn!("{}", warning);
                    output.warnings.push(warning);
                }
            }

            if !block.has_valid_font() {
                let warning = Warning::MalformedBlock {
                    index,
                    page: block.page,
                    reason: format!("invalid font size {}", block.font_size),
                };
                log::warn!("{}", warning);
                output.warnings.push(warning);
            }

            let merged = match current.as_mut() {
                Some(acc) if self.should_merge(&acc.line, acc.last, block, body_font_size) => {
                    acc.absorb(block);
                    true
                },
                _ => false,
            };

            if !merged {
                if let Some(acc) = current.take() {
                    output.lines.push(acc.line);
                }
                let mut next = Accumulator::start(block);
                if let Some(prev) = previous {
                    next.line.starts_paragraph =
                        self.is_paragraph_break(prev, block, output.lines.last());
                }
                current = Some(next);
            }

            previous = Some(block);
        }

        if let Some(acc) = current {
            output.lines.push(acc.line);
        }

        log::debug!("Merged {} blocks into {} lines", blocks.len(), output.lines.len());
        output
    }

    /// Whether `next` continues the accumulated `line` whose most recent
    /// source block is `last`.
    pub fn should_merge(
        &self,
        line: &MergedLine,
        last: &Block,
        next: &Block,
        body_font_size: Option<f32>,
    ) -> bool {
        if next.page != last.page {
            return false;
        }
        if !font_sizes_match(last.font_size, next.font_size, self.font_tolerance) {
            return false;
        }
        if last.is_bold != next.is_bold || last.is_all_caps != next.is_all_caps {
            return false;
        }
        if ends_sentence(&line.text) || ends_clause(&line.text) {
            return false;
        }
        if self.is_header_candidate(line, body_font_size) {
            return false;
        }

        let evidence = starts_continuation(next.text.trim()) || ends_mid_clause(&line.text);
        log::trace!(
            "Merge candidate {:?} + {:?}: continuation evidence = {}",
            line.text,
            next.text,
            evidence
        );
        evidence
    }

    /// A short, emphasized line stands alone and never absorbs what follows.
    pub fn is_header_candidate(&self, line: &MergedLine, body_font_size: Option<f32>) -> bool {
        if line.char_count() >= self.config.header_candidate_max_chars {
            return false;
        }
        let larger_font = match body_font_size {
            Some(body) if is_valid_font_size(body) && line.has_valid_font() => {
                line.font_size > body * (1.0 + self.font_tolerance)
            },
            _ => false,
        };
        line.is_bold || line.is_all_caps || larger_font
    }

    /// A new line starts a paragraph after a large vertical gap on the same
    /// page, or after a page turn that followed a finished sentence.
    fn is_paragraph_break(&self, prev: &Block, block: &Block, closed: Option<&MergedLine>) -> bool {
        if prev.page != block.page {
            return closed.is_some_and(|line| ends_sentence(&line.text));
        }
        if !prev.vertical_position.is_finite() || !block.vertical_position.is_finite() {
            return false;
        }
        let reference = [prev.font_size, block.font_size]
            .into_iter()
            .filter(|size| is_valid_font_size(*size))
            .fold(f32::NAN, f32::max);
        if !reference.is_finite() {
            return false;
        }
        let gap = (block.vertical_position - prev.vertical_position).abs();
        gap > self.config.paragraph_gap_factor * reference
    }
}
