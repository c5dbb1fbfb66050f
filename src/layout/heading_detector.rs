//! Header detection by weighted signal scoring.
//!
//! Each merged line is described by a fixed vector of signals, every signal a
//! value in `[0, 1]`. The header score is the weighted sum of that vector using
//! the configured [`SignalWeights`]; a line whose score reaches the threshold is
//! a header. Two signals suppress rather than support: list items and
//! complete body-length sentences subtract their weight and, while that weight
//! is non-zero, veto the classification outright.
//!
//! Header levels come from font size: the fonts of confirmed headers are
//! clustered and the largest cluster becomes level 1.

use crate::layout::document_analyzer::DocumentProperties;
use crate::layout::text_block::{font_sizes_match, is_valid_font_size, MergedLine};
use crate::pipeline::config::{HeaderScoringConfig, SignalWeights};
use crate::text::punctuation::ends_sentence;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Bullet glyphs, or an ASCII dash/asterisk followed by a space
    static ref RE_BULLET: Regex = Regex::new(r"^(?:[•▪◦‣●]|[-*–]\s)").unwrap();

    /// "1." "2)" "(3)"
    static ref RE_NUMBERED: Regex = Regex::new(r"^\(?\d{1,3}[.)]\s").unwrap();

    /// "a)" "b." "(c)" "C)"
    static ref RE_LETTERED: Regex = Regex::new(r"^(?:\(?[a-z][.)]|\(?[A-Z]\))\s").unwrap();

    /// "iv." "(ii)" "XII)"
    static ref RE_ROMAN: Regex = Regex::new(r"^\(?(?:[ivxlc]+|[IVXLC]+)[.)]\s").unwrap();

    /// "Surname Name, Title..." roster lines
    static ref RE_ROSTER: Regex = Regex::new(r"^[A-Z][a-z]+\s+[A-Z][a-z]+,\s+").unwrap();
}

/// Signal vector of one line. Every value is in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeaderSignals {
    /// How much larger than the body font the line is
    pub font_size: f32,
    /// Bold font
    pub bold: f32,
    /// All-caps text
    pub all_caps: f32,
    /// Short line
    pub short_line: f32,
    /// Enumerated or roster line (suppressing)
    pub list_item: f32,
    /// Complete sentence of body length (suppressing)
    pub sentence_body: f32,
    /// Directly next to a confirmed header
    pub adjacency: f32,
}

impl HeaderSignals {
    /// Weighted sum of the signal vector.
    pub fn score(&self, weights: &SignalWeights) -> f32 {
        self.font_size * weights.font_size
            + self.bold * weights.bold
            + self.all_caps * weights.all_caps
            + self.short_line * weights.short_line
            + self.adjacency * weights.adjacency
            - self.list_item * weights.list_item.abs()
            - self.sentence_body * weights.sentence_body.abs()
    }

    /// Whether a suppressing signal fired with a non-zero weight.
    pub fn is_vetoed(&self, weights: &SignalWeights) -> bool {
        (self.list_item > 0.0 && weights.list_item != 0.0)
            || (self.sentence_body > 0.0 && weights.sentence_body != 0.0)
    }
}

/// Check whether a line reads as an enumerated item or a roster entry.
///
/// # Examples
///
/// ```
/// use pdf_chunker::layout::heading_detector::is_list_item;
///
/// assert!(is_list_item("1. Wear your badge"));
/// assert!(is_list_item("b) Sign the register"));
/// assert!(is_list_item("• Escort visitors"));
/// assert!(!is_list_item("SECURITY POLICY"));
/// ```
pub fn is_list_item(text: &str) -> bool {
    let text = text.trim_start();
    RE_BULLET.is_match(text)
        || RE_NUMBERED.is_match(text)
        || RE_LETTERED.is_match(text)
        || RE_ROMAN.is_match(text)
        || RE_ROSTER.is_match(text)
        || text.matches(',').count() >= 2
}

/// Classifies merged lines as headers and assigns their levels.
#[derive(Debug, Clone)]
pub struct HeaderScorer {
    config: HeaderScoringConfig,
    font_tolerance: f32,
}

impl Default for HeaderScorer {
    fn default() -> Self {
        Self::new(HeaderScoringConfig::default(), 0.1)
    }
}

impl HeaderScorer {
    /// Create a scorer. `font_tolerance` is the relative difference under
    /// which two font sizes count as the same.
    pub fn new(config: HeaderScoringConfig, font_tolerance: f32) -> Self {
        Self {
            config,
            font_tolerance,
        }
    }

    /// Compute the signal vector of a line. The adjacency signal is left at
    /// zero; only the re-evaluation pass sets it.
    pub fn signals(&self, line: &MergedLine, props: &DocumentProperties) -> HeaderSignals {
        let text = line.text.trim();
        let chars = text.chars().count();

        let font_size = match props.font_ratio(line.font_size) {
            Some(ratio) if ratio > 1.0 + self.font_tolerance => {
                let span = self.config.font_ratio_span.max(f32::EPSILON);
                ((ratio - 1.0) / span).clamp(0.0, 1.0)
            },
            _ => 0.0,
        };

        HeaderSignals {
            font_size,
            bold: flag(line.is_bold),
            all_caps: flag(line.is_all_caps),
            short_line: flag(chars <= self.config.short_line_max_chars),
            list_item: flag(is_list_item(text)),
            sentence_body: flag(ends_sentence(text) && chars >= self.config.sentence_min_chars),
            adjacency: 0.0,
        }
    }

    /// Whether a signal vector (for a line with `text`) classifies as a header.
    fn passes(&self, text: &str, signals: &HeaderSignals) -> bool {
        let weights = &self.config.header_signal_weights;
        text.chars().any(char::is_alphabetic)
            && !signals.is_vetoed(weights)
            && signals.score(weights) >= self.config.header_score_threshold
    }

    /// Score every line in place, assign header levels and run the single
    /// re-evaluation pass. Returns the number of headers.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_chunker::layout::{Block, DocumentProperties, HeaderScorer, MergedLine};
    ///
    /// let mut lines = vec![
    ///     MergedLine::from_block(&Block::new(1, "SECURITY POLICY", 18.0).bold(true)),
    ///     MergedLine::from_block(&Block::new(1, "All employees must badge in.", 11.0)),
    /// ];
    /// let props = DocumentProperties::from_lines(&lines);
    /// let headers = HeaderScorer::default().score_lines(&mut lines, &props);
    ///
    /// assert_eq!(headers, 1);
    /// assert_eq!(lines[0].header_level, 1);
    /// assert!(!lines[1].is_header);
    /// ```
    pub fn score_lines(&self, lines: &mut [MergedLine], props: &DocumentProperties) -> usize {
        let weights = &self.config.header_signal_weights;

        for line in lines.iter_mut() {
            let signals = self.signals(line, props);
            line.header_score = signals.score(weights);
            line.is_header = self.passes(&line.text, &signals);
            line.header_level = 0;
            log::trace!(
                "Header score {:.2} for {:?} ({})",
                line.header_score,
                line.text,
                if line.is_header { "header" } else { "body" }
            );
        }

        self.assign_levels(lines);
        let promoted = self.reevaluate(lines, props);

        let headers = lines.iter().filter(|l| l.is_header).count();
        log::debug!(
            "Detected {} headers in {} lines ({} by re-evaluation)",
            headers,
            lines.len(),
            promoted
        );
        headers
    }

    /// Map header font sizes to levels: clusters sorted by descending size,
    /// the largest becomes level 1, anything past the deepest configured
    /// level is clamped to it.
    fn assign_levels(&self, lines: &mut [MergedLine]) {
        let max_levels = self.config.max_header_levels.max(1);

        let mut sizes: Vec<f32> = lines
            .iter()
            .filter(|l| l.is_header && l.has_valid_font())
            .map(|l| l.font_size)
            .collect();
        sizes.sort_by(|a, b| crate::utils::safe_float_cmp(*b, *a));

        // Representative (largest) size of each cluster, descending.
        let mut clusters: Vec<f32> = Vec::new();
        for size in sizes {
            match clusters.last() {
                Some(&rep) if font_sizes_match(rep, size, self.font_tolerance) => {},
                _ => clusters.push(size),
            }
        }

        for line in lines.iter_mut().filter(|l| l.is_header) {
            line.header_level = if is_valid_font_size(line.font_size) {
                let index = clusters
                    .iter()
                    .position(|&rep| font_sizes_match(rep, line.font_size, self.font_tolerance))
                    .unwrap_or(clusters.len().saturating_sub(1));
                (index + 1).min(max_levels as usize) as u8
            } else {
                max_levels
            };
        }
    }

    /// Re-score short body lines directly adjacent to a first-pass header
    /// with matching formatting, once, with the adjacency bonus. A line that
    /// now passes takes the level of its neighbour.
    fn reevaluate(&self, lines: &mut [MergedLine], props: &DocumentProperties) -> usize {
        let weights = &self.config.header_signal_weights;
        let first_pass: Vec<bool> = lines.iter().map(|l| l.is_header).collect();
        let mut promoted = 0;

        for i in 0..lines.len() {
            if first_pass[i] {
                continue;
            }
            let neighbour = [i.checked_sub(1), Some(i + 1)]
                .into_iter()
                .flatten()
                .filter(|&j| j < lines.len() && first_pass[j])
                .find(|&j| self.formatting_matches(&lines[i], &lines[j]));
            let Some(j) = neighbour else {
                continue;
            };

            let mut signals = self.signals(&lines[i], props);
            if signals.short_line == 0.0 {
                continue;
            }
            signals.adjacency = 1.0;
            let score = signals.score(weights);
            if self.passes(&lines[i].text, &signals) {
                let level = lines[j].header_level;
                let line = &mut lines[i];
                line.header_score = score;
                line.is_header = true;
                line.header_level = level;
                promoted += 1;
                log::trace!("Re-evaluated {:?} as header level {}", line.text, level);
            }
        }
        promoted
    }

    fn formatting_matches(&self, line: &MergedLine, header: &MergedLine) -> bool {
        line.is_bold == header.is_bold
            && font_sizes_match(line.font_size, header.font_size, self.font_tolerance)
    }
}

fn flag(value: bool) -> f32 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Render scored lines as marked-up text.
///
/// Headers and paragraph starts are separated from their neighbours by a
/// blank line; continuation body lines by a single newline.
///
/// # Examples
///
/// ```
/// use pdf_chunker::layout::{render_marked_text, Block, MergedLine};
///
/// let mut title = MergedLine::from_block(&Block::new(1, "SECURITY POLICY", 18.0));
/// title.is_header = true;
/// title.header_level = 1;
/// let body = MergedLine::from_block(&Block::new(1, "All employees must badge in.", 11.0));
///
/// assert_eq!(
///     render_marked_text(&[title, body]),
///     "## SECURITY POLICY\n\nAll employees must badge in."
/// );
/// ```
pub fn render_marked_text(lines: &[MergedLine]) -> String {
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            let prev = &lines[i - 1];
            if line.is_header || prev.is_header || line.starts_paragraph {
                out.push_str("\n\n");
            } else {
                out.push('\n');
            }
        }
        out.push_str(&line.marked_text());
    }
    out
}
