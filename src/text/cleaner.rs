//! Text cleaning and content-loss validation.
//!
//! The cleaner applies one normalization pass repeatedly until the text stops
//! changing. Every pass that changes anything either shortens the text or
//! removes a carriage return, so the loop terminates, and the result is a
//! fixed point: cleaning already-cleaned text is a no-op.

use crate::error::Warning;
use crate::pipeline::config::CleaningConfig;
use crate::text::whitespace::{
    collapse_horizontal_whitespace, count_non_whitespace, limit_blank_lines,
    normalize_line_endings, remove_page_markers, strip_lines,
};

/// Cleaned text plus any warnings raised while validating it.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedText {
    /// The normalized text
    pub text: String,
    /// Non-fatal validation warnings
    pub warnings: Vec<Warning>,
}

/// Cleans and normalizes marked-up text.
#[derive(Debug, Clone, Default)]
pub struct TextCleaner {
    config: CleaningConfig,
}

impl TextCleaner {
    /// Create a cleaner with the given configuration.
    pub fn new(config: CleaningConfig) -> Self {
        Self { config }
    }

    /// Clean the text and validate the result.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_chunker::text::cleaner::TextCleaner;
    ///
    /// let cleaner = TextCleaner::default();
    /// let result = cleaner.clean("  Intro   text \n\n\n\nPage 3 of 10\nMore  text  ");
    /// assert_eq!(result.text, "Intro text\n\nMore text");
    /// ```
    pub fn clean(&self, text: &str) -> CleanedText {
        let mut current = normalize_pass(text);
        let mut passes = 1;
        loop {
            let next = normalize_pass(&current);
            if next == current {
                break;
            }
            current = next;
            passes += 1;
        }
        log::trace!("Cleaning reached a fixed point after {} passes", passes);

        let mut warnings = Vec::new();
        if self.config.validate {
            if let Some(warning) = self.validate(text, &current) {
                log::warn!("{}", warning);
                warnings.push(warning);
            }
        }

        CleanedText {
            text: current,
            warnings,
        }
    }

    /// Compare non-whitespace content before and after cleaning.
    ///
    /// Returns a [`Warning::ContentLoss`] when the fraction of non-whitespace
    /// characters removed exceeds the configured tolerance.
    pub fn validate(&self, original: &str, cleaned: &str) -> Option<Warning> {
        let before = count_non_whitespace(original);
        let after = count_non_whitespace(cleaned);
        if before == 0 || after >= before {
            return None;
        }

        let loss = (before - after) as f64 / before as f64;
        if loss > self.config.content_loss_tolerance {
            Some(Warning::ContentLoss {
                before,
                after,
                loss_percent: loss * 100.0,
            })
        } else {
            None
        }
    }
}

/// One normalization pass, in order: line endings, page markers, horizontal
/// whitespace, per-line stripping, blank-line limiting, document trim.
fn normalize_pass(text: &str) -> String {
    let text = normalize_line_endings(text);
    let text = remove_page_markers(&text);
    let text = collapse_horizontal_whitespace(&text);
    let text = strip_lines(&text);
    let text = limit_blank_lines(&text);
    text.trim().to_string()
}
