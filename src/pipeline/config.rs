//! Unified configuration for the structure recovery pipeline.
//!
//! Every tunable that the merger, scorer, cleaner and chunker consult lives
//! here, so one [`PipelineConfig`] fully determines a run. Configuration is
//! read-only once a pipeline is built; nothing here is shared mutable state.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Chunking mode selected per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkingMode {
    /// Split at header boundaries first, then bound each section by size.
    /// Produces small, topic-coherent chunks.
    #[default]
    SectionAware,
    /// Ignore headers and bound the whole document by size.
    /// Produces larger, size-uniform chunks.
    SizeOnly,
}

impl ChunkingMode {
    /// Parse a mode name, accepting the legacy chunker type names as well.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "section_aware" | "section-aware" | "langchain" => Some(Self::SectionAware),
            "size_only" | "size-only" | "langchain_simple" => Some(Self::SizeOnly),
            _ => None,
        }
    }
}

/// Size bounds for emitted chunks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Hard upper bound on chunk length in characters
    pub max_chunk_size: usize,

    /// Characters repeated between adjacent size-split chunks
    pub chunk_overlap: usize,

    /// Split at headers before bounding by size
    pub use_section_awareness: bool,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: 1000,
            chunk_overlap: 200,
            use_section_awareness: true,
        }
    }
}

impl ChunkingConfig {
    /// Create a chunking config with the given size and overlap.
    pub fn new(max_chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            max_chunk_size,
            chunk_overlap,
            ..Default::default()
        }
    }

    /// The mode implied by `use_section_awareness`.
    pub fn mode(&self) -> ChunkingMode {
        if self.use_section_awareness {
            ChunkingMode::SectionAware
        } else {
            ChunkingMode::SizeOnly
        }
    }

    /// Select the chunking mode.
    pub fn with_mode(mut self, mode: ChunkingMode) -> Self {
        self.use_section_awareness = mode == ChunkingMode::SectionAware;
        self
    }

    /// Check size and overlap bounds.
    pub fn validate(&self) -> Result<()> {
        if self.max_chunk_size == 0 {
            return Err(Error::InvalidConfig(
                "max_chunk_size must be positive".to_string(),
            ));
        }
        if self.chunk_overlap >= self.max_chunk_size {
            return Err(Error::OverlapTooLarge {
                overlap: self.chunk_overlap,
                max_chunk_size: self.max_chunk_size,
            });
        }
        Ok(())
    }
}

/// Per-signal weights for header scoring.
///
/// `list_item` and `sentence_body` are suppressing signals: they always
/// subtract `|weight|` and, while their weight is non-zero, veto the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalWeights {
    /// Font size larger than the body font
    pub font_size: f32,
    /// Bold flag
    pub bold: f32,
    /// All-caps flag
    pub all_caps: f32,
    /// Short line
    pub short_line: f32,
    /// Leading bullet or enumeration (suppressing)
    pub list_item: f32,
    /// Complete sentence of body length (suppressing)
    pub sentence_body: f32,
    /// Bonus for lines next to a confirmed header, used by the re-evaluation pass
    pub adjacency: f32,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            font_size: 1.5,
            bold: 1.0,
            all_caps: 1.0,
            short_line: 0.5,
            list_item: 2.0,
            sentence_body: 2.0,
            adjacency: 0.5,
        }
    }
}

impl SignalWeights {
    fn all(&self) -> [(&'static str, f32); 7] {
        [
            ("font_size", self.font_size),
            ("bold", self.bold),
            ("all_caps", self.all_caps),
            ("short_line", self.short_line),
            ("list_item", self.list_item),
            ("sentence_body", self.sentence_body),
            ("adjacency", self.adjacency),
        ]
    }
}

/// Header detection tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderScoringConfig {
    /// Minimum weighted score for a line to be classified as a header
    pub header_score_threshold: f32,

    /// Weight of each signal
    pub header_signal_weights: SignalWeights,

    /// Number of header levels; the smallest header fonts share the last level
    pub max_header_levels: u8,

    /// Lines up to this many characters fire the short-line signal
    pub short_line_max_chars: usize,

    /// Terminated lines at least this long count as body sentences
    pub sentence_min_chars: usize,

    /// Font ratio above 1.0 at which the font signal saturates
    /// (0.5 means 1.5x the body font gives the full vote)
    pub font_ratio_span: f32,
}

impl Default for HeaderScoringConfig {
    fn default() -> Self {
        Self {
            header_score_threshold: 1.5,
            header_signal_weights: SignalWeights::default(),
            max_header_levels: 3,
            short_line_max_chars: 80,
            sentence_min_chars: 20,
            font_ratio_span: 0.5,
        }
    }
}

/// Line merging tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineMergeConfig {
    /// Emphasized lines shorter than this are header candidates and never absorb
    /// the following block
    pub header_candidate_max_chars: usize,

    /// Vertical gap, in multiples of the font size, that starts a new paragraph
    pub paragraph_gap_factor: f32,
}

impl Default for LineMergeConfig {
    fn default() -> Self {
        Self {
            header_candidate_max_chars: 60,
            paragraph_gap_factor: 1.8,
        }
    }
}

/// Text cleaning tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Fraction of non-whitespace characters cleaning may drop before warning
    pub content_loss_tolerance: f64,

    /// Run the content-loss validation
    pub validate: bool,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            content_loss_tolerance: 0.10,
            validate: true,
        }
    }
}

/// Unified configuration for the whole pipeline.
///
/// # Examples
///
/// ```
/// use pdf_chunker::pipeline::config::{ChunkingMode, PipelineConfig};
///
/// let config = PipelineConfig::default()
///     .with_max_chunk_size(500)
///     .with_chunk_overlap(50)
///     .with_chunking_mode(ChunkingMode::SizeOnly);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Line merger settings
    pub merge: LineMergeConfig,

    /// Header scorer settings
    pub headers: HeaderScoringConfig,

    /// Cleaner settings
    pub cleaning: CleaningConfig,

    /// Chunker settings
    pub chunking: ChunkingConfig,

    /// Relative tolerance for "same font size", shared by merge and scoring
    pub body_font_tolerance: f32,

    /// Rewrite numbered outline lines (`1.`, `1.1`, `1.1.1`) as header markers
    pub promote_numbered_outline: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            merge: LineMergeConfig::default(),
            headers: HeaderScoringConfig::default(),
            cleaning: CleaningConfig::default(),
            chunking: ChunkingConfig::default(),
            body_font_tolerance: 0.1,
            promote_numbered_outline: false,
        }
    }
}

impl PipelineConfig {
    /// Validate every section. Called before any document is processed.
    pub fn validate(&self) -> Result<()> {
        self.chunking.validate()?;

        if !(0.0..=1.0).contains(&self.body_font_tolerance) {
            return Err(Error::InvalidConfig(format!(
                "body_font_tolerance must be within [0, 1], got {}",
                self.body_font_tolerance
            )));
        }
        if !(0.0..=1.0).contains(&self.cleaning.content_loss_tolerance) {
            return Err(Error::InvalidConfig(format!(
                "content_loss_tolerance must be within [0, 1], got {}",
                self.cleaning.content_loss_tolerance
            )));
        }

        let headers = &self.headers;
        if !headers.header_score_threshold.is_finite() {
            return Err(Error::InvalidConfig(
                "header_score_threshold must be finite".to_string(),
            ));
        }
        for (name, weight) in headers.header_signal_weights.all() {
            if !weight.is_finite() {
                return Err(Error::InvalidConfig(format!(
                    "header signal weight '{}' must be finite",
                    name
                )));
            }
        }
        if !(1..=5).contains(&headers.max_header_levels) {
            return Err(Error::InvalidConfig(format!(
                "max_header_levels must be between 1 and 5, got {}",
                headers.max_header_levels
            )));
        }
        if !(headers.font_ratio_span.is_finite() && headers.font_ratio_span > 0.0) {
            return Err(Error::InvalidConfig(
                "font_ratio_span must be positive".to_string(),
            ));
        }
        if !(self.merge.paragraph_gap_factor.is_finite() && self.merge.paragraph_gap_factor > 0.0)
        {
            return Err(Error::InvalidConfig(
                "paragraph_gap_factor must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by process environment variables.
    ///
    /// Recognized: `MAX_CHUNK_SIZE`, `CHUNK_OVERLAP`, `CHUNKER_TYPE`,
    /// `HEADER_SCORE_THRESHOLD`, `BODY_FONT_TOLERANCE`, `CONTENT_LOSS_TOLERANCE`.
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup, then validate.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("MAX_CHUNK_SIZE") {
            self.chunking.max_chunk_size = parse_env("MAX_CHUNK_SIZE", &v)?;
        }
        if let Some(v) = lookup("CHUNK_OVERLAP") {
            self.chunking.chunk_overlap = parse_env("CHUNK_OVERLAP", &v)?;
        }
        if let Some(v) = lookup("CHUNKER_TYPE") {
            let mode = ChunkingMode::parse(&v).ok_or_else(|| {
                Error::InvalidConfig(format!(
                    "CHUNKER_TYPE must be 'section_aware' or 'size_only', got '{}'",
                    v
                ))
            })?;
            self.chunking = self.chunking.with_mode(mode);
        }
        if let Some(v) = lookup("HEADER_SCORE_THRESHOLD") {
            self.headers.header_score_threshold = parse_env("HEADER_SCORE_THRESHOLD", &v)?;
        }
        if let Some(v) = lookup("BODY_FONT_TOLERANCE") {
            self.body_font_tolerance = parse_env("BODY_FONT_TOLERANCE", &v)?;
        }
        if let Some(v) = lookup("CONTENT_LOSS_TOLERANCE") {
            self.cleaning.content_loss_tolerance = parse_env("CONTENT_LOSS_TOLERANCE", &v)?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Set the maximum chunk size in characters.
    pub fn with_max_chunk_size(mut self, size: usize) -> Self {
        self.chunking.max_chunk_size = size;
        self
    }

    /// Set the overlap between size-split chunks in characters.
    pub fn with_chunk_overlap(mut self, overlap: usize) -> Self {
        self.chunking.chunk_overlap = overlap;
        self
    }

    /// Select section-aware or size-only chunking.
    pub fn with_chunking_mode(mut self, mode: ChunkingMode) -> Self {
        self.chunking = self.chunking.with_mode(mode);
        self
    }

    /// Set the header score threshold.
    pub fn with_header_threshold(mut self, threshold: f32) -> Self {
        self.headers.header_score_threshold = threshold;
        self
    }

    /// Replace the header signal weights.
    pub fn with_signal_weights(mut self, weights: SignalWeights) -> Self {
        self.headers.header_signal_weights = weights;
        self
    }

    /// Set the relative font size tolerance.
    pub fn with_body_font_tolerance(mut self, tolerance: f32) -> Self {
        self.body_font_tolerance = tolerance;
        self
    }

    /// Set the tolerated content loss fraction for cleaning.
    pub fn with_content_loss_tolerance(mut self, tolerance: f64) -> Self {
        self.cleaning.content_loss_tolerance = tolerance;
        self
    }

    /// Enable or disable numbered outline promotion.
    pub fn with_numbered_outline(mut self, enabled: bool) -> Self {
        self.promote_numbered_outline = enabled;
        self
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidConfig(format!("{} has an invalid value '{}'", key, value)))
}
