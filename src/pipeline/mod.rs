//! Document structure recovery and chunking pipeline.
//!
//! ```text
//! Block[] (from an external extractor)
//!     ↓
//! [DocumentProperties] (body font pre-pass)
//!     ↓
//! [LineMerger] (blocks → logical lines)
//!     ↓
//! MergedLine[]
//!     ↓
//! [HeaderScorer] (weighted signals → header levels)
//!     ↓
//! Marked-up text ("## Header" lines)
//!     ↓
//! [promote_numbered_outline] (optional)
//!     ↓
//! [TextCleaner] (page markers, whitespace, content-loss check)
//!     ↓
//! [SectionChunker] (sections → bounded, overlapping chunks)
//!     ↓
//! Chunk[]
//! ```
//!
//! # Key Design Principles
//!
//! 1. **Pure stages**: every stage is a function of its input and the
//!    immutable configuration. A [`DocumentPipeline`] can be shared between
//!    threads and used for any number of documents.
//!
//! 2. **Degrade, don't fail**: malformed blocks, page-order problems and
//!    content loss become [`Warning`]s on the result. Only configuration
//!    problems are errors, and they surface when the pipeline is built.
//!
//! 3. **Unified Configuration**: all settings live in [`PipelineConfig`].

pub mod config;

// Re-export main types
pub use config::{
    ChunkingConfig, ChunkingMode, CleaningConfig, HeaderScoringConfig, LineMergeConfig,
    PipelineConfig, SignalWeights,
};

use crate::chunking::{Chunk, SectionChunker};
use crate::error::{Result, Warning};
use crate::layout::{render_marked_text, Block, DocumentProperties, HeaderScorer, LineMerger, MergedLine};
use crate::text::{promote_numbered_outline, TextCleaner};
use serde::Serialize;

/// Everything produced for one document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentResult {
    /// Merged and scored lines (empty for text input)
    pub merged_lines: Vec<MergedLine>,

    /// Marked-up text before cleaning
    pub marked_text: String,

    /// Cleaned text that was chunked
    pub cleaned_text: String,

    /// Chunks in document order
    pub chunks: Vec<Chunk>,

    /// Non-fatal problems found along the way
    pub warnings: Vec<Warning>,
}

/// The structure recovery pipeline - orchestrates the full flow.
#[derive(Debug)]
pub struct DocumentPipeline {
    config: PipelineConfig,
    merger: LineMerger,
    scorer: HeaderScorer,
    cleaner: TextCleaner,
    chunker: SectionChunker,
}

impl DocumentPipeline {
    /// Build a pipeline, validating the configuration first.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_chunker::pipeline::{DocumentPipeline, PipelineConfig};
    ///
    /// let config = PipelineConfig::default().with_max_chunk_size(100).with_chunk_overlap(100);
    /// assert!(DocumentPipeline::new(config).is_err());
    /// ```
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let chunker = SectionChunker::new(config.chunking.clone())?;
        Ok(Self {
            merger: LineMerger::new(config.merge.clone(), config.body_font_tolerance),
            scorer: HeaderScorer::new(config.headers.clone(), config.body_font_tolerance),
            cleaner: TextCleaner::new(config.cleaning.clone()),
            chunker,
            config,
        })
    }

    /// Get the current configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage on a block sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_chunker::layout::Block;
    /// use pdf_chunker::pipeline::{DocumentPipeline, PipelineConfig};
    ///
    /// let pipeline = DocumentPipeline::new(PipelineConfig::default()).unwrap();
    /// let blocks = vec![
    ///     Block::new(1, "SECURITY POLICY", 18.0).bold(true).all_caps(true),
    ///     Block::new(1, "All employees must badge in.", 11.0),
    /// ];
    /// let result = pipeline.process(&blocks);
    ///
    /// assert_eq!(result.cleaned_text, "## SECURITY POLICY\n\nAll employees must badge in.");
    /// assert_eq!(result.chunks.len(), 1);
    /// assert_eq!(result.chunks[0].metadata.section_header, "SECURITY POLICY");
    /// ```
    pub fn process(&self, blocks: &[Block]) -> DocumentResult {
        let block_props = DocumentProperties::from_blocks(blocks);
        log::debug!(
            "Processing {} blocks (body font {:?})",
            blocks.len(),
            block_props.body_font_size
        );

        let merged = self.merger.merge(blocks, block_props.body_font_size);
        let mut lines = merged.lines;
        let mut warnings = merged.warnings;

        let line_props = DocumentProperties::from_lines(&lines);
        self.scorer.score_lines(&mut lines, &line_props);

        let marked_text = render_marked_text(&lines);
        let (cleaned_text, chunks) = self.clean_and_chunk(&marked_text, &mut warnings);

        DocumentResult {
            merged_lines: lines,
            marked_text,
            cleaned_text,
            chunks,
            warnings,
        }
    }

    /// Run cleaning and chunking on text that already carries header markers
    /// (or none at all).
    pub fn process_text(&self, text: &str) -> DocumentResult {
        log::debug!("Processing {} characters of text", text.chars().count());
        let mut warnings = Vec::new();
        let (cleaned_text, chunks) = self.clean_and_chunk(text, &mut warnings);
        DocumentResult {
            merged_lines: Vec::new(),
            marked_text: text.to_string(),
            cleaned_text,
            chunks,
            warnings,
        }
    }

    fn clean_and_chunk(&self, marked: &str, warnings: &mut Vec<Warning>) -> (String, Vec<Chunk>) {
        let promoted;
        let input = if self.config.promote_numbered_outline {
            promoted = promote_numbered_outline(marked);
            promoted.as_str()
        } else {
            marked
        };

        let cleaned = self.cleaner.clean(input);
        warnings.extend(cleaned.warnings);

        let chunks = self.chunker.chunk(&cleaned.text);
        (cleaned.text, chunks)
    }
}
