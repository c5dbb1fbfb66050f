// Neighbour lookups index into the line slice
#![allow(clippy::needless_range_loop)]

//! # PDF Chunker
//!
//! Document structure recovery and chunking for text extracted from
//! paginated documents.
//!
//! ## Core Features
//!
//! - **Line Merging**: wrapped lines are joined into logical lines only on
//!   positive evidence of an unfinished thought, never across pages
//! - **Header Detection**: weighted multi-signal scoring with configurable
//!   weights, font-size based levels and one adjacency re-evaluation pass
//! - **Cleaning**: page-marker removal and whitespace normalization, idempotent,
//!   with a content-loss check that warns instead of failing
//! - **Chunking**: section-aware or size-only, bounded by a character limit,
//!   with exact character overlap and section provenance on every chunk
//!
//! ## Architecture
//! - **Pure stages**: each stage is a function of its input and an immutable
//!   configuration, so one pipeline can serve many threads
//! - **Pluggable boundaries**: the splitter consults an ordered chain of
//!   [`BoundaryFinder`](chunking::BoundaryFinder) strategies
//!
//! ## Quick Start
//!
//! ```
//! use pdf_chunker::layout::Block;
//! use pdf_chunker::pipeline::{DocumentPipeline, PipelineConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig::default().with_max_chunk_size(500).with_chunk_overlap(50);
//! let pipeline = DocumentPipeline::new(config)?;
//!
//! let blocks = vec![
//!     Block::new(1, "SECURITY POLICY", 18.0).bold(true),
//!     Block::new(1, "All employees must badge in.", 11.0),
//! ];
//! let result = pipeline.process(&blocks);
//!
//! for chunk in &result.chunks {
//!     println!("[{}] {} ({} chars)", chunk.chunk_index, chunk.metadata.section_header, chunk.char_size);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of Apache License, Version 2.0 or MIT license at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Structure recovery
pub mod layout;

// Text processing
pub mod text;

// Section-aware chunking
pub mod chunking;

// Pipeline orchestration and configuration
pub mod pipeline;

// Re-exports
pub use chunking::{Chunk, ChunkMetadata, SectionChunker};
pub use error::{Error, Result, Warning};
pub use layout::{Block, MergedLine};
pub use pipeline::{ChunkingMode, DocumentPipeline, DocumentResult, PipelineConfig};

// Internal utilities
pub(crate) mod utils {
    //! Shared helpers for font-size arithmetic.

    use std::cmp::Ordering;

    /// Total order over font sizes. NaN (a missing size) sorts after every
    /// real size.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        }
    }

}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
