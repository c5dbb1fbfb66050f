//! Section-aware chunking of marked-up text.
//!
//! The chunker recovers sections from header markers (or treats the whole
//! text as one section in size-only mode), then bounds every section with the
//! [`TextSplitter`](splitter::TextSplitter). It only reads markers; header
//! detection happens upstream and is never repeated here.
//!
//! Chunk texts are exact slices of the input: removing each chunk's
//! `overlap_with_previous` leading characters and concatenating the rest in
//! order reproduces the input.

pub mod boundary;
pub mod chunk;
pub mod sections;
pub mod splitter;

pub use boundary::{BoundaryChain, BoundaryFinder};
pub use chunk::{Chunk, ChunkMetadata};
pub use sections::Section;

use crate::error::Result;
use crate::pipeline::config::{ChunkingConfig, ChunkingMode};
use chunk::section_hierarchy;
use splitter::TextSplitter;

/// Splits text into size-bounded chunks that carry section provenance.
#[derive(Debug)]
pub struct SectionChunker {
    config: ChunkingConfig,
    splitter: TextSplitter,
}

impl SectionChunker {
    /// Create a chunker with the default boundary chain.
    ///
    /// Fails when the configuration is invalid, e.g. when the overlap is not
    /// smaller than the chunk size.
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        Self::with_boundaries(config, BoundaryChain::default())
    }

    /// Create a chunker with a custom boundary chain.
    pub fn with_boundaries(config: ChunkingConfig, boundaries: BoundaryChain) -> Result<Self> {
        config.validate()?;
        let splitter = TextSplitter::new(config.max_chunk_size, config.chunk_overlap, boundaries);
        Ok(Self { config, splitter })
    }

    /// The configuration this chunker was built with.
    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Sections the text is divided into under the configured mode.
    pub fn sections(&self, text: &str) -> Vec<Section> {
        match self.config.mode() {
            ChunkingMode::SectionAware => sections::split_sections(text),
            ChunkingMode::SizeOnly => sections::single_section(text),
        }
    }

    /// Chunk the text.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_chunker::chunking::SectionChunker;
    /// use pdf_chunker::pipeline::config::ChunkingConfig;
    ///
    /// let chunker = SectionChunker::new(ChunkingConfig::new(100, 10)).unwrap();
    /// let chunks = chunker.chunk("## Policy\nBadges are required.\n## Visitors\nSign in first.");
    ///
    /// assert_eq!(chunks.len(), 2);
    /// assert_eq!(chunks[0].metadata.section_header, "Policy");
    /// assert_eq!(chunks[1].text, "## Visitors\nSign in first.");
    /// assert_eq!(chunks[1].chunk_index, 1);
    /// ```
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let mut chunks = Vec::new();

        for section in self.sections(text) {
            let section_text = section.text();
            let chars: Vec<char> = section_text.chars().collect();
            let pieces = self.splitter.split(&chars);
            if pieces.is_empty() {
                continue;
            }

            let is_split = pieces.len() > 1 || pieces.iter().any(|p| p.oversized);
            let total = pieces.len();
            let hierarchy = section_hierarchy(&section.path);

            for (part, piece) in pieces.into_iter().enumerate() {
                let text: String = chars[piece.start..piece.end].iter().collect();
                chunks.push(Chunk {
                    chunk_index: chunks.len(),
                    char_size: piece.len(),
                    text,
                    metadata: ChunkMetadata {
                        section_header: section.header_text.clone(),
                        section_level: section.level,
                        is_split_chunk: is_split,
                        overlap_with_previous: piece.overlap,
                        section_path: section.path.clone(),
                        section_hierarchy: hierarchy.clone(),
                        chunk_part: is_split.then(|| format!("{}/{}", part + 1, total)),
                    },
                });
            }

            if is_split {
                log::debug!(
                    "Section {:?} ({} chars) split into {} chunks",
                    section.header_text,
                    chars.len(),
                    total
                );
            }
        }

        log::debug!("Produced {} chunks ({:?} mode)", chunks.len(), self.config.mode());
        chunks
    }
}
