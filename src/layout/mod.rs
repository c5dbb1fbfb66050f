//! Structure recovery from extracted blocks.
//!
//! This module turns the flat block stream produced by an extractor into
//! marked-up text:
//! - Font statistics (body font estimation)
//! - Line merging (blocks → logical lines)
//! - Header scoring and level assignment
//! - Rendering with header markers

pub mod document_analyzer;
pub mod heading_detector;
pub mod line_merger;
pub mod text_block;

// Re-export main types
pub use document_analyzer::DocumentProperties;
pub use heading_detector::{is_list_item, render_marked_text, HeaderScorer, HeaderSignals};
pub use line_merger::{LineMerger, MergeOutput};
pub use text_block::{Block, MergedLine};
