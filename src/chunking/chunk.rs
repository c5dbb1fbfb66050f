//! Chunk output types.

use serde::Serialize;

/// A size-bounded piece of the document, ready for embedding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// Position in the document, 0-based and contiguous
    pub chunk_index: usize,

    /// Chunk text, including any overlap with the previous chunk
    pub text: String,

    /// Length of `text` in characters
    pub char_size: usize,

    /// Provenance and split details
    pub metadata: ChunkMetadata,
}

/// Section provenance and split details of a [`Chunk`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChunkMetadata {
    /// Header text of the owning section, empty when none
    pub section_header: String,

    /// Level of the owning section, 0 for the implicit top-level section
    pub section_level: u8,

    /// The owning section did not fit in one chunk
    pub is_split_chunk: bool,

    /// Number of leading characters repeated from the previous chunk
    pub overlap_with_previous: usize,

    /// Header texts from the outermost ancestor down to the owning section
    pub section_path: Vec<String>,

    /// Readable form of `section_path`: "Section: A > Subsection: B"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_hierarchy: Option<String>,

    /// "i/n" for chunks of a split section
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_part: Option<String>,
}

impl Chunk {
    /// The chunk text without the characters repeated from the previous chunk.
    ///
    /// Concatenating this over all chunks in order reproduces the chunked text.
    pub fn new_text(&self) -> &str {
        match self.text.char_indices().nth(self.metadata.overlap_with_previous) {
            Some((byte, _)) => &self.text[byte..],
            None => "",
        }
    }

    /// Whether the text contains no whitespace at all.
    pub fn is_single_token(&self) -> bool {
        !self.text.chars().any(char::is_whitespace)
    }
}

/// Label used for each depth of the section path.
fn depth_label(depth: usize) -> &'static str {
    match depth {
        0 => "Section",
        1 => "Subsection",
        _ => "Sub-subsection",
    }
}

/// Render a section path as "Section: A > Subsection: B > Sub-subsection: C".
///
/// Returns `None` for an empty path.
///
/// # Examples
///
/// ```
/// use pdf_chunker::chunking::chunk::section_hierarchy;
///
/// let path = vec!["Policy".to_string(), "Visitors".to_string()];
/// assert_eq!(
///     section_hierarchy(&path).as_deref(),
///     Some("Section: Policy > Subsection: Visitors")
/// );
/// assert_eq!(section_hierarchy(&[]), None);
/// ```
pub fn section_hierarchy(path: &[String]) -> Option<String> {
    if path.is_empty() {
        return None;
    }
    let parts: Vec<String> = path
        .iter()
        .enumerate()
        .map(|(depth, header)| format!("{}: {}", depth_label(depth), header))
        .collect();
    Some(parts.join(" > "))
}
