//! Error and warning types for the structure recovery pipeline.
//!
//! Errors are reserved for setup problems (bad configuration, unreadable
//! configuration files). Problems with the document itself never fail the
//! pipeline; they degrade and surface as [`Warning`]s attached to the result.

use serde::Serialize;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while configuring or driving the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Chunk overlap must be strictly smaller than the chunk size
    #[error("Invalid configuration: chunk_overlap ({overlap}) must be less than max_chunk_size ({max_chunk_size})")]
    OverlapTooLarge {
        /// Configured overlap in characters
        overlap: usize,
        /// Configured maximum chunk size in characters
        max_chunk_size: usize,
    },

    /// Any other invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Non-fatal diagnostics attached to a processing result.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A block had unusable font metadata and was forced onto its own line.
    #[error("Malformed block {index} on page {page}: {reason}")]
    MalformedBlock {
        /// Position of the block in the input sequence
        index: usize,
        /// Page the block claims to be on
        page: u32,
        /// What was wrong with it
        reason: String,
    },

    /// Page numbers went backwards in the block sequence.
    #[error("Page order violation at block {index}: page {page} follows page {previous}")]
    PageOrder {
        /// Position of the offending block
        index: usize,
        /// Page of the preceding block
        previous: u32,
        /// Page of the offending block
        page: u32,
    },

    /// Cleaning removed more non-whitespace content than tolerated.
    #[error("Significant content loss detected: {loss_percent:.1}% ({before} -> {after} non-whitespace characters)")]
    ContentLoss {
        /// Non-whitespace characters before cleaning
        before: usize,
        /// Non-whitespace characters after cleaning
        after: usize,
        /// Percentage of non-whitespace characters removed
        loss_percent: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_error_message() {
        let err = Error::OverlapTooLarge {
            overlap: 200,
            max_chunk_size: 100,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("chunk_overlap (200)"));
        assert!(msg.contains("max_chunk_size (100)"));
    }

    #[test]
    fn test_invalid_config_error() {
        let err = Error::InvalidConfig("max_header_levels must be between 1 and 5".to_string());
        assert!(format!("{}", err).contains("max_header_levels"));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_content_loss_warning_message() {
        let warning = Warning::ContentLoss {
            before: 200,
            after: 150,
            loss_percent: 25.0,
        };
        let msg = format!("{}", warning);
        assert!(msg.contains("25.0%"));
        assert!(msg.contains("200 -> 150"));
    }

    #[test]
    fn test_warning_serializes_with_kind_tag() {
        let warning = Warning::PageOrder {
            index: 4,
            previous: 3,
            page: 2,
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["kind"], "page_order");
        assert_eq!(json["previous"], 3);
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
        assert_send_sync::<Warning>();
    }
}
