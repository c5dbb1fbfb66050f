//! Text-level processing: punctuation rules, hyphenation-aware joining,
//! header marker syntax, whitespace normalization, cleaning and numbered
//! outline promotion.

pub mod cleaner;
pub mod hyphenation;
pub mod markers;
pub mod outline;
pub mod punctuation;
pub mod whitespace;

pub use cleaner::{CleanedText, TextCleaner};
pub use markers::{parse_header, render_header, HeaderMarker};
pub use outline::promote_numbered_outline;
