//! Promotion of numbered outline lines to header markers.
//!
//! Documents that number their sections (`1. Scope`, `2.1 Definitions`,
//! `2.1.3 Exceptions`) often carry no typographic emphasis at all. This pass
//! turns such lines into markers so the chunker can split on them.

use crate::text::markers::{is_header_line, render_header};
use crate::text::punctuation::{ends_mid_clause, ends_sentence};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_SUBSUBSECTION: Regex = Regex::new(r"^(\d+\.\d+\.\d+)\.?\s+(.+)$").unwrap();
    static ref RE_SUBSECTION: Regex = Regex::new(r"^(\d+\.\d+)\.?\s+(.+)$").unwrap();
    static ref RE_MAIN_SECTION: Regex = Regex::new(r"^(\d+)\.\s+(.+)$").unwrap();
}

const MAX_TITLE_CHARS: usize = 100;

/// Endings that mark a numbered line as running body text.
const BODY_ENDINGS: [&str; 4] = ["applicable to", "conditions", "procedures", "including"];

/// Rewrite numbered outline lines as header markers.
///
/// # Examples
///
/// ```
/// use pdf_chunker::text::outline::promote_numbered_outline;
///
/// let text = "1. Scope\nThis policy applies to staff.\n1.1 Definitions\nTerms used below.";
/// let promoted = promote_numbered_outline(text);
/// assert_eq!(
///     promoted,
///     "## 1. Scope\nThis policy applies to staff.\n### 1.1 Definitions\nTerms used below."
/// );
/// ```
pub fn promote_numbered_outline(text: &str) -> String {
    let mut promoted = 0usize;
    let lines: Vec<String> = text
        .split('\n')
        .map(|line| match promote_line(line) {
            Some(header) => {
                promoted += 1;
                header
            },
            None => line.to_string(),
        })
        .collect();

    if promoted > 0 {
        log::debug!("Promoted {} numbered outline lines to headers", promoted);
    }
    lines.join("\n")
}

fn promote_line(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || is_header_line(trimmed) {
        return None;
    }

    let candidates: [(&Regex, u8); 3] = [
        (&RE_SUBSUBSECTION, 3),
        (&RE_SUBSECTION, 2),
        (&RE_MAIN_SECTION, 1),
    ];
    for (pattern, level) in candidates {
        if let Some(caps) = pattern.captures(trimmed) {
            let number = caps.get(1)?.as_str();
            let title = caps.get(2)?.as_str();
            if !looks_like_title(title) {
                return None;
            }
            let label = if level == 1 {
                format!("{}. {}", number, title.trim())
            } else {
                format!("{} {}", number, title.trim())
            };
            return Some(render_header(level, &label));
        }
    }
    None
}

/// A numbered line is a heading when its title starts uppercase, is short,
/// and does not read as an unfinished or finished sentence.
fn looks_like_title(title: &str) -> bool {
    let title = title.trim();
    if !title.chars().next().is_some_and(|c| c.is_uppercase()) {
        return false;
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return false;
    }
    if ends_sentence(title) || ends_mid_clause(title) {
        return false;
    }
    let lowered = title.to_lowercase();
    !BODY_ENDINGS.iter().any(|ending| lowered.ends_with(ending))
}
