//! Section recovery from marked-up text.
//!
//! Sections are found by a small state machine over the lines of the text.
//! The sections partition the text exactly: concatenating
//! [`Section::text`] over all sections, in order, gives back the input.

use crate::text::markers::parse_header;

/// A header and the text it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Header text without marker, empty for the implicit leading section
    pub header_text: String,

    /// Header level, 0 for the implicit leading section
    pub level: u8,

    /// The raw header line including marker and line terminator
    pub header_line: String,

    /// Everything after the header line up to the next header
    pub body: String,

    /// Character offset of the section in the full text
    pub start_offset: usize,

    /// Header texts of enclosing sections, outermost first, ending with this
    /// section's own header. Empty for the implicit leading section.
    pub path: Vec<String>,
}

impl Section {
    fn implicit(start_offset: usize) -> Self {
        Self {
            header_text: String::new(),
            level: 0,
            header_line: String::new(),
            body: String::new(),
            start_offset,
            path: Vec::new(),
        }
    }

    /// Header line followed by body, exactly as it appeared in the text.
    pub fn text(&self) -> String {
        let mut text = String::with_capacity(self.header_line.len() + self.body.len());
        text.push_str(&self.header_line);
        text.push_str(&self.body);
        text
    }

    /// Whether the section covers no text at all.
    pub fn is_empty(&self) -> bool {
        self.header_line.is_empty() && self.body.is_empty()
    }
}

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Before the first header; text goes to the implicit section
    ScanningForHeader,
    /// Inside a header's section
    InSection,
    /// All text consumed
    Done,
}

/// Split marked-up text into sections at every header marker.
///
/// Every header closes the current section and opens a new one. A stack of
/// open headers provides each section's ancestor path: a new header pops
/// every open header of equal or deeper level.
///
/// # Examples
///
/// ```
/// use pdf_chunker::chunking::sections::split_sections;
///
/// let text = "Preface.\n## Policy\nIntro.\n### Visitors\nSign in.\n## Scope\nAll sites.";
/// let sections = split_sections(text);
///
/// assert_eq!(sections.len(), 4);
/// assert_eq!(sections[0].level, 0);
/// assert_eq!(sections[2].path, vec!["Policy", "Visitors"]);
/// assert_eq!(sections[3].path, vec!["Scope"]);
/// assert_eq!(sections.iter().map(|s| s.text()).collect::<String>(), text);
/// ```
pub fn split_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut open_headers: Vec<(u8, String)> = Vec::new();
    let mut current = Section::implicit(0);
    let mut offset = 0;
    let mut lines = text.split_inclusive('\n');
    let mut state = ScanState::ScanningForHeader;

    loop {
        match state {
            ScanState::ScanningForHeader | ScanState::InSection => {
                let Some(line) = lines.next() else {
                    state = ScanState::Done;
                    continue;
                };

                if let Some(marker) = parse_header(line) {
                    if state == ScanState::ScanningForHeader {
                        log::trace!("First header at offset {}", offset);
                    }
                    while open_headers
                        .last()
                        .is_some_and(|(level, _)| *level >= marker.level)
                    {
                        open_headers.pop();
                    }
                    open_headers.push((marker.level, marker.text.to_string()));

                    let next = Section {
                        header_text: marker.text.to_string(),
                        level: marker.level,
                        header_line: line.to_string(),
                        body: String::new(),
                        start_offset: offset,
                        path: open_headers.iter().map(|(_, text)| text.clone()).collect(),
                    };
                    close(&mut sections, std::mem::replace(&mut current, next));
                    state = ScanState::InSection;
                } else {
                    current.body.push_str(line);
                }
                offset += line.chars().count();
            },
            ScanState::Done => {
                close(&mut sections, current);
                break;
            },
        }
    }

    log::debug!("Found {} sections", sections.len());
    sections
}

/// The whole text as one implicit level-0 section.
pub fn single_section(text: &str) -> Vec<Section> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut section = Section::implicit(0);
    section.body = text.to_string();
    vec![section]
}

fn close(sections: &mut Vec<Section>, section: Section) {
    if !section.is_empty() {
        sections.push(section);
    }
}
