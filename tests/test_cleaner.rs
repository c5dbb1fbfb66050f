//! Integration tests for text cleaning and content-loss validation.

use pdf_chunker::pipeline::CleaningConfig;
use pdf_chunker::text::TextCleaner;
use pdf_chunker::Warning;

fn clean(text: &str) -> String {
    TextCleaner::default().clean(text).text
}

#[test]
fn test_page_of_marker_removed_in_any_case() {
    for marker in ["Page 3 of 10", "page 3 of 10", "PAGE 3 OF 10", "PaGe 3 oF 10"] {
        let text = format!("Visitors sign in {} at reception.", marker);
        assert_eq!(clean(&text), "Visitors sign in at reception.", "marker: {}", marker);
    }
}

#[test]
fn test_page_marker_on_its_own_line() {
    let text = "End of section one.\nPage 3 of 10\nStart of section two.";
    assert_eq!(clean(text), "End of section one.\n\nStart of section two.");
}

#[test]
fn test_all_marker_styles_removed() {
    let text = "Alpha\n--- Page 1 ---\nBeta\n-- PAGE 2 OF 9 --\nGamma\n  Page 4  \nDelta";
    let cleaned = clean(text);
    assert!(!cleaned.to_lowercase().contains("page"), "{:?}", cleaned);
    for word in ["Alpha", "Beta", "Gamma", "Delta"] {
        assert!(cleaned.contains(word));
    }
}

#[test]
fn test_header_markers_survive() {
    let text = "## SECURITY POLICY   \n\n\n\n   All employees must badge in.   ";
    assert_eq!(clean(text), "## SECURITY POLICY\n\nAll employees must badge in.");
}

#[test]
fn test_idempotent_on_messy_input() {
    let text = "  \r\n\t## Title\r\n\r\n\r\n\r\nBody  text\t\there.\n--- Page 2 ---\n\n\n\nMore.\n\n  ";
    let once = clean(text);
    let twice = clean(&once);
    assert_eq!(once, twice);
    assert_eq!(once, "## Title\n\nBody text here.\n\nMore.");
}

#[test]
fn test_content_loss_warning_carries_counts() {
    let text = "Short.\nPage 1 of 20\nPage 2 of 20\nPage 3 of 20";
    let result = TextCleaner::default().clean(text);
    assert_eq!(result.text, "Short.");
    assert_eq!(result.warnings.len(), 1);
    match &result.warnings[0] {
        Warning::ContentLoss {
            before,
            after,
            loss_percent,
        } => {
            assert_eq!(*after, 6);
            assert_eq!(*before, 6 + 3 * 9);
            assert!(*loss_percent > 80.0);
        },
        other => panic!("unexpected warning {:?}", other),
    }
    assert!(result.warnings[0].to_string().contains("content loss"));
}

#[test]
fn test_tolerance_is_configurable() {
    let text = "Some body text that is long enough.\nPage 9";
    let strict = TextCleaner::new(CleaningConfig {
        content_loss_tolerance: 0.0,
        ..Default::default()
    });
    assert_eq!(strict.clean(text).warnings.len(), 1);

    let lenient = TextCleaner::new(CleaningConfig {
        content_loss_tolerance: 0.5,
        ..Default::default()
    });
    assert!(lenient.clean(text).warnings.is_empty());
}

#[test]
fn test_whitespace_only_changes_never_warn() {
    let result = TextCleaner::default().clean("a    b\n\n\n\n\nc\t\td");
    assert_eq!(result.text, "a b\n\nc d");
    assert!(result.warnings.is_empty());
}

#[test]
fn test_empty_and_blank_input() {
    assert_eq!(clean(""), "");
    assert_eq!(clean("\n\n  \t\n"), "");
}
