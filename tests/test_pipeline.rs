//! End-to-end tests for the document pipeline.

use pdf_chunker::layout::Block;
use pdf_chunker::pipeline::{ChunkingMode, DocumentPipeline, PipelineConfig};
use pdf_chunker::{Chunk, Error, Warning};
use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;
use std::thread;

// ============================================================================
// Helper Functions for Creating Mock Data
// ============================================================================

fn pipeline(config: PipelineConfig) -> DocumentPipeline {
    DocumentPipeline::new(config).unwrap()
}

fn reconstruct(chunks: &[Chunk]) -> String {
    chunks.iter().map(|c| c.new_text()).collect()
}

/// Two-page policy document as an extractor would deliver it.
fn create_policy_document() -> Vec<Block> {
    vec![
        Block::new(1, "SECURITY POLICY", 20.0).bold(true).all_caps(true).at(60.0),
        Block::new(1, "All employees must badge in at the main entrance,", 11.0).at(100.0),
        Block::new(1, "including on weekends and public holidays.", 11.0).at(113.0),
        Block::new(1, "Tailgating through controlled doors is not permitted.", 11.0).at(140.0),
        Block::new(1, "Visitors", 15.0).bold(true).at(180.0),
        Block::new(1, "Visitors sign the register and receive a temporary", 11.0).at(210.0),
        Block::new(1, "badge that must be returned on departure.", 11.0).at(223.0),
        Block::new(1, "Page 1 of 2", 9.0).at(780.0),
        Block::new(2, "Incidents", 15.0).bold(true).at(60.0),
        Block::new(2, "Report lost badges to the security desk immediately.", 11.0).at(90.0),
        Block::new(2, "Page 2 of 2", 9.0).at(780.0),
    ]
}

// ============================================================================
// Scenario Tests
// ============================================================================

#[test]
fn test_heading_detected_end_to_end() {
    let blocks = vec![
        Block::new(1, "SECURITY POLICY", 18.0).bold(true),
        Block::new(1, "All employees must badge in.", 11.0),
    ];
    let result = pipeline(PipelineConfig::default()).process(&blocks);

    assert_eq!(result.merged_lines.len(), 2);
    assert_eq!(result.merged_lines[0].header_level, 1);
    assert_eq!(result.merged_lines[1].text, "All employees must badge in.");
    assert_eq!(result.cleaned_text, "## SECURITY POLICY\n\nAll employees must badge in.");
    assert_eq!(result.chunks.len(), 1);
    assert_eq!(result.chunks[0].metadata.section_header, "SECURITY POLICY");
    assert_eq!(result.chunks[0].metadata.section_level, 1);
}

#[test]
fn test_policy_document() {
    let result = pipeline(PipelineConfig::default()).process(&create_policy_document());

    let headers: Vec<(&str, u8)> = result
        .merged_lines
        .iter()
        .filter(|l| l.is_header)
        .map(|l| (l.text.as_str(), l.header_level))
        .collect();
    assert_eq!(
        headers,
        vec![("SECURITY POLICY", 1), ("Visitors", 2), ("Incidents", 2)]
    );

    assert!(result
        .merged_lines
        .iter()
        .any(|l| l.text
            == "All employees must badge in at the main entrance, including on weekends and public holidays."));

    assert!(!result.cleaned_text.contains("Page 1 of 2"));
    assert!(!result.cleaned_text.contains("Page 2 of 2"));

    let sections: Vec<&str> = result
        .chunks
        .iter()
        .map(|c| c.metadata.section_header.as_str())
        .collect();
    assert_eq!(sections, vec!["SECURITY POLICY", "Visitors", "Incidents"]);
    assert_eq!(
        result.chunks[1].metadata.section_hierarchy.as_deref(),
        Some("Section: SECURITY POLICY > Subsection: Visitors")
    );
    assert_eq!(reconstruct(&result.chunks), result.cleaned_text);
}

#[test]
fn test_page_marker_removed_from_text_input() {
    let result = pipeline(PipelineConfig::default())
        .process_text("Badges are checked daily PAGE 3 OF 10 at every entrance.");
    assert_eq!(result.cleaned_text, "Badges are checked daily at every entrance.");
}

#[test]
fn test_single_long_token() {
    let token = "q".repeat(200);
    let config = PipelineConfig::default()
        .with_max_chunk_size(100)
        .with_chunk_overlap(10);
    let result = pipeline(config).process_text(&token);

    assert_eq!(result.chunks.len(), 1);
    assert_eq!(result.chunks[0].char_size, 200);
    assert!(result.chunks[0].metadata.is_split_chunk);
}

#[test]
fn test_modes_on_same_document() {
    let body = "Keys are signed out at the front desk and returned by six. ".repeat(6);
    let text = format!("## Keys\n\n{}\n\n## Alarms\n\nAlarms are tested monthly.", body.trim_end());

    let aware = pipeline(PipelineConfig::default().with_max_chunk_size(300).with_chunk_overlap(30))
        .process_text(&text);
    let uniform = pipeline(
        PipelineConfig::default()
            .with_max_chunk_size(300)
            .with_chunk_overlap(30)
            .with_chunking_mode(ChunkingMode::SizeOnly),
    )
    .process_text(&text);

    assert!(aware.chunks.iter().any(|c| c.metadata.section_header == "Alarms"));
    assert!(uniform.chunks.iter().all(|c| c.metadata.section_header.is_empty()));
    assert_eq!(reconstruct(&aware.chunks), aware.cleaned_text);
    assert_eq!(reconstruct(&uniform.chunks), uniform.cleaned_text);
}

#[test]
fn test_body_text_starting_with_hashes_stays_body() {
    let blocks = vec![
        Block::new(1, "Intro paragraph of the policy text.", 11.0),
        Block::new(1, "## not a heading, just body text that starts with hashes.", 11.0),
        Block::new(1, "More body text follows here.", 11.0),
    ];
    let result = pipeline(PipelineConfig::default()).process(&blocks);

    assert!(result.merged_lines.iter().all(|l| !l.is_header));
    assert!(result
        .cleaned_text
        .contains("\\## not a heading, just body text that starts with hashes."));
    assert_eq!(result.chunks.len(), 1);
    assert_eq!(result.chunks[0].metadata.section_header, "");
    assert_eq!(result.chunks[0].metadata.section_level, 0);
    assert!(result.chunks[0].metadata.section_path.is_empty());
}

#[test]
fn test_heading_block_with_line_break_keeps_whole_title() {
    let blocks = vec![
        Block::new(1, "SECURITY\nPOLICY", 18.0).bold(true),
        Block::new(1, "All employees must badge in.", 11.0),
    ];
    let result = pipeline(PipelineConfig::default()).process(&blocks);

    assert_eq!(result.merged_lines[0].text, "SECURITY POLICY");
    assert_eq!(result.cleaned_text, "## SECURITY POLICY\n\nAll employees must badge in.");
    assert_eq!(result.chunks[0].metadata.section_header, "SECURITY POLICY");
}

// ============================================================================
// Warnings and Errors
// ============================================================================

#[test]
fn test_warnings_collected_from_all_stages() {
    let blocks = vec![
        Block::new(2, "Some text on page two.", 11.0),
        Block::new(1, "Back on page one.", f32::NAN),
        Block::new(1, "--- Page 1 --- --- Page 2 --- --- Page 3 ---", 11.0),
    ];
    let result = pipeline(PipelineConfig::default()).process(&blocks);

    assert!(result.warnings.iter().any(|w| matches!(w, Warning::PageOrder { .. })));
    assert!(result.warnings.iter().any(|w| matches!(w, Warning::MalformedBlock { .. })));
    assert!(result.warnings.iter().any(|w| matches!(w, Warning::ContentLoss { .. })));
    assert!(!result.chunks.is_empty());
}

#[test]
fn test_invalid_config_fails_fast() {
    let overlap = PipelineConfig::default().with_max_chunk_size(200).with_chunk_overlap(200);
    assert!(matches!(
        DocumentPipeline::new(overlap),
        Err(Error::OverlapTooLarge { .. })
    ));

    let tolerance = PipelineConfig::default().with_content_loss_tolerance(1.5);
    assert!(matches!(DocumentPipeline::new(tolerance), Err(Error::InvalidConfig(_))));

    let mut levels = PipelineConfig::default();
    levels.headers.max_header_levels = 0;
    assert!(DocumentPipeline::new(levels).is_err());
}

#[test]
fn test_empty_input_is_not_an_error() {
    let p = pipeline(PipelineConfig::default());
    assert!(p.process(&[]).chunks.is_empty());
    assert!(p.process_text("").chunks.is_empty());
    assert!(p.process_text("   \n\n  ").chunks.is_empty());
}

// ============================================================================
// Configuration Sources
// ============================================================================

#[test]
fn test_config_from_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "chunking": {{ "max_chunk_size": 300, "chunk_overlap": 25, "use_section_awareness": false }},
            "headers": {{ "header_score_threshold": 2.5 }},
            "promote_numbered_outline": true
        }}"#
    )
    .unwrap();

    let config = PipelineConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.chunking.max_chunk_size, 300);
    assert_eq!(config.chunking.chunk_overlap, 25);
    assert_eq!(config.chunking.mode(), ChunkingMode::SizeOnly);
    assert_eq!(config.headers.header_score_threshold, 2.5);
    assert!(config.promote_numbered_outline);
    // untouched fields keep defaults
    assert_eq!(config.headers.max_header_levels, 3);
    assert!((config.body_font_tolerance - 0.1).abs() < f32::EPSILON);
}

#[test]
fn test_invalid_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "chunking": {{ "max_chunk_size": 10, "chunk_overlap": 50 }} }}"#).unwrap();
    assert!(matches!(
        PipelineConfig::from_json_file(file.path()),
        Err(Error::OverlapTooLarge { .. })
    ));

    let mut broken = tempfile::NamedTempFile::new().unwrap();
    write!(broken, "{{ not json").unwrap();
    assert!(matches!(PipelineConfig::from_json_file(broken.path()), Err(Error::Json(_))));

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    assert!(matches!(PipelineConfig::from_json_file(missing), Err(Error::Io(_))));
}

#[test]
fn test_env_overrides() {
    let env: HashMap<&str, &str> = [
        ("MAX_CHUNK_SIZE", "1500"),
        ("CHUNK_OVERLAP", "150"),
        ("CHUNKER_TYPE", "langchain_simple"),
    ]
    .into_iter()
    .collect();
    let config = PipelineConfig::default()
        .with_env_overrides(|key| env.get(key).map(|v| v.to_string()))
        .unwrap();
    assert_eq!(config.chunking.max_chunk_size, 1500);
    assert_eq!(config.chunking.chunk_overlap, 150);
    assert_eq!(config.chunking.mode(), ChunkingMode::SizeOnly);

    let bad_mode = PipelineConfig::default()
        .with_env_overrides(|key| (key == "CHUNKER_TYPE").then(|| "semantic".to_string()));
    assert!(matches!(bad_mode, Err(Error::InvalidConfig(_))));

    let bad_number = PipelineConfig::default()
        .with_env_overrides(|key| (key == "MAX_CHUNK_SIZE").then(|| "large".to_string()));
    assert!(matches!(bad_number, Err(Error::InvalidConfig(_))));
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_shared_pipeline_across_threads() {
    let shared = Arc::new(pipeline(PipelineConfig::default().with_max_chunk_size(120).with_chunk_overlap(20)));
    let expected = shared.process(&create_policy_document()).chunks;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let p = Arc::clone(&shared);
            thread::spawn(move || p.process(&create_policy_document()).chunks)
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
