//! Chunk a document from extracted blocks or plain text.
//!
//! Reads a JSON array of blocks (`{page, text, font_size, is_bold,
//! is_all_caps, vertical_position}`) and prints the chunks and warnings as
//! JSON on stdout.
//!
//! Usage:
//!   cargo run --release --bin chunk_document -- blocks.json
//!   cargo run --release --bin chunk_document -- --text document.txt --size-only
//!   cargo run --release --bin chunk_document -- blocks.json --config pipeline.json --max-chunk-size 1500 --overlap 150
//!
//! Environment overrides (MAX_CHUNK_SIZE, CHUNK_OVERLAP, CHUNKER_TYPE, ...)
//! are applied on top of the config file, and command-line flags on top of
//! both. Set RUST_LOG=debug to see per-stage logging on stderr.

use pdf_chunker::layout::Block;
use pdf_chunker::pipeline::{ChunkingMode, DocumentPipeline, PipelineConfig};
use pdf_chunker::{Chunk, Warning};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Default)]
struct CliArgs {
    input: Option<PathBuf>,
    config: Option<PathBuf>,
    text_input: bool,
    size_only: bool,
    max_chunk_size: Option<usize>,
    overlap: Option<usize>,
    include_text: bool,
}

impl CliArgs {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut parsed = Self::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--text" => {
                    parsed.text_input = true;
                },
                "--config" => {
                    i += 1;
                    let path = args.get(i).ok_or("--config needs a file")?;
                    parsed.config = Some(PathBuf::from(path));
                },
                "--size-only" => {
                    parsed.size_only = true;
                },
                "--max-chunk-size" => {
                    i += 1;
                    parsed.max_chunk_size = Some(parse_number(args.get(i), "--max-chunk-size")?);
                },
                "--overlap" => {
                    i += 1;
                    parsed.overlap = Some(parse_number(args.get(i), "--overlap")?);
                },
                "--include-text" => {
                    parsed.include_text = true;
                },
                "--help" | "-h" => {
                    return Err(usage());
                },
                other if other.starts_with("--") => {
                    return Err(format!("Unknown option: {}\n\n{}", other, usage()));
                },
                other => {
                    parsed.input = Some(PathBuf::from(other));
                },
            }
            i += 1;
        }

        if parsed.input.is_none() {
            return Err(usage());
        }
        Ok(parsed)
    }

    fn build_config(&self) -> pdf_chunker::Result<PipelineConfig> {
        let base = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)?,
            None => PipelineConfig::default(),
        };
        let mut config = base.with_env_overrides(|key| std::env::var(key).ok())?;

        if self.size_only {
            config = config.with_chunking_mode(ChunkingMode::SizeOnly);
        }
        if let Some(size) = self.max_chunk_size {
            config = config.with_max_chunk_size(size);
        }
        if let Some(overlap) = self.overlap {
            config = config.with_chunk_overlap(overlap);
        }
        Ok(config)
    }
}

fn parse_number(value: Option<&String>, flag: &str) -> Result<usize, String> {
    let value = value.ok_or_else(|| format!("{} needs a value", flag))?;
    value
        .parse()
        .map_err(|_| format!("{} expects a non-negative integer, got {:?}", flag, value))
}

fn usage() -> String {
    "Usage: chunk_document <input> [--text] [--config FILE] [--size-only] \
     [--max-chunk-size N] [--overlap N] [--include-text]"
        .to_string()
}

#[derive(Serialize)]
struct Output<'a> {
    chunks: &'a [Chunk],
    warnings: &'a [Warning],
    #[serde(skip_serializing_if = "Option::is_none")]
    cleaned_text: Option<&'a str>,
}

fn run(args: &CliArgs) -> pdf_chunker::Result<()> {
    let config = args.build_config()?;
    let pipeline = DocumentPipeline::new(config)?;

    // from_args guarantees an input path
    let input = args.input.clone().unwrap_or_default();
    let raw = fs::read_to_string(&input)?;

    let result = if args.text_input {
        pipeline.process_text(&raw)
    } else {
        let blocks: Vec<Block> = serde_json::from_str(&raw)?;
        log::info!("Loaded {} blocks from {}", blocks.len(), input.display());
        pipeline.process(&blocks)
    };

    for warning in &result.warnings {
        eprintln!("warning: {}", warning);
    }

    let output = Output {
        chunks: &result.chunks,
        warnings: &result.warnings,
        cleaned_text: args.include_text.then_some(result.cleaned_text.as_str()),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match CliArgs::from_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(2);
        },
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}
