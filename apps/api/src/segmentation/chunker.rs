//! Chunk Assembler: turns flushed line-runs into bounded, metadata-tagged chunks.
//!
//! The top-level result is a tagged choice: either the structured pass produced
//! chunks, or the whole document went through the sliding window. Exactly one
//! strategy is authoritative per call.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::segmentation::config::SegmenterConfig;
use crate::segmentation::patterns::{extract_company, extract_date_range};
use crate::segmentation::section::{match_header, segment_sections, Section, SectionRun};
use crate::segmentation::window::window_texts;

/// A bounded span of text with optional section/company/date metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub section: Option<Section>,
    pub company: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl Chunk {
    /// Chunk with metadata extracted from its own text.
    fn annotated(text: String, section: Option<Section>) -> Self {
        let dates = extract_date_range(&text);
        Self {
            company: extract_company(&text),
            start_date: dates.start_date,
            end_date: dates.end_date,
            section,
            text,
        }
    }

    fn bare(text: String) -> Self {
        Self {
            text,
            section: None,
            company: None,
            start_date: None,
            end_date: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkStrategy {
    Structured,
    SlidingWindow,
}

/// Result of chunking one document.
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkOutcome {
    Structured(Vec<Chunk>),
    SlidingWindow(Vec<Chunk>),
}

impl ChunkOutcome {
    pub fn strategy(&self) -> ChunkStrategy {
        match self {
            ChunkOutcome::Structured(_) => ChunkStrategy::Structured,
            ChunkOutcome::SlidingWindow(_) => ChunkStrategy::SlidingWindow,
        }
    }

    pub fn chunks(&self) -> &[Chunk] {
        match self {
            ChunkOutcome::Structured(chunks) | ChunkOutcome::SlidingWindow(chunks) => chunks,
        }
    }

    pub fn into_chunks(self) -> Vec<Chunk> {
        match self {
            ChunkOutcome::Structured(chunks) | ChunkOutcome::SlidingWindow(chunks) => chunks,
        }
    }
}

/// Chunks a whole document, falling back to sliding windows when the structured
/// pass yields nothing.
pub fn chunk_document(text: &str, config: &SegmenterConfig) -> ChunkOutcome {
    let runs = segment_sections(text, config);
    let chunks = assemble_chunks(&runs, config);
    if !chunks.is_empty() {
        debug!("Structured chunking produced {} chunks", chunks.len());
        return ChunkOutcome::Structured(chunks);
    }

    let windows = sliding_window_chunks(text, config);
    debug!(
        "No structured chunks; sliding window produced {} chunks",
        windows.len()
    );
    ChunkOutcome::SlidingWindow(windows)
}

/// Emits one chunk per run that meets the minimum length. Runs longer than the
/// maximum (a single oversized line) are windowed, keeping their section.
pub fn assemble_chunks(runs: &[SectionRun], config: &SegmenterConfig) -> Vec<Chunk> {
    let mut chunks = Vec::new();

    for SectionRun { section, run } in runs {
        if !run.meets_minimum(config.min_chunk_chars) {
            continue;
        }

        if run.joined_chars() > config.max_chunk_chars {
            let pieces = window_texts(
                &run.text(),
                config.max_chunk_chars,
                config.window_overlap_chars,
                config.min_chunk_chars,
                |line| opens_section(line, config),
            );
            chunks.extend(pieces.into_iter().map(|t| Chunk::annotated(t, *section)));
        } else {
            chunks.push(Chunk::annotated(run.text(), *section));
        }
    }

    chunks
}

/// Sliding-window chunks over the raw text, without metadata.
pub fn sliding_window_chunks(text: &str, config: &SegmenterConfig) -> Vec<Chunk> {
    window_texts(
        text,
        config.max_chunk_chars,
        config.window_overlap_chars,
        config.min_chunk_chars,
        |line| opens_section(line, config),
    )
    .into_iter()
    .map(Chunk::bare)
    .collect()
}

fn opens_section(line: &str, config: &SegmenterConfig) -> bool {
    match_header(line, &config.section_keywords).is_some()
}
