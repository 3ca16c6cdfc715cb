//! Heuristic résumé segmentation engine.
//!
//! Turns plain document text into generic chunks (for retrieval/embedding) and
//! into Experience / Projects / Education entries. Everything here is synchronous
//! and pure: text in, records out. Tuning lives in [`SegmenterConfig`] and is
//! checked once when a [`Segmenter`] is built.

pub mod boundary;
pub mod chunker;
pub mod config;
pub mod entries;
pub mod line_run;
pub mod patterns;
pub mod section;
pub mod window;

use thiserror::Error;

pub use chunker::{Chunk, ChunkOutcome, ChunkStrategy};
pub use config::SegmenterConfig;
pub use entries::{EducationEntry, ExperienceEntry, ProjectEntry};

use entries::SpanPattern;

/// Construction-time failures. Parsing itself never fails.
#[derive(Debug, Error)]
pub enum SegmenterError {
    #[error("Invalid segmenter configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid header pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// A validated configuration plus the compiled section-span patterns.
///
/// Cheap to share behind an `Arc`; every method takes `&self`.
#[derive(Debug, Clone)]
pub struct Segmenter {
    config: SegmenterConfig,
    experience_span: SpanPattern,
    projects_span: SpanPattern,
    education_span: SpanPattern,
}

impl Segmenter {
    pub fn new(config: SegmenterConfig) -> Result<Self, SegmenterError> {
        config.validate()?;
        let keywords = &config.section_keywords;

        Ok(Self {
            experience_span: SpanPattern::new(config.experience.section, keywords)?,
            projects_span: SpanPattern::new(config.projects.section, keywords)?,
            education_span: SpanPattern::new(config.education.section, keywords)?,
            config,
        })
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Generic chunks for the whole document; structured when possible,
    /// sliding-window otherwise.
    pub fn chunk(&self, text: &str) -> ChunkOutcome {
        chunker::chunk_document(text, &self.config)
    }

    pub fn experience(&self, text: &str) -> Vec<ExperienceEntry> {
        entries::parse_experience(text, &self.experience_span, &self.config.experience)
    }

    pub fn projects(&self, text: &str) -> Vec<ProjectEntry> {
        entries::parse_projects(text, &self.projects_span, &self.config.projects)
    }

    pub fn education(&self, text: &str) -> Vec<EducationEntry> {
        entries::parse_education(text, &self.education_span, &self.config.education)
    }
}
