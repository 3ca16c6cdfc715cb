//! Segmentation tuning: thresholds and keyword tables passed explicitly into the engine.

use serde::{Deserialize, Serialize};

use crate::segmentation::boundary::BoundaryRules;
use crate::segmentation::section::{Section, DEFAULT_SECTION_KEYWORDS};
use crate::segmentation::SegmenterError;

/// Per-section settings for the structured entry parsers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRules {
    pub section: Section,
    /// Entries whose description is shorter than this are discarded.
    pub min_entry_chars: usize,
    pub boundary: BoundaryRules,
    /// Open a new entry when a header-like line that names an organisation and has a
    /// date range arrives while the current run already carries one.
    pub split_on_repeated_dates: bool,
}

impl EntryRules {
    pub fn experience() -> Self {
        Self {
            section: Section::Experience,
            min_entry_chars: 20,
            boundary: BoundaryRules::blank_separated(),
            split_on_repeated_dates: true,
        }
    }

    pub fn projects() -> Self {
        Self {
            section: Section::Projects,
            min_entry_chars: 15,
            boundary: BoundaryRules::blank_separated(),
            split_on_repeated_dates: true,
        }
    }

    pub fn education() -> Self {
        Self {
            section: Section::Education,
            min_entry_chars: 15,
            boundary: BoundaryRules::blank_separated().with_keywords(&["school"]),
            split_on_repeated_dates: true,
        }
    }
}

/// Full engine configuration. `Default` reproduces the production thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmenterConfig {
    pub min_chunk_chars: usize,
    pub max_chunk_chars: usize,
    pub window_overlap_chars: usize,
    /// Ordered `(keyword, section)` pairs; first match wins.
    pub section_keywords: Vec<(String, Section)>,
    /// Entry-boundary rules used while chunking.
    pub chunk_boundary: BoundaryRules,
    pub experience: EntryRules,
    pub projects: EntryRules,
    pub education: EntryRules,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            min_chunk_chars: 50,
            max_chunk_chars: 500,
            window_overlap_chars: 50,
            section_keywords: DEFAULT_SECTION_KEYWORDS
                .iter()
                .map(|(k, s)| (k.to_string(), *s))
                .collect(),
            chunk_boundary: BoundaryRules::default(),
            experience: EntryRules::experience(),
            projects: EntryRules::projects(),
            education: EntryRules::education(),
        }
    }
}

impl SegmenterConfig {
    /// Rejects combinations the engine cannot honour.
    pub fn validate(&self) -> Result<(), SegmenterError> {
        if self.max_chunk_chars == 0 {
            return Err(invalid("max_chunk_chars must be greater than zero"));
        }
        if self.min_chunk_chars > self.max_chunk_chars {
            return Err(invalid(format!(
                "min_chunk_chars ({}) exceeds max_chunk_chars ({})",
                self.min_chunk_chars, self.max_chunk_chars
            )));
        }
        if self.window_overlap_chars >= self.max_chunk_chars {
            return Err(invalid(format!(
                "window_overlap_chars ({}) must be smaller than max_chunk_chars ({})",
                self.window_overlap_chars, self.max_chunk_chars
            )));
        }
        if self.section_keywords.is_empty() {
            return Err(invalid("section keyword table is empty"));
        }
        if let Some((keyword, _)) = self
            .section_keywords
            .iter()
            .find(|(k, _)| k.trim().is_empty() || *k != k.to_lowercase())
        {
            return Err(invalid(format!(
                "section keyword {keyword:?} must be non-empty and lower-case"
            )));
        }

        let boundaries = [
            &self.chunk_boundary,
            &self.experience.boundary,
            &self.projects.boundary,
            &self.education.boundary,
        ];
        for rules in boundaries {
            if rules.min_header_chars > rules.max_header_chars {
                return Err(invalid("boundary min_header_chars exceeds max_header_chars"));
            }
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> SegmenterError {
    SegmenterError::InvalidConfig(msg.into())
}
