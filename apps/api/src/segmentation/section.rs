//! Section Segmenter: partitions a document into labelled line-runs.
//!
//! A single forward pass over the lines. Three things can close (flush) the run
//! being accumulated:
//! - a recognised section header line (the header itself is never kept),
//! - a blank line once the run is longer than the chunk minimum,
//! - the size policy or the new-entry heuristic, both checked before a line is appended.
//!
//! Every flushed run is returned, short ones included; the chunk assembler decides
//! what is emitted.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::segmentation::boundary::{is_list_item, starts_new_entry};
use crate::segmentation::config::SegmenterConfig;
use crate::segmentation::line_run::LineRun;

/// Canonical résumé sections. Text before the first header carries no section (`None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Experience,
    Education,
    Projects,
    Volunteer,
    Skills,
    Summary,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Experience => "Experience",
            Section::Education => "Education",
            Section::Projects => "Projects",
            Section::Volunteer => "Volunteer",
            Section::Skills => "Skills",
            Section::Summary => "Summary",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header keywords in match order. Longer phrases come before the single words
/// they start with so that lookups read most-specific first.
pub const DEFAULT_SECTION_KEYWORDS: &[(&str, Section)] = &[
    ("professional experience", Section::Experience),
    ("work experience", Section::Experience),
    ("work history", Section::Experience),
    ("experience", Section::Experience),
    ("employment", Section::Experience),
    ("education", Section::Education),
    ("academic", Section::Education),
    ("qualifications", Section::Education),
    ("projects", Section::Projects),
    ("project", Section::Projects),
    ("volunteer work", Section::Volunteer),
    ("volunteering", Section::Volunteer),
    ("volunteer", Section::Volunteer),
    ("technical skills", Section::Skills),
    ("core skills", Section::Skills),
    ("skills", Section::Skills),
    ("professional summary", Section::Summary),
    ("summary", Section::Summary),
    ("objective", Section::Summary),
    ("profile", Section::Summary),
];

/// Returns the section a trimmed line announces, if any.
///
/// A line is a header for `keyword` when, compared case-insensitively, it equals the
/// keyword or starts with `keyword:` / `keyword `. First entry in `table` wins.
pub fn match_header(line: &str, table: &[(String, Section)]) -> Option<Section> {
    let lower = line.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }

    table.iter().find_map(|(keyword, section)| {
        let rest = lower.strip_prefix(keyword.as_str())?;
        (rest.is_empty() || rest.starts_with(':') || rest.starts_with(' ')).then_some(*section)
    })
}

/// One flushed line-run together with the section that was active when it closed.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRun {
    pub section: Option<Section>,
    pub run: LineRun,
}

/// Splits `text` into ordered `(section, line-run)` groups covering the whole document.
pub fn segment_sections(text: &str, config: &SegmenterConfig) -> Vec<SectionRun> {
    let mut runs = Vec::new();
    let mut current_section: Option<Section> = None;
    let mut current = LineRun::new();
    let mut previous_line: Option<&str> = None;

    for raw in text.lines() {
        let line = raw.trim();

        if line.is_empty() {
            if current.joined_chars() > config.min_chunk_chars {
                flush(current_section, &mut current, &mut runs);
            }
            previous_line = Some(line);
            continue;
        }

        if let Some(section) = match_header(line, &config.section_keywords) {
            flush(current_section, &mut current, &mut runs);
            debug!("Section header {:?} -> {}", line, section);
            current_section = Some(section);
            previous_line = Some(line);
            continue;
        }

        let projected = current.projected_chars(line);
        let over_size = !current.is_empty() && projected > config.max_chunk_chars;
        let list_break = is_list_item(line) && current.joined_chars() > config.max_chunk_chars / 2;
        let new_entry = current_section.is_some()
            && !current.is_empty()
            && starts_new_entry(previous_line, line, &config.chunk_boundary);

        if over_size || list_break || new_entry {
            flush(current_section, &mut current, &mut runs);
        }

        current.push(line);
        previous_line = Some(line);
    }

    flush(current_section, &mut current, &mut runs);
    runs
}

fn flush(section: Option<Section>, run: &mut LineRun, out: &mut Vec<SectionRun>) {
    if let Some(closed) = run.take() {
        out.push(SectionRun {
            section,
            run: closed,
        });
    }
}
