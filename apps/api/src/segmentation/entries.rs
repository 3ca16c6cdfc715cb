//! Section-Specific Entry Parsers: Experience, Projects and Education.
//!
//! One routine does the work for all three: carve the section's span out of the
//! document, split it into entry runs with the section's boundary rules, then hand
//! each run to a per-section field extractor. Runs for which the extractor finds
//! nothing beyond a description are dropped.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::segmentation::boundary::{looks_like_header, names_organization, starts_new_entry};
use crate::segmentation::config::EntryRules;
use crate::segmentation::line_run::LineRun;
use crate::segmentation::patterns::{
    extract_date_range, extract_degree, extract_institution, extract_organization,
    has_date_range, has_title_keyword, strip_date_range,
};
use crate::segmentation::section::Section;
use crate::segmentation::SegmenterError;

// ────────────────────────────────────────────────────────────────────────────
// Entry records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: Option<String>,
    pub title: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Span detection
// ────────────────────────────────────────────────────────────────────────────

/// Locates one section's body: from its header line to the next header of any
/// section, or the end of the text.
///
/// The opening header must fill its line. Any line the chunker would read as a
/// header ("Technical Skills & Tools") closes the body.
#[derive(Debug, Clone)]
pub struct SpanPattern {
    start: Regex,
    any_header: Regex,
}

impl SpanPattern {
    pub fn new(section: Section, keywords: &[(String, Section)]) -> Result<Self, SegmenterError> {
        let own: Vec<&str> = keywords
            .iter()
            .filter(|(_, s)| *s == section)
            .map(|(k, _)| k.as_str())
            .collect();
        if own.is_empty() {
            return Err(SegmenterError::InvalidConfig(format!(
                "no header keywords for section {section}"
            )));
        }
        let all: Vec<&str> = keywords.iter().map(|(k, _)| k.as_str()).collect();

        Ok(Self {
            start: Regex::new(&header_line_pattern(&own))?,
            any_header: Regex::new(&header_prefix_pattern(&all))?,
        })
    }

    /// Body of the first matching section, without its header line.
    pub fn find_span<'a>(&self, text: &'a str) -> Option<&'a str> {
        let header = self.start.find(text)?;
        let rest = &text[header.end()..];
        let end = self
            .any_header
            .find(rest)
            .map(|next| next.start())
            .unwrap_or(rest.len());
        Some(&rest[..end])
    }
}

fn keyword_alternation(keywords: &[&str]) -> String {
    keywords
        .iter()
        .map(|k| regex::escape(k).replace(' ', r"[ \t]+"))
        .collect::<Vec<_>>()
        .join("|")
}

/// A whole line holding one of `keywords`, optionally followed by a colon.
fn header_line_pattern(keywords: &[&str]) -> String {
    let alternation = keyword_alternation(keywords);
    format!(r"(?im)^[ \t]*(?:{alternation})[ \t]*:?[ \t\r]*$")
}

/// A line starting with one of `keywords` followed by a colon, a space or the line end.
fn header_prefix_pattern(keywords: &[&str]) -> String {
    let alternation = keyword_alternation(keywords);
    format!(r"(?im)^[ \t]*(?:{alternation})(?::|[ \t]|\r?$)")
}

// ────────────────────────────────────────────────────────────────────────────
// Generic span → entries routine
// ────────────────────────────────────────────────────────────────────────────

/// Splits the section span into runs and maps each through `extract`.
///
/// Runs shorter than `rules.min_entry_chars` are skipped before extraction.
pub fn parse_section_entries<T>(
    text: &str,
    span: &SpanPattern,
    rules: &EntryRules,
    extract: impl Fn(&LineRun, &EntryRules) -> Option<T>,
) -> Vec<T> {
    let Some(body) = span.find_span(text) else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    let mut current = LineRun::new();
    let mut run_has_dates = false;
    let mut previous: Option<&str> = None;

    let close = |run: &mut LineRun, entries: &mut Vec<T>| {
        if run.meets_minimum(rules.min_entry_chars) {
            if let Some(entry) = extract(run, rules) {
                entries.push(entry);
            }
        }
        run.reset();
    };

    for raw in body.lines() {
        let line = raw.trim();
        if line.is_empty() {
            previous = Some(line);
            continue;
        }

        let line_has_dates = has_date_range(line);
        let repeated_dates = rules.split_on_repeated_dates
            && run_has_dates
            && line_has_dates
            && looks_like_header(line, &rules.boundary)
            && names_organization(line, &rules.boundary);

        if !current.is_empty()
            && (starts_new_entry(previous, line, &rules.boundary) || repeated_dates)
        {
            close(&mut current, &mut entries);
            run_has_dates = false;
        }

        run_has_dates |= line_has_dates;
        current.push(line);
        previous = Some(line);
    }
    close(&mut current, &mut entries);

    debug!("{} span yielded {} entries", rules.section, entries.len());
    entries
}

// ────────────────────────────────────────────────────────────────────────────
// Per-section field extraction
// ────────────────────────────────────────────────────────────────────────────

pub fn parse_experience(text: &str, span: &SpanPattern, rules: &EntryRules) -> Vec<ExperienceEntry> {
    parse_section_entries(text, span, rules, experience_entry)
}

pub fn parse_projects(text: &str, span: &SpanPattern, rules: &EntryRules) -> Vec<ProjectEntry> {
    parse_section_entries(text, span, rules, project_entry)
}

pub fn parse_education(text: &str, span: &SpanPattern, rules: &EntryRules) -> Vec<EducationEntry> {
    parse_section_entries(text, span, rules, education_entry)
}

fn experience_entry(run: &LineRun, rules: &EntryRules) -> Option<ExperienceEntry> {
    let company = run.first_line().and_then(extract_organization);
    let title = run
        .lines()
        .iter()
        .take(3)
        .filter(|line| !line.contains('@'))
        .filter(|line| line.chars().count() <= rules.boundary.max_header_chars)
        .filter(|line| has_title_keyword(line))
        .map(|line| strip_date_range(line))
        .find(|title| !title.is_empty());

    let description = run.text();
    let dates = extract_date_range(&description);
    if company.is_none() && title.is_none() && dates.is_empty() {
        return None;
    }

    Some(ExperienceEntry {
        company,
        title,
        start_date: dates.start_date,
        end_date: dates.end_date,
        description,
    })
}

fn project_entry(run: &LineRun, _rules: &EntryRules) -> Option<ProjectEntry> {
    let name = run
        .first_line()
        .map(strip_date_range)
        .filter(|name| (4..60).contains(&name.chars().count()));

    let description = run.text();
    let dates = extract_date_range(&description);
    if name.is_none() && dates.is_empty() {
        return None;
    }

    Some(ProjectEntry {
        name,
        start_date: dates.start_date,
        end_date: dates.end_date,
        description,
    })
}

fn education_entry(run: &LineRun, rules: &EntryRules) -> Option<EducationEntry> {
    let description = run.text();
    let school = extract_institution(&description).or_else(|| {
        let first = run.first_line()?;
        extract_organization(first).or_else(|| {
            let len = first.chars().count();
            (len >= rules.boundary.min_header_chars && len <= rules.boundary.max_header_chars)
                .then(|| strip_date_range(first))
                .filter(|name| !name.is_empty())
        })
    });
    let degree = extract_degree(&description);
    let dates = extract_date_range(&description);
    if school.is_none() && degree.is_none() && dates.is_empty() {
        return None;
    }

    Some(EducationEntry {
        school,
        degree,
        start_date: dates.start_date,
        end_date: dates.end_date,
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmentation::config::SegmenterConfig;

    fn span(section: Section) -> SpanPattern {
        SpanPattern::new(section, &SegmenterConfig::default().section_keywords).unwrap()
    }

    fn experience(text: &str) -> Vec<ExperienceEntry> {
        parse_experience(text, &span(Section::Experience), &EntryRules::experience())
    }

    fn education(text: &str) -> Vec<EducationEntry> {
        parse_education(text, &span(Section::Education), &EntryRules::education())
    }

    fn projects(text: &str) -> Vec<ProjectEntry> {
        parse_projects(text, &span(Section::Projects), &EntryRules::projects())
    }

    const SCENARIO_A: &str = "EXPERIENCE\nAcme Corp\nSoftware Engineer\n2020 - 2022\nBuilt things.\n\nEDUCATION\nState University\nBachelor of Science in Computer Science\n2016 - 2020\n";

    #[test]
    fn test_span_runs_to_next_header() {
        let body = span(Section::Experience).find_span(SCENARIO_A).unwrap();
        assert!(body.contains("Built things."));
        assert!(!body.contains("State University"));

        let body = span(Section::Education).find_span(SCENARIO_A).unwrap();
        assert!(body.contains("State University"));
        assert!(body.trim_end().ends_with("2016 - 2020"));
    }

    #[test]
    fn test_span_header_accepts_colon_and_case() {
        let text = "Work History:\nAcme Corp 2020 - 2022\n";
        assert!(span(Section::Experience).find_span(text).is_some());
        assert!(span(Section::Experience)
            .find_span("Experience with Rust and Go\n")
            .is_none());
    }

    #[test]
    fn test_missing_section_yields_no_entries() {
        assert!(projects(SCENARIO_A).is_empty());
    }

    #[test]
    fn test_scenario_a_experience() {
        let entries = experience(SCENARIO_A);
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.company.as_deref(), Some("Acme Corp"));
        assert!(entry.title.as_deref().unwrap().contains("Software Engineer"));
        assert_eq!(entry.start_date.as_deref(), Some("2020"));
        assert_eq!(entry.end_date.as_deref(), Some("2022"));
        assert!(entry.description.ends_with("Built things."));
    }

    #[test]
    fn test_scenario_a_education() {
        let entries = education(SCENARIO_A);
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.school.as_deref(), Some("State University"));
        assert!(entry.degree.as_deref().unwrap().contains("Bachelor"));
        assert_eq!(entry.start_date.as_deref(), Some("2016"));
        assert_eq!(entry.end_date.as_deref(), Some("2020"));
    }

    #[test]
    fn test_prose_entry_is_dropped() {
        let text = "EXPERIENCE\nI spent several years doing a variety of interesting odd jobs around town and learned a lot.\n";
        assert!(experience(text).is_empty());
    }

    #[test]
    fn test_blank_line_separates_entries() {
        let text = "EXPERIENCE\nAcme Corp | 2020 - 2022\nSoftware Engineer\nBuilt the billing system.\n\nGlobex Inc | 2018 - 2020\nData Analyst\nWrote weekly reports.\n\nSKILLS\nRust\n";
        let entries = experience(text);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].company.as_deref(), Some("Acme Corp"));
        assert_eq!(entries[0].title.as_deref(), Some("Software Engineer"));
        assert_eq!(entries[1].company.as_deref(), Some("Globex Inc"));
        assert_eq!(entries[1].title.as_deref(), Some("Data Analyst"));
        assert_eq!(entries[1].start_date.as_deref(), Some("2018"));
        assert!(!entries[1].description.contains("Rust"));
    }

    #[test]
    fn test_repeated_dates_split_without_blank_line() {
        let text = "EXPERIENCE\nAcme Corp 2020 - 2022\nSoftware Engineer on the payments team\nGlobex Inc 2018 - 2020\nData Analyst for the reporting group\n";
        let entries = experience(text);
        assert_eq!(entries.len(), 2);
        assert!(entries[0].title.as_deref().unwrap().starts_with("Software Engineer"));
        assert_eq!(entries[1].end_date.as_deref(), Some("2020"));
    }

    #[test]
    fn test_dated_body_line_does_not_split_entry() {
        let text = "EXPERIENCE\nAcme Corp | 2018 - 2022\nSoftware Engineer\nPromoted to team lead 2021 - 2022\nRan the on-call rotation.\n";
        let entries = experience(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].company.as_deref(), Some("Acme Corp"));
        assert_eq!(entries[0].start_date.as_deref(), Some("2018"));
        assert!(entries[0].description.ends_with("Ran the on-call rotation."));
    }

    #[test]
    fn test_title_first_layout() {
        let text = "EXPERIENCE\nSoftware Engineer\nAcme Corp\n2020 - 2022\nBuilt things.\n";
        let entries = experience(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title.as_deref(), Some("Software Engineer"));
        assert_eq!(entries[0].start_date.as_deref(), Some("2020"));
        assert_eq!(entries[0].end_date.as_deref(), Some("2022"));
    }

    #[test]
    fn test_span_closes_at_header_with_trailing_words() {
        let text = "EXPERIENCE\nAcme Corp | 2020 - 2022\nSoftware Engineer\nBuilt the billing system.\nTechnical Skills & Tools\nRust, Go, Kubernetes\n";
        let body = span(Section::Experience).find_span(text).unwrap();
        assert!(!body.contains("Kubernetes"));

        let entries = experience(text);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].description.ends_with("Built the billing system."));
    }

    #[test]
    fn test_short_intra_entry_line_does_not_split() {
        // "Remote" is shorter than ten chars but only blank lines separate entries here.
        let text = "EXPERIENCE\nAcme Corp\nRemote\nSenior Engineer 2019 - 2021\nKept the lights on.\n";
        let entries = experience(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title.as_deref(), Some("Senior Engineer"));
    }

    #[test]
    fn test_title_with_at_sign_is_skipped() {
        let text = "EXPERIENCE\nEngineer @ Initech\nBackend Developer\n2015 - 2017\n";
        let entries = experience(text);
        assert_eq!(entries[0].company.as_deref(), Some("Initech"));
        assert_eq!(entries[0].title.as_deref(), Some("Backend Developer"));
    }

    #[test]
    fn test_entry_below_minimum_is_skipped() {
        let text = "EXPERIENCE\nAcme 2020 - 2021\n";
        assert!(experience(text).is_empty());
    }

    #[test]
    fn test_projects_name_and_dates() {
        let text = "PROJECTS\nResume Parser (2021 - 2022)\nHeuristic segmentation engine in Rust.\n\nWeather Bot\nPosts forecasts to the team channel.\n";
        let entries = projects(text);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name.as_deref(), Some("Resume Parser"));
        assert_eq!(entries[0].start_date.as_deref(), Some("2021"));
        assert_eq!(entries[1].name.as_deref(), Some("Weather Bot"));
        assert_eq!(entries[1].start_date, None);
    }

    #[test]
    fn test_project_name_length_bounds() {
        let long = format!("{}\nand a body line", "A".repeat(60));
        let text = format!("PROJECTS\n{long}\n");
        assert!(projects(&text).is_empty());
    }

    #[test]
    fn test_education_falls_back_to_first_line() {
        let text = "EDUCATION\nLycee Henri IV\nBaccalaureate with honours\n2008 - 2011\n";
        let entries = education(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].school.as_deref(), Some("Lycee Henri IV"));
        assert_eq!(entries[0].degree, None);
    }

    #[test]
    fn test_education_multiple_schools() {
        let text = "EDUCATION\nUniversity of Toronto\nMaster of Science in Physics\n2014 - 2016\n\nState College\nB.S. in Mathematics, 2014\n";
        let entries = education(text);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].school.as_deref(), Some("University of Toronto"));
        assert_eq!(entries[1].school.as_deref(), Some("State College"));
        assert_eq!(entries[1].degree.as_deref(), Some("B.S. in Mathematics"));
    }

    #[test]
    fn test_empty_section_yields_no_entries() {
        assert!(education("EDUCATION\n").is_empty());
    }

    #[test]
    fn test_span_pattern_requires_keywords() {
        let table = vec![("skills".to_string(), Section::Skills)];
        assert!(matches!(
            SpanPattern::new(Section::Education, &table),
            Err(SegmenterError::InvalidConfig(_))
        ));
    }
}
