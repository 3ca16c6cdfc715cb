//! Pattern Extractors: stateless, first-match-wins lookups over a text span.
//!
//! Each extractor walks an ordered rule list and returns the first hit. A miss is
//! `None`, never an error.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?";
const YEAR: &str = r"(?:19|20)\d{2}";
const RANGE_SEP: &str = r"(?:[ \t]*[-–—][ \t]*|[ \t]+(?:to|until)[ \t]+)";
const OPEN_END: &str = r"(?:present|current|now|today)";

/// Date range rules, most specific first. Group 1 is the start, group 2 the end.
static DATE_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    let month_year = format!(r"{MONTH}[ \t]+{YEAR}");
    let numeric = format!(r"\d{{1,2}}/{YEAR}");
    [
        format!(r"(?i)\b({month_year}){RANGE_SEP}({month_year}|{YEAR}|{OPEN_END})\b"),
        format!(r"(?i)\b({numeric}){RANGE_SEP}({numeric}|{OPEN_END})\b"),
        format!(r"(?i)\b({YEAR}){RANGE_SEP}({YEAR}|{OPEN_END})\b"),
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid date range regex"))
    .collect()
});

const ORG_SUFFIX: &str =
    r"(?:Inc|LLC|Corp|Corporation|Ltd|Company|Co|Technologies|Systems|Solutions|Group|Labs)";

/// Organisation rules, tried in order on a single line. Group 1 is the name.
static ORGANIZATION_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // "Engineer at Acme", "@ Acme"
        r"(?:\b(?:at|for|with)[ \t]+|@[ \t]*)([A-Z][A-Za-z&.,' -]{2,40})".to_string(),
        // A bare capitalised line, e.g. "Acme Corp"
        r"^([A-Z][A-Za-z&.,' -]{2,40})$".to_string(),
        // A name ending in a corporate suffix anywhere on the line
        format!(r"([A-Z][A-Za-z&.,' -]{{1,40}}?[ \t]*\b{ORG_SUFFIX}\b\.?)"),
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid organization regex"))
    .collect()
});

static INSTITUTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"((?:[A-Z][A-Za-z.&'-]*[ \t]+)*(?:University|College|Institute|School|Academy|Polytechnic)(?:[ \t]+(?:of|for)[ \t]+[A-Z][A-Za-z.&'-]*(?:[ \t]+(?:[A-Z][A-Za-z.&'-]*|of|and|&))*)?)",
    )
    .expect("valid institution regex")
});

/// Degree rules: full words swallow the rest of the phrase up to punctuation or a
/// digit; abbreviations take an optional `in|of <field>` tail.
static DEGREE_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(?:bachelor|master|associate|doctor)(?:'?s)?\b[^\n,;|()\d]*",
        r"\bPh\.?[ \t]?D\.?(?:[ \t]+(?:in|of)[ \t]+[^\n,;|()\d]+)?",
        r"\b(?:[BM]\.(?:S|A|Sc|Eng)\.|MBA|BSc|MSc|BEng|MEng)(?:[ \t]+(?:in|of)[ \t]+[^\n,;|()\d]+)?",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid degree regex"))
    .collect()
});

static TITLE_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:software|frontend|backend|full[ -]?stack|devops|data|ml|ai|machine learning|engineer|developer|architect|manager|analyst|designer|product|marketing|sales|hr|finance|operations|consultant|specialist|scientist|researcher|director|intern|administrator|lead)\b",
    )
    .expect("valid title keyword regex")
});

const REJECTED_ORGANIZATIONS: &[&str] = &["university", "college", "school", "the"];

/// A start/end pair. Both `None`, start-only (open-ended), or both set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl DateRange {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
    }
}

/// First date range in `text`. "Present"/"Current" ends normalise to `None`.
pub fn extract_date_range(text: &str) -> DateRange {
    DATE_RULES
        .iter()
        .find_map(|rule| rule.captures(text))
        .map(|caps| {
            let start = caps[1].trim().to_string();
            let end = caps[2].trim();
            let is_open = matches!(
                end.to_lowercase().as_str(),
                "present" | "current" | "now" | "today"
            );
            DateRange {
                start_date: Some(start),
                end_date: (!is_open).then(|| end.to_string()),
            }
        })
        .unwrap_or_default()
}

pub fn has_date_range(text: &str) -> bool {
    DATE_RULES.iter().any(|rule| rule.is_match(text))
}

/// Organisation name on a single line, if any rule matches.
pub fn extract_organization(line: &str) -> Option<String> {
    let line = line.trim();
    ORGANIZATION_RULES.iter().find_map(|rule| {
        let caps = rule.captures(line)?;
        let name = clean_organization(&caps[1]);
        is_plausible_organization(&name).then_some(name)
    })
}

/// Company for a generic chunk: first organisation found in the first three lines.
pub fn extract_company(text: &str) -> Option<String> {
    text.lines().take(3).find_map(extract_organization)
}

/// School name anywhere in `text` ("State University", "University of Toronto").
pub fn extract_institution(text: &str) -> Option<String> {
    INSTITUTION
        .find(text)
        .map(|m| clean_organization(m.as_str()))
        .filter(|name| is_plausible_organization(name))
}

pub fn extract_degree(text: &str) -> Option<String> {
    DEGREE_RULES.iter().find_map(|rule| {
        let degree = rule
            .find(text)?
            .as_str()
            .trim()
            .trim_end_matches(|c: char| matches!(c, '-' | '–' | '—' | ':') || c.is_whitespace())
            .to_string();
        (!degree.is_empty()).then_some(degree)
    })
}

/// True if the line contains a job-title keyword.
pub fn has_title_keyword(line: &str) -> bool {
    TITLE_KEYWORD.is_match(line)
}

/// Strips a date range and trailing separators from a header line:
/// `"Software Engineer | 2020 - 2022"` → `"Software Engineer"`.
pub fn strip_date_range(line: &str) -> String {
    let mut out = line.to_string();
    if let Some(m) = DATE_RULES.iter().find_map(|rule| rule.find(line)) {
        out.replace_range(m.range(), "");
    }
    out.trim()
        .trim_matches(|c: char| matches!(c, '|' | ',' | '-' | '–' | '—' | '(' | ')') || c.is_whitespace())
        .to_string()
}

fn clean_organization(raw: &str) -> String {
    let mut name = raw.trim();
    for sep in [" - ", " – ", " — ", " | ", ","] {
        if let Some(idx) = name.find(sep) {
            name = &name[..idx];
        }
    }
    name.trim_end_matches(|c: char| matches!(c, '-' | '\'' | '&') || c.is_whitespace())
        .to_string()
}

fn is_plausible_organization(name: &str) -> bool {
    let len = name.chars().count();
    len > 2 && len < 50 && !REJECTED_ORGANIZATIONS.contains(&name.to_lowercase().as_str())
}
