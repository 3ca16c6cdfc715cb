//! Entry Splitter: decides whether a line opens a new entry inside a section.
//!
//! Résumé entries are introduced by short header-like lines (company, school or
//! project name, often with a trailing year) set off by whitespace. Without layout
//! information the heuristic leans on line length, casing and a few lexical cues:
//!
//! 1. the previous line is a visual separator (blank, or shorter than a threshold),
//! 2. the line is 4–79 chars, starts upper-case and is not a list item,
//! 3. it looks like a header: has a year, OR has few words, OR names an organisation.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[•·▪◦‣\-*+]\s|\d+[.)]\s)").expect("valid list item regex")
});

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("valid year regex"));

/// Tunables for the header-likeness heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryRules {
    /// A previous line with fewer chars than this counts as a separator.
    /// Blank lines always count; `0` means only blank lines do.
    pub separator_below_chars: usize,
    pub min_header_chars: usize,
    pub max_header_chars: usize,
    pub max_header_words: usize,
    /// Lower-case substrings that mark a line as an organisation header.
    pub header_keywords: Vec<String>,
}

impl Default for BoundaryRules {
    fn default() -> Self {
        Self {
            separator_below_chars: 10,
            min_header_chars: 4,
            max_header_chars: 79,
            max_header_words: 5,
            header_keywords: ["inc", "llc", "corp", "ltd", "university", "college"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl BoundaryRules {
    /// Rules for the section parsers: only blank lines separate entries.
    pub fn blank_separated() -> Self {
        Self {
            separator_below_chars: 0,
            ..Self::default()
        }
    }

    pub fn with_keywords(mut self, extra: &[&str]) -> Self {
        for keyword in extra {
            if !self.header_keywords.iter().any(|k| k == keyword) {
                self.header_keywords.push(keyword.to_string());
            }
        }
        self
    }
}

/// Bullet (`•`, `-`, `*`, `+`, …) or numbered (`1.`, `2)`) list item.
pub fn is_list_item(line: &str) -> bool {
    LIST_ITEM.is_match(line.trim_start())
}

pub fn contains_year(line: &str) -> bool {
    YEAR.is_match(line)
}

/// Shape and lexical checks (conditions 2 and 3), ignoring what came before.
pub fn looks_like_header(line: &str, rules: &BoundaryRules) -> bool {
    let line = line.trim();
    let len = line.chars().count();
    if len < rules.min_header_chars || len > rules.max_header_chars {
        return false;
    }
    if !line.chars().next().is_some_and(char::is_uppercase) || is_list_item(line) {
        return false;
    }

    contains_year(line)
        || line.split_whitespace().count() <= rules.max_header_words
        || names_organization(line, rules)
}

/// True if the line carries one of the organisation keywords ("inc", "university", ...).
pub fn names_organization(line: &str, rules: &BoundaryRules) -> bool {
    let lower = line.to_lowercase();
    rules.header_keywords.iter().any(|k| lower.contains(k.as_str()))
}

pub fn is_separator(previous: Option<&str>, rules: &BoundaryRules) -> bool {
    match previous.map(str::trim) {
        None => true,
        Some(prev) => prev.is_empty() || prev.chars().count() < rules.separator_below_chars,
    }
}

/// Full new-entry signal: a separator before, a header-like line now.
pub fn starts_new_entry(previous: Option<&str>, line: &str, rules: &BoundaryRules) -> bool {
    is_separator(previous, rules) && looks_like_header(line, rules)
}
