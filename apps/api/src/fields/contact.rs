//! Contact details: email, phone, LinkedIn URL and location.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[a-z0-9._%+-]+[ \t]*@[ \t]*[a-z0-9.-]+\.[a-z]{2,}").expect("valid email regex")
});

/// Phone candidates, most specific first. Digits are normalised afterwards.
static PHONE_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // +1 (555) 123-4567, 555.123.4567, 5551234567
        r"(?:\+?1[ .-]?)?\(?\b[2-9]\d{2}\)?[ .-]?\d{3}[ .-]?\d{4}\b",
        // +44 20 7946 0958, +49 30 1234 5678
        r"\+\d{1,3}(?:[ .-]?\d{2,4}){2,5}\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid phone regex"))
    .collect()
});

static LINKEDIN_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/in/[\w-]+",
        r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/[\w-]+",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid linkedin regex"))
    .collect()
});

static LOCATION_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // San Francisco, CA
        r"[A-Z][a-zA-Z ]+,[ \t]*[A-Z]{2}\b",
        // Berlin, Germany
        r"[A-Z][a-zA-Z ]+,[ \t]*[A-Z][a-zA-Z ]+",
        // Austin TX
        r"\b[A-Z][a-zA-Z]+(?:[ \t]+[A-Z][a-zA-Z]+)*[ \t]+[A-Z]{2}\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid location regex"))
    .collect()
});

const LOCATION_KEYWORDS: &[&str] = &["location", "address", "based in", "residing in"];
const LOCATION_SCAN_LINES: usize = 20;

/// First well-formed email, spaces around `@` removed, lower-cased.
pub fn extract_email(text: &str) -> Option<String> {
    EMAIL
        .find_iter(text)
        .map(|m| m.as_str().replace([' ', '\t'], "").to_lowercase())
        .find(|email| is_valid_email(email))
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && domain.split('.').all(|label| {
            !label.is_empty() && !label.starts_with('-') && !label.ends_with('-')
        })
}

/// First plausible phone number, normalised to E.164.
pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_RULES
        .iter()
        .flat_map(|rule| rule.find_iter(text))
        .find_map(|m| to_e164(m.as_str()))
}

fn to_e164(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let international = raw.trim_start().starts_with('+');

    match digits.len() {
        10 if !international => Some(format!("+1{digits}")),
        11 if digits.starts_with('1') => Some(format!("+{digits}")),
        11..=15 if international => Some(format!("+{digits}")),
        _ => None,
    }
}

/// LinkedIn profile URL, with `https://` added when the scheme is missing.
pub fn extract_linkedin(text: &str) -> Option<String> {
    let url = LINKEDIN_RULES
        .iter()
        .find_map(|rule| rule.find(text))?
        .as_str();
    if url.to_lowercase().starts_with("http") {
        Some(url.to_string())
    } else {
        Some(format!("https://{url}"))
    }
}

/// City/region near the top of the document.
///
/// A line naming a location keyword is searched after the keyword first; any
/// line may also match the bare `City, ST` / `City, Country` / `City ST` shapes.
pub fn extract_location(text: &str) -> Option<String> {
    text.lines()
        .take(LOCATION_SCAN_LINES)
        .find_map(location_in_line)
}

fn location_in_line(line: &str) -> Option<String> {
    let lower = line.to_lowercase();
    let after_keyword = LOCATION_KEYWORDS.iter().find_map(|keyword| {
        let idx = lower.find(keyword)?;
        // Lower-casing can shift byte offsets for non-ASCII text.
        line.get(idx + keyword.len()..)
    });

    if let Some(rest) = after_keyword {
        if let Some(found) = match_location(rest.trim()) {
            return Some(found);
        }
    }
    match_location(line).filter(|loc| (4..50).contains(&loc.chars().count()))
}

fn match_location(text: &str) -> Option<String> {
    LOCATION_RULES
        .iter()
        .find_map(|rule| rule.find(text))
        .map(|m| m.as_str().trim().to_string())
}
