//! Candidate name and headline title from the top of the document.

use std::sync::LazyLock;

use regex::Regex;

static NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+){1,3}$").expect("valid name regex")
});

static HEADLINE_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:(?:senior|junior|lead|principal|staff)[ \t]+)?(?:software|frontend|backend|full[ \t]*stack|full-stack|devops|data|ml|ai|machine[ \t]+learning|engineer|developer|architect|manager|analyst|designer|product|marketing|sales|hr|finance|operations|consultant|specialist)\b[\w \t]*",
    )
    .expect("valid headline title regex")
});

const NOT_A_NAME: &[&str] = &["email", "phone", "linkedin", "location", "address", "resume", "cv"];
const NAME_SCAN_LINES: usize = 10;
const TITLE_SCAN_LINES: usize = 30;
const MAX_TITLE_WORDS: usize = 5;

/// Two to four capitalised words near the top, trusted when they open the
/// document or sit directly above a contact line.
pub fn extract_name(text: &str) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();

    for (i, raw) in lines.iter().take(NAME_SCAN_LINES).enumerate() {
        let line = raw.trim();
        if line.chars().count() < 3 || !NAME.is_match(line) {
            continue;
        }
        if line
            .split_whitespace()
            .any(|word| NOT_A_NAME.contains(&word.to_lowercase().as_str()))
        {
            continue;
        }

        let above_contact = lines
            .get(i + 1)
            .is_some_and(|next| next.contains('@') || next.chars().any(|c| c.is_ascii_digit()));
        if above_contact || i < 3 {
            return Some(line.to_string());
        }
    }
    None
}

/// First short job-title phrase in the header area.
pub fn extract_title(text: &str) -> Option<String> {
    text.lines()
        .take(TITLE_SCAN_LINES)
        .map(str::trim)
        .filter(|line| (5..=60).contains(&line.chars().count()))
        .find_map(|line| {
            let title = HEADLINE_TITLE.find(line)?.as_str().trim();
            (title.split_whitespace().count() <= MAX_TITLE_WORDS).then(|| title.to_string())
        })
}
