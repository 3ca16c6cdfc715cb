//! Full-field résumé record: contact fields, skills and the three entry lists.

use serde::{Deserialize, Serialize};

use crate::fields;
use crate::segmentation::{EducationEntry, ExperienceEntry, ProjectEntry, Segmenter};

/// Shortest trimmed text worth parsing into a résumé.
pub const MIN_RESUME_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub location: Option<String>,
    pub title: Option<String>,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub education: Vec<EducationEntry>,
    /// Input text, returned so callers can re-chunk without re-extracting.
    pub raw_text: String,
}

/// True when `text` carries enough content to be parsed.
pub fn has_meaningful_text(text: &str) -> bool {
    text.trim().chars().count() >= MIN_RESUME_CHARS
}

/// Runs every field extractor and entry parser over `text`. Synchronous and
/// CPU-bound; async callers should use `spawn_blocking`.
pub fn parse_resume(text: &str, segmenter: &Segmenter) -> ParsedResume {
    ParsedResume {
        name: fields::extract_name(text),
        email: fields::extract_email(text),
        phone: fields::extract_phone(text),
        linkedin: fields::extract_linkedin(text),
        location: fields::extract_location(text),
        title: fields::extract_title(text),
        skills: fields::extract_skills(text),
        experience: segmenter.experience(text),
        projects: segmenter.projects(text),
        education: segmenter.education(text),
        raw_text: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmentation::SegmenterConfig;

    const RESUME: &str = "Jane Doe
jane.doe@example.com | (555) 234-5678 | Austin, TX
linkedin.com/in/jane-doe
Senior Backend Engineer

SUMMARY
Backend engineer with eight years of experience building payment systems in Rust and Go.

EXPERIENCE
Acme Corp | Jan 2019 - Present
Senior Backend Engineer
• Moved billing to Kafka and PostgreSQL

Globex Inc | 2015 - 2018
Software Engineer
• Built deployment tooling with Docker and Kubernetes

PROJECTS
Resume Parser (2021 - 2022)
Heuristic segmentation engine.

EDUCATION
State University
Bachelor of Science in Computer Science
2011 - 2015
";

    #[test]
    fn test_parse_resume_end_to_end() {
        let segmenter = Segmenter::new(SegmenterConfig::default()).unwrap();
        let resume = parse_resume(RESUME, &segmenter);

        assert_eq!(resume.name.as_deref(), Some("Jane Doe"));
        assert_eq!(resume.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(resume.phone.as_deref(), Some("+15552345678"));
        assert_eq!(
            resume.linkedin.as_deref(),
            Some("https://linkedin.com/in/jane-doe")
        );
        assert_eq!(resume.location.as_deref(), Some("Austin, TX"));
        assert_eq!(resume.title.as_deref(), Some("Senior Backend Engineer"));
        for skill in ["Go", "Rust", "PostgreSQL", "Docker", "Kubernetes"] {
            assert!(resume.skills.iter().any(|s| s == skill), "missing {skill}");
        }

        assert_eq!(resume.experience.len(), 2);
        assert_eq!(resume.experience[0].company.as_deref(), Some("Acme Corp"));
        assert_eq!(resume.experience[0].start_date.as_deref(), Some("Jan 2019"));
        assert_eq!(resume.experience[0].end_date, None);
        assert_eq!(resume.experience[1].title.as_deref(), Some("Software Engineer"));

        assert_eq!(resume.projects.len(), 1);
        assert_eq!(resume.projects[0].name.as_deref(), Some("Resume Parser"));

        assert_eq!(resume.education.len(), 1);
        assert_eq!(resume.education[0].school.as_deref(), Some("State University"));

        assert_eq!(resume.raw_text, RESUME);
    }

    #[test]
    fn test_meaningful_text_threshold() {
        assert!(!has_meaningful_text("   too short   "));
        assert!(has_meaningful_text(&"a".repeat(MIN_RESUME_CHARS)));
        assert!(!has_meaningful_text(&format!("  {}  ", "a".repeat(MIN_RESUME_CHARS - 1))));
    }
}
