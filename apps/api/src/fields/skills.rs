//! Skill lookup against a static vocabulary.

use std::sync::LazyLock;

use regex::Regex;

/// Known skills in reporting order.
pub const SKILL_VOCABULARY: &[&str] = &[
    // Languages
    "JavaScript", "TypeScript", "Python", "Java", "C++", "C#", "Go", "Rust", "Swift", "Kotlin",
    "PHP", "Ruby", "Scala", "Perl", "R", "MATLAB", "SQL", "HTML", "CSS", "SCSS", "SASS",
    // Frameworks & libraries
    "React", "Vue", "Angular", "Next.js", "Nuxt.js", "Svelte", "Node.js", "Express", "Django",
    "Flask", "FastAPI", "Spring", "Laravel", "Symfony", "Rails", "ASP.NET", "jQuery",
    // Databases
    "PostgreSQL", "MySQL", "MongoDB", "Redis", "Elasticsearch", "Cassandra", "DynamoDB",
    "Oracle", "SQL Server", "SQLite", "Neo4j", "Firebase", "Supabase",
    // Cloud & DevOps
    "AWS", "Azure", "GCP", "Docker", "Kubernetes", "Terraform", "Ansible", "Jenkins",
    "GitLab CI", "GitHub Actions", "CircleCI", "Travis CI",
    // Tooling
    "Git", "GraphQL", "REST API", "gRPC", "WebSocket", "Microservices", "CI/CD",
    "Machine Learning", "AI", "Data Science", "TensorFlow", "PyTorch", "Scikit-learn",
    "Pandas", "NumPy", "Jupyter", "Tableau", "Power BI",
    // Testing
    "Jest", "Mocha", "Cypress", "Selenium", "Pytest", "JUnit",
    // Design
    "Figma", "Sketch", "Adobe XD", "Photoshop", "Illustrator",
];

pub const MAX_SKILLS: usize = 30;

/// One matcher per vocabulary entry. Word edges are consumed rather than
/// asserted with `\b` so names ending in `+` or `#` still match.
static SKILL_MATCHERS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    SKILL_VOCABULARY
        .iter()
        .map(|skill| {
            let pattern = format!(
                r"(?i)(?:^|[^A-Za-z0-9_]){}(?:$|[^A-Za-z0-9_+#])",
                regex::escape(skill)
            );
            (*skill, Regex::new(&pattern).expect("valid skill regex"))
        })
        .collect()
});

static SKILLS_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t]*(?:technical[ \t]+skills?|core[ \t]+skills?|skills?|competenc(?:y|ies))[ \t]*:?[ \t]*\n((?:[ \t]*[-•*][^\n]*(?:\n|$))+)",
    )
    .expect("valid skills list regex")
});

static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-•*][ \t]*([^\n]+)").expect("valid bullet regex"));

/// Vocabulary skills mentioned anywhere, then skills abbreviated in a bulleted
/// "Skills" list. Deduplicated, vocabulary order first, at most [`MAX_SKILLS`].
pub fn extract_skills(text: &str) -> Vec<String> {
    let mut found: Vec<&'static str> = SKILL_MATCHERS
        .iter()
        .filter(|(_, matcher)| matcher.is_match(text))
        .map(|(skill, _)| *skill)
        .collect();

    if let Some(list) = SKILLS_LIST.captures(text).and_then(|caps| caps.get(1)) {
        for bullet in BULLET.captures_iter(list.as_str()) {
            for item in bullet[1].split([',', ';', '|', '/']) {
                let item = item.trim().to_lowercase();
                if !(3..50).contains(&item.chars().count()) {
                    continue;
                }
                // Abbreviated entries such as "Postgres" or "Kube".
                for skill in SKILL_VOCABULARY {
                    if skill.to_lowercase().starts_with(&item) && !found.contains(skill) {
                        found.push(*skill);
                    }
                }
            }
        }
    }

    found.truncate(MAX_SKILLS);
    found.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_matches_on_word_edges() {
        let skills = extract_skills("Built services in Rust and C++ on AWS, deployed with Docker.");
        assert_eq!(skills, vec!["C++", "Rust", "AWS", "Docker"]);
    }

    #[test]
    fn test_no_partial_word_matches() {
        let skills = extract_skills("Trusted gopher enthusiast; javascripts");
        assert!(skills.is_empty());
    }

    #[test]
    fn test_case_insensitive_and_deduplicated() {
        let skills = extract_skills("python, PYTHON, Python");
        assert_eq!(skills, vec!["Python"]);
    }

    #[test]
    fn test_bulleted_skills_list_expands_abbreviations() {
        assert!(extract_skills("Postgres and Kube").is_empty());

        let skills = extract_skills("SKILLS\n- Postgres\n- Kube\n");
        assert_eq!(skills, vec!["PostgreSQL", "Kubernetes"]);
    }

    #[test]
    fn test_skills_list_with_separators() {
        let text = "Technical Skills:\n• PostgreSQL / Redis\n• Kubernetes operators\n";
        let skills = extract_skills(text);
        assert_eq!(skills, vec!["PostgreSQL", "Redis", "Kubernetes"]);
    }

    #[test]
    fn test_capped_at_thirty() {
        let text = SKILL_VOCABULARY.join(", ");
        assert_eq!(extract_skills(&text).len(), MAX_SKILLS);
    }
}
