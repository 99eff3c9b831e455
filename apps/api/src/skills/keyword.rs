//! Keyword skill extractor: case-insensitive substring scan against a fixed
//! vocabulary. Output follows vocabulary order, not text order.

use async_trait::async_trait;

use super::{ExtractionError, SkillExtractor};

/// Known technology and skill terms, in output order.
pub const SKILL_VOCABULARY: &[&str] = &[
    "Python", "JavaScript", "Java", "C++", "C#", "Ruby", "Go", "Rust", "PHP", "Swift", "Kotlin",
    "React", "Angular", "Vue", "Node.js", "Django", "Flask", "FastAPI", "Express", "Spring",
    "PostgreSQL", "MySQL", "MongoDB", "Redis", "Elasticsearch", "SQL", "NoSQL",
    "AWS", "Azure", "GCP", "Docker", "Kubernetes", "Jenkins", "CI/CD", "DevOps",
    "Machine Learning", "Deep Learning", "AI", "NLP", "Computer Vision", "Data Science",
    "TensorFlow", "PyTorch", "Scikit-learn", "Pandas", "NumPy",
    "Git", "Agile", "Scrum", "REST API", "GraphQL", "Microservices",
    "HTML", "CSS", "TypeScript", "Sass", "Webpack", "Babel",
    "Linux", "Bash", "Shell", "Terraform", "Ansible",
];

/// Pure-Rust keyword extractor. Fast, deterministic, no network call.
pub struct KeywordSkillExtractor;

#[async_trait]
impl SkillExtractor for KeywordSkillExtractor {
    fn name(&self) -> &'static str {
        "keyword"
    }

    async fn extract(&self, description: &str) -> Result<Vec<String>, ExtractionError> {
        Ok(extract_keyword_skills(description))
    }
}

/// Returns every vocabulary term that occurs, lowercased, as a substring of
/// the lowercased description.
pub fn extract_keyword_skills(description: &str) -> Vec<String> {
    let haystack = description.to_lowercase();
    if haystack.is_empty() {
        return Vec::new();
    }

    SKILL_VOCABULARY
        .iter()
        .filter(|term| haystack.contains(&term.to_lowercase()))
        .map(|term| term.to_string())
        .collect()
}
