use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One item returned by the scraper. No key is guaranteed to be present.
pub type RawItem = Map<String, Value>;

/// Why a record's skills are not authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionFailure {
    /// The model answered, but not with `{"skills": [...]}`.
    ParseFailed,
    /// The extraction call itself did not complete.
    ServiceUnavailable,
}

/// Canonical job posting produced by the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_id: String,
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: String,
    pub salary_range: String,
    pub employment_type: String,
    pub seniority_level: String,
    pub industry: String,
    pub url: String,
    pub posted_date: String,
    pub scraped_at: String,
    pub required_skills: Vec<String>,
    /// Set when extraction failed; the record is kept but unscored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction_error: Option<ExtractionFailure>,
}
