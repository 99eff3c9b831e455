//! Skill extraction: pluggable, trait-based extractors that turn a job
//! description into a list of required skills.
//!
//! `KeywordSkillExtractor` is pure and deterministic.
//! `GenerativeSkillExtractor` calls the LLM and can fail in two distinct ways.
//!
//! The pipeline holds an `Arc<dyn SkillExtractor>`, chosen at startup.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::job::ExtractionFailure;

pub mod generative;
pub mod keyword;
pub mod prompts;

pub use generative::GenerativeSkillExtractor;
pub use keyword::KeywordSkillExtractor;

/// Failure marker of an extraction attempt. Never coerced into success.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("extraction response did not match the skills schema: {0}")]
    Parse(String),

    #[error("extraction service unavailable: {0}")]
    Service(String),
}

impl ExtractionError {
    pub fn failure(&self) -> ExtractionFailure {
        match self {
            ExtractionError::Parse(_) => ExtractionFailure::ParseFailed,
            ExtractionError::Service(_) => ExtractionFailure::ServiceUnavailable,
        }
    }
}

/// Produces skills from free text. Implement this to add a backend without
/// touching the pipeline or the handlers.
#[async_trait]
pub trait SkillExtractor: Send + Sync {
    /// Short label for logs: "keyword" | "llm".
    fn name(&self) -> &'static str;

    /// An empty `Ok` list means "no skills found", not failure.
    async fn extract(&self, description: &str) -> Result<Vec<String>, ExtractionError>;
}

/// Which extractor a batch run uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ExtractorKind {
    #[default]
    Keyword,
    Llm,
}
