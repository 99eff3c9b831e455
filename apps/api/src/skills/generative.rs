//! Generative skill extractor: delegates the description to the LLM and
//! parses `{"skills": [...]}` out of its answer.
//!
//! Nondeterministic and network-bound. Only call it once per record at the
//! orchestration boundary, never from dedup or other pure code.

use async_trait::async_trait;
use serde::Deserialize;

use super::prompts::{build_skills_prompt, skills_system};
use super::{ExtractionError, SkillExtractor};
use crate::llm_client::{LlmClient, LlmError};

#[derive(Debug, Deserialize)]
struct SkillsPayload {
    skills: Vec<String>,
}

pub struct GenerativeSkillExtractor {
    llm: LlmClient,
}

impl GenerativeSkillExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl SkillExtractor for GenerativeSkillExtractor {
    fn name(&self) -> &'static str {
        "llm"
    }

    async fn extract(&self, description: &str) -> Result<Vec<String>, ExtractionError> {
        let prompt = build_skills_prompt(description);
        let payload = self
            .llm
            .call_json::<SkillsPayload>(&prompt, &skills_system())
            .await
            .map_err(classify)?;

        Ok(clean_skills(payload.skills))
    }
}

fn classify(err: LlmError) -> ExtractionError {
    if err.is_parse_failure() {
        ExtractionError::Parse(err.to_string())
    } else {
        ExtractionError::Service(err.to_string())
    }
}

/// Trims each skill, drops blanks, and keeps the first of any duplicates.
fn clean_skills(raw: Vec<String>) -> Vec<String> {
    let mut skills: Vec<String> = Vec::with_capacity(raw.len());
    for skill in raw {
        let skill = skill.trim();
        if skill.is_empty() || skills.iter().any(|s| s == skill) {
            continue;
        }
        skills.push(skill.to_string());
    }
    skills
}
