// LLM prompt constants for skill extraction.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, NO_INFERENCE_INSTRUCTION};

/// System prompt for skill extraction.
pub fn skills_system() -> String {
    format!("You are a job description parser. {JSON_ONLY_SYSTEM} {NO_INFERENCE_INSTRUCTION}")
}

/// Skill extraction prompt template. Replace `{description}` before sending.
pub const SKILLS_PROMPT_TEMPLATE: &str = r#"Extract skills from the job description below.

JOB DESCRIPTION:
{description}

Return a JSON object with this EXACT schema:
{
  "skills": ["skill1", "skill2", "skill3"]
}

EXAMPLE

Description:
Company Name: Nebula Interfaces. Mission is to simplify the complex web of digital
interactions, creating intuitive, accessible, and visually stunning digital experiences.
Responsibilities: Design high-fidelity mockups and interactive prototypes for web and
mobile applications. Collaborate closely with engineering teams.
Skills
Technical: Proficiency in Figma, Adobe XD, and Adobe Creative Cloud. Basic understanding
of HTML5, CSS3, and JavaScript constraints.

Output:
{
  "skills": ["Figma", "Adobe XD", "Adobe Creative Cloud", "HTML5", "CSS3", "JavaScript"]
}"#;

pub fn build_skills_prompt(description: &str) -> String {
    SKILLS_PROMPT_TEMPLATE.replace("{description}", description)
}
