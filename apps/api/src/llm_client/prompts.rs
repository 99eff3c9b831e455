// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Common instruction for extraction prompts: report, never infer.
pub const NO_INFERENCE_INSTRUCTION: &str = "\
    CRITICAL: You MUST NOT infer skills. Only report skills that are literally \
    named in the text. If the text names no skills, return an empty list.";
