use anyhow::{Context, Result};

pub const DEFAULT_APIFY_BASE_URL: &str = "https://api.apify.com";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// LinkedIn jobs search actor.
pub const DEFAULT_SEARCH_ACTOR: &str = "hMvNSpz3JnHgl5jkh";
/// LinkedIn single-job detail actor, keyed by job id.
pub const DEFAULT_DETAIL_ACTOR: &str = "39xxtfNEwIEQ1hRiM";
pub const DEFAULT_OUTPUT_PATH: &str = "data/scraped_jobs.json";

/// Application configuration loaded from environment variables.
/// Returns an error at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub apify_token: String,
    pub apify_base_url: String,
    pub search_actor: String,
    pub detail_actor: String,
    /// Only required when the generative extractor is in use.
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub output_path: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            apify_token: require_env("APIFY_TOKEN")?,
            apify_base_url: env_or("APIFY_BASE_URL", DEFAULT_APIFY_BASE_URL),
            search_actor: env_or("APIFY_SEARCH_ACTOR", DEFAULT_SEARCH_ACTOR),
            detail_actor: env_or("APIFY_DETAIL_ACTOR", DEFAULT_DETAIL_ACTOR),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_base_url: env_or("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            output_path: env_or("OUTPUT_PATH", DEFAULT_OUTPUT_PATH),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    /// The Gemini key, or a fatal configuration error when generative
    /// extraction was requested without one.
    pub fn require_gemini_key(&self) -> Result<String> {
        self.gemini_api_key.clone().context(
            "Required environment variable 'GEMINI_API_KEY' is not set (needed for LLM skill extraction)",
        )
    }
}

fn require_env(key: &str) -> Result<String> {
    optional_env(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Blank values are treated the same as unset ones.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}
