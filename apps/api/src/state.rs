use std::sync::Arc;

use crate::scraper::JobSource;
use crate::skills::SkillExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn JobSource>,
    /// Generative extractor in production; handlers only see the trait.
    pub extractor: Arc<dyn SkillExtractor>,
}
