//! Scraper collaborator. Items come back as opaque key/value bags.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::job::RawItem;

pub mod apify;

pub use apify::ApifyClient;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("scraper API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("unexpected scraper payload: {0}")]
    UnexpectedShape(String),
}

/// One search to run against the job board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub search: String,
    pub max_results: usize,
    pub location: Option<String>,
}

impl SearchQuery {
    pub fn new(search: impl Into<String>, max_results: usize) -> Self {
        Self {
            search: search.into(),
            max_results,
            location: None,
        }
    }

    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location;
        self
    }
}

#[async_trait]
pub trait JobSource: Send + Sync {
    /// Runs a search and returns the raw items in scraper order.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RawItem>, ScrapeError>;

    /// Fetches the posting(s) for a single job id.
    async fn fetch_job(&self, job_id: &str) -> Result<Vec<RawItem>, ScrapeError>;
}
