//! Apify actor client. Runs an actor synchronously and returns its dataset.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::{JobSource, ScrapeError, SearchQuery};
use crate::models::job::RawItem;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchInput<'a> {
    search: &'a str,
    max_results: usize,
    scrape_job_details: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct DetailInput<'a> {
    job_id: [&'a str; 1],
}

#[derive(Clone)]
pub struct ApifyClient {
    client: Client,
    token: String,
    base_url: String,
    search_actor: String,
    detail_actor: String,
}

impl ApifyClient {
    pub fn new(
        token: String,
        base_url: impl Into<String>,
        search_actor: impl Into<String>,
        detail_actor: impl Into<String>,
    ) -> Result<Self, ScrapeError> {
        Ok(Self {
            // Actor runs routinely take minutes.
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(600))
                .build()?,
            token,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            search_actor: search_actor.into(),
            detail_actor: detail_actor.into(),
        })
    }

    fn run_url(&self, actor: &str) -> String {
        format!(
            "{}/v2/acts/{actor}/run-sync-get-dataset-items",
            self.base_url
        )
    }

    async fn run_actor<I: Serialize + ?Sized>(
        &self,
        actor: &str,
        input: &I,
    ) -> Result<Vec<RawItem>, ScrapeError> {
        let response = self
            .client
            .post(self.run_url(actor))
            .bearer_auth(&self.token)
            .json(input)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ScrapeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        collect_items(body)
    }
}

/// Keeps the object items of a dataset array, in order.
fn collect_items(body: Value) -> Result<Vec<RawItem>, ScrapeError> {
    let Value::Array(entries) = body else {
        return Err(ScrapeError::UnexpectedShape(format!(
            "expected a JSON array of items, got {}",
            kind_of(&body)
        )));
    };

    let total = entries.len();
    let items: Vec<RawItem> = entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect();

    if items.len() < total {
        debug!("Ignored {} non-object dataset entries", total - items.len());
    }
    Ok(items)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl JobSource for ApifyClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RawItem>, ScrapeError> {
        info!("Running Apify actor {} for '{}'", self.search_actor, query.search);
        let input = SearchInput {
            search: &query.search,
            max_results: query.max_results,
            scrape_job_details: true,
            location: query.location.as_deref(),
        };
        self.run_actor(&self.search_actor, &input).await
    }

    async fn fetch_job(&self, job_id: &str) -> Result<Vec<RawItem>, ScrapeError> {
        info!("Running Apify actor {} for job {}", self.detail_actor, job_id);
        let input = DetailInput { job_id: [job_id] };
        self.run_actor(&self.detail_actor, &input).await
    }
}
