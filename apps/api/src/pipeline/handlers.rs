//! Axum route handlers for single-job lookups.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::models::job::JobRecord;
use crate::pipeline::normalize::{normalize_item, source_job_id};
use crate::pipeline::orchestrator::attach_skills;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobDetailsRequest {
    /// Browser clients send either a string or a bare number.
    #[serde(rename = "jobId", default)]
    pub job_id: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct JobDetailsResponse {
    pub status: &'static str,
    pub data: JobRecord,
}

/// POST /job-details
///
/// Scrapes one posting by id, normalizes it and extracts its skills.
/// Extraction failures are reported on the record, not as an error status.
pub async fn handle_job_details(
    State(state): State<AppState>,
    payload: Result<Json<JobDetailsRequest>, JsonRejection>,
) -> Result<Json<JobDetailsResponse>, AppError> {
    let job_id = payload
        .ok()
        .and_then(|Json(request)| request.job_id)
        .and_then(|value| job_id_text(&value))
        .ok_or_else(|| AppError::Validation("No ID provided".to_string()))?;

    info!("Processing job id {job_id}");

    let items = state.source.fetch_job(&job_id).await?;
    let item = items
        .first()
        .ok_or_else(|| AppError::NotFound(format!("Scraper returned no items for job {job_id}")))?;

    let scraped_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let mut record = normalize_item(item, 0, &scraped_at);
    // Detail actors often omit the id they were asked for.
    if source_job_id(item).is_none() {
        record.job_id = job_id;
    }
    attach_skills(state.extractor.as_ref(), &mut record).await;

    Ok(Json(JobDetailsResponse {
        status: "received",
        data: record,
    }))
}

fn job_id_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}
