//! Field normalizer: maps a scraped item of unknown shape onto a `JobRecord`.
//!
//! Every field is an ordered fallback lookup ending in a literal default, so
//! normalization is total. Key order within each chain is significant.

use serde_json::Value;

use crate::models::job::{JobRecord, RawItem};

pub const DEFAULT_TITLE: &str = "No Title";
pub const DEFAULT_COMPANY: &str = "Unknown Company";
pub const DEFAULT_LOCATION: &str = "Not specified";

const ID_KEYS: &[&str] = &["id", "jobId"];
const URL_KEYS: &[&str] = &["url", "jobUrl", "link"];
const TITLE_KEYS: &[&str] = &["title", "positionName", "jobTitle"];
const COMPANY_KEYS: &[&str] = &["company", "companyName"];
const LOCATION_KEYS: &[&str] = &["location", "jobLocation"];
/// Flat first, then the nested `job_info` container some actors emit.
const DESCRIPTION_KEYS: &[&str] = &["description", "job_info.description", "descriptionText"];
const SALARY_KEYS: &[&str] = &["salary", "salaryRange"];
const EMPLOYMENT_TYPE_KEYS: &[&str] = &["employmentType", "contractType"];
const SENIORITY_KEYS: &[&str] = &["seniorityLevel", "experienceLevel"];
const INDUSTRY_KEYS: &[&str] = &["industry", "industries"];
const POSTED_DATE_KEYS: &[&str] = &["listedAt", "postedAt", "publishedAt"];

/// Builds one record from one item. `accumulated` is the number of records
/// already collected in this run and only feeds the synthetic `job_{n}` id.
/// Skills are left empty for the extractor to attach.
pub fn normalize_item(item: &RawItem, accumulated: usize, scraped_at: &str) -> JobRecord {
    let url = first_text(item, URL_KEYS).unwrap_or_default();
    let job_id = source_job_id(item).unwrap_or_else(|| format!("job_{accumulated}"));

    JobRecord {
        job_id,
        title: first_text(item, TITLE_KEYS).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        company: first_text(item, COMPANY_KEYS).unwrap_or_else(|| DEFAULT_COMPANY.to_string()),
        description: first_text(item, DESCRIPTION_KEYS).unwrap_or_default(),
        location: first_text(item, LOCATION_KEYS).unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        salary_range: first_text(item, SALARY_KEYS).unwrap_or_default(),
        employment_type: first_text(item, EMPLOYMENT_TYPE_KEYS).unwrap_or_default(),
        seniority_level: first_text(item, SENIORITY_KEYS).unwrap_or_default(),
        industry: first_text(item, INDUSTRY_KEYS).unwrap_or_default(),
        url,
        posted_date: first_text(item, POSTED_DATE_KEYS).unwrap_or_default(),
        scraped_at: scraped_at.to_string(),
        required_skills: Vec::new(),
        extraction_error: None,
    }
}

/// The id the item itself carries: an explicit id, else the last URL segment.
pub fn source_job_id(item: &RawItem) -> Option<String> {
    first_text(item, ID_KEYS).or_else(|| {
        first_text(item, URL_KEYS)
            .as_deref()
            .and_then(trailing_segment)
    })
}

/// An item with neither a title nor a URL under any alternate key is unusable.
pub fn is_usable(item: &RawItem) -> bool {
    first_text(item, TITLE_KEYS).is_some() || first_text(item, URL_KEYS).is_some()
}

/// First non-empty value among `keys`. A dotted key descends into nested objects.
fn first_text(item: &RawItem, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| lookup(item, key))
        .find_map(text_of)
}

fn lookup<'a>(item: &'a RawItem, key: &str) -> Option<&'a Value> {
    let mut parts = key.split('.');
    let mut current = item.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// Renders a value as text. Strings pass through untouched; blank strings
/// and nulls count as absent; structured values become compact JSON.
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(a) if a.is_empty() => None,
        Value::Object(o) if o.is_empty() => None,
        other => Some(other.to_string()),
    }
}

fn trailing_segment(url: &str) -> Option<String> {
    url.rsplit('/')
        .next()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(String::from)
}
