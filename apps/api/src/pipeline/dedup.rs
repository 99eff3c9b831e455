use std::collections::HashSet;

use crate::models::job::JobRecord;

/// Keeps the first record seen for each `job_id`, preserving order.
/// Later duplicates are dropped, never merged; skill content is not compared.
pub fn dedup_by_job_id(records: Vec<JobRecord>) -> Vec<JobRecord> {
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(record.job_id.clone()))
        .collect()
}
