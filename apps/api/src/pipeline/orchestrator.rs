//! Pipeline orchestrator: drives queries through the scraper, normalizes and
//! annotates each item, then deduplicates and bounds the batch.
//!
//! Strictly sequential: one query at a time, one item at a time.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use tracing::{error, info, warn};

use crate::models::job::{ExtractionFailure, JobRecord};
use crate::pipeline::dedup::dedup_by_job_id;
use crate::pipeline::normalize::{is_usable, normalize_item};
use crate::scraper::{JobSource, SearchQuery};
use crate::skills::SkillExtractor;

/// Output of one pipeline run plus the counters worth reporting.
#[derive(Debug, Default)]
pub struct RunReport {
    pub jobs: Vec<JobRecord>,
    pub queries_failed: usize,
    pub items_skipped: usize,
    pub duplicates_dropped: usize,
    pub extraction_failures: usize,
}

pub struct Pipeline {
    source: Arc<dyn JobSource>,
    extractor: Arc<dyn SkillExtractor>,
}

impl Pipeline {
    pub fn new(source: Arc<dyn JobSource>, extractor: Arc<dyn SkillExtractor>) -> Self {
        Self { source, extractor }
    }

    pub async fn run(&self, queries: &[SearchQuery], max_results: usize) -> RunReport {
        let scraped_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let mut report = RunReport::default();
        let mut buffer: Vec<JobRecord> = Vec::new();

        info!(
            "Starting run: {} queries, extractor={}",
            queries.len(),
            self.extractor.name()
        );

        for query in queries {
            info!("Scraping jobs for '{}'", query.search);

            let items = match self.source.search(query).await {
                Ok(items) => items,
                Err(e) => {
                    error!("Error scraping '{}': {e}", query.search);
                    report.queries_failed += 1;
                    continue;
                }
            };

            let mut accepted = 0usize;
            let mut skipped = 0usize;
            for item in &items {
                if !is_usable(item) {
                    skipped += 1;
                    continue;
                }

                let mut record = normalize_item(item, buffer.len(), &scraped_at);
                if attach_skills(self.extractor.as_ref(), &mut record)
                    .await
                    .is_some()
                {
                    report.extraction_failures += 1;
                }
                buffer.push(record);
                accepted += 1;
            }

            if skipped > 0 {
                warn!(
                    "Skipped {skipped} items without title or URL for '{}'",
                    query.search
                );
            }
            report.items_skipped += skipped;
            info!("Found {accepted} jobs for '{}'", query.search);
        }

        let collected = buffer.len();
        let mut jobs = dedup_by_job_id(buffer);
        report.duplicates_dropped = collected - jobs.len();
        info!(
            "Total unique jobs scraped: {} ({} duplicates dropped)",
            jobs.len(),
            report.duplicates_dropped
        );

        jobs.truncate(max_results);
        report.jobs = jobs;
        report
    }
}

/// Attaches skills to a freshly normalized record. Extraction failures are
/// recorded on the record and returned; the record itself is always kept.
/// A blank description skips the extractor.
pub async fn attach_skills(
    extractor: &dyn SkillExtractor,
    record: &mut JobRecord,
) -> Option<ExtractionFailure> {
    if record.description.trim().is_empty() {
        record.required_skills = Vec::new();
        return None;
    }

    match extractor.extract(&record.description).await {
        Ok(skills) => {
            record.required_skills = skills;
            None
        }
        Err(e) => {
            warn!("Skill extraction failed for job {}: {e}", record.job_id);
            let failure = e.failure();
            record.required_skills = Vec::new();
            record.extraction_error = Some(failure);
            Some(failure)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::RawItem;
    use crate::scraper::ScrapeError;
    use crate::skills::{ExtractionError, KeywordSkillExtractor};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory scraper: canned items per search string, errors for the rest.
    struct FakeSource {
        results: HashMap<String, Vec<RawItem>>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn new(results: Vec<(&str, Vec<Value>)>) -> Self {
            Self {
                results: results
                    .into_iter()
                    .map(|(q, items)| (q.to_string(), items.into_iter().map(to_item).collect()))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl JobSource for FakeSource {
        async fn search(&self, query: &SearchQuery) -> Result<Vec<RawItem>, ScrapeError> {
            self.calls.lock().unwrap().push(query.search.clone());
            self.results.get(&query.search).cloned().ok_or_else(|| ScrapeError::Api {
                status: 500,
                message: "actor crashed".to_string(),
            })
        }

        async fn fetch_job(&self, _job_id: &str) -> Result<Vec<RawItem>, ScrapeError> {
            Ok(Vec::new())
        }
    }

    struct FailingExtractor {
        parse: bool,
    }

    #[async_trait]
    impl SkillExtractor for FailingExtractor {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn extract(&self, _description: &str) -> Result<Vec<String>, ExtractionError> {
            if self.parse {
                Err(ExtractionError::Parse("not json".to_string()))
            } else {
                Err(ExtractionError::Service("quota exceeded".to_string()))
            }
        }
    }

    fn to_item(value: Value) -> RawItem {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    fn queries(names: &[&str]) -> Vec<SearchQuery> {
        names.iter().map(|q| SearchQuery::new(*q, 20)).collect()
    }

    fn keyword_pipeline(source: FakeSource) -> Pipeline {
        Pipeline::new(Arc::new(source), Arc::new(KeywordSkillExtractor))
    }

    #[tokio::test]
    async fn test_end_to_end_single_item() {
        let source = FakeSource::new(vec![(
            "backend",
            vec![json!({
                "title": "Backend Engineer",
                "url": "https://x/jobs/987",
                "description": "Looking for Python and Docker experience"
            })],
        )]);

        let report = keyword_pipeline(source).run(&queries(&["backend"]), 20).await;
        assert_eq!(report.jobs.len(), 1);
        let job = &report.jobs[0];
        assert_eq!(job.job_id, "987");
        assert_eq!(job.title, "Backend Engineer");
        assert_eq!(job.company, "Unknown Company");
        assert_eq!(job.location, "Not specified");
        assert_eq!(job.description, "Looking for Python and Docker experience");
        assert_eq!(job.required_skills, vec!["Python", "Docker"]);
        assert!(job.extraction_error.is_none());
    }

    #[tokio::test]
    async fn test_failed_query_does_not_abort_run() {
        let source = FakeSource::new(vec![
            ("first", vec![json!({"id": "1", "title": "One"})]),
            ("third", vec![json!({"id": "3", "title": "Three"})]),
        ]);

        let pipeline = keyword_pipeline(source);
        let report = pipeline
            .run(&queries(&["first", "broken", "third"]), 20)
            .await;

        let ids: Vec<&str> = report.jobs.iter().map(|j| j.job_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(report.queries_failed, 1);
    }

    #[tokio::test]
    async fn test_queries_run_in_supplied_order() {
        let source = Arc::new(FakeSource::new(vec![("a", vec![]), ("b", vec![])]));
        let pipeline = Pipeline::new(source.clone(), Arc::new(KeywordSkillExtractor));
        pipeline.run(&queries(&["b", "a"]), 20).await;
        assert_eq!(*source.calls.lock().unwrap(), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_unusable_items_are_excluded_and_counted() {
        let source = FakeSource::new(vec![(
            "q",
            vec![
                json!({"company": "No identity"}),
                json!({"title": "Only title"}),
                json!({"url": "https://x/jobs/5"}),
            ],
        )]);

        let report = keyword_pipeline(source).run(&queries(&["q"]), 20).await;
        assert_eq!(report.items_skipped, 1);
        assert_eq!(report.jobs.len(), 2);
        // Synthetic ids count only accepted records.
        assert_eq!(report.jobs[0].job_id, "job_0");
        assert_eq!(report.jobs[1].job_id, "5");
    }

    #[tokio::test]
    async fn test_duplicates_across_queries_keep_first() {
        let source = FakeSource::new(vec![
            ("q1", vec![json!({"id": "a", "title": "from q1"})]),
            ("q2", vec![json!({"id": "a", "title": "from q2"}), json!({"id": "b", "title": "b"})]),
        ]);

        let report = keyword_pipeline(source).run(&queries(&["q1", "q2"]), 20).await;
        assert_eq!(report.jobs.len(), 2);
        assert_eq!(report.jobs[0].title, "from q1");
        assert_eq!(report.duplicates_dropped, 1);
    }

    #[tokio::test]
    async fn test_output_truncated_after_dedup() {
        let items: Vec<Value> = (0..30)
            .map(|i| json!({"id": format!("id{i}"), "title": format!("Job {i}")}))
            .collect();
        let source = FakeSource::new(vec![("bulk", items)]);

        let report = keyword_pipeline(source).run(&queries(&["bulk"]), 20).await;
        assert_eq!(report.jobs.len(), 20);
        assert_eq!(report.jobs[0].job_id, "id0");
        assert_eq!(report.jobs[19].job_id, "id19");
    }

    #[tokio::test]
    async fn test_parse_failure_keeps_record_with_flag() {
        let source = FakeSource::new(vec![(
            "q",
            vec![json!({"id": "1", "title": "T", "description": "Rust"})],
        )]);
        let pipeline = Pipeline::new(Arc::new(source), Arc::new(FailingExtractor { parse: true }));

        let report = pipeline.run(&queries(&["q"]), 20).await;
        assert_eq!(report.jobs.len(), 1);
        assert!(report.jobs[0].required_skills.is_empty());
        assert_eq!(
            report.jobs[0].extraction_error,
            Some(ExtractionFailure::ParseFailed)
        );
        assert_eq!(report.extraction_failures, 1);
    }

    #[tokio::test]
    async fn test_service_failure_marks_record_unscored() {
        let mut record = normalize_item(
            &to_item(json!({"id": "1", "description": "Rust"})),
            0,
            "now",
        );
        let failure = attach_skills(&FailingExtractor { parse: false }, &mut record).await;
        assert_eq!(failure, Some(ExtractionFailure::ServiceUnavailable));
        assert_eq!(
            record.extraction_error,
            Some(ExtractionFailure::ServiceUnavailable)
        );
    }

    #[tokio::test]
    async fn test_blank_description_skips_extractor() {
        let mut record = normalize_item(&to_item(json!({"id": "1"})), 0, "now");
        let failure = attach_skills(&FailingExtractor { parse: false }, &mut record).await;
        assert!(failure.is_none());
        assert!(record.required_skills.is_empty());
        assert!(record.extraction_error.is_none());
    }
}
