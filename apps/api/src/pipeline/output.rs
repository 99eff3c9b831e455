//! Batch output: the persisted JSON document and the run summary.

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tracing::info;

use crate::models::job::JobRecord;

const SAMPLE_SIZE: usize = 5;
const SAMPLE_SKILLS: usize = 5;

/// Writes `jobs` as an indented UTF-8 JSON array. Non-ASCII text is kept
/// as-is. The file is replaced atomically.
pub fn write_jobs(path: &Path, jobs: &[JobRecord]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    serde_json::to_writer_pretty(&mut file, jobs).context("Failed to serialize jobs")?;
    file.write_all(b"\n")?;
    file.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Saved {} jobs to {}", jobs.len(), path.display());
    Ok(())
}

#[derive(Debug, Clone)]
pub struct SampleJob {
    pub title: String,
    pub company: String,
    pub location: String,
    pub url: String,
    pub top_skills: Vec<String>,
}

/// Counts reported after a batch run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub total_jobs: usize,
    pub unique_companies: usize,
    pub unique_locations: usize,
    pub samples: Vec<SampleJob>,
}

impl RunSummary {
    pub fn from_jobs(jobs: &[JobRecord]) -> Self {
        let companies: HashSet<&str> = jobs.iter().map(|j| j.company.as_str()).collect();
        let locations: HashSet<&str> = jobs.iter().map(|j| j.location.as_str()).collect();

        let samples = jobs
            .iter()
            .take(SAMPLE_SIZE)
            .map(|j| SampleJob {
                title: j.title.clone(),
                company: j.company.clone(),
                location: j.location.clone(),
                url: j.url.clone(),
                top_skills: j.required_skills.iter().take(SAMPLE_SKILLS).cloned().collect(),
            })
            .collect();

        Self {
            total_jobs: jobs.len(),
            unique_companies: companies.len(),
            unique_locations: locations.len(),
            samples,
        }
    }

    pub fn log(&self) {
        info!(
            "Summary: {} jobs, {} unique companies, {} unique locations",
            self.total_jobs, self.unique_companies, self.unique_locations
        );
        for (i, sample) in self.samples.iter().enumerate() {
            info!(
                "{}. {} at {} ({}) {}",
                i + 1,
                sample.title,
                sample.company,
                sample.location,
                sample.url
            );
            if !sample.top_skills.is_empty() {
                info!("   skills: {}", sample.top_skills.join(", "));
            }
        }
    }
}
