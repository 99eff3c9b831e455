//! CLI command definitions and routing.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::config::Config;
use crate::llm_client::{self, LlmClient};
use crate::pipeline::output::{write_jobs, RunSummary};
use crate::pipeline::Pipeline;
use crate::routes::build_router;
use crate::scraper::{ApifyClient, SearchQuery};
use crate::skills::{
    ExtractorKind, GenerativeSkillExtractor, KeywordSkillExtractor, SkillExtractor,
};
use crate::state::AppState;

/// jobharvest: scrape job postings and annotate them with required skills.
#[derive(Parser)]
#[command(name = "jobharvest", version, long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run a batch scrape and write the results to a JSON file.
    Scrape(ScrapeArgs),

    /// Serve the single-job lookup API.
    Serve {
        /// Port to listen on (defaults to PORT or 5000).
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Args)]
pub(crate) struct ScrapeArgs {
    /// Search query; repeat for several queries.
    #[arg(short, long = "query", default_value = "Software Engineer Intern")]
    pub queries: Vec<String>,

    /// Results requested per query, and the cap on the final batch.
    #[arg(short, long, default_value_t = 20)]
    pub max_results: usize,

    /// Optional region passed to the scraper.
    #[arg(short, long)]
    pub location: Option<String>,

    /// Skill extraction strategy.
    #[arg(short, long, value_enum, default_value_t = ExtractorKind::Keyword)]
    pub extractor: ExtractorKind,

    /// Output file (defaults to OUTPUT_PATH or data/scraped_jobs.json).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub(crate) async fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Command::Scrape(args) => run_scrape(&config, args).await,
        Command::Serve { port } => run_serve(&config, port).await,
    }
}

fn build_source(config: &Config) -> Result<ApifyClient> {
    ApifyClient::new(
        config.apify_token.clone(),
        &config.apify_base_url,
        &config.search_actor,
        &config.detail_actor,
    )
    .context("Failed to build scraper client")
}

fn build_generative(config: &Config) -> Result<GenerativeSkillExtractor> {
    let llm = LlmClient::new(config.require_gemini_key()?, &config.gemini_base_url)
        .context("Failed to build LLM client")?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    Ok(GenerativeSkillExtractor::new(llm))
}

/// Every collaborator is built before the first query, so a configuration
/// error aborts the run without scraping anything.
async fn run_scrape(config: &Config, args: ScrapeArgs) -> Result<()> {
    let source = Arc::new(build_source(config)?);
    let extractor: Arc<dyn SkillExtractor> = match args.extractor {
        ExtractorKind::Keyword => Arc::new(KeywordSkillExtractor),
        ExtractorKind::Llm => Arc::new(build_generative(config)?),
    };
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.output_path));

    let queries: Vec<SearchQuery> = args
        .queries
        .iter()
        .map(|q| {
            SearchQuery::new(q.as_str(), args.max_results).with_location(args.location.clone())
        })
        .collect();

    let pipeline = Pipeline::new(source, extractor);
    let report = pipeline.run(&queries, args.max_results).await;

    if report.jobs.is_empty() {
        error!(
            "No jobs were scraped ({} of {} queries failed). Check APIFY_TOKEN and try again.",
            report.queries_failed,
            queries.len()
        );
        return Ok(());
    }

    write_jobs(&output, &report.jobs)?;

    info!(
        "Run finished: {} skipped items, {} duplicates, {} extraction failures",
        report.items_skipped, report.duplicates_dropped, report.extraction_failures
    );
    RunSummary::from_jobs(&report.jobs).log();
    Ok(())
}

async fn run_serve(config: &Config, port: Option<u16>) -> Result<()> {
    let state = AppState {
        source: Arc::new(build_source(config)?),
        extractor: Arc::new(build_generative(config)?),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // browser extension origin

    let addr: SocketAddr = format!("0.0.0.0:{}", port.unwrap_or(config.port)).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
