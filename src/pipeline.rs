//! The sequential per-query pipeline: fetch, process, analyze, assemble,
//! score. One run owns all of its data; nothing is shared across queries.

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::analyzer::{self, EventAnalysis};
use crate::config::Config;
use crate::credibility::{self, CredibilityReport};
use crate::fetcher;
use crate::processor::{self, ProcessedArticle};
use crate::timeline::{self, Timeline, TimelineOptions, TimelineStats};

/// Everything one pipeline run produced, ready for rendering or export.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub query: String,
    pub generated_at: String,
    pub articles: Vec<ProcessedArticle>,
    pub analysis: EventAnalysis,
    pub timeline: Timeline,
    pub timeline_stats: TimelineStats,
    pub credibility: CredibilityReport,
}

/// Run the full pipeline for one event query.
pub async fn run(config: &Config, query: &str) -> Result<PipelineReport> {
    info!("Starting pipeline run for '{}'", query);

    let raw_articles = fetcher::fetch_articles(config, query).await?;
    if raw_articles.is_empty() {
        warn!("No articles found for '{}'; the report will be empty", query);
    }

    let llm = config.llm_params();
    if llm.is_none() {
        warn!("No LLM backend configured; running in degraded mode");
    }

    let articles = processor::process_articles(raw_articles, &config.language, llm.as_ref()).await;

    let analysis = analyzer::analyze_event(&articles, query, llm.as_ref()).await;

    let options = TimelineOptions {
        similarity_threshold: config.similarity_threshold,
        major_source_count: config.major_source_count,
    };
    let timeline = timeline::generate(&articles, Some(&analysis), &options);

    let credibility = credibility::score_all(&articles, &timeline, &config.reputable_sources);

    info!(
        "Pipeline finished: {} articles, {} timeline events, average authenticity {:.2}",
        articles.len(),
        timeline.events.len(),
        credibility.average_authenticity
    );

    Ok(PipelineReport {
        query: query.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        timeline_stats: timeline.stats(),
        articles,
        analysis,
        timeline,
        credibility,
    })
}
