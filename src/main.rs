use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use chronicle::config::Config;
use chronicle::logging::configure_logging;
use chronicle::{pipeline, report};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("BUILD_TIMESTAMP"),
    ", ",
    env!("GIT_HASH"),
    ")"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Colored terminal tables.
    Table,
    /// Plain-text timeline dump.
    Text,
    /// Pretty-printed JSON export.
    Json,
}

/// Fetch news coverage for an event, build an ordered milestone timeline,
/// and score source credibility.
#[derive(Debug, Parser)]
#[command(name = "chronicle", version, long_version = LONG_VERSION)]
struct Cli {
    /// Event to research, e.g. "Chandrayaan-3 landing".
    query: String,

    /// Maximum number of articles to fetch.
    #[arg(long)]
    max_articles: Option<usize>,

    /// How many days back to search for coverage.
    #[arg(long)]
    days_back: Option<i64>,

    /// Result language (two-letter code).
    #[arg(long)]
    language: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Skip the on-disk article cache for this run.
    #[arg(long)]
    no_cache: bool,

    /// Write the rendered output to a file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    configure_logging();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("Invalid configuration")?;
    if let Some(max_articles) = cli.max_articles {
        config.max_articles = max_articles;
    }
    if let Some(days_back) = cli.days_back {
        config.days_back = days_back;
    }
    if let Some(language) = cli.language {
        config.language = language;
    }
    if cli.no_cache {
        config.cache_enabled = false;
    }

    let pipeline_report = pipeline::run(&config, &cli.query).await?;

    let rendered = match cli.format {
        OutputFormat::Table => report::render_tables(&pipeline_report),
        OutputFormat::Text => report::render_text(&pipeline_report),
        OutputFormat::Json => report::render_json(&pipeline_report)?,
    };

    match cli.output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
