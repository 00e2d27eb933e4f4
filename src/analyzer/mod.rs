//! Event analysis via the configured LLM backend, with a deterministic
//! non-AI fallback (degraded mode).

mod bias;
mod parse;
mod types;

pub use self::bias::detect_bias;
pub use self::parse::parse_analysis_response;
pub use self::types::*;

use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::llm::generate_llm_response;
use crate::processor::ProcessedArticle;
use crate::prompts;
use crate::{LLMParams, TARGET_LLM_REQUEST};

/// Articles included in the analysis digest.
const MAX_DIGEST_ARTICLES: usize = 10;
/// Per-article content cap inside the digest.
const MAX_DIGEST_CONTENT_CHARS: usize = 1500;

/// Analyze the processed articles for an event query. Any failure along the
/// LLM path (no backend, timeout, provider error, malformed response) falls
/// back to `basic_analysis`; a warning, never fatal.
pub async fn analyze_event(
    articles: &[ProcessedArticle],
    event_query: &str,
    llm: Option<&LLMParams>,
) -> EventAnalysis {
    if let Some(params) = llm {
        let digest = build_digest(articles);
        let prompt = prompts::event_analysis_prompt(event_query, &digest);

        if let Some(response) = generate_llm_response(&prompt, params).await {
            match parse_analysis_response(&response) {
                Ok(analysis) => {
                    info!(
                        "Analysis produced {} milestones and {} discrepancies",
                        analysis.timeline.len(),
                        analysis.discrepancies.len()
                    );
                    return analysis;
                }
                Err(e) => {
                    warn!(target: TARGET_LLM_REQUEST, "Malformed analysis response: {}", e);
                }
            }
        }
        warn!("AI analysis unavailable, falling back to heuristic summary");
    }

    basic_analysis(articles, event_query)
}

/// Format the bounded article digest handed to the LLM.
fn build_digest(articles: &[ProcessedArticle]) -> String {
    articles
        .iter()
        .take(MAX_DIGEST_ARTICLES)
        .enumerate()
        .map(|(i, article)| {
            let content: String = article
                .cleaned_content
                .chars()
                .take(MAX_DIGEST_CONTENT_CHARS)
                .collect();
            let dates: Vec<String> = article
                .extracted_dates
                .iter()
                .take(5)
                .map(|mention| mention.date.to_string())
                .collect();
            format!(
                "Article {} ({}, {}):\nTitle: {}\nContent: {}\nDates mentioned: {}",
                i + 1,
                article.raw.source,
                article.raw.published_at.as_deref().unwrap_or("undated"),
                article.raw.title,
                content,
                dates.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Degraded-mode analysis: a timeline from article dates alone and a
/// summary stitched from titles and sources. Deterministic, no network.
pub fn basic_analysis(articles: &[ProcessedArticle], event_query: &str) -> EventAnalysis {
    let mut seen_dates = BTreeSet::new();
    let mut timeline = Vec::new();

    for article in articles {
        let Some(date) = article.representative_date() else {
            continue;
        };
        if !seen_dates.insert(date) {
            continue;
        }
        let title: String = article.raw.title.chars().take(100).collect();
        timeline.push(AnalyzedMilestone {
            date: Some(date),
            description: format!("News reported by {}: {}", article.raw.source, title),
            source: Some(article.raw.source.clone()),
        });
    }
    timeline.sort_by_key(|milestone| milestone.date);

    let sources: BTreeSet<&str> = articles
        .iter()
        .take(5)
        .map(|a| a.raw.source.as_str())
        .collect();
    let summary = format!(
        "Analysis of {} articles about '{}'. Key sources include: {}.",
        articles.len(),
        event_query,
        sources.into_iter().collect::<Vec<_>>().join(", ")
    );

    let key_highlights: Vec<String> = articles
        .iter()
        .take(5)
        .map(|a| a.raw.title.clone())
        .collect();

    EventAnalysis {
        summary,
        timeline,
        key_highlights,
        discrepancies: Vec::new(),
        verified_facts: Vec::new(),
        degraded: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ExtractedEntities;
    use crate::fetcher::RawArticle;
    use crate::processor::{extract_dates, ProcessedArticle};

    fn article(source: &str, title: &str, body: &str, published: &str) -> ProcessedArticle {
        let raw = RawArticle {
            source: source.to_string(),
            url: format!("https://{}.example.com/a", source.to_lowercase()),
            title: title.to_string(),
            description: String::new(),
            content: body.to_string(),
            published_at: Some(published.to_string()),
            author: None,
        };
        let extracted_dates = extract_dates(body, Some(published));
        ProcessedArticle {
            cleaned_content: body.to_string(),
            full_text: format!("{} {}", title, body),
            extracted_dates,
            entities: ExtractedEntities::new(),
            raw,
        }
    }

    #[tokio::test]
    async fn test_analyze_event_without_llm_degrades() {
        let articles = vec![
            article("Reuters", "Launch day", "Liftoff happened.", "2023-07-14T10:00:00Z"),
            article("BBC", "Landing", "Touchdown confirmed.", "2023-08-23T12:00:00Z"),
        ];
        let analysis = analyze_event(&articles, "moon mission", None).await;

        assert!(analysis.degraded);
        assert_eq!(analysis.timeline.len(), 2);
        assert!(analysis.timeline[0].date < analysis.timeline[1].date);
        assert!(analysis.summary.contains("moon mission"));
    }

    #[test]
    fn test_basic_analysis_dedupes_same_day_articles() {
        let articles = vec![
            article("Reuters", "Launch", "Liftoff.", "2023-07-14T10:00:00Z"),
            article("BBC", "Launch elsewhere", "Liftoff again.", "2023-07-14T11:00:00Z"),
        ];
        let analysis = basic_analysis(&articles, "launch");
        assert_eq!(analysis.timeline.len(), 1);
    }

    #[test]
    fn test_build_digest_bounds_articles() {
        let articles: Vec<ProcessedArticle> = (0..15)
            .map(|i| {
                article(
                    "Reuters",
                    &format!("Story {}", i),
                    "Body text.",
                    "2023-07-14T10:00:00Z",
                )
            })
            .collect();
        let digest = build_digest(&articles);
        assert!(digest.contains("Article 10"));
        assert!(!digest.contains("Article 11"));
    }
}
