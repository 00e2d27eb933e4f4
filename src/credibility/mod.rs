//! Deterministic credibility heuristics: source reputation, clickbait
//! signals, and cross-source corroboration. Not a classifier; no training
//! or learned state.

mod types;

pub use self::types::*;

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::analyzer::detect_bias;
use crate::processor::ProcessedArticle;
use crate::timeline::Timeline;

// Base scores per source tier.
const BASE_TOP_TIER: f64 = 0.95;
const BASE_REPUTABLE: f64 = 0.88;
const BASE_NEWS_PATTERN: f64 = 0.70;
const BASE_BLOG: f64 = 0.40;
const BASE_UNKNOWN: f64 = 0.55;

// Article score blend: source reputation dominates content signals.
const SOURCE_WEIGHT: f64 = 0.7;
const CONTENT_WEIGHT: f64 = 0.3;
const CLICKBAIT_PENALTY: f64 = 0.2;

// Corroboration bonus per distinct other source, capped.
const CORROBORATION_BONUS_STEP: f64 = 0.05;
const CORROBORATION_BONUS_CAP: f64 = 0.15;

/// Wire services and broadsheets that get the top-tier base score.
const TOP_TIER_SOURCES: &[&str] = &[
    "bbc",
    "reuters",
    "associated press",
    "ap news",
    "the new york times",
];

const NEWS_PATTERN_WORDS: &[&str] = &["news", "times", "post", "tribune", "herald"];
const BLOG_PATTERN_WORDS: &[&str] = &["blog", "medium", "substack"];

/// Score a source name against the reputable-source table.
pub fn score_source(source_name: &str, reputable_sources: &[String]) -> SourceAssessment {
    let source_lower = source_name.to_lowercase();

    let is_reputable = reputable_sources
        .iter()
        .any(|reputable| source_lower.contains(&reputable.to_lowercase()));

    let (score, reason) = if is_reputable {
        if TOP_TIER_SOURCES.iter().any(|name| source_lower.contains(name)) {
            (BASE_TOP_TIER, "Highly reputable news source")
        } else {
            (BASE_REPUTABLE, "Known reputable news source")
        }
    } else if NEWS_PATTERN_WORDS.iter().any(|word| source_lower.contains(word)) {
        (BASE_NEWS_PATTERN, "Appears to be a news organization")
    } else if BLOG_PATTERN_WORDS.iter().any(|word| source_lower.contains(word)) {
        (BASE_BLOG, "Blog or independent publication")
    } else {
        (BASE_UNKNOWN, "Unknown source")
    };

    SourceAssessment {
        source: source_name.to_string(),
        score,
        is_reputable,
        reason: reason.to_string(),
    }
}

/// For each source, the most distinct *other* sources it shares a timeline
/// milestone with.
pub fn corroboration_counts(timeline: &Timeline) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    for milestone in timeline.events.iter().chain(timeline.undated.iter()) {
        let others = milestone.sources.len().saturating_sub(1);
        for source in &milestone.sources {
            let entry = counts.entry(source.clone()).or_insert(0);
            *entry = (*entry).max(others);
        }
    }

    counts
}

/// Score one article: source base blended with content quality, a clickbait
/// penalty, and a corroboration bonus. Clipped to [0, 1].
pub fn score_article(
    article: &ProcessedArticle,
    source_assessment: &SourceAssessment,
    corroborating_sources: usize,
) -> CredibilityScore {
    let bias = detect_bias(&article.raw.title, &article.cleaned_content);
    let content_quality = 1.0 - bias.bias_score;

    let mut factors = BTreeMap::new();
    factors.insert(
        "source_base".to_string(),
        SOURCE_WEIGHT * source_assessment.score,
    );
    factors.insert("content_quality".to_string(), CONTENT_WEIGHT * content_quality);

    if bias.is_clickbait {
        factors.insert("clickbait_penalty".to_string(), -CLICKBAIT_PENALTY);
    }

    let bonus =
        (CORROBORATION_BONUS_STEP * corroborating_sources as f64).min(CORROBORATION_BONUS_CAP);
    if bonus > 0.0 {
        factors.insert("corroboration_bonus".to_string(), bonus);
    }

    let value: f64 = factors.values().sum::<f64>().clamp(0.0, 1.0);

    debug!(
        "Scored article {} at {:.2} ({} corroborating sources)",
        article.raw.url, value, corroborating_sources
    );

    CredibilityScore {
        subject: article.raw.url.clone(),
        value,
        factors,
    }
}

/// Score every source and article for a run and aggregate the averages.
pub fn score_all(
    articles: &[ProcessedArticle],
    timeline: &Timeline,
    reputable_sources: &[String],
) -> CredibilityReport {
    let corroboration = corroboration_counts(timeline);

    let mut source_scores: BTreeMap<String, SourceAssessment> = BTreeMap::new();
    let mut article_scores = Vec::with_capacity(articles.len());

    for article in articles {
        let assessment = source_scores
            .entry(article.raw.source.clone())
            .or_insert_with(|| score_source(&article.raw.source, reputable_sources))
            .clone();

        let corroborating = corroboration
            .get(&article.raw.source)
            .copied()
            .unwrap_or(0);

        article_scores.push(score_article(article, &assessment, corroborating));
    }

    let average_authenticity = if article_scores.is_empty() {
        0.0
    } else {
        article_scores.iter().map(|s| s.value).sum::<f64>() / article_scores.len() as f64
    };

    CredibilityReport {
        average_authenticity,
        authenticity_level: authenticity_level(average_authenticity).to_string(),
        reputable_source_count: source_scores.values().filter(|s| s.is_reputable).count(),
        source_scores,
        article_scores,
    }
}

/// Coarse label for an authenticity score.
pub fn authenticity_level(score: f64) -> &'static str {
    if score >= 0.8 {
        "High"
    } else if score >= 0.6 {
        "Medium"
    } else if score >= 0.4 {
        "Low"
    } else {
        "Very Low"
    }
}
