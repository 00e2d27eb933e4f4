//! Type definitions for the AI analyzer.

use chrono::NaiveDate;
use serde::Serialize;

/// A milestone suggested by the analysis pass. The date stays optional:
/// unresolvable dates land in the timeline's undated bucket instead of
/// being invented.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzedMilestone {
    pub date: Option<NaiveDate>,
    pub description: String,
    /// Source attribution when the analysis named one.
    pub source: Option<String>,
}

/// A conflict between sources flagged by the analysis.
#[derive(Debug, Clone, Serialize)]
pub struct Discrepancy {
    pub issue: String,
    pub sources: Vec<String>,
    pub details: String,
}

/// Structured result of analyzing one event's articles.
#[derive(Debug, Clone, Serialize)]
pub struct EventAnalysis {
    pub summary: String,
    pub timeline: Vec<AnalyzedMilestone>,
    pub key_highlights: Vec<String>,
    pub discrepancies: Vec<Discrepancy>,
    pub verified_facts: Vec<String>,
    /// True when this came from the non-AI fallback path.
    pub degraded: bool,
}

/// Lexical bias/clickbait assessment for one article.
#[derive(Debug, Clone, Serialize)]
pub struct BiasReport {
    /// In [0, 1]; higher means more clickbait/subjective signals.
    pub bias_score: f64,
    pub flags: Vec<String>,
    pub is_clickbait: bool,
}
