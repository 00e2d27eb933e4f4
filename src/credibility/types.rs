//! Type definitions for the credibility scorer.

use std::collections::BTreeMap;

use serde::Serialize;

/// A numeric trust score in [0, 1] for a source or article, with the
/// contributing factors that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct CredibilityScore {
    /// Source name or article URL.
    pub subject: String,
    pub value: f64,
    /// Factor name to signed contribution.
    pub factors: BTreeMap<String, f64>,
}

/// Per-source base assessment.
#[derive(Debug, Clone, Serialize)]
pub struct SourceAssessment {
    pub source: String,
    pub score: f64,
    pub is_reputable: bool,
    pub reason: String,
}

/// Credibility results for one pipeline run. Recomputed every run, never
/// persisted.
#[derive(Debug, Clone, Serialize)]
pub struct CredibilityReport {
    pub average_authenticity: f64,
    pub authenticity_level: String,
    pub source_scores: BTreeMap<String, SourceAssessment>,
    pub article_scores: Vec<CredibilityScore>,
    pub reputable_source_count: usize,
}
