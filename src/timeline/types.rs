//! Type definitions for the timeline generator.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::{DEFAULT_MAJOR_SOURCE_COUNT, DEFAULT_SIMILARITY_THRESHOLD};

/// Where a timeline entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MilestoneOrigin {
    /// Suggested by the AI analysis pass.
    AiAnalysis,
    /// Derived from a dated article.
    ArticleDate,
}

/// A dated, described event within the story's timeline.
///
/// Invariant: the supporting source set is never empty; entries that cannot
/// be tied to any article are dropped before they reach a `Timeline`.
#[derive(Debug, Clone, Serialize)]
pub struct Milestone {
    pub date: Option<NaiveDate>,
    pub description: String,
    /// Distinct names of sources supporting this entry.
    pub sources: BTreeSet<String>,
    /// URLs of the supporting articles.
    pub article_urls: BTreeSet<String>,
    pub origin: MilestoneOrigin,
    pub is_major: bool,
}

impl Milestone {
    /// Number of distinct sources corroborating this entry.
    pub fn corroboration(&self) -> usize {
        self.sources.len()
    }
}

/// Tunables for timeline assembly, surfaced through `Config` rather than
/// hard-coded.
#[derive(Debug, Clone)]
pub struct TimelineOptions {
    /// Jaro-Winkler similarity above which same-day descriptions merge.
    pub similarity_threshold: f64,
    /// Distinct-source count at which an entry is flagged major.
    pub major_source_count: usize,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        TimelineOptions {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            major_source_count: DEFAULT_MAJOR_SOURCE_COUNT,
        }
    }
}

/// An immutable per-query snapshot: dated milestones in ascending order
/// plus an unordered bucket of undated notes, never interleaved.
#[derive(Debug, Clone, Serialize)]
pub struct Timeline {
    pub events: Vec<Milestone>,
    pub undated: Vec<Milestone>,
}

/// Summary numbers for a timeline.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineStats {
    pub total_events: usize,
    pub major_count: usize,
    pub undated_count: usize,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub duration_days: i64,
}
