//! Timeline assembly: merges AI-suggested milestones with article-derived
//! dated events into one ordered, deduplicated sequence.

mod tests;
mod types;

pub use self::types::*;

use std::collections::BTreeSet;

use strsim::jaro_winkler;
use tracing::{debug, info};

use crate::analyzer::{AnalyzedMilestone, EventAnalysis};
use crate::processor::ProcessedArticle;

/// Article-derived descriptions truncate the title at this length.
const COVERAGE_TITLE_CHARS: usize = 80;

/// Timelines at or below this many dated entries mark every entry major;
/// with so few events each one is a turning point.
const SMALL_TIMELINE_LIMIT: usize = 3;

/// Build a timeline from processed articles and, when available, the AI
/// analysis. With no analysis the timeline is built from article dates
/// alone (degraded but non-fatal). A degraded analysis re-derives its
/// milestones from those same article dates, so its timeline is ignored
/// here; otherwise every dated article would appear twice.
pub fn generate(
    articles: &[ProcessedArticle],
    analysis: Option<&EventAnalysis>,
    options: &TimelineOptions,
) -> Timeline {
    let mut entries: Vec<Milestone> = Vec::new();

    if let Some(analysis) = analysis.filter(|a| !a.degraded) {
        for suggested in &analysis.timeline {
            match support_for(suggested, articles) {
                Some((sources, article_urls)) => entries.push(Milestone {
                    date: suggested.date,
                    description: suggested.description.clone(),
                    sources,
                    article_urls,
                    origin: MilestoneOrigin::AiAnalysis,
                    is_major: false,
                }),
                None => {
                    debug!("Dropping unsupported AI milestone: {}", suggested.description);
                }
            }
        }
    }

    // Article-derived pseudo-milestones, in fetch order (providers return
    // newest first, which becomes the tie-break for equal dates).
    for article in articles {
        let title: String = article.raw.title.chars().take(COVERAGE_TITLE_CHARS).collect();
        entries.push(Milestone {
            date: article.representative_date(),
            description: format!("News coverage: {}", title),
            sources: BTreeSet::from([article.raw.source.clone()]),
            article_urls: BTreeSet::from([article.raw.url.clone()]),
            origin: MilestoneOrigin::ArticleDate,
            is_major: false,
        });
    }

    let merged = merge_duplicates(entries, options.similarity_threshold);

    let (mut events, undated): (Vec<Milestone>, Vec<Milestone>) =
        merged.into_iter().partition(|m| m.date.is_some());

    // Stable sort keeps insertion order for equal dates.
    events.sort_by_key(|milestone| milestone.date);

    mark_major(&mut events, options.major_source_count);

    info!(
        "Timeline assembled: {} dated events ({} major), {} undated notes",
        events.len(),
        events.iter().filter(|e| e.is_major).count(),
        undated.len()
    );

    Timeline { events, undated }
}

/// Find the supporting articles for an AI milestone: articles mentioning
/// the milestone date, else articles from the attributed source, else the
/// whole analyzed batch (the analysis drew on all of them). Returns None
/// only when there are no articles at all.
fn support_for(
    suggested: &AnalyzedMilestone,
    articles: &[ProcessedArticle],
) -> Option<(BTreeSet<String>, BTreeSet<String>)> {
    if articles.is_empty() {
        return None;
    }

    let by_date: Vec<&ProcessedArticle> = match suggested.date {
        Some(date) => articles
            .iter()
            .filter(|article| {
                article.extracted_dates.iter().any(|m| m.date == date)
                    || article.representative_date() == Some(date)
            })
            .collect(),
        None => Vec::new(),
    };

    let chosen: Vec<&ProcessedArticle> = if !by_date.is_empty() {
        by_date
    } else if let Some(source) = &suggested.source {
        let matching: Vec<&ProcessedArticle> = articles
            .iter()
            .filter(|article| article.raw.source.eq_ignore_ascii_case(source))
            .collect();
        if matching.is_empty() {
            articles.iter().collect()
        } else {
            matching
        }
    } else {
        articles.iter().collect()
    };

    let sources = chosen.iter().map(|a| a.raw.source.clone()).collect();
    let urls = chosen.iter().map(|a| a.raw.url.clone()).collect();
    Some((sources, urls))
}

/// Merge entries whose dates match and whose descriptions are
/// near-identical, unioning their supporting sets. Idempotent: merging an
/// already-merged list changes nothing.
pub fn merge_duplicates(entries: Vec<Milestone>, similarity_threshold: f64) -> Vec<Milestone> {
    let mut merged: Vec<Milestone> = Vec::new();

    for entry in entries {
        let existing = merged
            .iter_mut()
            .find(|candidate| is_duplicate(candidate, &entry, similarity_threshold));

        match existing {
            Some(candidate) => {
                candidate.sources.extend(entry.sources);
                candidate.article_urls.extend(entry.article_urls);
                // An AI flag survives the merge whichever side carried it.
                if entry.origin == MilestoneOrigin::AiAnalysis {
                    candidate.origin = MilestoneOrigin::AiAnalysis;
                }
            }
            None => merged.push(entry),
        }
    }

    merged
}

fn is_duplicate(a: &Milestone, b: &Milestone, similarity_threshold: f64) -> bool {
    if a.date != b.date {
        return false;
    }
    let similarity = jaro_winkler(
        &normalize_description(&a.description),
        &normalize_description(&b.description),
    );
    similarity >= similarity_threshold
}

/// Lowercase and collapse whitespace, and drop the boilerplate coverage
/// prefix; Jaro-Winkler rewards common prefixes, and every article-derived
/// entry would otherwise share one.
fn normalize_description(description: &str) -> String {
    let lowered = description
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    lowered
        .strip_prefix("news coverage:")
        .map(|rest| rest.trim().to_string())
        .unwrap_or(lowered)
}

/// Flag major milestones: AI-suggested entries, entries corroborated by
/// enough distinct sources, and every entry of a very small timeline.
fn mark_major(events: &mut [Milestone], major_source_count: usize) {
    let small_timeline = !events.is_empty() && events.len() <= SMALL_TIMELINE_LIMIT;

    for event in events.iter_mut() {
        event.is_major = small_timeline
            || event.origin == MilestoneOrigin::AiAnalysis
            || event.corroboration() >= major_source_count;
    }
}

impl Timeline {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.undated.is_empty()
    }

    pub fn stats(&self) -> TimelineStats {
        let dates: Vec<_> = self.events.iter().filter_map(|e| e.date).collect();
        let date_range = match (dates.iter().min(), dates.iter().max()) {
            (Some(first), Some(last)) => Some((*first, *last)),
            _ => None,
        };
        let duration_days = date_range
            .map(|(first, last)| (last - first).num_days())
            .unwrap_or(0);

        TimelineStats {
            total_events: self.events.len(),
            major_count: self.events.iter().filter(|e| e.is_major).count(),
            undated_count: self.undated.len(),
            date_range,
            duration_days,
        }
    }

    /// Plain-text timeline dump, one line per event with a major marker.
    pub fn format_for_display(&self) -> String {
        let mut lines: Vec<String> = self
            .events
            .iter()
            .map(|event| {
                let marker = if event.is_major { "* " } else { "  " };
                let date = event
                    .date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "undated".to_string());
                format!(
                    "{}{}  {} [{}]",
                    marker,
                    date,
                    event.description,
                    event.sources.iter().cloned().collect::<Vec<_>>().join(", ")
                )
            })
            .collect();

        if !self.undated.is_empty() {
            lines.push("Undated notes:".to_string());
            for note in &self.undated {
                lines.push(format!("  --          {}", note.description));
            }
        }

        lines.join("\n")
    }
}
