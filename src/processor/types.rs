//! Type definitions for the article processor.

use chrono::NaiveDate;
use serde::Serialize;

use crate::entity::ExtractedEntities;
use crate::fetcher::RawArticle;

/// Where a date mention came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DateOrigin {
    /// The provider-supplied publication timestamp.
    Metadata,
    /// Parsed out of the article body.
    BodyText,
}

/// A candidate date extracted from an article, with parse confidence.
#[derive(Debug, Clone, Serialize)]
pub struct DateMention {
    pub date: NaiveDate,
    /// Confidence in (0, 1]: metadata timestamps highest, ambiguous numeric
    /// formats lowest.
    pub confidence: f64,
    /// Surrounding text for the mention, for display.
    pub context: String,
    pub origin: DateOrigin,
}

/// An article with its processor-derived fields attached.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedArticle {
    pub raw: RawArticle,
    pub cleaned_content: String,
    /// Title plus cleaned body, the text handed to analysis.
    pub full_text: String,
    /// Ordered ascending by date.
    pub extracted_dates: Vec<DateMention>,
    pub entities: ExtractedEntities,
}

impl ProcessedArticle {
    /// The single representative date for this article: the
    /// highest-confidence mention, metadata winning ties.
    pub fn representative_date(&self) -> Option<NaiveDate> {
        self.extracted_dates
            .iter()
            .max_by(|a, b| {
                a.confidence
                    .partial_cmp(&b.confidence)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| {
                        let a_meta = a.origin == DateOrigin::Metadata;
                        let b_meta = b.origin == DateOrigin::Metadata;
                        a_meta.cmp(&b_meta)
                    })
            })
            .map(|mention| mention.date)
    }
}
