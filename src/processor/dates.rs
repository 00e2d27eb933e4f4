//! Date extraction from article text and provider metadata.

use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

use super::types::{DateMention, DateOrigin};

// Confidence per parse route: metadata timestamps beat unambiguous text
// formats, which beat ambiguous numeric ones.
const CONFIDENCE_METADATA: f64 = 0.95;
const CONFIDENCE_ISO: f64 = 0.9;
const CONFIDENCE_LONG_FORM: f64 = 0.8;
const CONFIDENCE_NUMERIC: f64 = 0.6;

const CONTEXT_WINDOW: usize = 50;

lazy_static! {
    static ref ISO_DATE: Regex = Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").unwrap();
    static ref LONG_FORM_DATE: Regex = Regex::new(
        r"(?i)\b(January|February|March|April|May|June|July|August|September|October|November|December)\s+(\d{1,2}),?\s+(\d{4})\b"
    )
    .unwrap();
    static ref NUMERIC_DATE: Regex = Regex::new(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b").unwrap();
}

/// Parse a provider publication timestamp into a date. Accepts RFC 3339 and
/// a couple of laxer forms providers actually emit.
pub fn parse_published_timestamp(value: &str) -> Option<NaiveDate> {
    if value.trim().is_empty() {
        return None;
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive());
    }
    if let Ok(datetime) = DateTime::parse_from_str(value, "%a, %d %b %Y %H:%M:%S %Z") {
        return Some(datetime.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }

    None
}

/// Extract dated mentions from article text plus the publication timestamp.
/// Future dates are discarded as parse artifacts; duplicate dates collapse
/// to the highest-confidence mention. Result is ordered ascending by date.
pub fn extract_dates(text: &str, published_at: Option<&str>) -> Vec<DateMention> {
    let today = Utc::now().date_naive();
    let mut by_date: HashMap<NaiveDate, DateMention> = HashMap::new();

    if let Some(date) = published_at.and_then(parse_published_timestamp) {
        if date <= today {
            by_date.insert(
                date,
                DateMention {
                    date,
                    confidence: CONFIDENCE_METADATA,
                    context: "Article publication date".to_string(),
                    origin: DateOrigin::Metadata,
                },
            );
        }
    }

    // Patterns in descending confidence order so the first insertion for a
    // date is also the most trusted one.
    collect_matches(text, &ISO_DATE, CONFIDENCE_ISO, parse_iso, today, &mut by_date);
    collect_matches(
        text,
        &LONG_FORM_DATE,
        CONFIDENCE_LONG_FORM,
        parse_long_form,
        today,
        &mut by_date,
    );
    collect_matches(
        text,
        &NUMERIC_DATE,
        CONFIDENCE_NUMERIC,
        parse_numeric,
        today,
        &mut by_date,
    );

    let mut mentions: Vec<DateMention> = by_date.into_values().collect();
    mentions.sort_by_key(|mention| mention.date);
    mentions
}

fn collect_matches(
    text: &str,
    pattern: &Regex,
    confidence: f64,
    parse: fn(&str) -> Option<NaiveDate>,
    today: NaiveDate,
    by_date: &mut HashMap<NaiveDate, DateMention>,
) {
    for found in pattern.find_iter(text) {
        let Some(date) = parse(found.as_str()) else {
            continue;
        };
        if date > today {
            continue;
        }
        by_date.entry(date).or_insert_with(|| DateMention {
            date,
            confidence,
            context: context_around(text, found.start(), found.end()),
            origin: DateOrigin::BodyText,
        });
    }
}

fn parse_iso(candidate: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(candidate, "%Y-%m-%d").ok()
}

fn parse_long_form(candidate: &str) -> Option<NaiveDate> {
    let captures = LONG_FORM_DATE.captures(candidate)?;
    let month = captures.get(1)?.as_str();
    let day = captures.get(2)?.as_str();
    let year = captures.get(3)?.as_str();

    // chrono's %B wants the canonical capitalization.
    let mut month_chars = month.chars();
    let month_normalized = match month_chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + &month_chars.as_str().to_lowercase()
        }
        None => return None,
    };

    NaiveDate::parse_from_str(&format!("{} {} {}", month_normalized, day, year), "%B %d %Y").ok()
}

fn parse_numeric(candidate: &str) -> Option<NaiveDate> {
    let normalized = candidate.replace('-', "/");
    for format in ["%m/%d/%Y", "%d/%m/%Y", "%m/%d/%y"] {
        if let Ok(date) = NaiveDate::parse_from_str(&normalized, format) {
            return Some(date);
        }
    }
    None
}

fn context_around(text: &str, start: usize, end: usize) -> String {
    let from = start.saturating_sub(CONTEXT_WINDOW);
    let to = (end + CONTEXT_WINDOW).min(text.len());

    // Snap to char boundaries so slicing multi-byte text cannot panic.
    let from = (0..=from).rev().find(|i| text.is_char_boundary(*i)).unwrap_or(0);
    let to = (to..=text.len())
        .find(|i| text.is_char_boundary(*i))
        .unwrap_or(text.len());

    text[from..to].trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_published_rfc3339() {
        assert_eq!(
            parse_published_timestamp("2023-07-14T10:30:00Z"),
            Some(NaiveDate::from_ymd_opt(2023, 7, 14).unwrap())
        );
        assert_eq!(parse_published_timestamp(""), None);
        assert_eq!(parse_published_timestamp("yesterday"), None);
    }

    #[test]
    fn test_extract_iso_and_long_form_dates() {
        let text = "The mission launched on July 14, 2023 and landed on 2023-08-23.";
        let mentions = extract_dates(text, None);
        assert_eq!(mentions.len(), 2);
        assert_eq!(mentions[0].date, NaiveDate::from_ymd_opt(2023, 7, 14).unwrap());
        assert_eq!(mentions[1].date, NaiveDate::from_ymd_opt(2023, 8, 23).unwrap());
        assert!(mentions.iter().all(|m| m.origin == DateOrigin::BodyText));
    }

    #[test]
    fn test_metadata_mention_has_highest_confidence() {
        let text = "Coverage mentioned 2023-07-14 explicitly.";
        let mentions = extract_dates(text, Some("2023-07-22T08:00:00Z"));
        assert_eq!(mentions.len(), 2);
        let metadata: Vec<_> = mentions
            .iter()
            .filter(|m| m.origin == DateOrigin::Metadata)
            .collect();
        assert_eq!(metadata.len(), 1);
        let body_confidence = mentions
            .iter()
            .filter(|m| m.origin == DateOrigin::BodyText)
            .map(|m| m.confidence)
            .fold(0.0, f64::max);
        assert!(metadata[0].confidence > body_confidence);
    }

    #[test]
    fn test_future_dates_are_discarded() {
        let mentions = extract_dates("Scheduled for 2999-01-01.", Some("2999-06-01T00:00:00Z"));
        assert!(mentions.is_empty());
    }

    #[test]
    fn test_duplicate_dates_collapse_to_one_mention() {
        let text = "On July 14, 2023 the rocket flew. Again: 2023-07-14 was the day (07/14/2023).";
        let mentions = extract_dates(text, None);
        assert_eq!(mentions.len(), 1);
        // The ISO pattern runs first, so the surviving mention carries its confidence.
        assert!((mentions[0].confidence - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_numeric_fallback_formats() {
        let mentions = extract_dates("Reported 14/07/2023 by the wire.", None);
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].date, NaiveDate::from_ymd_opt(2023, 7, 14).unwrap());
    }

    #[test]
    fn test_multibyte_context_does_not_panic() {
        let text = "Überraschung — das Datum 2023-07-14 stand früh fest. ✓";
        let mentions = extract_dates(text, None);
        assert_eq!(mentions.len(), 1);
        assert!(mentions[0].context.contains("2023-07-14"));
    }
}
