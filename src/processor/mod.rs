//! Article processing: cleaning, date extraction, entity extraction, and
//! the result-language filter.

mod clean;
mod dates;
mod types;

pub use self::clean::clean_content;
pub use self::dates::{extract_dates, parse_published_timestamp};
pub use self::types::*;

use tracing::{debug, info};
use whatlang::Lang;

use crate::entity;
use crate::fetcher::RawArticle;
use crate::LLMParams;

/// Process a single raw article. Returns None when the article is in the
/// wrong language for this run; everything else degrades per-field rather
/// than failing.
pub async fn process_article(
    raw: RawArticle,
    language: &str,
    llm: Option<&LLMParams>,
) -> Option<ProcessedArticle> {
    let body = if raw.content.is_empty() {
        raw.description.clone()
    } else {
        raw.content.clone()
    };

    let cleaned_content = clean_content(&body);
    let full_text = format!("{} {}", raw.title, cleaned_content)
        .trim()
        .to_string();

    if !language_matches(language, &full_text) {
        debug!("Skipping article in wrong language: {}", raw.url);
        return None;
    }

    let extracted_dates = extract_dates(&cleaned_content, raw.published_at.as_deref());
    let entities = entity::extract_entities(&full_text, llm).await;

    Some(ProcessedArticle {
        raw,
        cleaned_content,
        full_text,
        extracted_dates,
        entities,
    })
}

/// Process a batch of raw articles, dropping only wrong-language entries.
pub async fn process_articles(
    raw_articles: Vec<RawArticle>,
    language: &str,
    llm: Option<&LLMParams>,
) -> Vec<ProcessedArticle> {
    let total = raw_articles.len();
    let mut processed = Vec::with_capacity(total);

    for raw in raw_articles {
        if let Some(article) = process_article(raw, language, llm).await {
            processed.push(article);
        }
    }

    info!("Processed {} of {} fetched articles", processed.len(), total);
    processed
}

/// Check detected text language against the configured two-letter code.
/// Undetectable or unreliable detections pass; unknown configured codes
/// disable the filter.
fn language_matches(configured: &str, text: &str) -> bool {
    let Some(expected) = lang_for_code(configured) else {
        return true;
    };

    match whatlang::detect(text) {
        Some(info) if info.is_reliable() => info.lang() == expected,
        _ => true,
    }
}

fn lang_for_code(code: &str) -> Option<Lang> {
    match code.to_lowercase().as_str() {
        "en" => Some(Lang::Eng),
        "es" => Some(Lang::Spa),
        "fr" => Some(Lang::Fra),
        "de" => Some(Lang::Deu),
        "it" => Some(Lang::Ita),
        "pt" => Some(Lang::Por),
        "nl" => Some(Lang::Nld),
        "ru" => Some(Lang::Rus),
        "ar" => Some(Lang::Ara),
        "ja" => Some(Lang::Jpn),
        "ko" => Some(Lang::Kor),
        "hi" => Some(Lang::Hin),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw_article(content: &str, published_at: Option<&str>) -> RawArticle {
        RawArticle {
            source: "Reuters".to_string(),
            url: "https://reuters.com/a".to_string(),
            title: "Mission update".to_string(),
            description: String::new(),
            content: content.to_string(),
            published_at: published_at.map(|s| s.to_string()),
            author: None,
        }
    }

    #[tokio::test]
    async fn test_process_article_extracts_dates_without_llm() {
        let raw = raw_article(
            "<p>The spacecraft lifted off on July 14, 2023 from Sriharikota.</p>",
            Some("2023-07-15T06:00:00Z"),
        );
        let article = process_article(raw, "en", None).await.unwrap();

        assert!(article.cleaned_content.starts_with("The spacecraft"));
        assert_eq!(article.extracted_dates.len(), 2);
        assert_eq!(
            article.representative_date(),
            Some(NaiveDate::from_ymd_opt(2023, 7, 15).unwrap())
        );
    }

    #[tokio::test]
    async fn test_wrong_language_article_is_dropped() {
        let raw = raw_article(
            "Die Raumsonde ist am Montag erfolgreich auf dem Mond gelandet und \
             die Ingenieure feierten den historischen Moment in der Zentrale.",
            None,
        );
        assert!(process_article(raw, "en", None).await.is_none());
    }

    #[tokio::test]
    async fn test_empty_body_falls_back_to_description() {
        let mut raw = raw_article("", None);
        raw.description = "Launch confirmed on 2023-07-14.".to_string();
        let article = process_article(raw, "en", None).await.unwrap();
        assert_eq!(article.extracted_dates.len(), 1);
    }

    #[test]
    fn test_language_filter_passes_unknown_codes() {
        assert!(language_matches("xx", "whatever text"));
        assert!(language_matches("en", ""));
    }
}
