//! Google News RSS search client (fallback article provider).
//!
//! Google News entries carry headlines but no body text, so each hit gets a
//! follow-up page fetch with readability extraction. Failures there are
//! tolerated; an empty body just limits what the processor can derive.

use std::io::Cursor;

use anyhow::{anyhow, Result};
use feed_rs::parser;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use url::Url;

use super::types::{RawArticle, REQUEST_TIMEOUT, USER_AGENT};
use super::util::{is_valid_url, source_from_url};
use crate::TARGET_WEB_REQUEST;

const GOOGLE_NEWS_ENDPOINT: &str = "https://news.google.com/rss/search";

/// Search the Google News RSS feed for articles matching the query.
pub async fn fetch_from_gnews(
    client: &reqwest::Client,
    query: &str,
    language: &str,
    max_articles: usize,
) -> Result<Vec<RawArticle>> {
    info!(target: TARGET_WEB_REQUEST, "Querying Google News RSS for '{}'", query);

    let request = client
        .get(GOOGLE_NEWS_ENDPOINT)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .query(&[
            ("q", query),
            ("hl", language),
            ("gl", "US"),
            ("ceid", &format!("US:{}", language)),
        ])
        .send();

    let response = timeout(REQUEST_TIMEOUT, request)
        .await
        .map_err(|_| anyhow!("Google News request timed out"))??;

    if !response.status().is_success() {
        return Err(anyhow!("Google News returned status {}", response.status()));
    }

    let body = response.text().await?;
    let feed = parser::parse(Cursor::new(body))
        .map_err(|e| anyhow!("Failed to parse Google News feed: {}", e))?;

    debug!(target: TARGET_WEB_REQUEST, "Google News feed has {} entries", feed.entries.len());

    let mut articles = Vec::new();
    for entry in feed.entries.into_iter().take(max_articles) {
        let url = match entry.links.first().map(|link| link.href.clone()) {
            Some(href) if is_valid_url(&href) => href,
            _ => {
                warn!(target: TARGET_WEB_REQUEST, "Feed entry missing or invalid link, skipping");
                continue;
            }
        };

        let raw_title = entry.title.map(|t| t.content).unwrap_or_default();
        if raw_title.is_empty() {
            continue;
        }
        let (title, source) = split_headline(&raw_title, &url);

        let content = extract_page_text(client, &url).await.unwrap_or_else(|e| {
            debug!(target: TARGET_WEB_REQUEST, "Content extraction failed for {}: {}", url, e);
            String::new()
        });

        articles.push(RawArticle {
            source,
            url,
            title,
            description: entry.summary.map(|s| s.content).unwrap_or_default(),
            content,
            published_at: entry.published.map(|date| date.to_rfc3339()),
            author: None,
        });
    }

    Ok(articles)
}

/// Google News headlines are formatted "Headline - Source Name"; split off
/// the trailing source, falling back to the URL host.
fn split_headline(raw_title: &str, url: &str) -> (String, String) {
    if let Some(idx) = raw_title.rfind(" - ") {
        let (headline, source) = raw_title.split_at(idx);
        let source = source.trim_start_matches(" - ").trim();
        if !headline.trim().is_empty() && !source.is_empty() {
            return (headline.trim().to_string(), source.to_string());
        }
    }
    (raw_title.to_string(), source_from_url(url))
}

/// Fetch an article page and pull the readable body text out of it.
async fn extract_page_text(client: &reqwest::Client, article_url: &str) -> Result<String> {
    let parsed_url = Url::parse(article_url)?;

    let request = client
        .get(article_url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send();

    let response = timeout(REQUEST_TIMEOUT, request)
        .await
        .map_err(|_| anyhow!("Page fetch timed out"))??;

    if !response.status().is_success() {
        return Err(anyhow!("Page fetch returned status {}", response.status()));
    }

    let bytes = response.bytes().await?;
    let mut cursor = Cursor::new(bytes.to_vec());
    let product = readability::extractor::extract(&mut cursor, &parsed_url)
        .map_err(|e| anyhow!("Readability extraction failed: {}", e))?;

    Ok(product.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_headline_with_source_suffix() {
        let (title, source) =
            split_headline("Chandrayaan-3 lands on the Moon - Reuters", "https://reuters.com/x");
        assert_eq!(title, "Chandrayaan-3 lands on the Moon");
        assert_eq!(source, "Reuters");
    }

    #[test]
    fn test_split_headline_without_suffix_falls_back_to_host() {
        let (title, source) = split_headline("Plain headline", "https://www.bbc.co.uk/news/1");
        assert_eq!(title, "Plain headline");
        assert_eq!(source, "Bbc");
    }
}
