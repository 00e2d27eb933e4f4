//! NewsAPI.org client (primary article provider).

use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use serde::Deserialize;
use tokio::time::timeout;
use tracing::{debug, info};

use super::types::{RawArticle, REQUEST_TIMEOUT, USER_AGENT};
use super::util::{is_valid_url, source_from_url};
use crate::TARGET_WEB_REQUEST;

const NEWSAPI_ENDPOINT: &str = "https://newsapi.org/v2/everything";

/// Placeholder NewsAPI uses for articles withdrawn by the publisher.
const REMOVED_MARKER: &str = "[Removed]";

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
struct NewsApiArticle {
    source: Option<NewsApiSource>,
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    url: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    author: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiSource {
    name: Option<String>,
}

/// Query NewsAPI's everything endpoint for articles matching the query,
/// looking back the configured number of days.
pub async fn fetch_from_newsapi(
    client: &reqwest::Client,
    api_key: &str,
    query: &str,
    days_back: i64,
    language: &str,
    max_articles: usize,
) -> Result<Vec<RawArticle>> {
    let from_date = (Utc::now() - Duration::days(days_back))
        .format("%Y-%m-%d")
        .to_string();
    let page_size = max_articles.to_string();

    info!(target: TARGET_WEB_REQUEST, "Querying NewsAPI for '{}' (from {})", query, from_date);

    let request = client
        .get(NEWSAPI_ENDPOINT)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .query(&[
            ("q", query),
            ("apiKey", api_key),
            ("language", language),
            ("sortBy", "publishedAt"),
            ("from", &from_date),
            ("pageSize", &page_size),
        ])
        .send();

    let response = timeout(REQUEST_TIMEOUT, request)
        .await
        .map_err(|_| anyhow!("NewsAPI request timed out"))??;

    if !response.status().is_success() {
        return Err(anyhow!("NewsAPI returned status {}", response.status()));
    }

    let body: NewsApiResponse = response.json().await?;
    debug!(target: TARGET_WEB_REQUEST, "NewsAPI returned {} raw articles", body.articles.len());

    let mut articles = Vec::new();
    for item in body.articles {
        let title = match item.title {
            Some(title) if !title.is_empty() && title != REMOVED_MARKER => title,
            _ => continue,
        };
        let url = item.url.unwrap_or_default();
        if !is_valid_url(&url) {
            continue;
        }

        let source = match item.source.and_then(|s| s.name) {
            Some(name) if !name.is_empty() && name != REMOVED_MARKER => name,
            _ => source_from_url(&url),
        };

        articles.push(RawArticle {
            source,
            url,
            title,
            description: item.description.unwrap_or_default(),
            content: item.content.unwrap_or_default(),
            published_at: item.published_at.filter(|p| !p.is_empty()),
            author: item.author.filter(|a| !a.is_empty()),
        });
    }

    Ok(articles)
}
