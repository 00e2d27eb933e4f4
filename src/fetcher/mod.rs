//! Article fetching for chronicle.
//!
//! Consults the on-disk cache first, then queries NewsAPI when a key is
//! configured, topping up from the Google News RSS search feed. Provider
//! failures are warnings; an empty result set is a valid outcome.

mod cache;
mod gnews;
mod newsapi;
mod types;
mod util;

pub use self::types::*;
pub use self::util::{is_valid_url, source_from_url};

use std::collections::HashSet;

use anyhow::Result;
use tracing::{info, warn};

use crate::config::Config;
use crate::TARGET_WEB_REQUEST;

/// Create the HTTP client shared by the provider calls.
pub fn create_http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .gzip(true)
        .redirect(reqwest::redirect::Policy::default())
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))
}

/// Fetch articles for a query, deduplicated by URL and capped at the
/// configured maximum.
pub async fn fetch_articles(config: &Config, query: &str) -> Result<Vec<RawArticle>> {
    if config.cache_enabled {
        if let Some(cached) = cache::load(&config.cache_dir, query) {
            info!("Using {} cached articles for '{}'", cached.len(), query);
            return Ok(cached);
        }
    }

    let client = create_http_client()?;
    let mut articles: Vec<RawArticle> = Vec::new();

    if let Some(api_key) = &config.news_api_key {
        match newsapi::fetch_from_newsapi(
            &client,
            api_key,
            query,
            config.days_back,
            &config.language,
            config.max_articles,
        )
        .await
        {
            Ok(fetched) => {
                info!(target: TARGET_WEB_REQUEST, "NewsAPI returned {} articles", fetched.len());
                articles.extend(fetched);
            }
            Err(e) => {
                warn!(target: TARGET_WEB_REQUEST, "NewsAPI fetch failed, continuing with fallback: {}", e);
            }
        }
    }

    if articles.len() < config.max_articles {
        match gnews::fetch_from_gnews(&client, query, &config.language, config.max_articles).await {
            Ok(fetched) => {
                info!(target: TARGET_WEB_REQUEST, "Google News returned {} articles", fetched.len());
                let seen: HashSet<String> = articles.iter().map(|a| a.url.clone()).collect();
                for article in fetched {
                    if articles.len() >= config.max_articles {
                        break;
                    }
                    if !seen.contains(&article.url) {
                        articles.push(article);
                    }
                }
            }
            Err(e) => {
                warn!(target: TARGET_WEB_REQUEST, "Google News fetch failed: {}", e);
            }
        }
    }

    articles.truncate(config.max_articles);

    if config.cache_enabled && !articles.is_empty() {
        if let Err(e) = cache::store(&config.cache_dir, query, &articles) {
            warn!("Failed to write article cache: {}", e);
        }
    }

    Ok(articles)
}
