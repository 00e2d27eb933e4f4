//! Type definitions for the fetcher module.

use serde::{Deserialize, Serialize};
use tokio::time::Duration;

/// A raw article record as returned by a news provider, before any
/// processing. Derived fields live on `processor::ProcessedArticle`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawArticle {
    pub source: String,
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    /// RFC 3339 publication timestamp when the provider supplied one.
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

// Constants
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
