//! On-disk article cache, one JSON file per query.
//!
//! The cache is append-only by query key and read-then-write with no
//! concurrent-writer protection; each pipeline run owns its own data.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::types::RawArticle;

/// Cache key for a query: a readable slug plus a short hash so that queries
/// differing only in punctuation do not collide on the same file.
pub fn cache_key(query: &str) -> String {
    let slug: String = query
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>()
        .split('_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    let digest = Sha256::digest(query.to_lowercase().as_bytes());
    let short_hash: String = digest.iter().take(4).map(|b| format!("{:02x}", b)).collect();

    if slug.is_empty() {
        short_hash
    } else {
        format!("{}_{}", slug, short_hash)
    }
}

fn cache_path(cache_dir: &Path, query: &str) -> PathBuf {
    cache_dir.join(format!("{}.json", cache_key(query)))
}

/// Load cached articles for a query, if present and parseable. A corrupt
/// cache file is treated as a miss.
pub fn load(cache_dir: &Path, query: &str) -> Option<Vec<RawArticle>> {
    let path = cache_path(cache_dir, query);
    if !path.exists() {
        return None;
    }

    match fs::read_to_string(&path) {
        Ok(contents) => match serde_json::from_str::<Vec<RawArticle>>(&contents) {
            Ok(articles) => {
                debug!("Loaded {} cached articles from {}", articles.len(), path.display());
                Some(articles)
            }
            Err(e) => {
                warn!("Ignoring corrupt cache file {}: {}", path.display(), e);
                None
            }
        },
        Err(e) => {
            warn!("Failed to read cache file {}: {}", path.display(), e);
            None
        }
    }
}

/// Write fetched articles back to the cache for the query.
pub fn store(cache_dir: &Path, query: &str, articles: &[RawArticle]) -> Result<()> {
    fs::create_dir_all(cache_dir)
        .with_context(|| format!("Failed to create cache directory {}", cache_dir.display()))?;

    let path = cache_path(cache_dir, query);
    let json = serde_json::to_string_pretty(articles)?;
    fs::write(&path, json)
        .with_context(|| format!("Failed to write cache file {}", path.display()))?;

    debug!("Cached {} articles to {}", articles.len(), path.display());
    Ok(())
}
