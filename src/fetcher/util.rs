//! URL helpers shared by the provider clients.

use url::Url;

/// Validate that a string parses as an http(s) URL.
pub fn is_valid_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => url.scheme() == "http" || url.scheme() == "https",
        Err(_) => false,
    }
}

/// Derive a display source name from an article URL when the provider left
/// the source blank: strip `www.`, take the registrable label, title-case it.
pub fn source_from_url(article_url: &str) -> String {
    let host = Url::parse(article_url)
        .ok()
        .and_then(|url| url.host_str().map(|h| h.to_string()));

    match host {
        Some(host) => {
            let trimmed = host.strip_prefix("www.").unwrap_or(&host);
            let label = trimmed.split('.').next().unwrap_or(trimmed);
            let mut chars = label.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => "Unknown".to_string(),
            }
        }
        None => "Unknown".to_string(),
    }
}
