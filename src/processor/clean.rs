//! Text cleaning: HTML stripping and whitespace/character normalization.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HTML_TAG: Regex = Regex::new(r"(?s)<[^>]+>").unwrap();
    static ref DISALLOWED: Regex = Regex::new(r#"[^\w\s.,;:!?()\-'"]"#).unwrap();
}

/// Strip HTML tags, decode the common entities, drop stray symbols while
/// keeping sentence punctuation, and collapse whitespace.
pub fn clean_content(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let without_tags = HTML_TAG.replace_all(content, " ");
    let decoded = without_tags
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ");

    let filtered = DISALLOWED.replace_all(&decoded, " ");

    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags_and_collapses_whitespace() {
        let html = "<p>The  launch <b>succeeded</b>.</p>\n\n<div>More news.</div>";
        assert_eq!(clean_content(html), "The launch succeeded. More news.");
    }

    #[test]
    fn test_decodes_common_entities() {
        assert_eq!(clean_content("A &amp; B &quot;quoted&quot;"), "A B \"quoted\"");
    }

    #[test]
    fn test_keeps_sentence_punctuation() {
        assert_eq!(
            clean_content("Dates: 2023-07-14, cost (approx.) $5!"),
            "Dates: 2023-07-14, cost (approx.) 5!"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean_content(""), "");
    }
}
