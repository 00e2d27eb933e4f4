//! Named-entity extraction, LLM-backed with a heuristic fallback.

use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use super::types::{Entity, EntityType, ExtractedEntities};
use super::TARGET_ENTITY;
use crate::llm::generate_llm_response;
use crate::prompts;
use crate::LLMParams;

/// Cap on how much article text is sent for extraction.
const MAX_EXTRACTION_CHARS: usize = 4000;

/// Extract entities from article text. Uses the configured LLM when
/// available; on any failure (or with no LLM at all) degrades to a
/// capitalized-phrase scan. Never fatal to the pipeline.
pub async fn extract_entities(text: &str, llm: Option<&LLMParams>) -> ExtractedEntities {
    if text.trim().is_empty() {
        return ExtractedEntities::new();
    }

    if let Some(params) = llm {
        let bounded: String = text.chars().take(MAX_EXTRACTION_CHARS).collect();
        let prompt = prompts::entity_extraction_prompt(&bounded);

        if let Some(response) = generate_llm_response(&prompt, params).await {
            match parse_entity_response(&response) {
                Ok(extracted) if !extracted.is_empty() => {
                    debug!(target: TARGET_ENTITY, "LLM extracted {} entities", extracted.len());
                    return extracted;
                }
                Ok(_) => {
                    debug!(target: TARGET_ENTITY, "LLM returned no entities, using heuristic scan");
                }
                Err(e) => {
                    warn!(target: TARGET_ENTITY, "Failed to parse entity response: {}", e);
                }
            }
        } else {
            warn!(target: TARGET_ENTITY, "No LLM response for entity extraction, using heuristic scan");
        }
    }

    heuristic_entities(text)
}

/// Parse the entity-extraction JSON contract out of an LLM response.
pub fn parse_entity_response(response: &str) -> Result<ExtractedEntities> {
    let json_text = find_embedded_json(response)
        .ok_or_else(|| anyhow!("No JSON object found in entity response"))?;
    let json: Value = serde_json::from_str(json_text)?;

    let entities = json
        .get("entities")
        .and_then(Value::as_array)
        .ok_or_else(|| anyhow!("Missing 'entities' array in response"))?;

    let mut extracted = ExtractedEntities::new();
    for entity_value in entities {
        let name = match entity_value.get("name").and_then(Value::as_str) {
            Some(name) if !name.trim().is_empty() => name,
            _ => continue,
        };
        let entity_type = entity_value
            .get("type")
            .and_then(Value::as_str)
            .map(EntityType::from)
            .unwrap_or(EntityType::Other);

        extracted.add_entity(Entity::new(name, entity_type));
    }

    Ok(extracted)
}

/// Locate the first top-level JSON object embedded in free-form LLM output.
pub fn find_embedded_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end > start {
        Some(&text[start..=end])
    } else {
        None
    }
}

lazy_static! {
    // Two or more consecutive capitalized words, allowing inner particles
    // like "of" and "the" ("Bank of England").
    static ref CAPITALIZED_PHRASE: Regex = Regex::new(
        r"\b[A-Z][a-zA-Z]+(?:\s+(?:of|the|de|van|von|al)\s+)?(?:\s*[A-Z][a-zA-Z]+)+\b"
    )
    .unwrap();
}

const ORG_MARKERS: &[&str] = &[
    "inc", "corp", "ltd", "llc", "agency", "university", "institute", "ministry",
    "department", "committee", "organization", "association", "bank", "company",
];

/// Degraded-mode entity scan: multi-word capitalized phrases, with a light
/// guess at organizations from common suffix words. Everything else is Other.
pub fn heuristic_entities(text: &str) -> ExtractedEntities {
    let mut extracted = ExtractedEntities::new();

    for capture in CAPITALIZED_PHRASE.find_iter(text).take(50) {
        let name = capture.as_str().trim();
        if name.split_whitespace().count() < 2 {
            continue;
        }

        let lowered = name.to_lowercase();
        let entity_type = if ORG_MARKERS.iter().any(|marker| {
            lowered
                .split_whitespace()
                .any(|word| word.trim_matches('.') == *marker)
        }) {
            EntityType::Organization
        } else {
            EntityType::Other
        };

        extracted.add_entity(Entity::new(name, entity_type));
    }

    extracted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entity_response_with_surrounding_prose() {
        let response = r#"Here are the entities:
{"entities": [
    {"name": "Elon Musk", "type": "PERSON"},
    {"name": "SpaceX", "type": "ORGANIZATION"},
    {"name": "", "type": "PERSON"}
]}
Hope that helps!"#;

        let extracted = parse_entity_response(response).unwrap();
        assert_eq!(extracted.len(), 2);
        assert_eq!(extracted.of_type(EntityType::Person).len(), 1);
        assert_eq!(extracted.of_type(EntityType::Organization)[0].name, "SpaceX");
    }

    #[test]
    fn test_parse_entity_response_rejects_non_json() {
        assert!(parse_entity_response("no json here").is_err());
        assert!(parse_entity_response("{\"wrong\": true}").is_err());
    }

    #[test]
    fn test_heuristic_entities_finds_capitalized_phrases() {
        let text = "The European Space Agency confirmed the landing while John Smith watched.";
        let extracted = heuristic_entities(text);
        let names: Vec<&str> = extracted.entities.iter().map(|e| e.name.as_str()).collect();
        assert!(names.iter().any(|n| n.contains("European Space Agency")));
        assert!(names.contains(&"John Smith"));
    }

    #[test]
    fn test_heuristic_entities_tags_org_markers() {
        let extracted = heuristic_entities("A statement from Acme Corp was released.");
        assert_eq!(extracted.of_type(EntityType::Organization).len(), 1);
    }
}
