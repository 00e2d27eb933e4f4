//! Parsing of the analysis JSON contract out of free-form LLM output.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use super::types::{AnalyzedMilestone, Discrepancy, EventAnalysis};
use crate::entity::extraction::find_embedded_json;

// Wire structs are lenient: every field defaults, dates arrive as strings
// and are dropped rather than failing the whole response when malformed.
#[derive(Debug, Deserialize)]
struct WireAnalysis {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    timeline: Vec<WireMilestone>,
    #[serde(default)]
    key_highlights: Vec<String>,
    #[serde(default)]
    discrepancies: Vec<WireDiscrepancy>,
    #[serde(default)]
    verified_facts: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct WireMilestone {
    #[serde(default)]
    date: String,
    #[serde(default)]
    event: String,
    #[serde(default)]
    source: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireDiscrepancy {
    #[serde(default)]
    issue: String,
    #[serde(default)]
    sources: Vec<String>,
    #[serde(default)]
    details: String,
}

/// Parse an LLM analysis response. Fails when no JSON object can be found
/// or the object carries neither a summary nor any timeline entries.
pub fn parse_analysis_response(response: &str) -> Result<EventAnalysis> {
    let json_text = find_embedded_json(response)
        .ok_or_else(|| anyhow!("No JSON object found in analysis response"))?;
    let wire: WireAnalysis = serde_json::from_str(json_text)?;

    let timeline: Vec<AnalyzedMilestone> = wire
        .timeline
        .into_iter()
        .filter(|m| !m.event.trim().is_empty())
        .map(|m| AnalyzedMilestone {
            date: NaiveDate::parse_from_str(m.date.trim(), "%Y-%m-%d").ok(),
            description: m.event.trim().to_string(),
            source: m.source.filter(|s| !s.trim().is_empty()),
        })
        .collect();

    if wire.summary.trim().is_empty() && timeline.is_empty() {
        return Err(anyhow!("Analysis response carried no summary or timeline"));
    }

    Ok(EventAnalysis {
        summary: wire.summary.trim().to_string(),
        timeline,
        key_highlights: wire.key_highlights,
        discrepancies: wire
            .discrepancies
            .into_iter()
            .filter(|d| !d.issue.trim().is_empty())
            .map(|d| Discrepancy {
                issue: d.issue,
                sources: d.sources,
                details: d.details,
            })
            .collect(),
        verified_facts: wire.verified_facts,
        degraded: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_response_with_prose_wrapper() {
        let response = r#"Sure, here is the analysis:
{
    "timeline": [
        {"date": "2023-07-14", "event": "Launch from Sriharikota"},
        {"date": "mid-August", "event": "Orbit insertion"},
        {"date": "2023-08-23", "event": ""}
    ],
    "summary": "A lunar mission unfolded over six weeks.",
    "key_highlights": ["First soft landing near lunar south pole"],
    "discrepancies": [
        {"issue": "Landing time differs", "sources": ["A", "B"], "details": "A says 12:32, B says 12:34"}
    ],
    "verified_facts": ["The mission launched on July 14"]
}"#;

        let analysis = parse_analysis_response(response).unwrap();
        assert_eq!(analysis.timeline.len(), 2);
        assert!(analysis.timeline[0].date.is_some());
        // Unresolvable date strings survive as dateless milestones.
        assert!(analysis.timeline[1].date.is_none());
        assert_eq!(analysis.discrepancies.len(), 1);
        assert!(!analysis.degraded);
    }

    #[test]
    fn test_parse_rejects_empty_payload() {
        assert!(parse_analysis_response("no json").is_err());
        assert!(parse_analysis_response("{\"timeline\": [], \"summary\": \"\"}").is_err());
    }

    #[test]
    fn test_parse_tolerates_missing_optional_fields() {
        let analysis =
            parse_analysis_response("{\"summary\": \"Short summary.\"}").unwrap();
        assert!(analysis.timeline.is_empty());
        assert!(analysis.discrepancies.is_empty());
    }
}
