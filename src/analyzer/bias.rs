//! Lexical clickbait and subjectivity heuristics.
//!
//! A deterministic scoring function shared by the analyzer output and the
//! credibility scorer. No learned state.

use super::types::BiasReport;

const CLICKBAIT_MARKERS: &[&str] = &[
    "shocking",
    "you won't believe",
    "unbelievable",
    "secret",
    "exposed",
    "stunning",
    "mind-blowing",
    "insane",
    "miracle",
    "what happens next",
];

const SUBJECTIVE_WORDS: &[&str] = &[
    "terrible",
    "amazing",
    "worst",
    "best",
    "disaster",
    "horrific",
    "incredible",
    "outrageous",
    "devastating",
    "pathetic",
];

const CLICKBAIT_MARKER_WEIGHT: f64 = 0.10;
const EXCLAMATION_WEIGHT: f64 = 0.05;
const CAPS_WEIGHT: f64 = 0.15;
const SUBJECTIVE_WEIGHT: f64 = 0.10;

const EXCLAMATION_LIMIT: usize = 3;
const CAPS_RATIO_LIMIT: f64 = 0.5;
const SUBJECTIVE_DENSITY_LIMIT: f64 = 0.02;
const CLICKBAIT_SCORE_LIMIT: f64 = 0.15;

/// Score clickbait/subjectivity signals for a title and body excerpt.
/// The result is clamped to [0, 1] regardless of input extremes.
pub fn detect_bias(title: &str, content: &str) -> BiasReport {
    let mut score: f64 = 0.0;
    let mut flags = Vec::new();

    let title_lower = title.to_lowercase();
    for marker in CLICKBAIT_MARKERS {
        if title_lower.contains(marker) {
            score += CLICKBAIT_MARKER_WEIGHT;
            flags.push(format!("Clickbait language detected: '{}'", marker));
        }
    }

    let excerpt: String = content.chars().take(1000).collect();
    let exclamations = title.matches('!').count() + excerpt.matches('!').count();
    if exclamations > EXCLAMATION_LIMIT {
        score += EXCLAMATION_WEIGHT;
        flags.push("Excessive exclamation marks".to_string());
    }

    if caps_ratio(title) > CAPS_RATIO_LIMIT {
        score += CAPS_WEIGHT;
        flags.push("Title is mostly capitalized".to_string());
    }

    if subjective_density(&excerpt) > SUBJECTIVE_DENSITY_LIMIT {
        score += SUBJECTIVE_WEIGHT;
        flags.push("High density of subjective language".to_string());
    }

    let bias_score = score.clamp(0.0, 1.0);
    BiasReport {
        bias_score,
        is_clickbait: bias_score > CLICKBAIT_SCORE_LIMIT,
        flags,
    }
}

/// Share of alphabetic characters that are uppercase. Short titles are
/// exempt; abbreviations would dominate the ratio.
fn caps_ratio(title: &str) -> f64 {
    let letters: Vec<char> = title.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() < 10 {
        return 0.0;
    }
    let upper = letters.iter().filter(|c| c.is_uppercase()).count();
    upper as f64 / letters.len() as f64
}

fn subjective_density(text: &str) -> f64 {
    let words: Vec<String> = text
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return 0.0;
    }
    let subjective = words
        .iter()
        .filter(|w| SUBJECTIVE_WORDS.contains(&w.as_str()))
        .count();
    subjective as f64 / words.len() as f64
}
