//! Rendering of a pipeline report: terminal tables, plain text, or JSON.

use anyhow::Result;
use colored::Colorize;
use prettytable::{format, row, Table};

use crate::pipeline::PipelineReport;

/// Pretty JSON export of the whole report.
pub fn render_json(report: &PipelineReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Plain-text timeline dump plus summary and credibility lines.
pub fn render_text(report: &PipelineReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("Event: {}\n", report.query));
    if report.analysis.degraded {
        out.push_str("(degraded mode: AI analysis unavailable)\n");
    }
    out.push('\n');

    if !report.analysis.summary.is_empty() {
        out.push_str(&report.analysis.summary);
        out.push_str("\n\n");
    }

    out.push_str("Timeline:\n");
    out.push_str(&report.timeline.format_for_display());
    out.push('\n');

    if !report.analysis.discrepancies.is_empty() {
        out.push_str("\nDiscrepancies:\n");
        for discrepancy in &report.analysis.discrepancies {
            out.push_str(&format!(
                "- {} ({}): {}\n",
                discrepancy.issue,
                discrepancy.sources.join(" vs "),
                discrepancy.details
            ));
        }
    }

    out.push_str(&format!(
        "\nAverage source authenticity: {:.0}% ({})\n",
        report.credibility.average_authenticity * 100.0,
        report.credibility.authenticity_level
    ));

    out
}

/// Colored terminal tables for interactive use.
pub fn render_tables(report: &PipelineReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{} {}\n", "Event:".bold(), report.query));
    if report.analysis.degraded {
        out.push_str(&format!(
            "{}\n",
            "Degraded mode: AI analysis unavailable, timeline built from article dates".yellow()
        ));
    }

    if !report.analysis.summary.is_empty() {
        out.push_str(&format!("\n{}\n{}\n", "Summary".bold(), report.analysis.summary));
    }

    let mut timeline_table = Table::new();
    timeline_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    timeline_table.set_titles(row!["Date", "Event", "Sources", "Major"]);
    for event in &report.timeline.events {
        let date = event
            .date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        let major = if event.is_major { "*" } else { "" };
        timeline_table.add_row(row![
            date,
            event.description,
            event.sources.iter().cloned().collect::<Vec<_>>().join(", "),
            major
        ]);
    }
    out.push_str(&format!("\n{}\n{}", "Timeline".bold(), timeline_table));

    if !report.timeline.undated.is_empty() {
        out.push_str(&format!("{}\n", "Undated notes:".bold()));
        for note in &report.timeline.undated {
            out.push_str(&format!("  - {}\n", note.description));
        }
    }

    if !report.analysis.discrepancies.is_empty() {
        let mut discrepancy_table = Table::new();
        discrepancy_table.set_format(*format::consts::FORMAT_BOX_CHARS);
        discrepancy_table.set_titles(row!["Issue", "Sources", "Details"]);
        for discrepancy in &report.analysis.discrepancies {
            discrepancy_table.add_row(row![
                discrepancy.issue,
                discrepancy.sources.join(", "),
                discrepancy.details
            ]);
        }
        out.push_str(&format!("\n{}\n{}", "Discrepancies".bold().red(), discrepancy_table));
    }

    let mut credibility_table = Table::new();
    credibility_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    credibility_table.set_titles(row!["Source", "Score", "Assessment"]);
    for assessment in report.credibility.source_scores.values() {
        credibility_table.add_row(row![
            assessment.source,
            format!("{:.0}%", assessment.score * 100.0),
            assessment.reason
        ]);
    }
    out.push_str(&format!("\n{}\n{}", "Source credibility".bold(), credibility_table));

    let authenticity = format!(
        "Average authenticity: {:.0}% ({})",
        report.credibility.average_authenticity * 100.0,
        report.credibility.authenticity_level
    );
    let authenticity = match report.credibility.authenticity_level.as_str() {
        "High" => authenticity.green(),
        "Medium" => authenticity.yellow(),
        _ => authenticity.red(),
    };
    out.push_str(&format!("\n{}\n", authenticity));

    out
}
