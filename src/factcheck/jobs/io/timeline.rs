use std::fs;
use std::path::Path;

use tracing::{info, instrument};

use crate::factcheck::jobs::error::{Result, ToolError};
use crate::factcheck::jobs::model::AdministrationTimeline;

/// Reads a timeline file holding one change-year per line.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn read_timeline(path: &Path) -> Result<AdministrationTimeline> {
    let source = fs::read_to_string(path)?;
    let timeline = parse_timeline(&source)?;
    info!(change_years = timeline.len(), "loaded administration timeline");
    Ok(timeline)
}

/// Parses change-years from text. Whitespace-only lines are ignored; any other
/// line that is not an integer year is rejected.
pub fn parse_timeline(source: &str) -> Result<AdministrationTimeline> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            let value = line.trim();
            value
                .parse::<i32>()
                .map_err(|_| ToolError::InvalidTimelineEntry {
                    line: index + 1,
                    value: value.to_string(),
                })
        })
        .collect()
}
