use std::path::PathBuf;

use tracing::{debug, info, instrument};

use crate::factcheck::jobs::aggregate::aggregate;
use crate::factcheck::jobs::check::{Verdict, check_equality};
use crate::factcheck::jobs::error::{Result, ToolError};
use crate::factcheck::jobs::io::timeline::read_timeline;
use crate::factcheck::jobs::io::{CsvSource, EmploymentSource, WorkbookSource};
use crate::factcheck::jobs::model::{FallbackCell, JobTally, Party};
use crate::factcheck::jobs::report::{self, EqualitySection, Report};

/// Default number of preamble lines before the CSV header used for the tally.
pub const DEFAULT_CSV_SKIP_ROWS: usize = 5;
/// Default number of preamble lines before the CSV header used for the
/// equality check.
pub const DEFAULT_CHECK_SKIP_ROWS: usize = 6;
/// Default number of preamble rows before the header of the snapshot workbook.
pub const DEFAULT_SNAPSHOT_SKIP_ROWS: usize = 13;
/// Default description of when the reference snapshot was retrieved.
pub const DEFAULT_SNAPSHOT_LABEL: &str = "October 7th 2024";

/// Inputs and knobs for one fact-check run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Employment series (delimited text).
    pub employment: PathBuf,
    /// Change-years, one per line.
    pub timeline: PathBuf,
    /// Optional reference workbook for the equality check.
    pub snapshot: Option<PathBuf>,
    /// Destination of the Markdown report.
    pub output: PathBuf,
    pub initial_party: Party,
    pub fallback: FallbackCell,
    pub csv_skip_rows: usize,
    pub check_skip_rows: usize,
    pub snapshot_skip_rows: usize,
    pub snapshot_label: String,
}

impl RunOptions {
    pub fn new(employment: impl Into<PathBuf>, timeline: impl Into<PathBuf>) -> Self {
        Self {
            employment: employment.into(),
            timeline: timeline.into(),
            snapshot: None,
            output: PathBuf::from("conclusions.md"),
            initial_party: Party::Democrat,
            fallback: FallbackCell::default(),
            csv_skip_rows: DEFAULT_CSV_SKIP_ROWS,
            check_skip_rows: DEFAULT_CHECK_SKIP_ROWS,
            snapshot_skip_rows: DEFAULT_SNAPSHOT_SKIP_ROWS,
            snapshot_label: DEFAULT_SNAPSHOT_LABEL.to_string(),
        }
    }
}

/// Loads both inputs and aggregates the net job change per party.
///
/// A bad timeline surfaces as-is; any failure to load the employment series
/// becomes [`ToolError::MissingEmploymentData`].
#[instrument(
    level = "info",
    skip_all,
    fields(employment = %options.employment.display(), timeline = %options.timeline.display())
)]
pub fn compute_tally(options: &RunOptions) -> Result<JobTally> {
    let timeline = read_timeline(&options.timeline)?;
    let source = CsvSource::new(&options.employment, options.csv_skip_rows);
    let matrix = source
        .load(options.fallback)
        .map_err(|error| ToolError::MissingEmploymentData {
            path: options.employment.clone(),
            reason: error.to_string(),
        })?;

    for year in timeline.years().filter(|year| !matrix.contains_year(*year)) {
        debug!(year, "change-year outside the employment series is ignored");
    }

    Ok(aggregate(&matrix, &timeline, options.initial_party))
}

/// Compares the employment series with the snapshot, when one is configured.
pub fn run_equality_check(options: &RunOptions) -> Option<Verdict> {
    let snapshot = options.snapshot.as_ref()?;
    let given = CsvSource::new(&options.employment, options.check_skip_rows);
    let reference = WorkbookSource::new(snapshot, options.snapshot_skip_rows);
    Some(check_equality(&given, &reference))
}

/// Runs the equality check and the aggregation, then writes the report.
///
/// The equality check never blocks the tally; a failed tally writes nothing.
#[instrument(level = "info", skip_all, fields(output = %options.output.display()))]
pub fn fact_check(options: &RunOptions) -> Result<Report> {
    let equality = run_equality_check(options).map(|verdict| EqualitySection {
        verdict,
        snapshot_label: options.snapshot_label.clone(),
    });
    let tally = compute_tally(options)?;
    let report = Report { equality, tally };
    report::write_report(&options.output, &report)?;
    info!("fact check complete");
    Ok(report)
}
