//! Month-over-month delta aggregation.
//!
//! The matrix is walked rows-then-months. Each month is compared with the
//! month before it: the previous cell in the same row, December of the
//! previous row for January, or itself for the very first cell of the series.
//! The party flag flips whenever a row's year appears in the timeline, before
//! any of that row's months are attributed.

use tracing::{debug, info, instrument};

use crate::factcheck::jobs::model::{
    AdministrationTimeline, EmploymentMatrix, JobTally, MONTHS_PER_YEAR, Party,
};

/// Net change for one month, attributed to the party in power.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyDelta {
    pub year: i32,
    /// Zero-based month index.
    pub month: usize,
    pub party: Party,
    pub delta: i64,
}

/// Yields the attributed delta of every month in the matrix, in order.
pub fn monthly_deltas<'a>(
    matrix: &'a EmploymentMatrix,
    timeline: &'a AdministrationTimeline,
    initial_party: Party,
) -> impl Iterator<Item = MonthlyDelta> + 'a {
    let rows = matrix.rows();
    rows.iter()
        .enumerate()
        .scan(initial_party, move |party, (index, row)| {
            if timeline.contains(row.year) {
                let incoming = party.toggled();
                debug!(year = row.year, party = %incoming, "control changed");
                *party = incoming;
            }
            Some((index, row, *party))
        })
        .flat_map(move |(index, row, party)| {
            (0..MONTHS_PER_YEAR).map(move |month| {
                let previous = match (index, month) {
                    (0, 0) => row.months[0],
                    (_, 0) => rows[index - 1].last_month(),
                    _ => row.months[month - 1],
                };
                MonthlyDelta {
                    year: row.year,
                    month,
                    party,
                    delta: row.months[month] - previous,
                }
            })
        })
}

/// Folds every monthly delta into per-party and total net job counts.
///
/// An empty matrix yields a zero tally. Timeline years that never appear in
/// the matrix are inert.
#[instrument(
    level = "debug",
    skip_all,
    fields(rows = matrix.len(), change_years = timeline.len(), initial_party = %initial_party)
)]
pub fn aggregate(
    matrix: &EmploymentMatrix,
    timeline: &AdministrationTimeline,
    initial_party: Party,
) -> JobTally {
    let tally = monthly_deltas(matrix, timeline, initial_party)
        .fold(JobTally::default(), |tally, step| {
            tally.record(step.party, step.delta)
        });
    info!(
        democrat = tally.democrat_jobs(),
        republican = tally.republican_jobs(),
        total = tally.total_jobs(),
        "aggregated net job change (thousands)"
    );
    tally
}
