use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::factcheck::jobs::error::{Result, ToolError};

/// Number of monthly observations carried by every year row.
pub const MONTHS_PER_YEAR: usize = 12;

/// Party controlling the presidency while a month is being attributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    Democrat,
    Republican,
}

impl Party {
    /// Returns the other party. The timeline only records change-years, so
    /// control strictly alternates.
    pub fn toggled(self) -> Self {
        match self {
            Party::Democrat => Party::Republican,
            Party::Republican => Party::Democrat,
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::Democrat => write!(f, "Democrat"),
            Party::Republican => write!(f, "Republican"),
        }
    }
}

/// One calendar year of month-end employment levels, in thousands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRow {
    pub year: i32,
    pub months: [i64; MONTHS_PER_YEAR],
}

impl YearRow {
    pub fn new(year: i32, months: [i64; MONTHS_PER_YEAR]) -> Self {
        Self { year, months }
    }

    /// Level at the end of December.
    pub fn last_month(&self) -> i64 {
        self.months[MONTHS_PER_YEAR - 1]
    }
}

/// Fully populated employment series ordered by ascending year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MatrixRows")]
pub struct EmploymentMatrix {
    rows: Vec<YearRow>,
}

/// Unvalidated wire shape of [`EmploymentMatrix`].
#[derive(Deserialize)]
struct MatrixRows {
    rows: Vec<YearRow>,
}

impl TryFrom<MatrixRows> for EmploymentMatrix {
    type Error = ToolError;

    fn try_from(raw: MatrixRows) -> Result<Self> {
        Self::new(raw.rows)
    }
}

impl EmploymentMatrix {
    /// Builds a matrix, rejecting rows whose years do not strictly increase.
    pub fn new(rows: Vec<YearRow>) -> Result<Self> {
        for pair in rows.windows(2) {
            if pair[1].year <= pair[0].year {
                return Err(ToolError::InvalidTable(format!(
                    "year {} follows year {}; rows must be in ascending order",
                    pair[1].year, pair[0].year
                )));
            }
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[YearRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.rows.iter().any(|row| row.year == year)
    }
}

/// Years in which control of the presidency changed hands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdministrationTimeline {
    years: BTreeSet<i32>,
}

impl AdministrationTimeline {
    pub fn new(years: impl IntoIterator<Item = i32>) -> Self {
        Self {
            years: years.into_iter().collect(),
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.years.contains(&year)
    }

    /// Change-years in ascending order.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

impl FromIterator<i32> for AdministrationTimeline {
    fn from_iter<T: IntoIterator<Item = i32>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// Signed net job change per party, in thousands.
///
/// `total_jobs` is always the sum of the two party figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobTally {
    democrat_jobs: i64,
    republican_jobs: i64,
    total_jobs: i64,
}

impl JobTally {
    /// Returns a tally with `delta` credited to `party` and to the total.
    pub fn record(self, party: Party, delta: i64) -> Self {
        let (democrat_jobs, republican_jobs) = match party {
            Party::Democrat => (self.democrat_jobs + delta, self.republican_jobs),
            Party::Republican => (self.democrat_jobs, self.republican_jobs + delta),
        };
        Self {
            democrat_jobs,
            republican_jobs,
            total_jobs: self.total_jobs + delta,
        }
    }

    pub fn democrat_jobs(&self) -> i64 {
        self.democrat_jobs
    }

    pub fn republican_jobs(&self) -> i64 {
        self.republican_jobs
    }

    pub fn total_jobs(&self) -> i64 {
        self.total_jobs
    }
}

impl fmt::Display for JobTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Democrat Jobs: {}", format_jobs(self.democrat_jobs))?;
        writeln!(f, "Republican Jobs: {}", format_jobs(self.republican_jobs))?;
        write!(f, "Total Jobs: {}", format_jobs(self.total_jobs))
    }
}

/// Formats a figure given in thousands at full scale with `,` separators.
///
/// ```
/// use factcheck_jobs::model::format_jobs;
///
/// assert_eq!(format_jobs(1234), "1,234,000");
/// assert_eq!(format_jobs(-7), "-7,000");
/// assert_eq!(format_jobs(0), "0");
/// ```
pub fn format_jobs(thousands: i64) -> String {
    let full = i128::from(thousands) * 1000;
    let digits = full.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if full < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Month column of the last row whose value replaces every missing cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackCell {
    month: usize,
}

impl FallbackCell {
    /// Builds the reference point from a 1-based month number.
    pub fn from_month_number(month: u8) -> Result<Self> {
        match usize::from(month) {
            number @ 1..=MONTHS_PER_YEAR => Ok(Self { month: number - 1 }),
            _ => Err(ToolError::InvalidTable(format!(
                "fallback month {month} is outside 1-12"
            ))),
        }
    }

    /// Zero-based month index.
    pub fn month_index(&self) -> usize {
        self.month
    }
}

impl Default for FallbackCell {
    /// October: the most recent fully observed month of the 2012 release.
    fn default() -> Self {
        Self { month: 9 }
    }
}

/// One data row as read from a source, before imputation.
#[derive(Debug, Clone, PartialEq)]
pub struct LabourRow {
    pub year: i32,
    pub cells: Vec<Option<f64>>,
}

/// Employment table as it appears in a source file: header labels after the
/// year column, and raw cells where `None` marks a missing observation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabourTable {
    pub columns: Vec<String>,
    pub rows: Vec<LabourRow>,
}

impl LabourTable {
    /// Number of missing cells across all rows.
    pub fn missing_cells(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .filter(|cell| cell.is_none())
            .count()
    }

    /// Replaces every missing cell with the fallback cell of the last row and
    /// validates the result into an [`EmploymentMatrix`].
    pub fn impute(&self, fallback: FallbackCell) -> Result<EmploymentMatrix> {
        let Some(last) = self.rows.last() else {
            return EmploymentMatrix::new(Vec::new());
        };
        let fill = last
            .cells
            .get(fallback.month_index())
            .copied()
            .flatten()
            .ok_or(ToolError::MissingFallback {
                year: last.year,
                month: fallback.month_index() + 1,
            })?;
        debug!(
            year = last.year,
            month = fallback.month_index() + 1,
            fill,
            missing = self.missing_cells(),
            "imputing missing cells"
        );

        let rows = self
            .rows
            .iter()
            .map(|row| complete_row(row, fill))
            .collect::<Result<Vec<_>>>()?;
        EmploymentMatrix::new(rows)
    }
}

fn complete_row(row: &LabourRow, fill: f64) -> Result<YearRow> {
    if row.cells.len() != MONTHS_PER_YEAR {
        return Err(ToolError::InvalidTable(format!(
            "year {} has {} monthly values, expected {MONTHS_PER_YEAR}",
            row.year,
            row.cells.len()
        )));
    }
    let mut months = [0_i64; MONTHS_PER_YEAR];
    for (slot, cell) in months.iter_mut().zip(&row.cells) {
        *slot = whole_thousands(row.year, cell.unwrap_or(fill))?;
    }
    Ok(YearRow::new(row.year, months))
}

/// Largest accepted level magnitude, in thousands.
const MAX_LEVEL: f64 = i32::MAX as f64;

fn whole_thousands(year: i32, value: f64) -> Result<i64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(ToolError::InvalidTable(format!(
            "year {year} contains non-integral level {value}"
        )));
    }
    if value.abs() > MAX_LEVEL {
        return Err(ToolError::InvalidTable(format!(
            "year {year} contains out-of-range level {value}"
        )));
    }
    Ok(value as i64)
}
