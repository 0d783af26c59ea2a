use std::fmt;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::factcheck::jobs::io::EmploymentSource;
use crate::factcheck::jobs::model::LabourTable;

/// Outcome of comparing the given dataset with a reference snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Equal,
    Different,
}

impl From<bool> for Verdict {
    fn from(equal: bool) -> Self {
        if equal {
            Verdict::Equal
        } else {
            Verdict::Different
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Equal => write!(f, "equal"),
            Verdict::Different => write!(f, "different"),
        }
    }
}

/// Cell-for-cell comparison of two raw tables.
///
/// Column labels, years and cells must match in order. Two missing cells are
/// equal to each other; no imputation is applied.
pub fn tables_equal(lhs: &LabourTable, rhs: &LabourTable) -> bool {
    lhs.columns == rhs.columns
        && lhs.rows.len() == rhs.rows.len()
        && lhs
            .rows
            .iter()
            .zip(&rhs.rows)
            .all(|(left, right)| left.year == right.year && left.cells == right.cells)
}

/// Compares two sources. Read failures on either side are logged and reported
/// as [`Verdict::Different`].
#[instrument(
    level = "info",
    skip_all,
    fields(given = %given.path().display(), reference = %reference.path().display())
)]
pub fn check_equality(given: &dyn EmploymentSource, reference: &dyn EmploymentSource) -> Verdict {
    let tables = given
        .read_table()
        .and_then(|lhs| reference.read_table().map(|rhs| (lhs, rhs)));
    let verdict = match tables {
        Ok((lhs, rhs)) => Verdict::from(tables_equal(&lhs, &rhs)),
        Err(error) => {
            warn!(%error, "equality check could not read its inputs");
            Verdict::Different
        }
    };
    info!(%verdict, "equality check finished");
    verdict
}
