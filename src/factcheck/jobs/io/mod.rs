pub mod csv_read;
pub mod excel_read;
pub mod timeline;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::factcheck::jobs::error::Result;
use crate::factcheck::jobs::model::{EmploymentMatrix, FallbackCell, LabourTable};

/// A tabular source of monthly employment levels.
///
/// Implementations only differ in container format; [`EmploymentSource::load`]
/// applies the same imputation to all of them.
pub trait EmploymentSource {
    /// Location the table is read from, for diagnostics.
    fn path(&self) -> &Path;

    /// Reads the raw table without imputation.
    fn read_table(&self) -> Result<LabourTable>;

    /// Reads the table and fills missing cells from `fallback`.
    fn load(&self, fallback: FallbackCell) -> Result<EmploymentMatrix> {
        let table = self.read_table()?;
        let matrix = table.impute(fallback)?;
        info!(
            path = %self.path().display(),
            rows = matrix.len(),
            imputed = table.missing_cells(),
            "loaded employment matrix"
        );
        Ok(matrix)
    }
}

/// Delimited text export, as downloaded from the BLS data viewer.
#[derive(Debug, Clone)]
pub struct CsvSource {
    pub path: PathBuf,
    pub skip_rows: usize,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>, skip_rows: usize) -> Self {
        Self {
            path: path.into(),
            skip_rows,
        }
    }
}

impl EmploymentSource for CsvSource {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<LabourTable> {
        csv_read::read_table(&self.path, self.skip_rows)
    }
}

/// Excel workbook export; the first worksheet holds the table.
#[derive(Debug, Clone)]
pub struct WorkbookSource {
    pub path: PathBuf,
    pub skip_rows: usize,
}

impl WorkbookSource {
    pub fn new(path: impl Into<PathBuf>, skip_rows: usize) -> Self {
        Self {
            path: path.into(),
            skip_rows,
        }
    }
}

impl EmploymentSource for WorkbookSource {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<LabourTable> {
        excel_read::read_table(&self.path, self.skip_rows)
    }
}
