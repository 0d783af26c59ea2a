use std::path::Path;

use calamine::{DataType, Range, Reader, Xlsx, open_workbook};
use tracing::{debug, instrument};

use crate::factcheck::jobs::error::{Result, ToolError};
use crate::factcheck::jobs::model::{LabourRow, LabourTable};

/// Reads the first worksheet of a workbook as an employment table.
///
/// `skip_rows` counts spreadsheet rows from row 1, regardless of where the
/// used range of the sheet begins.
#[instrument(
    level = "debug",
    skip_all,
    fields(path = %path.display(), skip_rows = skip_rows)
)]
pub fn read_table(path: &Path, skip_rows: usize) -> Result<LabourTable> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ToolError::InvalidTable("workbook has no worksheets".into()))??;
    parse_range(&range, skip_rows)
}

fn parse_range(range: &Range<DataType>, skip_rows: usize) -> Result<LabourTable> {
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let mut rows = range
        .rows()
        .skip(skip_rows.saturating_sub(first_row))
        .filter(|row| !row.iter().all(is_blank));

    let columns: Vec<String> = match rows.next() {
        Some(header) => header
            .iter()
            .skip(1)
            .map(|cell| cell_to_string(Some(cell)))
            .collect(),
        None => return Err(ToolError::InvalidTable("missing header row".into())),
    };

    let mut table_rows = Vec::new();
    for row in rows {
        let year = cell_to_year(row.first())?;
        let mut cells = row
            .iter()
            .skip(1)
            .map(|cell| cell_to_number(year, cell))
            .collect::<Result<Vec<_>>>()?;
        cells.resize(columns.len(), None);
        table_rows.push(LabourRow { year, cells });
    }

    debug!(rows = table_rows.len(), columns = columns.len(), "parsed worksheet");
    Ok(LabourTable {
        columns,
        rows: table_rows,
    })
}

fn is_blank(cell: &DataType) -> bool {
    match cell {
        DataType::Empty => true,
        DataType::String(value) => value.trim().is_empty(),
        _ => false,
    }
}

fn cell_to_year(cell: Option<&DataType>) -> Result<i32> {
    let year = match cell {
        Some(DataType::Int(value)) => i32::try_from(*value).ok(),
        Some(DataType::Float(value)) if value.fract() == 0.0 => {
            i32::try_from(*value as i64).ok()
        }
        Some(DataType::String(value)) => value.trim().parse::<i32>().ok(),
        _ => None,
    };
    year.ok_or_else(|| {
        ToolError::InvalidTable(format!("'{}' is not a year", cell_to_string(cell)))
    })
}

fn cell_to_number(year: i32, cell: &DataType) -> Result<Option<f64>> {
    match cell {
        DataType::Float(value) => Ok(Some(*value)),
        DataType::Int(value) => Ok(Some(*value as f64)),
        DataType::Empty => Ok(None),
        DataType::String(value) if value.trim().is_empty() => Ok(None),
        DataType::String(value) => value.trim().parse::<f64>().map(Some).map_err(|_| {
            ToolError::InvalidTable(format!("year {year} contains non-numeric cell '{value}'"))
        }),
        other => Err(ToolError::InvalidTable(format!(
            "year {year} contains unsupported cell '{other}'"
        ))),
    }
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
