use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::{debug, instrument};

use crate::factcheck::jobs::error::{Result, ToolError};
use crate::factcheck::jobs::model::{LabourRow, LabourTable};

/// Reads a delimited employment table, skipping `skip_rows` preamble lines.
#[instrument(
    level = "debug",
    skip_all,
    fields(path = %path.display(), skip_rows = skip_rows)
)]
pub fn read_table(path: &Path, skip_rows: usize) -> Result<LabourTable> {
    let source = fs::read_to_string(path)?;
    parse_table(&source, skip_rows)
}

/// Parses a delimited employment table.
///
/// After the preamble, blank lines are dropped, the first remaining line is
/// the header and every later line is `year, cell, cell, ...`. Short rows are
/// padded with missing cells up to the header width.
pub fn parse_table(source: &str, skip_rows: usize) -> Result<LabourTable> {
    let body = source
        .lines()
        .skip(skip_rows)
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(ToolError::InvalidTable("missing header row".into()));
    }
    let columns: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let year = parse_year(record.get(0).unwrap_or_default())?;
        let mut cells = record
            .iter()
            .skip(1)
            .map(|cell| parse_cell(year, cell))
            .collect::<Result<Vec<_>>>()?;
        if cells.len() > columns.len() {
            return Err(ToolError::InvalidTable(format!(
                "year {year} has {} cells but the header names {} columns",
                cells.len(),
                columns.len()
            )));
        }
        cells.resize(columns.len(), None);
        rows.push(LabourRow { year, cells });
    }

    debug!(rows = rows.len(), columns = columns.len(), "parsed delimited table");
    Ok(LabourTable { columns, rows })
}

fn parse_year(value: &str) -> Result<i32> {
    value
        .parse::<i32>()
        .map_err(|_| ToolError::InvalidTable(format!("'{value}' is not a year")))
}

fn parse_cell(year: i32, value: &str) -> Result<Option<f64>> {
    if value.is_empty() {
        return Ok(None);
    }
    value.parse::<f64>().map(Some).map_err(|_| {
        ToolError::InvalidTable(format!("year {year} contains non-numeric cell '{value}'"))
    })
}
