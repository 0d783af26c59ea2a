use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool ingests employment data, aggregates it, or emits the report.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the delimited text reader.
    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a table does not follow the `Year, Jan..Dec` layout.
    #[error("invalid table structure: {0}")]
    InvalidTable(String),

    /// Raised when a line of the administration timeline is not a year.
    #[error("invalid timeline entry '{value}' on line {line}")]
    InvalidTimelineEntry { line: usize, value: String },

    /// Raised when the employment series cannot be loaded, so no tally can be
    /// computed.
    #[error("missing employment data in {path}: {reason}")]
    MissingEmploymentData { path: PathBuf, reason: String },

    /// Raised when the imputation reference cell is itself empty.
    #[error("fallback cell for month {month} of year {year} is missing")]
    MissingFallback { year: i32, month: usize },

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
