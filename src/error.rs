use std::path::PathBuf;

use thiserror::Error;

use crate::filter::FilterMode;
use crate::model::ProcessingStats;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Error type covering whole-run failures of the summary pipeline and the
/// IO glue around it. Per-row anomalies are never reported through this type;
/// they only show up as [`ProcessingStats`] counters.
#[derive(Debug, Error)]
pub enum ReportError {
    /// No section row produced a client record.
    #[error("no RMB client records extracted ({stats})")]
    NoRecords { stats: ProcessingStats },

    /// Aggregation succeeded but the active filter excluded every client.
    #[error("no clients left after applying the {mode} filter")]
    EmptyAfterFilter { mode: FilterMode },

    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when the requested worksheet is not in the workbook.
    #[error("missing sheet '{0}'")]
    MissingSheet(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl ReportError {
    /// Diagnostic counters carried by the failure, when it has any.
    pub fn stats(&self) -> Option<&ProcessingStats> {
        match self {
            ReportError::NoRecords { stats } => Some(stats),
            _ => None,
        }
    }
}
