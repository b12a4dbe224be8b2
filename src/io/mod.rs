//! Workbook adapters around the core: worksheet → [`Grid`](crate::grid::Grid)
//! on the way in, [`Summary`] → workbook on the way out.

use std::path::Path;

use tracing::{info, instrument};

use crate::error::Result;
use crate::pipeline::{ReportOptions, Summary, summarize};
use crate::reporter::TracingReporter;

pub mod excel_read;
pub mod excel_write;

/// Reads `sheet` from the workbook at `input` and summarizes it.
#[instrument(level = "info", skip_all, fields(input = %input.display(), sheet = %sheet))]
pub fn summarize_workbook(input: &Path, sheet: &str, options: &ReportOptions) -> Result<Summary> {
    let grid = excel_read::read_grid(input, sheet)?;
    info!(rows = grid.len(), "loaded worksheet");
    summarize(&grid, options, &TracingReporter)
}

/// Summarizes the workbook at `input` and writes the report to `output`.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn workbook_to_report(
    input: &Path,
    output: &Path,
    sheet: &str,
    options: &ReportOptions,
) -> Result<Summary> {
    let summary = summarize_workbook(input, sheet, options)?;
    excel_write::write_summary(output, &summary)?;
    Ok(summary)
}
