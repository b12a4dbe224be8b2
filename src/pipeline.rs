use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::aggregate::{aggregate, sort_for_report};
use crate::credit::extract_credit_limits;
use crate::error::{ReportError, Result};
use crate::filter::{FilterMode, apply_filter};
use crate::grid::{Grid, normalize};
use crate::model::{AggregatedClient, ProcessingStats};
use crate::records::extract_records;
use crate::reporter::Reporter;

/// Options recognised by the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub filter: FilterMode,
}

impl ReportOptions {
    pub fn from_only_full(only_full: bool) -> Self {
        Self {
            filter: FilterMode::from_only_full(only_full),
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Filtered clients, largest net balance first.
    pub clients: Vec<AggregatedClient>,
    pub stats: ProcessingStats,
    pub filter: FilterMode,
}

/// Runs the whole extraction and aggregation pass over `grid`.
///
/// Fails with [`ReportError::NoRecords`] when no section row qualifies and
/// with [`ReportError::EmptyAfterFilter`] when the filter rejects everyone.
#[instrument(level = "info", skip_all, fields(rows = grid.len(), filter = %options.filter))]
pub fn summarize(
    grid: &Grid,
    options: &ReportOptions,
    reporter: &dyn Reporter,
) -> Result<Summary> {
    let normalized = normalize(grid);
    let (records, stats) = extract_records(grid, &normalized, reporter);
    info!(
        sections = stats.sections,
        records = records.len(),
        skipped = stats.skipped(),
        "extracted client records"
    );
    if records.is_empty() {
        return Err(ReportError::NoRecords { stats });
    }

    let credit_limits = extract_credit_limits(grid, &normalized, reporter);
    debug!(credit_limits = credit_limits.len(), "credit limits collected");

    let aggregated = aggregate(&records, &credit_limits);
    let aggregated_count = aggregated.len();
    let mut clients = apply_filter(aggregated, options.filter);
    if clients.is_empty() {
        return Err(ReportError::EmptyAfterFilter {
            mode: options.filter,
        });
    }
    sort_for_report(&mut clients);
    info!(
        clients = clients.len(),
        filtered_out = aggregated_count - clients.len(),
        "clients aggregated"
    );

    Ok(Summary {
        clients,
        stats,
        filter: options.filter,
    })
}
