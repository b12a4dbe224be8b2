//! Injected diagnostics sink for the pipeline.
//!
//! The core never writes to global log state directly; it hands events to a
//! [`Reporter`]. [`TracingReporter`] forwards them to `tracing`, which is what
//! the binary uses.

use tracing::{debug, trace};

use crate::model::{ClientRecord, SectionMarker, SectionSpan, SectionType, SkipReason};

/// Something the pipeline noticed while scanning the grid.
#[derive(Debug, Clone, Copy)]
pub enum ReportEvent<'a> {
    SectionFound {
        marker: &'a SectionMarker,
        span: &'a SectionSpan,
    },
    RowSkipped {
        row: usize,
        section: SectionType,
        reason: SkipReason,
    },
    RecordExtracted(&'a ClientRecord),
    CreditLimitFound {
        row: usize,
        client: &'a str,
        amount: f64,
    },
}

pub trait Reporter {
    fn report(&self, event: ReportEvent<'_>);
}

/// Emits every event as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: ReportEvent<'_>) {
        match event {
            ReportEvent::SectionFound { marker, span } => debug!(
                section = %marker.section_type,
                marker_row = marker.row_index,
                start_row = span.start_row,
                end_row = span.end_row,
                "section found"
            ),
            ReportEvent::RowSkipped {
                row,
                section,
                reason,
            } => trace!(row, %section, %reason, "row skipped"),
            ReportEvent::RecordExtracted(record) => trace!(
                row = record.source_row,
                client = %record.client_id,
                section = %record.section_type,
                amount = record.amount,
                "record extracted"
            ),
            ReportEvent::CreditLimitFound {
                row,
                client,
                amount,
            } => debug!(row, client, amount, "credit limit found"),
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _event: ReportEvent<'_>) {}
}
