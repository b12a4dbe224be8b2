//! Per-section extraction of client records.

use crate::amount::extract_amount;
use crate::grid::{Grid, NormalizedGrid};
use crate::identity::classify_label;
use crate::model::{ClientRecord, ProcessingStats, SectionSpan, SkipReason};
use crate::reporter::{ReportEvent, Reporter};
use crate::sections::{RowKind, classify_row, scan_sections};
use crate::{AMOUNT_OFFSET, LABEL_COLUMN};

/// Extracts the qualifying rows of one section.
///
/// Returns the records together with the counters for this section only;
/// callers merge the counters themselves.
pub fn extract_section(
    grid: &Grid,
    normalized: &NormalizedGrid,
    span: &SectionSpan,
    reporter: &dyn Reporter,
) -> (Vec<ClientRecord>, ProcessingStats) {
    let mut records = Vec::new();
    let mut stats = ProcessingStats {
        sections: 1,
        ..ProcessingStats::default()
    };

    for index in span.rows() {
        let (Some(cells), Some(normalized_row)) = (grid.row(index), normalized.row(index)) else {
            break;
        };
        // Credit ceilings are annotations, not transactions; they are neither
        // scanned nor skipped.
        if classify_row(normalized_row) == RowKind::CreditLimitRow {
            continue;
        }
        stats.rows_scanned += 1;

        let outcome = classify_label(cells.get(LABEL_COLUMN)).and_then(|client| {
            extract_amount(cells, AMOUNT_OFFSET)
                .map(|amount| (client, amount))
                .ok_or(SkipReason::NoAmount)
        });

        match outcome {
            Ok((client, amount)) => {
                let record = ClientRecord {
                    client_id: client.clone(),
                    client_name: client,
                    section_type: span.section_type,
                    amount,
                    source_row: index,
                };
                reporter.report(ReportEvent::RecordExtracted(&record));
                records.push(record);
            }
            Err(reason) => {
                stats.record_skip(reason);
                reporter.report(ReportEvent::RowSkipped {
                    row: index,
                    section: span.section_type,
                    reason,
                });
            }
        }
    }

    (records, stats)
}

/// Scans every section of the grid and collects its records.
pub fn extract_records(
    grid: &Grid,
    normalized: &NormalizedGrid,
    reporter: &dyn Reporter,
) -> (Vec<ClientRecord>, ProcessingStats) {
    let mut records = Vec::new();
    let mut stats = ProcessingStats::default();

    for (marker, span) in scan_sections(normalized) {
        reporter.report(ReportEvent::SectionFound {
            marker: &marker,
            span: &span,
        });
        let (section_records, section_stats) = extract_section(grid, normalized, &span, reporter);
        records.extend(section_records);
        stats += section_stats;
    }

    (records, stats)
}
