//! Marker-row detection and section spans.
//!
//! Sections have no header cells to key on; a row starts a section when its
//! joined normalized text contains the section's account code anywhere. A
//! code embedded in a longer token (an invoice number, say) also matches.
//! That imprecision is accepted.

use crate::grid::{NormalizedGrid, NormalizedRow};
use crate::identity::credit_limit_re;
use crate::model::{SectionMarker, SectionSpan, SectionType};

/// What a row looks like to the scanners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Receivables,
    Orders,
    CreditLimitRow,
    Unclassified,
}

impl RowKind {
    /// Section the row opens, if it is a marker row.
    pub fn section(self) -> Option<SectionType> {
        match self {
            RowKind::Receivables => Some(SectionType::Receivables),
            RowKind::Orders => Some(SectionType::Orders),
            RowKind::CreditLimitRow | RowKind::Unclassified => None,
        }
    }

    pub fn is_section_marker(self) -> bool {
        self.section().is_some()
    }
}

/// Classifies a normalized row. Section codes win over the credit-limit
/// annotation, and the receivables code wins over the orders code.
pub fn classify_row(row: &NormalizedRow) -> RowKind {
    if row.contains(SectionType::Receivables.code()) {
        RowKind::Receivables
    } else if row.contains(SectionType::Orders.code()) {
        RowKind::Orders
    } else if mentions_credit_limit(row) {
        RowKind::CreditLimitRow
    } else {
        RowKind::Unclassified
    }
}

/// True when any cell reads "credit limit", with any whitespace (or none)
/// between the two words.
pub fn mentions_credit_limit(row: &NormalizedRow) -> bool {
    row.cells().iter().any(|cell| credit_limit_re().is_match(cell))
}

/// Ascending indices of rows whose joined text contains `code`.
pub fn find_section_indices(normalized: &NormalizedGrid, code: &str) -> Vec<usize> {
    let code = code.to_lowercase();
    normalized
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| row.contains(&code))
        .map(|(index, _)| index)
        .collect()
}

/// Span of the section whose marker sits at `marker_row`.
///
/// The span starts right after the marker and ends (exclusive) at the next
/// row carrying any known section code, or at the end of the grid.
pub fn compute_span(
    normalized: &NormalizedGrid,
    section_type: SectionType,
    marker_row: usize,
) -> SectionSpan {
    let len = normalized.len();
    let start_row = (marker_row + 1).min(len);
    let end_row = normalized
        .rows()
        .iter()
        .enumerate()
        .skip(start_row)
        .find(|(_, row)| classify_row(row).is_section_marker())
        .map(|(index, _)| index)
        .unwrap_or(len);

    SectionSpan {
        section_type,
        start_row,
        end_row,
    }
}

/// Every marker in the grid, receivables first, each list ascending.
pub fn find_markers(normalized: &NormalizedGrid) -> Vec<SectionMarker> {
    SectionType::all()
        .into_iter()
        .flat_map(|section_type| {
            find_section_indices(normalized, section_type.code())
                .into_iter()
                .map(move |row_index| SectionMarker {
                    row_index,
                    section_type,
                })
        })
        .collect()
}

/// Markers paired with their spans. Receivables and orders markers are found
/// by separate scans and each computes its own span independently.
pub fn scan_sections(normalized: &NormalizedGrid) -> Vec<(SectionMarker, SectionSpan)> {
    find_markers(normalized)
        .into_iter()
        .map(|marker| {
            let span = compute_span(normalized, marker.section_type, marker.row_index);
            (marker, span)
        })
        .collect()
}
