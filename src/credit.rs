use std::collections::BTreeMap;

use crate::amount::extract_amount;
use crate::grid::{Grid, NormalizedGrid};
use crate::identity::{CURRENCY_TAG, canonicalize_credit_label};
use crate::reporter::{ReportEvent, Reporter};
use crate::sections::mentions_credit_limit;
use crate::{AMOUNT_OFFSET, LABEL_COLUMN};

/// Canonical client name → credit limit.
pub type CreditLimits = BTreeMap<String, f64>;

/// Scans the whole grid, independent of section spans, for credit-limit rows
/// of RMB clients. A later row for the same client overwrites an earlier one.
pub fn extract_credit_limits(
    grid: &Grid,
    normalized: &NormalizedGrid,
    reporter: &dyn Reporter,
) -> CreditLimits {
    let mut limits = CreditLimits::new();

    for (index, row) in normalized.rows().iter().enumerate() {
        if !mentions_credit_limit(row) || !row.cell(LABEL_COLUMN).contains(CURRENCY_TAG) {
            continue;
        }
        let Some(label) = grid.cell(index, LABEL_COLUMN) else {
            continue;
        };
        let name = canonicalize_credit_label(&label.to_string());
        if name.is_empty() {
            continue;
        }

        let amount = grid
            .row(index)
            .and_then(|cells| extract_amount(cells, AMOUNT_OFFSET))
            .filter(|amount| *amount > 0.0);
        if let Some(amount) = amount {
            reporter.report(ReportEvent::CreditLimitFound {
                row: index,
                client: &name,
                amount,
            });
            limits.insert(name, amount);
        }
    }

    limits
}
