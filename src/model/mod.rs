use std::fmt;
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// Canonical client identifier. The source sheet does not reliably separate a
/// client code from its display name, so one canonical string serves as both.
pub type ClientId = String;

/// Logical block of the ledger a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SectionType {
    /// Accounts receivable, marked by the `240601` account code.
    Receivables,
    /// Customer orders, marked by the `110301` account code.
    Orders,
}

impl SectionType {
    /// Account code token that marks the start of the section.
    pub fn code(self) -> &'static str {
        match self {
            SectionType::Receivables => crate::RECEIVABLES_CODE,
            SectionType::Orders => crate::ORDERS_CODE,
        }
    }

    /// Every section type, in scan order.
    pub fn all() -> [SectionType; 2] {
        [SectionType::Receivables, SectionType::Orders]
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionType::Receivables => write!(f, "receivables"),
            SectionType::Orders => write!(f, "orders"),
        }
    }
}

/// Row that starts a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionMarker {
    pub row_index: usize,
    pub section_type: SectionType,
}

/// Rows belonging to one section. `start_row` is the row after the marker and
/// `end_row` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    pub section_type: SectionType,
    pub start_row: usize,
    pub end_row: usize,
}

impl SectionSpan {
    /// Row indices covered by the span.
    pub fn rows(&self) -> std::ops::Range<usize> {
        self.start_row..self.end_row
    }

    pub fn is_empty(&self) -> bool {
        self.start_row >= self.end_row
    }
}

/// One qualifying client row extracted from a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub client_id: ClientId,
    pub client_name: String,
    pub section_type: SectionType,
    pub amount: f64,
    pub source_row: usize,
}

/// Why a section row did not produce a [`ClientRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Label lacks the RMB currency tag.
    NoRmb,
    /// Label is empty, the `nan` placeholder, or nothing but the tag.
    InvalidClient,
    /// No coercible non-zero number after the label columns.
    NoAmount,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoRmb => write!(f, "no_rmb"),
            SkipReason::InvalidClient => write!(f, "invalid_client"),
            SkipReason::NoAmount => write!(f, "no_amount"),
        }
    }
}

/// Non-fatal counters accumulated across one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingStats {
    pub no_rmb: usize,
    pub no_amount: usize,
    pub invalid_client: usize,
    /// Section rows examined, including skipped ones.
    pub rows_scanned: usize,
    /// Section markers processed.
    pub sections: usize,
}

impl ProcessingStats {
    /// Bumps the counter matching `reason`.
    pub fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::NoRmb => self.no_rmb += 1,
            SkipReason::InvalidClient => self.invalid_client += 1,
            SkipReason::NoAmount => self.no_amount += 1,
        }
    }

    /// Total rows dropped for any reason.
    pub fn skipped(&self) -> usize {
        self.no_rmb + self.no_amount + self.invalid_client
    }
}

impl AddAssign for ProcessingStats {
    fn add_assign(&mut self, other: Self) {
        self.no_rmb += other.no_rmb;
        self.no_amount += other.no_amount;
        self.invalid_client += other.invalid_client;
        self.rows_scanned += other.rows_scanned;
        self.sections += other.sections;
    }
}

impl fmt::Display for ProcessingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sections={}, rows_scanned={}, no_rmb={}, no_amount={}, invalid_client={}",
            self.sections, self.rows_scanned, self.no_rmb, self.no_amount, self.invalid_client
        )
    }
}

/// Sign of a client's net balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceStatus {
    Positive,
    Negative,
    Neutral,
}

impl BalanceStatus {
    pub fn from_net(net: f64) -> Self {
        if net > 0.0 {
            BalanceStatus::Positive
        } else if net < 0.0 {
            BalanceStatus::Negative
        } else {
            BalanceStatus::Neutral
        }
    }
}

impl fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceStatus::Positive => write!(f, "Positive"),
            BalanceStatus::Negative => write!(f, "Negative"),
            BalanceStatus::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Per-client rollup of receivables and orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedClient {
    pub client_id: ClientId,
    pub client_name: String,
    pub receivables_total: f64,
    pub orders_total: f64,
    /// `receivables_total - orders_total`.
    pub net_total: f64,
    /// Net total converted at [`EXCHANGE_RATE`](crate::EXCHANGE_RATE), rounded
    /// to two decimals.
    pub usd_equivalent: f64,
    /// Two-decimal credit limit, or empty when none was found.
    pub credit_limit_display: String,
    pub status: BalanceStatus,
}
