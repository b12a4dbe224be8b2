//! Core library for the ledger-summary command line application.
//!
//! The crate turns a free-form "Chart of Accounts Status" worksheet into a
//! per-client receivables/orders/credit-limit rollup. Sections, client labels
//! and amounts are found by scanning rather than by named columns: the
//! [`grid`] module holds the raw and normalized views, [`sections`],
//! [`identity`], [`amount`] and [`credit`] do the heuristic extraction,
//! [`records`] applies them per section, and [`aggregate`] and [`filter`]
//! build the final report. [`pipeline`] wires the stages together while the
//! [`io`] adapters handle workbooks.

pub mod aggregate;
pub mod amount;
pub mod credit;
pub mod error;
pub mod filter;
pub mod grid;
pub mod identity;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod records;
pub mod reporter;
pub mod sections;

pub use error::{ReportError, Result};
pub use filter::FilterMode;
pub use grid::{Cell, Grid};
pub use pipeline::{ReportOptions, Summary, summarize};

/// RMB per USD. Fixed; not configurable at runtime.
pub const EXCHANGE_RATE: f64 = 7.10;
/// Account code marking a receivables section.
pub const RECEIVABLES_CODE: &str = "240601";
/// Account code marking an orders section.
pub const ORDERS_CODE: &str = "110301";
/// Column holding the client label.
pub const LABEL_COLUMN: usize = 1;
/// First column that may hold an amount; columns before it are code and label.
pub const AMOUNT_OFFSET: usize = 2;
/// Worksheet read when no other sheet is requested.
pub const DEFAULT_SHEET: &str = "Chart of Accounts Status";
