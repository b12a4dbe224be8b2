//! In-memory view of a ledger worksheet.
//!
//! [`Grid`] keeps the raw cells exactly as decoded from the source. Matching
//! happens against a [`NormalizedGrid`], a same-shaped copy whose cells are
//! trimmed, lower-cased text. Amounts are always read from the raw grid so
//! numeric cells keep their precision.

use std::fmt;

/// Separator placed between cells when a row is flattened into one string.
pub const ROW_JOIN_SEPARATOR: &str = " ";

/// A single heterogeneous worksheet cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cell {
    /// Missing or blank cell.
    #[default]
    Empty,
    /// Any textual value, kept verbatim.
    Text(String),
    /// Numeric value as stored in the sheet.
    Number(f64),
}

impl Cell {
    /// Trimmed, lower-cased text used for substring matching.
    pub fn normalized(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(value) => value.trim().to_lowercase(),
            Cell::Number(value) => value.to_string(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(value) => write!(f, "{value}"),
            Cell::Number(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.to_string())
        }
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value as f64)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Number(f64::from(value))
    }
}

/// Ordered rows of cells. Rows may have different widths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Cell at `(row, col)`, or `None` when the position is outside the row.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|cells| cells.get(col))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<Vec<Cell>> for Grid {
    fn from_iter<I: IntoIterator<Item = Vec<Cell>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Normalized copy of a single row plus its flattened text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRow {
    cells: Vec<String>,
    joined: String,
}

impl NormalizedRow {
    fn from_cells(raw: &[Cell]) -> Self {
        let cells: Vec<String> = raw.iter().map(Cell::normalized).collect();
        let joined = cells.join(ROW_JOIN_SEPARATOR);
        Self { cells, joined }
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Normalized text at `col`; missing cells read as the empty string.
    pub fn cell(&self, col: usize) -> &str {
        self.cells.get(col).map(String::as_str).unwrap_or_default()
    }

    /// Substring test against the joined row text. `token` is expected to be
    /// lower-case already.
    pub fn contains(&self, token: &str) -> bool {
        self.joined.contains(token)
    }
}

/// Same-shaped, normalized view of a [`Grid`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedGrid {
    rows: Vec<NormalizedRow>,
}

impl NormalizedGrid {
    pub fn rows(&self) -> &[NormalizedRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&NormalizedRow> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Builds the normalized view of `grid` without touching the original cells.
pub fn normalize(grid: &Grid) -> NormalizedGrid {
    NormalizedGrid {
        rows: grid
            .rows()
            .iter()
            .map(|row| NormalizedRow::from_cells(row))
            .collect(),
    }
}
