//! Numeric amount extraction from rows of unknown width.
//!
//! A row has one meaningful amount: the first non-zero number after the code
//! and label columns. Rows carrying several non-zero numbers (one per currency
//! column, for example) are not disambiguated further.

use crate::grid::Cell;

/// Coerces a cell into a number.
///
/// Text is stripped of whitespace (including non-breaking spaces), thousands
/// separators, parentheses and every other character outside `[0-9.eE+-]`
/// before parsing. Parentheses do not flip the sign.
pub fn coerce_cell(cell: &Cell) -> Option<f64> {
    let value = match cell {
        Cell::Empty => return None,
        Cell::Number(value) => *value,
        Cell::Text(text) => coerce_text(text)?,
    };
    value.is_finite().then_some(value)
}

fn coerce_text(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|ch| ch.is_ascii_digit() || matches!(ch, '.' | 'e' | 'E' | '+' | '-'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// First non-zero numeric cell at or after `offset`, scanning left to right.
pub fn extract_amount(row: &[Cell], offset: usize) -> Option<f64> {
    row.iter()
        .skip(offset)
        .filter_map(coerce_cell)
        .find(|value| *value != 0.0)
}
