use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};

use crate::error::{ReportError, Result};
use crate::grid::{Cell, Grid};

/// Reads a worksheet as a header-less grid.
///
/// calamine trims leading blank rows and columns from a range; they are padded
/// back so grid column 0 is sheet column A and grid row 0 is sheet row 1.
pub fn read_grid(path: &Path, sheet: &str) -> Result<Grid> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = read_required_sheet(&mut workbook, sheet)?;
    Ok(range_to_grid(&range))
}

fn read_required_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<calamine::Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| ReportError::MissingSheet(name.to_string()))?;
    let range = range_result.map_err(ReportError::from)?;
    Ok(range)
}

/// Converts a calamine range into a [`Grid`], restoring the sheet origin.
pub fn range_to_grid(range: &calamine::Range<DataType>) -> Grid {
    let (row_offset, col_offset) = range
        .start()
        .map(|(row, col)| (row as usize, col as usize))
        .unwrap_or((0, 0));

    let padding = std::iter::repeat_with(Vec::new).take(row_offset);
    let rows = range.rows().map(|row| {
        let mut cells = vec![Cell::Empty; col_offset];
        cells.extend(row.iter().map(data_to_cell));
        cells
    });

    padding.chain(rows).collect()
}

fn data_to_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::String(value) => Cell::from(value.as_str()),
        DataType::Float(value) => Cell::Number(*value),
        DataType::Int(value) => Cell::Number(*value as f64),
        DataType::Bool(value) => Cell::Text(value.to_string()),
        // Dates never carry labels, codes or amounts.
        DataType::DateTime(_) | DataType::Empty => Cell::Empty,
        other => Cell::Text(other.to_string()),
    }
}
