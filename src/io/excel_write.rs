use std::path::Path;

use rust_xlsxwriter::{Format, Table, TableColumn, Workbook, Worksheet};

use crate::error::Result;
use crate::pipeline::Summary;

/// Name of the sheet holding the client rollup.
pub const SUMMARY_SHEET: &str = "Summary";
/// Name of the sheet holding the processing counters.
pub const DIAGNOSTICS_SHEET: &str = "Diagnostics";

/// Column headers of the summary sheet, in write order.
pub const SUMMARY_COLUMNS: [&str; 8] = [
    "Client ID",
    "Client Name",
    "Receivables (RMB)",
    "Orders (RMB)",
    "Net RMB",
    "USD Equivalent",
    "Credit Limit",
    "Status",
];

const MONEY_FORMAT: &str = "#,##0.00";

/// Writes the summary workbook to `path`.
pub fn write_summary(path: &Path, summary: &Summary) -> Result<()> {
    let mut workbook = Workbook::new();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SUMMARY_SHEET)?;
    write_clients(worksheet, summary)?;

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(DIAGNOSTICS_SHEET)?;
    write_diagnostics(worksheet, summary)?;

    workbook.save(path)?;
    Ok(())
}

fn write_clients(worksheet: &mut Worksheet, summary: &Summary) -> Result<()> {
    let money = Format::new().set_num_format(MONEY_FORMAT);

    for (col_idx, header) in SUMMARY_COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, *header)?;
    }

    for (row_idx, client) in summary.clients.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        worksheet.write_string(row, 0, &client.client_id)?;
        worksheet.write_string(row, 1, &client.client_name)?;
        worksheet.write_number_with_format(row, 2, client.receivables_total, &money)?;
        worksheet.write_number_with_format(row, 3, client.orders_total, &money)?;
        worksheet.write_number_with_format(row, 4, client.net_total, &money)?;
        worksheet.write_number_with_format(row, 5, client.usd_equivalent, &money)?;
        if !client.credit_limit_display.is_empty() {
            worksheet.write_string(row, 6, &client.credit_limit_display)?;
        }
        worksheet.write_string(row, 7, client.status.to_string())?;
    }

    let columns: Vec<TableColumn> = SUMMARY_COLUMNS
        .iter()
        .map(|header| TableColumn::new().set_header(*header))
        .collect();
    let mut table = Table::new();
    table.set_autofilter(true).set_columns(&columns);

    let col_end = (SUMMARY_COLUMNS.len() as u16).saturating_sub(1);
    let row_end = summary.clients.len().max(1) as u32;
    worksheet.add_table(0, 0, row_end, col_end, &table)?;
    worksheet.autofit();
    Ok(())
}

fn write_diagnostics(worksheet: &mut Worksheet, summary: &Summary) -> Result<()> {
    let stats = &summary.stats;
    let entries = [
        ("sections", stats.sections),
        ("rows_scanned", stats.rows_scanned),
        ("no_rmb", stats.no_rmb),
        ("no_amount", stats.no_amount),
        ("invalid_client", stats.invalid_client),
    ];

    worksheet.write_string(0, 0, "Counter")?;
    worksheet.write_string(0, 1, "Value")?;
    for (idx, (name, value)) in entries.iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet.write_string(row, 0, *name)?;
        worksheet.write_number(row, 1, *value as f64)?;
    }

    let row = (entries.len() + 1) as u32;
    worksheet.write_string(row, 0, "filter")?;
    worksheet.write_string(row, 1, summary.filter.to_string())?;
    worksheet.autofit();
    Ok(())
}
