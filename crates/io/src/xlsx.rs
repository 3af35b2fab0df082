//! Excel import via calamine. The pipeline only ever reads the first
//! sheet of each export.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use chrono::NaiveDate;

use crate::table::{float_to_text, Table};

pub fn load_first_sheet(path: &Path) -> Result<Table, String> {
    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| format!("failed to open {}: {e}", path.display()))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first = sheet_names
        .first()
        .ok_or_else(|| format!("{}: workbook contains no sheets", path.display()))?;

    let range = workbook
        .worksheet_range(first)
        .map_err(|e| format!("failed to read sheet '{first}': {e}"))?;

    let mut rows = range.rows().map(|row| {
        row.iter().map(cell_text).collect::<Vec<String>>()
    });

    let headers = rows
        .next()
        .ok_or_else(|| format!("{}: first sheet has no header row", path.display()))?;

    Ok(Table {
        headers,
        rows: rows.collect(),
    })
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => float_to_text(*n),
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::Error(_) => String::new(),
        Data::DateTime(dt) => serial_to_date_text(dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Convert a 1900-system Excel serial to `YYYY-MM-DD` text. The time
/// fraction is discarded; the carrier's 집하일자 is a date column.
fn serial_to_date_text(serial: f64) -> String {
    let days = serial.floor() as i64;
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|epoch| epoch.checked_add_signed(chrono::Duration::days(days)))
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
