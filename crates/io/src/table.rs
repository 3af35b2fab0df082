use std::path::Path;

/// A loaded sheet: the header row plus data rows, every cell normalized
/// to text. Numeric invoice cells and date cells survive losslessly
/// (whole floats print without a decimal point, dates as `YYYY-MM-DD`).
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Cell text by (data-row, column); out-of-range is empty, matching a
    /// ragged source row.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Load a spreadsheet-like file into a `Table`, dispatching on extension:
/// Excel family (xlsx/xlsm/xlsb/xls/ods) through calamine, everything
/// else as delimited text.
pub fn load_table(path: &Path) -> Result<Table, String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => crate::xlsx::load_first_sheet(path),
        _ => crate::csv::load(path),
    }
}

/// Render a float the way spreadsheet text expects: whole values without
/// a decimal point (invoice numbers read as numerics must round-trip).
pub fn float_to_text(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
