//! Report workbook export — the six output sheets.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use gensettle_recon::model::SettleReport;

const SHEET_DETAIL: &str = "주문상세";
const SHEET_DAILY: &str = "타입별 배송현황";
const SHEET_MONTHLY_TYPE: &str = "월간 요약(타입)";
const SHEET_MONTHLY_ROCKET: &str = "월간 요약(로켓)";
const SHEET_CHECKS: &str = "검증리포트";
const SHEET_UNMATCHED: &str = "미매칭";

const DETAIL_HEADERS: [&str; 12] = [
    "invoice",
    "집하일자",
    "요일",
    "일",
    "연막기개수",
    "벅스델타개수",
    "확산제개수",
    "type",
    "rocket_label",
    "연막기_그로스",
    "is_jeju",
    "is_doseon",
];

const DAILY_HEADERS: [&str; 10] = [
    "일",
    "요일",
    "A타입(일반)",
    "B타입(일반)",
    "C타입(일반)",
    "D타입(일반)",
    "E타입(일반)",
    "그로스(작업)",
    "그로스(단순)",
    "연막기 그로스",
];

/// Write the six-sheet settlement workbook. Output is fully determined by
/// the report value — identical reports produce identical workbooks.
pub fn write_report(report: &SettleReport, path: &Path) -> Result<(), String> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    write_detail(workbook.add_worksheet(), report, &header_format).map_err(sheet_err(SHEET_DETAIL))?;
    write_daily(workbook.add_worksheet(), report, &header_format).map_err(sheet_err(SHEET_DAILY))?;
    write_monthly_type(workbook.add_worksheet(), report, &header_format)
        .map_err(sheet_err(SHEET_MONTHLY_TYPE))?;
    write_monthly_rocket(workbook.add_worksheet(), report, &header_format)
        .map_err(sheet_err(SHEET_MONTHLY_ROCKET))?;
    write_checks(workbook.add_worksheet(), report, &header_format).map_err(sheet_err(SHEET_CHECKS))?;
    write_unmatched(workbook.add_worksheet(), report, &header_format)
        .map_err(sheet_err(SHEET_UNMATCHED))?;

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {e}"))?;
    Ok(())
}

fn sheet_err(sheet: &'static str) -> impl Fn(XlsxError) -> String {
    move |e| format!("Failed to write sheet '{sheet}': {e}")
}

fn write_header_row(
    worksheet: &mut Worksheet,
    headers: &[&str],
    format: &Format,
) -> Result<(), XlsxError> {
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, format)?;
    }
    Ok(())
}

fn write_detail(
    worksheet: &mut Worksheet,
    report: &SettleReport,
    format: &Format,
) -> Result<(), XlsxError> {
    worksheet.set_name(SHEET_DETAIL)?;
    write_header_row(worksheet, &DETAIL_HEADERS, format)?;
    worksheet.set_column_width(0, 18)?;

    for (i, shipment) in report.detail.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, &shipment.invoice)?;
        if let Some(date) = shipment.ship_date {
            worksheet.write_string(row, 1, date.format("%Y-%m-%d").to_string())?;
        }
        worksheet.write_string(row, 2, &shipment.weekday)?;
        if let Some(day) = shipment.day_of_month {
            worksheet.write_number(row, 3, day as f64)?;
        }
        worksheet.write_number(row, 4, shipment.counts.yeonmakgi as f64)?;
        worksheet.write_number(row, 5, shipment.counts.beoksdelta as f64)?;
        worksheet.write_number(row, 6, shipment.counts.hwaksan as f64)?;
        worksheet.write_string(row, 7, shipment.ship_type.as_str())?;
        worksheet.write_string(row, 8, shipment.rocket_label.as_str())?;
        worksheet.write_number(row, 9, shipment.yeonmakgi_rocket as f64)?;
        worksheet.write_boolean(row, 10, shipment.is_jeju)?;
        worksheet.write_boolean(row, 11, shipment.is_ferry)?;
    }
    Ok(())
}

fn write_daily(
    worksheet: &mut Worksheet,
    report: &SettleReport,
    format: &Format,
) -> Result<(), XlsxError> {
    worksheet.set_name(SHEET_DAILY)?;
    write_header_row(worksheet, &DAILY_HEADERS, format)?;

    for (i, daily) in report.daily.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_number(row, 0, daily.day as f64)?;
        worksheet.write_string(row, 1, &daily.weekday)?;
        worksheet.write_number(row, 2, daily.type_a as f64)?;
        worksheet.write_number(row, 3, daily.type_b as f64)?;
        worksheet.write_number(row, 4, daily.type_c as f64)?;
        worksheet.write_number(row, 5, daily.type_d as f64)?;
        worksheet.write_number(row, 6, daily.type_e as f64)?;
        worksheet.write_number(row, 7, daily.gross_processed as f64)?;
        worksheet.write_number(row, 8, daily.gross_simple as f64)?;
        worksheet.write_number(row, 9, daily.yeonmakgi_gross as f64)?;
    }
    Ok(())
}

fn write_monthly_type(
    worksheet: &mut Worksheet,
    report: &SettleReport,
    format: &Format,
) -> Result<(), XlsxError> {
    worksheet.set_name(SHEET_MONTHLY_TYPE)?;
    write_header_row(worksheet, &["type", "건수"], format)?;

    for (i, row_data) in report.monthly_type.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, row_data.ship_type.as_str())?;
        worksheet.write_number(row, 1, row_data.count as f64)?;
    }
    Ok(())
}

fn write_monthly_rocket(
    worksheet: &mut Worksheet,
    report: &SettleReport,
    format: &Format,
) -> Result<(), XlsxError> {
    worksheet.set_name(SHEET_MONTHLY_ROCKET)?;
    write_header_row(worksheet, &["rocket_label", "건수"], format)?;

    for (i, row_data) in report.monthly_rocket.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, &row_data.label)?;
        worksheet.write_number(row, 1, row_data.count as f64)?;
    }
    Ok(())
}

fn write_checks(
    worksheet: &mut Worksheet,
    report: &SettleReport,
    format: &Format,
) -> Result<(), XlsxError> {
    worksheet.set_name(SHEET_CHECKS)?;
    write_header_row(worksheet, &["항목", "값"], format)?;
    worksheet.set_column_width(0, 28)?;

    let checks = &report.checks;
    worksheet.write_string(1, 0, "사방넷 원천 송장수")?;
    worksheet.write_number(1, 1, checks.source_invoice_count as f64)?;
    worksheet.write_string(2, 0, "주문상세 송장수")?;
    worksheet.write_number(2, 1, checks.reconciled_invoice_count as f64)?;
    worksheet.write_string(3, 0, "타입별 합계 송장수(월간)")?;
    worksheet.write_number(3, 1, checks.monthly_type_total as f64)?;
    worksheet.write_string(4, 0, "일치 여부(원천=상세)")?;
    worksheet.write_boolean(4, 1, checks.source_equals_reconciled)?;
    worksheet.write_string(5, 0, "일치 여부(상세=타입합계)")?;
    worksheet.write_boolean(5, 1, checks.reconciled_equals_typetotal)?;
    Ok(())
}

fn write_unmatched(
    worksheet: &mut Worksheet,
    report: &SettleReport,
    format: &Format,
) -> Result<(), XlsxError> {
    worksheet.set_name(SHEET_UNMATCHED)?;
    write_header_row(worksheet, &["invoice(사방넷 기준, 롯데 미존재)"], format)?;
    worksheet.set_column_width(0, 32)?;

    for (i, invoice) in report.checks.unmatched.iter().enumerate() {
        worksheet.write_string((i + 1) as u32, 0, invoice)?;
    }
    Ok(())
}
