//! Table → raw record extraction through a resolved column map.

use gensettle_recon::model::{RawCarrierRecord, RawFulfillmentRecord};

use crate::columns::{CarrierColumnMap, FulfillmentColumnMap};
use crate::table::Table;

pub fn extract_carrier(table: &Table, map: &CarrierColumnMap) -> Vec<RawCarrierRecord> {
    (0..table.rows.len())
        .map(|row| RawCarrierRecord {
            invoice_text: table.cell(row, map.invoice).to_string(),
            ship_date: optional(table, row, map.ship_date),
            annotation: optional(table, row, map.annotation),
            jeju: optional(table, row, map.jeju),
            pickup_ferry: optional(table, row, map.pickup_ferry),
            delivery_ferry: optional(table, row, map.delivery_ferry),
        })
        .collect()
}

pub fn extract_fulfillment(table: &Table, map: &FulfillmentColumnMap) -> Vec<RawFulfillmentRecord> {
    (0..table.rows.len())
        .map(|row| RawFulfillmentRecord {
            invoice_text: table.cell(row, map.invoice).to_string(),
            product_name: table.cell(row, map.product_name).to_string(),
            quantity: parse_quantity(table.cell(row, map.quantity)),
        })
        .collect()
}

fn optional(table: &Table, row: usize, col: Option<usize>) -> String {
    col.map(|c| table.cell(row, c).to_string()).unwrap_or_default()
}

/// Quantity cells that don't parse as numbers count as zero, matching the
/// coerce-then-fill behavior the settlement sheet always had.
fn parse_quantity(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(0.0)
}
