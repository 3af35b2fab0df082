use std::collections::BTreeSet;

use crate::model::{ClassifiedShipment, ConsistencyReport, TypeSummaryRow};

/// Cross-validate invoice counts across the three independent tallies and
/// surface fulfillment invoices the carrier export never saw.
///
/// The unmatched set ignores month boundaries: a fulfillment key missing
/// from the carrier export is a data-quality signal wherever it's dated.
pub fn build_consistency_report(
    source_keys: &BTreeSet<String>,
    detail: &[ClassifiedShipment],
    monthly_type: &[TypeSummaryRow],
    carrier_keys: &BTreeSet<String>,
) -> ConsistencyReport {
    let reconciled_keys: BTreeSet<&str> = detail.iter().map(|s| s.invoice.as_str()).collect();

    let source_invoice_count = source_keys.len();
    let reconciled_invoice_count = reconciled_keys.len();
    let monthly_type_total: usize = monthly_type.iter().map(|row| row.count).sum();

    let unmatched: Vec<String> = source_keys.difference(carrier_keys).cloned().collect();

    ConsistencyReport {
        source_invoice_count,
        reconciled_invoice_count,
        monthly_type_total,
        source_equals_reconciled: source_invoice_count == reconciled_invoice_count,
        reconciled_equals_typetotal: reconciled_invoice_count == monthly_type_total,
        unmatched,
    }
}
