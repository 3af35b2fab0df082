use std::collections::BTreeMap;

use crate::markers::CompiledMarkers;
use crate::model::{CategoryCounts, InvoiceAggregate, RawFulfillmentRecord};
use crate::normalize::normalize_invoice;

/// Aggregation result: one aggregate per distinct normalized invoice key,
/// plus the count of rows whose invoice text produced no key (excluded
/// from the table but never silently dropped).
#[derive(Debug)]
pub struct AggregateOutput {
    pub aggregates: Vec<InvoiceAggregate>,
    pub rows_without_key: usize,
}

/// Group fulfillment rows by normalized invoice key and sum per-category
/// quantities.
///
/// The fold truncates each row's quantity toward zero before accumulating,
/// so fractional source quantities contribute whole numbers. A key whose
/// rows match no category yields an all-zero aggregate.
pub fn aggregate_fulfillment(
    rows: &[RawFulfillmentRecord],
    markers: &CompiledMarkers,
) -> AggregateOutput {
    let mut groups: BTreeMap<String, CategoryCounts> = BTreeMap::new();
    let mut rows_without_key = 0usize;

    for row in rows {
        let Some(key) = normalize_invoice(&row.invoice_text) else {
            rows_without_key += 1;
            continue;
        };

        let qty = row.quantity.trunc() as i64;
        let counts = groups.entry(key).or_default();
        if markers.is_yeonmakgi(&row.product_name) {
            counts.yeonmakgi += qty;
        }
        if markers.is_beoksdelta(&row.product_name) {
            counts.beoksdelta += qty;
        }
        if markers.is_hwaksan(&row.product_name) {
            counts.hwaksan += qty;
        }
    }

    AggregateOutput {
        aggregates: groups
            .into_iter()
            .map(|(invoice, counts)| InvoiceAggregate { invoice, counts })
            .collect(),
        rows_without_key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::Markers;

    fn row(invoice: &str, name: &str, qty: f64) -> RawFulfillmentRecord {
        RawFulfillmentRecord {
            invoice_text: invoice.into(),
            product_name: name.into(),
            quantity: qty,
        }
    }

    fn aggregate(rows: &[RawFulfillmentRecord]) -> AggregateOutput {
        let markers = Markers::default().compile().unwrap();
        aggregate_fulfillment(rows, &markers)
    }

    #[test]
    fn sums_quantity_across_rows_of_one_invoice() {
        let rows = vec![
            row("123456789012", "연막기 A", 3.0),
            row("1234-5678-9012", "연막기 B", 2.0),
        ];
        let out = aggregate(&rows);
        assert_eq!(out.aggregates.len(), 1);
        assert_eq!(out.aggregates[0].invoice, "1234-5678-9012");
        assert_eq!(out.aggregates[0].counts.yeonmakgi, 5);
        assert_eq!(out.aggregates[0].counts.beoksdelta, 0);
        assert_eq!(out.rows_without_key, 0);
    }

    #[test]
    fn multi_category_name_counts_into_each() {
        let rows = vec![row("123456789012", "연막기+확산제 세트", 2.0)];
        let out = aggregate(&rows);
        let counts = out.aggregates[0].counts;
        assert_eq!(counts.yeonmakgi, 2);
        assert_eq!(counts.hwaksan, 2);
        assert_eq!(counts.beoksdelta, 0);
    }

    #[test]
    fn fractional_quantity_truncates_toward_zero() {
        let rows = vec![
            row("123456789012", "벅스델타", 1.9),
            row("123456789012", "벅스델타", 2.7),
        ];
        let out = aggregate(&rows);
        assert_eq!(out.aggregates[0].counts.beoksdelta, 3); // 1 + 2
    }

    #[test]
    fn unmatched_names_yield_all_zero_counts() {
        let rows = vec![row("123456789012", "사은품 수건", 5.0)];
        let out = aggregate(&rows);
        assert_eq!(out.aggregates.len(), 1);
        assert_eq!(out.aggregates[0].counts, CategoryCounts::default());
    }

    #[test]
    fn null_key_rows_tracked_not_aggregated() {
        let rows = vec![
            row("", "연막기", 1.0),
            row("미발급", "연막기", 1.0),
            row("123456789012", "연막기", 1.0),
        ];
        let out = aggregate(&rows);
        assert_eq!(out.aggregates.len(), 1);
        assert_eq!(out.rows_without_key, 2);
    }

    #[test]
    fn keys_sorted_ascending() {
        let rows = vec![
            row("999888777666", "연막기", 1.0),
            row("111222333444", "연막기", 1.0),
        ];
        let out = aggregate(&rows);
        assert_eq!(out.aggregates[0].invoice, "1112-2233-3444");
        assert_eq!(out.aggregates[1].invoice, "9998-8877-7666");
    }
}
