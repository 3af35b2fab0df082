use std::collections::{BTreeSet, HashMap};

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::classify::classify_type;
use crate::markers::CompiledMarkers;
use crate::model::{
    weekday_name, ClassifiedShipment, InvoiceAggregate, RawCarrierRecord, RocketLabel,
};
use crate::normalize::normalize_invoice;

/// Reconciliation result: the deduplicated, sorted per-shipment detail,
/// the full set of carrier keys (for the unmatched-invoice check), and the
/// count of carrier rows without a resolvable key.
#[derive(Debug)]
pub struct ReconcileOutput {
    pub detail: Vec<ClassifiedShipment>,
    pub carrier_keys: BTreeSet<String>,
    pub rows_without_key: usize,
}

/// Left-join aggregates against the carrier export on invoice key and
/// derive the per-shipment fields.
///
/// When the carrier export carries duplicate invoice rows, the first
/// occurrence in carrier input order wins. Aggregates are unique per key,
/// so the output is one row per invoice, sorted by (ship_date nulls last,
/// invoice).
pub fn reconcile(
    aggregates: &[InvoiceAggregate],
    carrier: &[RawCarrierRecord],
    markers: &CompiledMarkers,
) -> ReconcileOutput {
    let mut index: HashMap<String, &RawCarrierRecord> = HashMap::new();
    let mut carrier_keys = BTreeSet::new();
    let mut rows_without_key = 0usize;

    for record in carrier {
        let Some(key) = normalize_invoice(&record.invoice_text) else {
            rows_without_key += 1;
            continue;
        };
        carrier_keys.insert(key.clone());
        index.entry(key).or_insert(record);
    }

    let mut detail: Vec<ClassifiedShipment> = aggregates
        .iter()
        .map(|agg| {
            let hit = index.get(&agg.invoice).copied();

            let ship_date = hit.and_then(|c| parse_date(&c.ship_date));
            let weekday = ship_date.map(weekday_name).unwrap_or("").to_string();
            let day_of_month = ship_date.map(|d| d.day());

            let rocket_label = hit
                .map(|c| markers.rocket_label(&c.annotation))
                .unwrap_or(RocketLabel::None);

            let counts = agg.counts;
            let yeonmakgi_rocket =
                u8::from(counts.yeonmakgi > 0 && rocket_label != RocketLabel::None);

            let is_jeju = hit.map(|c| numeric_gt_zero(&c.jeju)).unwrap_or(false);
            let is_ferry = hit
                .map(|c| numeric_gt_zero(&c.pickup_ferry) || numeric_gt_zero(&c.delivery_ferry))
                .unwrap_or(false);

            ClassifiedShipment {
                invoice: agg.invoice.clone(),
                counts,
                ship_type: classify_type(counts.yeonmakgi, counts.beoksdelta, counts.hwaksan),
                ship_date,
                weekday,
                day_of_month,
                rocket_label,
                yeonmakgi_rocket,
                is_jeju,
                is_ferry,
            }
        })
        .collect();

    detail.sort_by(|a, b| match (a.ship_date, b.ship_date) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.invoice.cmp(&b.invoice)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.invoice.cmp(&b.invoice),
    });

    ReconcileOutput {
        detail,
        carrier_keys,
        rows_without_key,
    }
}

/// Best-effort date parsing for carrier ship-date cells.
///
/// Accepts the formats Korean carrier exports actually contain: ISO and
/// slash/dot-separated dates, eight-digit `YYYYMMDD`, and any of those
/// with a trailing time component. Unparseable or empty input is `None`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y%m%d"];
    const DATETIME_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
    ];

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }

    // Date-plus-trailing-garbage: retry on the first whitespace-split token
    if let Some(token) = trimmed.split_whitespace().next() {
        if token != trimmed {
            for fmt in DATE_FORMATS {
                if let Ok(date) = NaiveDate::parse_from_str(token, fmt) {
                    return Some(date);
                }
            }
        }
    }

    None
}

fn numeric_gt_zero(text: &str) -> bool {
    text.trim().parse::<f64>().map(|v| v > 0.0).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::Markers;
    use crate::model::CategoryCounts;

    fn agg(invoice: &str, y: i64, b: i64, h: i64) -> InvoiceAggregate {
        InvoiceAggregate {
            invoice: invoice.into(),
            counts: CategoryCounts {
                yeonmakgi: y,
                beoksdelta: b,
                hwaksan: h,
            },
        }
    }

    fn carrier(invoice: &str, date: &str, annotation: &str) -> RawCarrierRecord {
        RawCarrierRecord {
            invoice_text: invoice.into(),
            ship_date: date.into(),
            annotation: annotation.into(),
            ..Default::default()
        }
    }

    fn markers() -> CompiledMarkers {
        Markers::default().compile().unwrap()
    }

    #[test]
    fn join_derives_date_weekday_and_label() {
        let aggs = vec![agg("1234-5678-9012", 2, 0, 0)];
        let lotte = vec![carrier("123456789012", "2025-08-05", "뱀이싹 2개입")];
        let out = reconcile(&aggs, &lotte, &markers());

        assert_eq!(out.detail.len(), 1);
        let row = &out.detail[0];
        assert_eq!(row.ship_date, NaiveDate::from_ymd_opt(2025, 8, 5));
        assert_eq!(row.weekday, "화");
        assert_eq!(row.day_of_month, Some(5));
        assert_eq!(row.rocket_label, RocketLabel::Processed);
        assert_eq!(row.yeonmakgi_rocket, 1);
    }

    #[test]
    fn unmatched_aggregate_keeps_null_carrier_fields() {
        let aggs = vec![agg("1234-5678-9012", 0, 1, 0)];
        let out = reconcile(&aggs, &[], &markers());

        let row = &out.detail[0];
        assert_eq!(row.ship_date, None);
        assert_eq!(row.weekday, "");
        assert_eq!(row.day_of_month, None);
        assert_eq!(row.rocket_label, RocketLabel::None);
        assert_eq!(row.yeonmakgi_rocket, 0);
        assert!(!row.is_jeju);
        assert!(!row.is_ferry);
    }

    #[test]
    fn rocket_flag_requires_both_yeonmakgi_and_label() {
        let aggs = vec![agg("1111-2222-3333", 0, 2, 0)];
        let lotte = vec![carrier("111122223333", "2025-08-01", "뱀이싹 20개")];
        let out = reconcile(&aggs, &lotte, &markers());
        // label present but no yeonmakgi
        assert_eq!(out.detail[0].rocket_label, RocketLabel::Simple);
        assert_eq!(out.detail[0].yeonmakgi_rocket, 0);
    }

    #[test]
    fn duplicate_carrier_rows_first_occurrence_wins() {
        let aggs = vec![agg("1234-5678-9012", 1, 0, 0)];
        let lotte = vec![
            carrier("123456789012", "2025-08-03", ""),
            carrier("123456789012", "2025-08-09", "뱀이싹 2개입"),
        ];
        let out = reconcile(&aggs, &lotte, &markers());
        assert_eq!(out.detail[0].ship_date, NaiveDate::from_ymd_opt(2025, 8, 3));
        assert_eq!(out.detail[0].rocket_label, RocketLabel::None);
    }

    #[test]
    fn sorted_by_date_nulls_last_then_invoice() {
        let aggs = vec![
            agg("1111-1111-1111", 0, 0, 0),
            agg("2222-2222-2222", 0, 0, 0),
            agg("3333-3333-3333", 0, 0, 0),
        ];
        let lotte = vec![
            carrier("333333333333", "2025-08-02", ""),
            carrier("111111111111", "2025-08-10", ""),
        ];
        let out = reconcile(&aggs, &lotte, &markers());
        let order: Vec<&str> = out.detail.iter().map(|s| s.invoice.as_str()).collect();
        assert_eq!(
            order,
            vec!["3333-3333-3333", "1111-1111-1111", "2222-2222-2222"]
        );
    }

    #[test]
    fn surcharge_flags_from_numeric_fields() {
        let aggs = vec![agg("1234-5678-9012", 0, 0, 0)];
        let lotte = vec![RawCarrierRecord {
            invoice_text: "123456789012".into(),
            ship_date: "2025-08-05".into(),
            annotation: String::new(),
            jeju: "1".into(),
            pickup_ferry: "0".into(),
            delivery_ferry: "2500".into(),
        }];
        let out = reconcile(&aggs, &lotte, &markers());
        assert!(out.detail[0].is_jeju);
        assert!(out.detail[0].is_ferry);
    }

    #[test]
    fn non_numeric_surcharge_text_is_false() {
        let aggs = vec![agg("1234-5678-9012", 0, 0, 0)];
        let lotte = vec![RawCarrierRecord {
            invoice_text: "123456789012".into(),
            jeju: "해당없음".into(),
            ..Default::default()
        }];
        let out = reconcile(&aggs, &lotte, &markers());
        assert!(!out.detail[0].is_jeju);
    }

    #[test]
    fn date_formats_best_effort() {
        assert_eq!(parse_date("2025-08-05"), NaiveDate::from_ymd_opt(2025, 8, 5));
        assert_eq!(parse_date("2025/08/05"), NaiveDate::from_ymd_opt(2025, 8, 5));
        assert_eq!(parse_date("2025.8.5"), NaiveDate::from_ymd_opt(2025, 8, 5));
        assert_eq!(parse_date("20250805"), NaiveDate::from_ymd_opt(2025, 8, 5));
        assert_eq!(
            parse_date("2025-08-05 14:30:00"),
            NaiveDate::from_ymd_opt(2025, 8, 5)
        );
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("집하전"), None);
    }

    #[test]
    fn carrier_rows_without_key_counted() {
        let lotte = vec![carrier("", "2025-08-01", ""), carrier("123456789012", "", "")];
        let out = reconcile(&[], &lotte, &markers());
        assert_eq!(out.rows_without_key, 1);
        assert!(out.carrier_keys.contains("1234-5678-9012"));
    }
}
