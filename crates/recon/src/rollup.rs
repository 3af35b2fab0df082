//! Daily and monthly rollups over the classified detail.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};

use crate::model::{
    weekday_name, ClassifiedShipment, DailyRollupRow, PeriodSource, RocketLabel,
    RocketSummaryRow, ShipmentType, TypeSummaryRow,
};

/// Fallback period when no override is given and no row carries a date.
pub const DEFAULT_PERIOD: (i32, u32) = (2025, 8);

/// Resolve the reporting (year, month): explicit override, else the
/// earliest non-null ship date in the detail, else the fixed default.
pub fn resolve_period(
    override_pair: Option<(i32, u32)>,
    detail: &[ClassifiedShipment],
) -> (i32, u32, PeriodSource) {
    if let Some((year, month)) = override_pair {
        return (year, month, PeriodSource::Override);
    }
    if let Some(earliest) = detail.iter().filter_map(|s| s.ship_date).min() {
        return (earliest.year(), earliest.month(), PeriodSource::Detected);
    }
    let (year, month) = DEFAULT_PERIOD;
    (year, month, PeriodSource::Default)
}

/// Number of days in a month, leap-aware.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

#[derive(Default)]
struct DayTally {
    type_invoices: [BTreeSet<String>; 3],
    processed: BTreeSet<String>,
    simple: BTreeSet<String>,
    yeonmakgi_gross: usize,
}

/// Build the dense daily rollup: one row per calendar day of the month,
/// zero-activity days included. Counts are distinct invoices; rows dated
/// outside the reporting month don't appear here (the monthly summaries
/// still include them).
pub fn build_daily_rollup(
    detail: &[ClassifiedShipment],
    year: i32,
    month: u32,
) -> Vec<DailyRollupRow> {
    let mut tallies: BTreeMap<NaiveDate, DayTally> = BTreeMap::new();

    for shipment in detail {
        let Some(date) = shipment.ship_date else {
            continue;
        };
        let tally = tallies.entry(date).or_default();
        let slot = match shipment.ship_type {
            ShipmentType::A => 0,
            ShipmentType::B => 1,
            ShipmentType::C => 2,
        };
        tally.type_invoices[slot].insert(shipment.invoice.clone());
        match shipment.rocket_label {
            RocketLabel::Processed => {
                tally.processed.insert(shipment.invoice.clone());
            }
            RocketLabel::Simple => {
                tally.simple.insert(shipment.invoice.clone());
            }
            _ => {}
        }
        tally.yeonmakgi_gross += usize::from(shipment.yeonmakgi_rocket);
    }

    (1..=days_in_month(year, month))
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .map(|date| {
            let tally = tallies.get(&date);
            DailyRollupRow {
                date,
                day: date.day(),
                weekday: weekday_name(date).to_string(),
                type_a: tally.map_or(0, |t| t.type_invoices[0].len()),
                type_b: tally.map_or(0, |t| t.type_invoices[1].len()),
                type_c: tally.map_or(0, |t| t.type_invoices[2].len()),
                type_d: 0,
                type_e: 0,
                gross_processed: tally.map_or(0, |t| t.processed.len()),
                gross_simple: tally.map_or(0, |t| t.simple.len()),
                yeonmakgi_gross: tally.map_or(0, |t| t.yeonmakgi_gross),
            }
        })
        .collect()
}

/// Distinct-invoice counts per type, fixed A/B/C domain, zero-filled.
pub fn build_monthly_type_summary(detail: &[ClassifiedShipment]) -> Vec<TypeSummaryRow> {
    let mut per_type: BTreeMap<ShipmentType, BTreeSet<&str>> = BTreeMap::new();
    for shipment in detail {
        per_type
            .entry(shipment.ship_type)
            .or_default()
            .insert(shipment.invoice.as_str());
    }

    ShipmentType::ALL
        .iter()
        .map(|&ship_type| TypeSummaryRow {
            ship_type,
            count: per_type.get(&ship_type).map_or(0, BTreeSet::len),
        })
        .collect()
}

/// Invoice counts per rocket label. The empty label is reported under the
/// `(없음)` sentinel; rows sort by count descending, label ascending, so
/// identical inputs produce identical tables.
pub fn build_monthly_rocket_summary(detail: &[ClassifiedShipment]) -> Vec<RocketSummaryRow> {
    let mut per_label: BTreeMap<&str, usize> = BTreeMap::new();
    for shipment in detail {
        *per_label
            .entry(shipment.rocket_label.summary_label())
            .or_insert(0) += 1;
    }

    let mut rows: Vec<RocketSummaryRow> = per_label
        .into_iter()
        .map(|(label, count)| RocketSummaryRow {
            label: label.to_string(),
            count,
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    rows
}
