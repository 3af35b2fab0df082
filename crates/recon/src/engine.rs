use std::collections::BTreeSet;

use crate::aggregate::aggregate_fulfillment;
use crate::checker::build_consistency_report;
use crate::config::RunConfig;
use crate::error::SettleError;
use crate::model::{SettleInput, SettleMeta, SettleReport};
use crate::reconcile::reconcile;
use crate::rollup::{
    build_daily_rollup, build_monthly_rocket_summary, build_monthly_type_summary, resolve_period,
};

/// Run the full settlement pipeline. Pure function of config + input;
/// reruns on unchanged inputs produce identical reports.
pub fn run(config: &RunConfig, input: &SettleInput) -> Result<SettleReport, SettleError> {
    config.validate()?;
    let markers = config.markers.compile()?;

    let aggregated = aggregate_fulfillment(&input.fulfillment, &markers);
    if aggregated.aggregates.is_empty() {
        return Err(SettleError::NoInvoiceKeys);
    }

    let reconciled = reconcile(&aggregated.aggregates, &input.carrier, &markers);

    let (year, month, period_source) =
        resolve_period(config.period.override_pair(), &reconciled.detail);

    let daily = build_daily_rollup(&reconciled.detail, year, month);
    let monthly_type = build_monthly_type_summary(&reconciled.detail);
    let monthly_rocket = build_monthly_rocket_summary(&reconciled.detail);

    let source_keys: BTreeSet<String> = aggregated
        .aggregates
        .iter()
        .map(|agg| agg.invoice.clone())
        .collect();
    let checks = build_consistency_report(
        &source_keys,
        &reconciled.detail,
        &monthly_type,
        &reconciled.carrier_keys,
    );

    Ok(SettleReport {
        meta: SettleMeta {
            year,
            month,
            period_source,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            fulfillment_rows_without_key: aggregated.rows_without_key,
            carrier_rows_without_key: reconciled.rows_without_key,
        },
        detail: reconciled.detail,
        daily,
        monthly_type,
        monthly_rocket,
        checks,
    })
}
