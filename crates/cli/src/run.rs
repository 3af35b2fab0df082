//! `gensettle run` — load both exports, run the pipeline, write the
//! workbook.

use std::path::{Path, PathBuf};

use gensettle_io::records::{extract_carrier, extract_fulfillment};
use gensettle_io::report::write_report;
use gensettle_io::{resolve_carrier, resolve_fulfillment};
use gensettle_recon::model::SettleInput;
use gensettle_recon::{RunConfig, SettleError};

use crate::exit_codes::{EXIT_CHECK_MISMATCH, EXIT_EMPTY_KEYS};
use crate::{load_input, CliError};

pub struct RunArgs {
    pub carrier: PathBuf,
    pub fulfillment: PathBuf,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub prefix: Option<String>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub fn cmd_run(args: RunArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref(), args.year, args.month, args.prefix)?;

    if config.period.is_half_set() && !args.quiet {
        eprintln!("note: year/month override needs both values; falling back to auto-detection");
    }

    let carrier_table = load_input(&args.carrier)?;
    let fulfillment_table = load_input(&args.fulfillment)?;

    let carrier_map =
        resolve_carrier(&carrier_table.headers, &config.columns.carrier).map_err(CliError::schema)?;
    let fulfillment_map = resolve_fulfillment(&fulfillment_table.headers, &config.columns.fulfillment)
        .map_err(CliError::schema)?;

    let input = SettleInput {
        carrier: extract_carrier(&carrier_table, &carrier_map),
        fulfillment: extract_fulfillment(&fulfillment_table, &fulfillment_map),
    };

    let report = gensettle_recon::run(&config, &input).map_err(|e| match e {
        SettleError::NoInvoiceKeys => CliError {
            code: EXIT_EMPTY_KEYS,
            message: e.to_string(),
            hint: Some("check the invoice column of the fulfillment export".into()),
        },
        other => CliError::usage(other.to_string()),
    })?;

    let output_path = args
        .output
        .unwrap_or_else(|| PathBuf::from(config.output.filename(report.meta.year, report.meta.month)));

    write_report(&report, &output_path).map_err(CliError::general)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        println!("{json}");
    }

    if !args.quiet {
        print_summary(&report, &output_path);
    }

    // Data-quality signal: the artifact exists, the exit code flags it.
    let checks = &report.checks;
    if !checks.unmatched.is_empty() {
        return Err(CliError {
            code: EXIT_CHECK_MISMATCH,
            message: format!("{} unmatched invoice(s), see 미매칭 sheet", checks.unmatched.len()),
            hint: None,
        });
    }
    if !checks.source_equals_reconciled || !checks.reconciled_equals_typetotal {
        return Err(CliError {
            code: EXIT_CHECK_MISMATCH,
            message: "consistency check failed, see 검증리포트 sheet".into(),
            hint: None,
        });
    }

    Ok(())
}

fn load_config(
    path: Option<&Path>,
    year: Option<i32>,
    month: Option<u32>,
    prefix: Option<String>,
) -> Result<RunConfig, CliError> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| CliError::io(format!("cannot read config {}: {e}", path.display())))?;
            RunConfig::from_toml(&text).map_err(|e| CliError::usage(e.to_string()))?
        }
        None => RunConfig::default(),
    };

    // CLI flags override the file
    if year.is_some() {
        config.period.year = year;
    }
    if month.is_some() {
        config.period.month = month;
    }
    if prefix.is_some() {
        config.output.prefix = prefix;
    }

    config
        .validate()
        .map_err(|e| CliError::usage(e.to_string()))?;
    Ok(config)
}

fn print_summary(report: &gensettle_recon::SettleReport, output_path: &Path) {
    let meta = &report.meta;
    let checks = &report.checks;

    eprintln!(
        "period: {}년 {}월 ({})",
        meta.year, meta.month, meta.period_source
    );
    let type_counts: Vec<String> = report
        .monthly_type
        .iter()
        .map(|row| format!("{}={}", row.ship_type, row.count))
        .collect();
    eprintln!(
        "{} shipment(s) — {}",
        report.detail.len(),
        type_counts.join(", "),
    );
    if meta.fulfillment_rows_without_key > 0 || meta.carrier_rows_without_key > 0 {
        eprintln!(
            "rows without invoice key: fulfillment {}, carrier {}",
            meta.fulfillment_rows_without_key, meta.carrier_rows_without_key,
        );
    }
    eprintln!(
        "checks: 원천=상세 {}, 상세=타입합계 {}, unmatched {}",
        checks.source_equals_reconciled,
        checks.reconciled_equals_typetotal,
        checks.unmatched.len(),
    );
    eprintln!("wrote {}", output_path.display());
}
