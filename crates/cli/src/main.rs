// GenSettle CLI - carrier/fulfillment settlement report generation

mod columns;
mod exit_codes;
mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use exit_codes::{EXIT_ERROR, EXIT_INPUT_IO, EXIT_INPUT_PARSE, EXIT_SCHEMA, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "gensettle")]
#[command(about = "Settlement report generator for carrier/fulfillment exports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile the two exports and write the settlement workbook
    #[command(after_help = "\
Exit code 7 indicates a data-quality signal: a consistency check failed or
unmatched invoices exist. The workbook is still written in that case.

Examples:
  gensettle run 롯데.xlsx 사방넷.xlsx
  gensettle run 롯데.xlsx 사방넷.xlsx --year 2025 --month 8
  gensettle run 롯데.xlsx 사방넷.xlsx --prefix 제네시스_정산 -o out.xlsx
  gensettle run 롯데.xlsx 사방넷.xlsx --config settle.toml --json")]
    Run {
        /// Carrier (롯데) export, first sheet only
        carrier: PathBuf,

        /// Fulfillment (사방넷) export, first sheet only
        fulfillment: PathBuf,

        /// Force the reporting year (needs --month; ignored alone)
        #[arg(long)]
        year: Option<i32>,

        /// Force the reporting month 1-12 (needs --year; ignored alone)
        #[arg(long)]
        month: Option<u32>,

        /// Output filename prefix
        #[arg(long)]
        prefix: Option<String>,

        /// Output file (default: {prefix}_{year}년{month}월_산출.xlsx)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// TOML config file (markers, column fragments, period, prefix)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the full report as JSON to stdout
        #[arg(long)]
        json: bool,

        /// Suppress the stderr summary
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Show how a file's headers resolve against the column fragments
    #[command(after_help = "\
Examples:
  gensettle columns 롯데.xlsx --role carrier
  gensettle columns 사방넷.xlsx --role fulfillment --config settle.toml")]
    Columns {
        /// Input file to inspect
        file: PathBuf,

        /// Which fragment set to resolve against
        #[arg(long)]
        role: Role,

        /// TOML config file with custom column fragments
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Role {
    Carrier,
    Fulfillment,
}

pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_INPUT_IO, message: msg.into(), hint: None }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self { code: EXIT_INPUT_PARSE, message: msg.into(), hint: None }
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Schema-resolution failure with the available headers as a hint.
    pub fn schema(err: gensettle_io::SchemaError) -> Self {
        Self {
            code: EXIT_SCHEMA,
            message: err.to_string(),
            hint: Some(format!("available columns: {}", err.available.join(", "))),
        }
    }
}

/// Existence check first so "no such file" routes to the IO exit code;
/// anything readable that still fails to load is a parse error.
pub fn load_input(path: &std::path::Path) -> Result<gensettle_io::Table, CliError> {
    if !path.exists() {
        return Err(CliError::io(format!(
            "cannot read {}: no such file",
            path.display()
        )));
    }
    gensettle_io::load_table(path).map_err(CliError::parse)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            carrier,
            fulfillment,
            year,
            month,
            prefix,
            output,
            config,
            json,
            quiet,
        } => run::cmd_run(run::RunArgs {
            carrier,
            fulfillment,
            year,
            month,
            prefix,
            output,
            config,
            json,
            quiet,
        }),
        Commands::Columns { file, role, config } => columns::cmd_columns(file, role, config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}
