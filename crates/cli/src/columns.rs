//! `gensettle columns` — show how a file's headers resolve against the
//! configured fragment lists.

use std::path::PathBuf;

use gensettle_io::columns::{describe_carrier, describe_fulfillment, ResolvedColumn};
use gensettle_recon::RunConfig;

use crate::exit_codes::EXIT_SCHEMA;
use crate::{load_input, CliError, Role};

pub fn cmd_columns(file: PathBuf, role: Role, config: Option<PathBuf>) -> Result<(), CliError> {
    let config = match config {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| CliError::io(format!("cannot read config {}: {e}", path.display())))?;
            RunConfig::from_toml(&text).map_err(|e| CliError::usage(e.to_string()))?
        }
        None => RunConfig::default(),
    };

    let table = load_input(&file)?;

    let resolutions = match role {
        Role::Carrier => describe_carrier(&table.headers, &config.columns.carrier),
        Role::Fulfillment => describe_fulfillment(&table.headers, &config.columns.fulfillment),
    };

    for resolution in &resolutions {
        print_resolution(resolution);
    }

    let missing: Vec<&str> = resolutions
        .iter()
        .filter(|r| r.required && r.hit.is_none())
        .map(|r| r.field)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CliError {
            code: EXIT_SCHEMA,
            message: format!("required column(s) not found: {}", missing.join(", ")),
            hint: Some(format!("available columns: {}", table.headers.join(", "))),
        })
    }
}

fn print_resolution(resolution: &ResolvedColumn) {
    let requirement = if resolution.required { "required" } else { "optional" };
    match &resolution.hit {
        Some((idx, header)) => {
            println!(
                "{:<16} -> \"{}\" (column {}, {})",
                resolution.field, header, idx, requirement
            );
        }
        None => {
            println!(
                "{:<16} -> MISSING ({}, fragments: {})",
                resolution.field,
                requirement,
                resolution.fragments.join(", ")
            );
        }
    }
}

