//! Export command implementation
//!
//! Writes the time/code/decoded/error table of one run as CSV.

use anyhow::{Context, Result};
use colored::Colorize;
use pcmlab_core::Pipeline;
use std::path::Path;
use std::process::ExitCode;

use super::options::{print_advisories, ConfigArgs};
use crate::table::write_csv_file;

/// Run the export command
///
/// # Arguments
/// * `args` - Configuration flags
/// * `output` - CSV file path
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(args: &ConfigArgs, output: &str) -> Result<ExitCode> {
    let config = args.resolve()?;
    print_advisories(&config);

    let result = Pipeline::new(config).run().context("Pipeline run failed")?;
    let table = result.export_table();
    write_csv_file(&table, Path::new(output))?;

    println!(
        "{} Exported {} rows to: {}",
        "SUCCESS".green().bold(),
        table.len(),
        output
    );

    Ok(ExitCode::SUCCESS)
}
