//! Config command implementation
//!
//! Prints the resolved configuration as JSON.

use anyhow::{Context, Result};
use pcmlab_core::PipelineConfig;
use std::process::ExitCode;

use super::options::{print_advisories, ConfigArgs};

/// Formats a configuration as compact or pretty JSON.
pub fn format_config(config: &PipelineConfig, pretty: bool) -> Result<String> {
    if pretty {
        config.to_json_pretty().context("Failed to serialize config")
    } else {
        serde_json::to_string(config).context("Failed to serialize config")
    }
}

/// Run the config command
///
/// # Arguments
/// * `args` - Configuration flags
/// * `pretty` - Pretty-print the JSON
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(args: &ConfigArgs, pretty: bool) -> Result<ExitCode> {
    let config = args.resolve()?;
    print_advisories(&config);
    println!("{}", format_config(&config, pretty)?);
    Ok(ExitCode::SUCCESS)
}
