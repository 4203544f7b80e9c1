//! Run command implementation
//!
//! Runs the full pipeline and writes the figures, the codec table and a JSON
//! report into one output directory.

use anyhow::{Context, Result};
use colored::Colorize;
use pcmlab_core::{Pipeline, PipelineSummary};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::options::{print_advisories, ConfigArgs};
use crate::plot::{render_figures, write_figures};
use crate::table::{write_csv_file, TABLE_FILE_NAME};

/// File name of the JSON run report.
pub const REPORT_FILE_NAME: &str = "report.json";

/// Paths written by one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunArtifacts {
    /// Figure paths, in figure order.
    pub figures: Vec<PathBuf>,
    /// Codec table path.
    pub table: PathBuf,
    /// JSON report path.
    pub report: PathBuf,
}

/// Runs the pipeline and writes every artifact into `out_dir`.
pub fn execute(args: &ConfigArgs, out_dir: &Path) -> Result<(PipelineSummary, RunArtifacts)> {
    let config = args.resolve()?;
    let output = Pipeline::new(config).run().context("Pipeline run failed")?;
    let summary = output.summary();

    let figures = render_figures(&output)?;
    let figure_paths = write_figures(&figures, out_dir)?;

    let table_path = out_dir.join(TABLE_FILE_NAME);
    write_csv_file(&output.export_table(), &table_path)?;
    log::info!("wrote {}", table_path.display());

    let report_path = out_dir.join(REPORT_FILE_NAME);
    let report = serde_json::to_string_pretty(&summary).context("Failed to serialize report")?;
    fs::write(&report_path, report)
        .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
    log::info!("wrote {}", report_path.display());

    Ok((
        summary,
        RunArtifacts {
            figures: figure_paths,
            table: table_path,
            report: report_path,
        },
    ))
}

/// Run the run command
///
/// # Arguments
/// * `args` - Configuration flags
/// * `out_dir` - Directory receiving figures, table and report
/// * `json` - Print the summary as JSON instead of colored text
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(args: &ConfigArgs, out_dir: &str, json: bool) -> Result<ExitCode> {
    if !json {
        println!("{} {}", "Running pipeline into:".cyan().bold(), out_dir);
    }

    let (summary, artifacts) = execute(args, Path::new(out_dir))?;
    // stderr only, so JSON on stdout stays clean
    print_advisories(&summary.config);

    if json {
        let text = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{}", text);
        return Ok(ExitCode::SUCCESS);
    }

    print_summary(&summary);
    for path in artifacts
        .figures
        .iter()
        .chain([&artifacts.table, &artifacts.report])
    {
        println!("  {} {}", "->".dimmed(), path.display());
    }
    println!("{} Pipeline complete", "SUCCESS".green().bold());

    Ok(ExitCode::SUCCESS)
}

fn print_summary(summary: &PipelineSummary) {
    let codec = &summary.config.codec;
    println!(
        "  {} {} continuous, {} sampled",
        "Samples:".dimmed(),
        summary.continuous_samples,
        summary.sampled_samples
    );
    println!(
        "  {} A = {}, mapping {}, error mode {}",
        "Codec:".dimmed(),
        codec.a,
        codec.pcm_mapping,
        codec.error_mode
    );
    println!("  {} {}", "Peak:".dimmed(), summary.peak);
    println!(
        "  {} {:e} ({:.2} dB SQNR)",
        "MSE:".dimmed(),
        summary.mse,
        summary.sqnr_db
    );
    println!(
        "  {} {:e} ({:.2} dB SQNR)",
        "8-bit MSE:".dimmed(),
        summary.pcm_mse,
        summary.pcm_sqnr_db
    );
    if let (Some(min), Some(max)) = (summary.min_code, summary.max_code) {
        println!("  {} {}..={}", "Codes:".dimmed(), min, max);
    }
    println!("  {} {}", "Code hash:".dimmed(), summary.codes_hash);
}
