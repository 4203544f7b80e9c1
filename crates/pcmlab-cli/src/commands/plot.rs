//! Plot command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use pcmlab_core::Pipeline;
use std::path::Path;
use std::process::ExitCode;

use super::options::{print_advisories, ConfigArgs};
use crate::plot::{render_figures, write_figures};

/// Run the plot command
///
/// # Arguments
/// * `args` - Configuration flags
/// * `out_dir` - Directory receiving the figures
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(args: &ConfigArgs, out_dir: &str) -> Result<ExitCode> {
    let config = args.resolve()?;
    print_advisories(&config);

    let output = Pipeline::new(config).run().context("Pipeline run failed")?;
    let figures = render_figures(&output)?;
    let paths = write_figures(&figures, Path::new(out_dir))?;

    for (path, figure) in paths.iter().zip(&figures) {
        println!(
            "  {} {} {}",
            "->".dimmed(),
            path.display(),
            format!("({}x{})", figure.width, figure.height).as_str().dimmed()
        );
    }
    println!(
        "{} Wrote {} figures to: {}",
        "SUCCESS".green().bold(),
        paths.len(),
        out_dir
    );

    Ok(ExitCode::SUCCESS)
}
