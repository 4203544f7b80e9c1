//! pcmlab CLI - A-law PCM companding lab
//!
//! Synthesizes the three-tone test signal, samples it, companding-encodes it
//! to 8-bit codes and reports the quantization error, writing figures and a
//! codec table along the way.

use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::process::ExitCode;

use pcmlab_cli::commands::{self, ConfigArgs};

/// pcmlab - A-law PCM companding lab
#[derive(Parser)]
#[command(name = "pcmlab")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline and write figures, codec table and report
    Run {
        #[command(flatten)]
        config: ConfigArgs,

        /// Output directory
        #[arg(long, default_value = "results")]
        out_dir: String,

        /// Print the run summary as JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Export the time/code/decoded/error table as CSV
    Export {
        #[command(flatten)]
        config: ConfigArgs,

        /// Output CSV file
        #[arg(short, long)]
        output: String,
    },

    /// Render the pipeline figures as PNG
    Plot {
        #[command(flatten)]
        config: ConfigArgs,

        /// Output directory
        #[arg(long, default_value = "results")]
        out_dir: String,
    },

    /// Print the resolved configuration as JSON
    Config {
        #[command(flatten)]
        config: ConfigArgs,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            config,
            out_dir,
            json,
        } => commands::run::run(&config, &out_dir, json),
        Commands::Export { config, output } => commands::export::run(&config, &output),
        Commands::Plot { config, out_dir } => commands::plot::run(&config, &out_dir),
        Commands::Config { config, pretty } => commands::config::run(&config, pretty),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
