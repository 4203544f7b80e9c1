//! Shared configuration flags.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pcmlab_core::{ErrorMode, PcmMapping, PipelineConfig};
use std::path::PathBuf;

/// Flags that resolve to a [`PipelineConfig`].
///
/// Flags override values from `--config`, which override the defaults.
#[derive(Debug, Clone, Default, PartialEq, Args)]
pub struct ConfigArgs {
    /// JSON config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Step of the continuous reference series, in seconds
    #[arg(long)]
    pub fs_cont: Option<f64>,

    /// Sampling frequency, in Hz
    #[arg(long)]
    pub fs: Option<f64>,

    /// Signal duration, in seconds
    #[arg(long)]
    pub duration: Option<f64>,

    /// A-law compression parameter
    #[arg(short = 'a', long = "a", allow_negative_numbers = true)]
    pub a: Option<f64>,

    /// Code mapping (legacy127, full_range)
    #[arg(long)]
    pub pcm_mapping: Option<PcmMapping>,

    /// Quantization error reference (legacy, normalized, rescaled)
    #[arg(long)]
    pub error_mode: Option<ErrorMode>,
}

impl ConfigArgs {
    /// Resolves the effective configuration.
    pub fn resolve(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => PipelineConfig::default(),
        };

        if let Some(step) = self.fs_cont {
            config.continuous_step = step;
        }
        if let Some(fs) = self.fs {
            config.sampling_frequency = fs;
        }
        if let Some(duration) = self.duration {
            config.duration = duration;
        }
        if let Some(a) = self.a {
            config.codec.a = a;
        }
        if let Some(mapping) = self.pcm_mapping {
            config.codec.pcm_mapping = mapping;
        }
        if let Some(mode) = self.error_mode {
            config.codec.error_mode = mode;
        }

        log::debug!("resolved config: {:?}", config);
        Ok(config)
    }
}

/// Prints configuration advisories as warnings on stderr.
pub(crate) fn print_advisories(config: &PipelineConfig) {
    for advisory in config.advisories() {
        eprintln!(
            "{} [{}] {}",
            "WARNING".yellow().bold(),
            advisory.code.as_str(),
            advisory.message
        );
    }
}
