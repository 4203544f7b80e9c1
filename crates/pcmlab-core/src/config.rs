//! Pipeline configuration.
//!
//! A [`PipelineConfig`] is an immutable value handed to every component
//! constructor. It round-trips through JSON; every field has a default so a
//! config file only needs the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::codec::CodecParams;
use crate::error::PcmResult;

/// Highest frequency component of the fixed test signal, in Hz.
///
/// `0.5 * cos(4 * pi * t)` oscillates at 2 Hz.
pub const HIGHEST_SIGNAL_COMPONENT_HZ: f64 = 2.0;

/// Default continuous (fine) time step in seconds.
pub const DEFAULT_CONTINUOUS_STEP: f64 = 0.01;

/// Default sampling frequency in Hz.
pub const DEFAULT_SAMPLING_FREQUENCY: f64 = 20.0;

/// Default signal duration in seconds.
pub const DEFAULT_DURATION: f64 = 10.0;

fn default_continuous_step() -> f64 {
    DEFAULT_CONTINUOUS_STEP
}

fn default_sampling_frequency() -> f64 {
    DEFAULT_SAMPLING_FREQUENCY
}

fn default_duration() -> f64 {
    DEFAULT_DURATION
}

/// Parameters for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Step of the continuous reference series, in seconds.
    #[serde(default = "default_continuous_step", alias = "fs_cont")]
    pub continuous_step: f64,
    /// Sampling frequency of the sampled series, in Hz.
    #[serde(default = "default_sampling_frequency", alias = "fs")]
    pub sampling_frequency: f64,
    /// Signal duration in seconds.
    #[serde(default = "default_duration")]
    pub duration: f64,
    /// Companding parameters.
    #[serde(default)]
    pub codec: CodecParams,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            continuous_step: DEFAULT_CONTINUOUS_STEP,
            sampling_frequency: DEFAULT_SAMPLING_FREQUENCY,
            duration: DEFAULT_DURATION,
            codec: CodecParams::default(),
        }
    }
}

impl PipelineConfig {
    /// Parses a config from a JSON string.
    pub fn from_json(json: &str) -> PcmResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON config file.
    pub fn from_file(path: &Path) -> PcmResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serializes the config as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> PcmResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sampling interval in seconds (`1 / sampling_frequency`).
    pub fn sampling_interval(&self) -> f64 {
        1.0 / self.sampling_frequency
    }

    /// Returns non-fatal notes about physically implausible settings.
    ///
    /// The pipeline never consults these: an aliased or degenerate
    /// configuration still runs and produces whatever numbers fall out.
    pub fn advisories(&self) -> Vec<Advisory> {
        let mut notes = Vec::new();

        let nyquist_rate = 2.0 * HIGHEST_SIGNAL_COMPONENT_HZ;
        if self.sampling_frequency.is_nan() || self.sampling_frequency <= nyquist_rate {
            notes.push(Advisory::new(
                AdvisoryCode::NyquistViolation,
                format!(
                    "sampling frequency {} Hz does not exceed {} Hz; the sampled series will alias",
                    self.sampling_frequency, nyquist_rate
                ),
            ));
        }

        if self.codec.a.is_nan() || self.codec.a <= 1.0 {
            notes.push(Advisory::new(
                AdvisoryCode::CompressionRatio,
                format!(
                    "A-law parameter {} is not above 1; companding is degenerate",
                    self.codec.a
                ),
            ));
        }

        let dt_sample = self.sampling_interval();
        let ordered = self.continuous_step < dt_sample && dt_sample < self.duration;
        if !ordered {
            notes.push(Advisory::new(
                AdvisoryCode::StepOrdering,
                format!(
                    "expected continuous step {} < sampling interval {} < duration {}",
                    self.continuous_step, dt_sample, self.duration
                ),
            ));
        }

        notes
    }
}

/// Kind of configuration advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryCode {
    /// Sampling frequency at or below twice the highest signal component.
    NyquistViolation,
    /// A-law parameter not above unity.
    CompressionRatio,
    /// Steps are not ordered `continuous < sampling < duration`.
    StepOrdering,
}

impl AdvisoryCode {
    /// Short machine-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvisoryCode::NyquistViolation => "nyquist_violation",
            AdvisoryCode::CompressionRatio => "compression_ratio",
            AdvisoryCode::StepOrdering => "step_ordering",
        }
    }
}

/// A non-fatal note about a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    /// Advisory kind.
    pub code: AdvisoryCode,
    /// Human-readable message.
    pub message: String,
}

impl Advisory {
    /// Creates a new advisory.
    pub fn new(code: AdvisoryCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{ErrorMode, PcmMapping};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.continuous_step, 0.01);
        assert_eq!(config.sampling_frequency, 20.0);
        assert_eq!(config.duration, 10.0);
        assert_eq!(config.codec.a, 87.6);
        assert_eq!(config.codec.pcm_mapping, PcmMapping::Legacy127);
        assert_eq!(config.codec.error_mode, ErrorMode::Legacy);
        assert!((config.sampling_interval() - 0.05).abs() < 1e-15);
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = PipelineConfig::from_json("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_aliases() {
        let config =
            PipelineConfig::from_json(r#"{"fs_cont": 0.001, "fs": 8000, "codec": {"A": 50}}"#)
                .unwrap();
        assert_eq!(config.continuous_step, 0.001);
        assert_eq!(config.sampling_frequency, 8000.0);
        assert_eq!(config.codec.a, 50.0);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = PipelineConfig::from_json(r#"{"bit_depth": 16}"#).unwrap_err();
        assert_eq!(err.code(), "PCM_003");
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = PipelineConfig::default();
        config.codec.pcm_mapping = PcmMapping::FullRange;
        config.codec.error_mode = ErrorMode::Rescaled;
        let json = config.to_json_pretty().unwrap();
        assert!(json.contains("\"full_range\""));
        assert!(json.contains("\"rescaled\""));
        assert_eq!(PipelineConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"duration": 2.5}"#).unwrap();
        let config = PipelineConfig::from_file(&path).unwrap();
        assert_eq!(config.duration, 2.5);

        let missing = PipelineConfig::from_file(&dir.path().join("missing.json")).unwrap_err();
        assert_eq!(missing.code(), "PCM_004");
    }

    #[test]
    fn test_default_config_has_no_advisories() {
        assert!(PipelineConfig::default().advisories().is_empty());
    }

    #[test]
    fn test_advisories_flag_aliasing_and_degenerate_a() {
        let mut config = PipelineConfig::default();
        config.sampling_frequency = 4.0;
        config.codec.a = 1.0;
        let codes: Vec<AdvisoryCode> = config.advisories().iter().map(|a| a.code).collect();
        assert!(codes.contains(&AdvisoryCode::NyquistViolation));
        assert!(codes.contains(&AdvisoryCode::CompressionRatio));
        assert!(!codes.contains(&AdvisoryCode::StepOrdering));
    }

    #[test]
    fn test_advisories_flag_step_ordering() {
        let mut config = PipelineConfig::default();
        config.duration = 0.01;
        let codes: Vec<AdvisoryCode> = config.advisories().iter().map(|a| a.code).collect();
        assert_eq!(codes, vec![AdvisoryCode::StepOrdering]);
    }
}
