//! Quantization error and summary statistics.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PcmError;

/// Which two sequences the quantization error compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMode {
    /// Original (unnormalized) samples minus the normalized-scale decode.
    ///
    /// The two operands live on different scales whenever the peak is not 1.
    /// Kept as the default so results match the long-standing reference
    /// tables.
    #[default]
    Legacy,
    /// Normalized samples minus the decode, both on the normalized scale.
    Normalized,
    /// Original samples minus the decode rescaled by the original peak.
    Rescaled,
}

impl ErrorMode {
    /// Short machine-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorMode::Legacy => "legacy",
            ErrorMode::Normalized => "normalized",
            ErrorMode::Rescaled => "rescaled",
        }
    }
}

impl fmt::Display for ErrorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorMode {
    type Err = PcmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "legacy" => Ok(ErrorMode::Legacy),
            "normalized" => Ok(ErrorMode::Normalized),
            "rescaled" => Ok(ErrorMode::Rescaled),
            other => Err(PcmError::invalid_param(
                "error_mode",
                format!(
                    "unknown error mode '{}' (expected legacy, normalized or rescaled)",
                    other
                ),
            )),
        }
    }
}

/// Per-sample error plus scalar summaries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantizationReport {
    /// `reference[i] - decoded[i]` for every sample.
    pub errors: Vec<f64>,
    /// Mean of the squared errors. NaN when there are no samples.
    pub mse: f64,
    /// Signal-to-quantization-noise ratio in dB against the reference.
    pub sqnr_db: f64,
}

impl QuantizationReport {
    /// Builds a report comparing `decoded` against `reference`.
    pub fn compare(reference: &[f64], decoded: &[f64]) -> Self {
        let errors = quantization_error(reference, decoded);
        let mse = mean_squared_error(&errors);
        let sqnr_db = sqnr_db(reference, mse);
        Self {
            errors,
            mse,
            sqnr_db,
        }
    }
}

/// Element-wise `original - decoded`.
///
/// The sequences are expected to be aligned; extra trailing elements of the
/// longer one are ignored.
pub fn quantization_error(original: &[f64], decoded: &[f64]) -> Vec<f64> {
    original
        .iter()
        .zip(decoded)
        .map(|(o, d)| o - d)
        .collect()
}

/// Mean of `error^2`.
///
/// An empty sequence has no mean; the result is NaN rather than 0 so that an
/// empty run cannot pass for a perfect one.
pub fn mean_squared_error(errors: &[f64]) -> f64 {
    if errors.is_empty() {
        return f64::NAN;
    }
    errors.iter().map(|e| e * e).sum::<f64>() / errors.len() as f64
}

/// `10 log10(mean(reference^2) / mse)`.
///
/// Infinite when the error is exactly zero and the reference is not, NaN for
/// empty or all-zero inputs.
pub fn sqnr_db(reference: &[f64], mse: f64) -> f64 {
    let power = mean_squared_error(reference);
    10.0 * (power / mse).log10()
}
