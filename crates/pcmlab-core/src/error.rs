//! Error types for the pcmlab core.

use thiserror::Error;

/// Result type for pcmlab operations.
pub type PcmResult<T> = Result<T, PcmError>;

/// Errors that can occur while building or running a pipeline.
///
/// Numeric trouble inside the signal chain (NaN, infinities) is never an
/// error; it flows through the results as IEEE special values. These variants
/// cover the cases where no result can be produced at all.
#[derive(Debug, Error)]
pub enum PcmError {
    /// The step/duration pair cannot describe a finite time axis.
    #[error("invalid time axis: step {step} over duration {duration} seconds")]
    InvalidTimeAxis {
        /// The offending step in seconds.
        step: f64,
        /// The requested duration in seconds.
        duration: f64,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Configuration JSON could not be parsed or serialized.
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PcmError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            PcmError::InvalidTimeAxis { .. } => "PCM_001",
            PcmError::InvalidParameter { .. } => "PCM_002",
            PcmError::Json(_) => "PCM_003",
            PcmError::Io(_) => "PCM_004",
        }
    }

    /// Error category for grouping related errors.
    pub fn category(&self) -> &'static str {
        match self {
            PcmError::InvalidTimeAxis { .. } => "signal",
            PcmError::InvalidParameter { .. } | PcmError::Json(_) => "config",
            PcmError::Io(_) => "io",
        }
    }
}
