//! pcmlab core
//!
//! Models the analog-to-digital half of a PCM telephony link: a band-limited
//! test signal is synthesized, sampled, A-law companded to 8-bit codes and
//! expanded again, and the resulting distortion is measured.
//!
//! # Overview
//!
//! - **Synthesis** - a fixed three-tone test signal on a fine "continuous"
//!   axis and on a coarse sampled axis.
//! - **Spectra** - centered, unwindowed DFTs of both series.
//! - **Companding** - peak normalization, continuous A-law compression,
//!   8-bit code mapping, expansion and quantization error/MSE.
//!
//! Everything is deterministic: the same [`PipelineConfig`] always yields the
//! same numbers and the same code hash.
//!
//! # Example
//!
//! ```
//! use pcmlab_core::{Pipeline, PipelineConfig};
//!
//! let output = Pipeline::new(PipelineConfig::default()).run()?;
//! assert_eq!(output.sampled.series.len(), 200);
//! assert!(output.codec.report.mse.is_finite());
//! # Ok::<(), pcmlab_core::PcmError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`config`] - Run configuration and advisories
//! - [`signal`] - Test signal and time axes
//! - [`spectrum`] - Centered DFT spectra
//! - [`codec`] - A-law companding, 8-bit mapping and error metrics
//! - [`pipeline`] - Orchestration, export table and summary

pub mod codec;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod signal;
pub mod spectrum;

// Re-export main types at crate root
pub use codec::{
    ALawCodec, CodecOutput, CodecParams, EncodedSignal, ErrorMode, PcmMapping,
    QuantizationReport,
};
pub use config::{Advisory, AdvisoryCode, PipelineConfig};
pub use error::{PcmError, PcmResult};
pub use pipeline::{
    ExportRow, ExportTable, Pipeline, PipelineOutput, PipelineSummary, SignalBundle,
};
pub use signal::{SignalSynthesizer, TimeSeries};
pub use spectrum::{Spectrum, SpectrumAnalyzer};
