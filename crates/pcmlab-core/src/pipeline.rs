//! Pipeline orchestration.
//!
//! One run synthesizes both series, computes both spectra and pushes the
//! sampled series through the codec. Nothing is validated on the way: an
//! aliasing sampling rate or a degenerate A-law parameter simply produces the
//! numbers it produces.

use serde::Serialize;

use crate::codec::{ALawCodec, CodecOutput};
use crate::config::PipelineConfig;
use crate::error::PcmResult;
use crate::signal::{SignalSynthesizer, TimeSeries};
use crate::spectrum::{Spectrum, SpectrumAnalyzer};

/// A time series and its spectrum.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalBundle {
    /// Time-domain samples.
    pub series: TimeSeries,
    /// Centered spectrum of `series`.
    pub spectrum: Spectrum,
}

/// Everything one pipeline run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// Configuration the run used.
    pub config: PipelineConfig,
    /// Continuous (fine) reference signal.
    pub analog: SignalBundle,
    /// Sampled signal.
    pub sampled: SignalBundle,
    /// Codec trace for the sampled signal.
    pub codec: CodecOutput,
}

/// One row of the export table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExportRow {
    /// Sample time in seconds.
    pub time: f64,
    /// 8-bit PCM code.
    pub code: u8,
    /// Decoded value (normalized scale).
    pub decoded: f64,
    /// Quantization error.
    pub error: f64,
}

/// The four aligned columns handed to the table exporter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportTable {
    /// One row per sampled point.
    pub rows: Vec<ExportRow>,
}

impl ExportTable {
    /// Column names in row order.
    pub const COLUMNS: [&'static str; 4] = ["time", "code", "decoded", "error"];

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Scalar summary of a run, suitable for JSON reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineSummary {
    /// Configuration the run used.
    pub config: PipelineConfig,
    /// Number of continuous samples.
    pub continuous_samples: usize,
    /// Number of sampled points.
    pub sampled_samples: usize,
    /// Peak absolute value of the sampled signal.
    pub peak: f64,
    /// MSE of the direct decode.
    pub mse: f64,
    /// SQNR of the direct decode, in dB.
    pub sqnr_db: f64,
    /// MSE of the decode taken through the 8-bit codes.
    pub pcm_mse: f64,
    /// SQNR of the decode taken through the 8-bit codes, in dB.
    pub pcm_sqnr_db: f64,
    /// Smallest 8-bit code produced.
    pub min_code: Option<u8>,
    /// Largest 8-bit code produced.
    pub max_code: Option<u8>,
    /// Frequency of the strongest analog bin, on the analog axis scale.
    pub analog_peak_frequency: Option<f64>,
    /// Frequency of the strongest sampled bin, on the sampled axis scale.
    pub sampled_peak_frequency: Option<f64>,
    /// BLAKE3 hash of the 8-bit code stream.
    pub codes_hash: String,
}

/// Runs the synthesize/analyze/encode chain for one configuration.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Creates a pipeline for the given configuration.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// The pipeline's configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Executes one run.
    ///
    /// # Errors
    /// Fails only when a step/duration pair cannot describe a finite time
    /// axis. Numeric degeneracies show up as NaN or infinite values in the
    /// output instead.
    pub fn run(&self) -> PcmResult<PipelineOutput> {
        let synth = SignalSynthesizer::new(&self.config);
        let continuous = synth.continuous()?;
        let sampled = synth.sampled()?;
        log::debug!(
            "synthesized {} continuous and {} sampled points",
            continuous.len(),
            sampled.len()
        );

        let mut analyzer = SpectrumAnalyzer::new();
        // The analog axis is scaled by the continuous step, the sampled axis by
        // the sampling frequency.
        let analog_spectrum = analyzer.analyze_series(&continuous, self.config.continuous_step);
        let sampled_spectrum = analyzer.analyze_series(&sampled, self.config.sampling_frequency);
        log::debug!(
            "computed spectra ({} and {} bins)",
            analog_spectrum.len(),
            sampled_spectrum.len()
        );

        let codec = ALawCodec::new(self.config.codec.clone()).run(&sampled.values);

        Ok(PipelineOutput {
            config: self.config.clone(),
            analog: SignalBundle {
                series: continuous,
                spectrum: analog_spectrum,
            },
            sampled: SignalBundle {
                series: sampled,
                spectrum: sampled_spectrum,
            },
            codec,
        })
    }
}

impl PipelineOutput {
    /// Time, code, decoded value and error for every sampled point.
    pub fn export_table(&self) -> ExportTable {
        let rows = self
            .sampled
            .series
            .times
            .iter()
            .zip(&self.codec.encoded.codes)
            .zip(&self.codec.decoded)
            .zip(&self.codec.report.errors)
            .map(|(((&time, &code), &decoded), &error)| ExportRow {
                time,
                code,
                decoded,
                error,
            })
            .collect();
        ExportTable { rows }
    }

    /// Scalar summary of the run.
    pub fn summary(&self) -> PipelineSummary {
        let codes = &self.codec.encoded.codes;
        PipelineSummary {
            config: self.config.clone(),
            continuous_samples: self.analog.series.len(),
            sampled_samples: self.sampled.series.len(),
            peak: self.codec.peak,
            mse: self.codec.report.mse,
            sqnr_db: self.codec.report.sqnr_db,
            pcm_mse: self.codec.pcm_report.mse,
            pcm_sqnr_db: self.codec.pcm_report.sqnr_db,
            min_code: codes.iter().copied().min(),
            max_code: codes.iter().copied().max(),
            analog_peak_frequency: self.analog.spectrum.peak().map(|(f, _)| f),
            sampled_peak_frequency: self.sampled.spectrum.peak().map(|(f, _)| f),
            codes_hash: self.codec.encoded.codes_hash(),
        }
    }
}
