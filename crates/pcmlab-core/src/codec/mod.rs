//! A-law companding codec.
//!
//! The codec walks a sampled signal through a fixed chain of stages:
//!
//! 1. **Normalize** - divide by the peak absolute sample.
//! 2. **Compress** - apply the continuous A-law ([`alaw::compress`]).
//! 3. **Quantize** - map each compressed value to an 8-bit code ([`pcm::quantize`]).
//! 4. **Expand** - invert the law on the *compressed* values, bypassing the codes.
//! 5. **Compare** - compute the per-sample error and its MSE ([`report`]).
//!
//! [`ALawCodec::run`] executes the whole chain and returns every intermediate
//! sequence in a [`CodecOutput`]. In addition to the direct decode, the output
//! carries a decode taken through the 8-bit codes, so the error introduced by
//! the code grid alone can be inspected.

pub mod alaw;
pub mod pcm;
pub mod report;

use serde::{Deserialize, Serialize};

pub use alaw::{compress, expand, DEFAULT_A};
pub use pcm::{dequantize, quantize, PcmMapping};
pub use report::{mean_squared_error, quantization_error, ErrorMode, QuantizationReport};

/// PCM code width. Fixed: the codec only produces 8-bit codes.
pub const BIT_DEPTH: u32 = 8;

fn default_a() -> f64 {
    DEFAULT_A
}

/// Companding parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodecParams {
    /// A-law compression parameter. Expected to be above 1; not validated.
    #[serde(default = "default_a", alias = "A")]
    pub a: f64,
    /// Compressed-value to 8-bit code mapping.
    #[serde(default)]
    pub pcm_mapping: PcmMapping,
    /// Which sequences the quantization error compares.
    #[serde(default)]
    pub error_mode: ErrorMode,
}

impl Default for CodecParams {
    fn default() -> Self {
        Self {
            a: DEFAULT_A,
            pcm_mapping: PcmMapping::default(),
            error_mode: ErrorMode::default(),
        }
    }
}

impl CodecParams {
    /// Parameters with the given `a` and default mapping and error mode.
    pub fn with_a(a: f64) -> Self {
        Self {
            a,
            ..Default::default()
        }
    }
}

/// Divides every sample by the peak absolute sample.
///
/// Returns the normalized samples together with the peak. An all-zero (or
/// empty) input has peak 0 and is returned unchanged instead of producing
/// `0 / 0`.
pub fn normalize(samples: &[f64]) -> (Vec<f64>, f64) {
    let peak = samples.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()));
    if peak == 0.0 {
        return (samples.to_vec(), 0.0);
    }
    (samples.iter().map(|s| s / peak).collect(), peak)
}

/// Compressed values and their 8-bit codes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodedSignal {
    /// A-law compressed values, in [-1, 1] for normalized input.
    pub compressed: Vec<f64>,
    /// 8-bit PCM codes derived from `compressed`.
    pub codes: Vec<u8>,
}

impl EncodedSignal {
    /// Number of encoded samples.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns true if nothing was encoded.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// BLAKE3 hash of the code stream as a hex string.
    pub fn codes_hash(&self) -> String {
        blake3::hash(&self.codes).to_hex().to_string()
    }
}

/// Every intermediate sequence of one codec run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodecOutput {
    /// Peak absolute value of the input (0 for silent input).
    pub peak: f64,
    /// Input divided by `peak`.
    pub normalized: Vec<f64>,
    /// Compressed values and 8-bit codes.
    pub encoded: EncodedSignal,
    /// Expansion of the compressed values (normalized scale).
    pub decoded: Vec<f64>,
    /// Expansion of the dequantized 8-bit codes (normalized scale).
    pub requantized: Vec<f64>,
    /// Error of `decoded` under the configured [`ErrorMode`].
    pub report: QuantizationReport,
    /// Error of `requantized` under the same mode.
    pub pcm_report: QuantizationReport,
}

/// A-law encoder/decoder.
#[derive(Debug, Clone)]
pub struct ALawCodec {
    params: CodecParams,
}

impl ALawCodec {
    /// Creates a codec with the given parameters.
    pub fn new(params: CodecParams) -> Self {
        Self { params }
    }

    /// The codec's parameters.
    pub fn params(&self) -> &CodecParams {
        &self.params
    }

    /// Compresses one normalized sample.
    pub fn encode(&self, x: f64) -> f64 {
        compress(x, self.params.a)
    }

    /// Expands one compressed value.
    pub fn decode(&self, y: f64) -> f64 {
        expand(y, self.params.a)
    }

    /// Compresses normalized samples and derives their 8-bit codes.
    pub fn encode_signal(&self, normalized: &[f64]) -> EncodedSignal {
        let compressed: Vec<f64> = normalized.iter().map(|&x| self.encode(x)).collect();
        let codes = compressed
            .iter()
            .map(|&c| quantize(c, self.params.pcm_mapping))
            .collect();
        EncodedSignal { compressed, codes }
    }

    /// Expands the compressed values of an encoded signal.
    pub fn decode_signal(&self, encoded: &EncodedSignal) -> Vec<f64> {
        encoded.compressed.iter().map(|&y| self.decode(y)).collect()
    }

    /// Expands 8-bit codes, going back through the code grid.
    pub fn decode_codes(&self, codes: &[u8]) -> Vec<f64> {
        codes
            .iter()
            .map(|&code| self.decode(dequantize(code, self.params.pcm_mapping)))
            .collect()
    }

    /// Runs the full normalize/compress/quantize/expand/compare chain.
    pub fn run(&self, samples: &[f64]) -> CodecOutput {
        let (normalized, peak) = normalize(samples);
        log::debug!("normalized {} samples (peak {})", samples.len(), peak);

        let encoded = self.encode_signal(&normalized);
        let decoded = self.decode_signal(&encoded);
        let requantized = self.decode_codes(&encoded.codes);
        log::debug!(
            "encoded {} samples with A={} ({})",
            encoded.len(),
            self.params.a,
            self.params.pcm_mapping
        );

        let report = self.compare(samples, &normalized, &decoded, peak);
        let pcm_report = self.compare(samples, &normalized, &requantized, peak);
        log::debug!(
            "{} error: mse={} (through codes: {})",
            self.params.error_mode,
            report.mse,
            pcm_report.mse
        );

        CodecOutput {
            peak,
            normalized,
            encoded,
            decoded,
            requantized,
            report,
            pcm_report,
        }
    }

    fn compare(
        &self,
        original: &[f64],
        normalized: &[f64],
        decoded: &[f64],
        peak: f64,
    ) -> QuantizationReport {
        match self.params.error_mode {
            ErrorMode::Legacy => QuantizationReport::compare(original, decoded),
            ErrorMode::Normalized => QuantizationReport::compare(normalized, decoded),
            ErrorMode::Rescaled => {
                let rescaled: Vec<f64> = decoded.iter().map(|d| d * peak).collect();
                QuantizationReport::compare(original, &rescaled)
            }
        }
    }
}

impl Default for ALawCodec {
    fn default() -> Self {
        Self::new(CodecParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn codec_with_mode(error_mode: ErrorMode) -> ALawCodec {
        ALawCodec::new(CodecParams {
            error_mode,
            ..Default::default()
        })
    }

    #[test]
    fn test_normalize_peak() {
        let (normalized, peak) = normalize(&[1.0, -4.0, 2.0]);
        assert_eq!(peak, 4.0);
        assert_eq!(normalized, vec![0.25, -1.0, 0.5]);
    }

    #[test]
    fn test_normalize_silence() {
        let (normalized, peak) = normalize(&[0.0, 0.0, 0.0]);
        assert_eq!(peak, 0.0);
        assert_eq!(normalized, vec![0.0, 0.0, 0.0]);

        let (empty, peak) = normalize(&[]);
        assert!(empty.is_empty());
        assert_eq!(peak, 0.0);
    }

    #[test]
    fn test_silence_has_zero_mse() {
        let output = ALawCodec::default().run(&[0.0; 16]);
        assert!(output.decoded.iter().all(|&d| d == 0.0));
        assert_eq!(output.report.mse, 0.0);
        assert!(output.encoded.codes.iter().all(|&c| c == 127));
    }

    #[test]
    fn test_empty_input() {
        let output = ALawCodec::default().run(&[]);
        assert!(output.encoded.is_empty());
        assert!(output.decoded.is_empty());
        assert!(output.report.errors.is_empty());
        assert!(output.report.mse.is_nan());
    }

    #[test]
    fn test_decode_inverts_encode_on_compressed_path() {
        let codec = ALawCodec::default();
        let samples = [0.3, -0.7, 1.0, -1.0, 0.001];
        let output = codec.run(&samples);
        for (n, d) in output.normalized.iter().zip(&output.decoded) {
            assert!((n - d).abs() < 1e-12);
        }
    }

    #[test]
    fn test_legacy_error_mixes_scales() {
        // peak 2: normalized = [1, -0.5], decoded ~ normalized
        let output = codec_with_mode(ErrorMode::Legacy).run(&[2.0, -1.0]);
        assert!((output.report.errors[0] - 1.0).abs() < 1e-12);
        assert!((output.report.errors[1] + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_corrected_modes_are_near_zero() {
        let samples = [2.0, -1.0, 0.5];
        let normalized = codec_with_mode(ErrorMode::Normalized).run(&samples);
        let rescaled = codec_with_mode(ErrorMode::Rescaled).run(&samples);
        assert!(normalized.report.mse < 1e-20);
        assert!(rescaled.report.mse < 1e-20);
    }

    #[test]
    fn test_requantized_path_has_grid_error() {
        let codec = codec_with_mode(ErrorMode::Normalized);
        let samples: Vec<f64> = (0..50).map(|i| (i as f64 * 0.37).sin()).collect();
        let output = codec.run(&samples);
        assert!(output.pcm_report.mse > output.report.mse);
        // half a code step is 0.5 / 127 on the compressed scale and expansion
        // stretches it by roughly 4.5 at full scale
        assert!(output.pcm_report.errors.iter().all(|e| e.abs() < 0.05));
    }

    #[test]
    fn test_full_range_mapping_reaches_255() {
        let codec = ALawCodec::new(CodecParams {
            pcm_mapping: PcmMapping::FullRange,
            ..Default::default()
        });
        let output = codec.run(&[3.0, -3.0, 0.0]);
        assert_eq!(output.encoded.codes, vec![255, 0, 128]);

        let legacy = ALawCodec::default().run(&[3.0, -3.0, 0.0]);
        assert_eq!(legacy.encoded.codes, vec![254, 0, 127]);
    }

    #[test]
    fn test_codes_hash_is_stable_hex() {
        let output = ALawCodec::default().run(&[0.1, 0.2, -0.3]);
        let hash = output.encoded.codes_hash();
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hash, ALawCodec::default().run(&[0.1, 0.2, -0.3]).encoded.codes_hash());
    }

    #[test]
    fn test_params_alias() {
        let params: CodecParams = serde_json::from_str(r#"{"A": 100.0}"#).unwrap();
        assert_eq!(params, CodecParams::with_a(100.0));
    }
}
