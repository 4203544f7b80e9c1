//! Property-based tests for the companding codec using proptest.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pcmlab-tests --test proptest_codec
//! ```

use proptest::prelude::*;

use pcmlab_core::codec::{alaw, normalize, pcm, ALawCodec, CodecParams, PcmMapping};
use pcmlab_core::spectrum::SpectrumAnalyzer;
use pcmlab_tests::pure_tone;

// ============================================================================
// 1. Compression Law
// ============================================================================

proptest! {
    /// expand(compress(x)) recovers x for any a > 1.
    #[test]
    fn compress_expand_roundtrip(x in -1.0f64..=1.0, a in 1.01f64..1000.0) {
        let y = alaw::compress(x, a);
        let back = alaw::expand(y, a);
        prop_assert!((back - x).abs() < 1e-9, "x={} a={} back={}", x, a, back);
    }

    /// compress is odd.
    #[test]
    fn compress_is_odd(x in -1.0f64..=1.0, a in 1.01f64..1000.0) {
        prop_assert_eq!(alaw::compress(-x, a), -alaw::compress(x, a));
    }

    /// compress keeps [-1, 1] inside [-1, 1].
    #[test]
    fn compress_is_bounded(x in -1.0f64..=1.0, a in 1.01f64..1000.0) {
        let y = alaw::compress(x, a);
        prop_assert!((-1.0 - 1e-12..=1.0 + 1e-12).contains(&y));
    }
}

// ============================================================================
// 2. 8-bit Mapping
// ============================================================================

proptest! {
    /// Larger compressed values never map to smaller codes.
    #[test]
    fn quantize_is_monotonic(c1 in -1.0f64..=1.0, c2 in -1.0f64..=1.0) {
        let (lo, hi) = if c1 <= c2 { (c1, c2) } else { (c2, c1) };
        for mapping in [PcmMapping::Legacy127, PcmMapping::FullRange] {
            prop_assert!(pcm::quantize(lo, mapping) <= pcm::quantize(hi, mapping));
        }
    }

    /// Legacy codes never reach 255.
    #[test]
    fn legacy_codes_are_bounded(c in -10.0f64..10.0) {
        prop_assert!(pcm::quantize(c, PcmMapping::Legacy127) <= 254);
    }

    /// Dequantizing a code lands within half a step of the compressed value.
    #[test]
    fn dequantize_is_within_half_step(c in -1.0f64..=1.0) {
        for mapping in [PcmMapping::Legacy127, PcmMapping::FullRange] {
            let back = pcm::dequantize(pcm::quantize(c, mapping), mapping);
            prop_assert!((back - c).abs() <= 0.5 / mapping.scale() + 1e-12);
        }
    }
}

// ============================================================================
// 3. Normalization and Full Codec
// ============================================================================

proptest! {
    /// Normalized samples never exceed 1 in magnitude.
    #[test]
    fn normalize_is_bounded(samples in prop::collection::vec(-1e6f64..1e6, 0..64)) {
        let (normalized, _) = normalize(&samples);
        prop_assert!(normalized.iter().all(|v| v.abs() <= 1.0));
    }

    /// Every run produces aligned sequences and a non-negative MSE.
    #[test]
    fn codec_run_is_aligned(samples in prop::collection::vec(-100.0f64..100.0, 1..64)) {
        let output = ALawCodec::new(CodecParams::default()).run(&samples);
        prop_assert_eq!(output.encoded.len(), samples.len());
        prop_assert_eq!(output.decoded.len(), samples.len());
        prop_assert_eq!(output.report.errors.len(), samples.len());
        prop_assert!(output.report.mse >= 0.0);
    }
}

// ============================================================================
// 4. Spectrum
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// A pure tone below Nyquist peaks within one bin of its frequency.
    #[test]
    fn pure_tone_peak(f0 in 1.0f64..20.0, n in 128usize..512) {
        let fs = 50.0;
        let samples = pure_tone(f0, fs, n, 1.0);
        let spectrum = SpectrumAnalyzer::new().analyze(&samples, 1.0 / fs, 1.0);
        let (freq, _) = spectrum.peak().unwrap();
        prop_assert!((freq.abs() - f0).abs() <= fs / n as f64);
    }
}
