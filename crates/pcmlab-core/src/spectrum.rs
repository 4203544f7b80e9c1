//! Centered DFT spectra.
//!
//! A spectrum is the unnormalized forward DFT of a sequence, frequency-shifted
//! so the zero-frequency bin sits in the middle. No window and no zero padding
//! are applied; the result has exactly as many bins as the input has samples.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use crate::signal::TimeSeries;

/// Sample frequencies of a length-`n` DFT with sample spacing `d`.
///
/// Bin `i` holds `i / (n d)` for `i < (n + 1) / 2` and `(i - n) / (n d)`
/// otherwise, so positive frequencies come first, followed by negative ones.
pub fn fftfreq(n: usize, d: f64) -> Vec<f64> {
    let scale = 1.0 / (n as f64 * d);
    let positive = (n + 1) / 2;
    (0..n)
        .map(|i| {
            let k = if i < positive {
                i as f64
            } else {
                i as f64 - n as f64
            };
            k * scale
        })
        .collect()
}

/// Rotates DFT-ordered data so the zero-frequency bin moves to index `n / 2`.
pub fn fftshift<T>(data: &mut [T]) {
    let half = data.len() / 2;
    data.rotate_right(half);
}

/// Frequency-domain view of a sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Frequency of each bin, ascending from negative through zero.
    ///
    /// Shifted with the values, unlike plots that pair a raw `fftfreq` axis
    /// with shifted values.
    pub frequencies: Vec<f64>,
    /// Complex DFT value of each bin.
    pub values: Vec<Complex<f64>>,
    /// Complex modulus of each bin.
    pub magnitudes: Vec<f64>,
}

impl Spectrum {
    /// Number of bins.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the spectrum has no bins.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The bin with the largest magnitude as `(frequency, magnitude)`.
    ///
    /// Ties resolve to the lowest index, which in shifted order is the most
    /// negative frequency. Returns `None` for an empty spectrum.
    pub fn peak(&self) -> Option<(f64, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &m) in self.magnitudes.iter().enumerate() {
            if m.is_nan() {
                continue;
            }
            if best.map_or(true, |(_, b)| m > b) {
                best = Some((i, m));
            }
        }
        best.map(|(i, m)| (self.frequencies[i], m))
    }
}

/// Computes centered spectra.
pub struct SpectrumAnalyzer {
    planner: FftPlanner<f64>,
}

impl Default for SpectrumAnalyzer {
    fn default() -> Self {
        Self {
            planner: FftPlanner::new(),
        }
    }
}

impl std::fmt::Debug for SpectrumAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpectrumAnalyzer").finish_non_exhaustive()
    }
}

impl SpectrumAnalyzer {
    /// Creates a new analyzer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spectrum of `samples` taken every `dt` seconds.
    ///
    /// The frequency axis is `axis_scale * fftfreq(n, dt)`, shifted together
    /// with the values. An `axis_scale` of 1 gives Hz.
    pub fn analyze(&mut self, samples: &[f64], dt: f64, axis_scale: f64) -> Spectrum {
        let n = samples.len();
        if n == 0 {
            return Spectrum {
                frequencies: Vec::new(),
                values: Vec::new(),
                magnitudes: Vec::new(),
            };
        }

        let fft = self.planner.plan_fft_forward(n);
        let mut buffer: Vec<Complex<f64>> =
            samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
        fft.process(&mut buffer);
        fftshift(&mut buffer);

        let mut frequencies: Vec<f64> =
            fftfreq(n, dt).into_iter().map(|f| axis_scale * f).collect();
        fftshift(&mut frequencies);

        let magnitudes = buffer.iter().map(|c| c.norm()).collect();

        log::trace!("analyzed {} samples at dt={} (axis scale {})", n, dt, axis_scale);

        Spectrum {
            frequencies,
            values: buffer,
            magnitudes,
        }
    }

    /// Spectrum of a [`TimeSeries`], using its own step as the DFT spacing.
    pub fn analyze_series(&mut self, series: &TimeSeries, axis_scale: f64) -> Spectrum {
        self.analyze(&series.values, series.step, axis_scale)
    }
}
