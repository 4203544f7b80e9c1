//! Test signal synthesis and uniform sampling.
//!
//! The reference signal is a fixed sum of three sinusoids. It is evaluated on
//! two time axes: a fine "continuous" axis standing in for the analog signal,
//! and a coarse axis at the sampling interval.

use std::f64::consts::PI;

use crate::config::PipelineConfig;
use crate::error::{PcmError, PcmResult};

/// The fixed analog test signal.
///
/// `s(t) = 0.1 cos(0.15 pi t) + 1.5 sin(2.5 pi t) + 0.5 cos(4 pi t)`
#[inline]
pub fn test_signal(t: f64) -> f64 {
    0.1 * (0.15 * PI * t).cos() + 1.5 * (2.5 * PI * t).sin() + 0.5 * (4.0 * PI * t).cos()
}

/// Largest number of points a time axis may hold.
const MAX_SAMPLES: usize = isize::MAX as usize / std::mem::size_of::<f64>();

/// Returns `0, step, 2 step, ...` for every point strictly below `duration`.
///
/// The length is `ceil(duration / step)`, or zero when that ratio is not
/// positive (negative or zero duration, negative or infinite step).
///
/// # Errors
/// Returns [`PcmError::InvalidTimeAxis`] when the step is zero or NaN, or when
/// the ratio is infinite or too large to allocate.
pub fn sample_times(step: f64, duration: f64) -> PcmResult<Vec<f64>> {
    if step == 0.0 || step.is_nan() {
        return Err(PcmError::InvalidTimeAxis { step, duration });
    }

    let ratio = (duration / step).ceil();
    if ratio.is_infinite() || ratio > MAX_SAMPLES as f64 {
        return Err(PcmError::InvalidTimeAxis { step, duration });
    }

    // NaN ratio (NaN duration) and non-positive ratios both give an empty axis.
    let count = if ratio > 0.0 { ratio as usize } else { 0 };

    let mut times = Vec::new();
    times
        .try_reserve_exact(count)
        .map_err(|_| PcmError::InvalidTimeAxis { step, duration })?;
    times.extend((0..count).map(|i| i as f64 * step));
    Ok(times)
}

/// A uniformly stepped sequence of (time, amplitude) samples.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    /// Time step between samples, in seconds.
    pub step: f64,
    /// Sample times, starting at 0.
    pub times: Vec<f64>,
    /// Amplitude at each time.
    pub values: Vec<f64>,
}

impl TimeSeries {
    /// Evaluates `f` on the half-open axis `[0, duration)` with the given step.
    pub fn from_fn<F>(step: f64, duration: f64, f: F) -> PcmResult<Self>
    where
        F: Fn(f64) -> f64,
    {
        let times = sample_times(step, duration)?;
        let values = times.iter().map(|&t| f(t)).collect();
        Ok(Self {
            step,
            times,
            values,
        })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the series holds no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest absolute amplitude, or 0 for an empty series.
    pub fn peak_abs(&self) -> f64 {
        self.values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }
}

/// Produces the continuous and sampled renditions of the test signal.
#[derive(Debug, Clone)]
pub struct SignalSynthesizer {
    continuous_step: f64,
    sampling_interval: f64,
    duration: f64,
}

impl SignalSynthesizer {
    /// Creates a synthesizer for the given configuration.
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            continuous_step: config.continuous_step,
            sampling_interval: config.sampling_interval(),
            duration: config.duration,
        }
    }

    /// The fine-grained reference series standing in for the analog signal.
    pub fn continuous(&self) -> PcmResult<TimeSeries> {
        TimeSeries::from_fn(self.continuous_step, self.duration, test_signal)
    }

    /// The series sampled at `1 / sampling_frequency`.
    pub fn sampled(&self) -> PcmResult<TimeSeries> {
        TimeSeries::from_fn(self.sampling_interval, self.duration, test_signal)
    }
}
