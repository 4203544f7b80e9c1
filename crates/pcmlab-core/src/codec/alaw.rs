//! Continuous A-law compression and expansion.
//!
//! These are the smooth logarithmic law, not the segmented G.711 byte
//! tables:
//!
//! ```text
//! compress(x) = sign(x) * ln(1 + A|x|) / ln(1 + A)
//! expand(y)   = sign(y) * (exp(|y| ln(1 + A)) - 1) / A
//! ```
//!
//! `ln_1p` and `exp_m1` keep precision for small magnitudes.

/// Default A-law compression parameter.
pub const DEFAULT_A: f64 = 87.6;

/// Sign function with `sign(0) = 0` and `sign(NaN) = NaN`.
#[inline]
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        x
    }
}

/// Compresses a normalized sample in [-1, 1] with parameter `a`.
#[inline]
pub fn compress(x: f64, a: f64) -> f64 {
    sign(x) * (a * x.abs()).ln_1p() / a.ln_1p()
}

/// Expands a compressed value back to the normalized scale.
#[inline]
pub fn expand(y: f64, a: f64) -> f64 {
    sign(y) * ((y.abs() * a.ln_1p()).exp_m1() / a)
}
