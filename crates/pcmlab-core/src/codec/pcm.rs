//! 8-bit PCM code mapping for compressed values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PcmError;

/// How a compressed value in [-1, 1] maps onto an 8-bit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PcmMapping {
    /// `round((c + 1) * 127)`: codes 0..=254, 255 is never produced.
    #[default]
    Legacy127,
    /// `round((c + 1) * 127.5)`: codes span the full 0..=255 range.
    FullRange,
}

impl PcmMapping {
    /// Scale applied to `c + 1`.
    pub fn scale(&self) -> f64 {
        match self {
            PcmMapping::Legacy127 => 127.0,
            PcmMapping::FullRange => 127.5,
        }
    }

    /// Largest code this mapping can produce.
    pub fn max_code(&self) -> u8 {
        match self {
            PcmMapping::Legacy127 => 254,
            PcmMapping::FullRange => 255,
        }
    }

    /// Short machine-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PcmMapping::Legacy127 => "legacy127",
            PcmMapping::FullRange => "full_range",
        }
    }
}

impl fmt::Display for PcmMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PcmMapping {
    type Err = PcmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "legacy127" | "legacy" => Ok(PcmMapping::Legacy127),
            "full_range" | "full-range" => Ok(PcmMapping::FullRange),
            other => Err(PcmError::invalid_param(
                "pcm_mapping",
                format!("unknown mapping '{}' (expected legacy127 or full_range)", other),
            )),
        }
    }
}

/// Maps a compressed value to its 8-bit code.
///
/// Rounds half to even. Values outside [-1, 1] saturate at the ends of the
/// code range; NaN maps to 0.
#[inline]
pub fn quantize(compressed: f64, mapping: PcmMapping) -> u8 {
    let level = ((compressed + 1.0) * mapping.scale()).round_ties_even();
    level.clamp(0.0, f64::from(mapping.max_code())) as u8
}

/// Maps an 8-bit code back to the compressed scale.
#[inline]
pub fn dequantize(code: u8, mapping: PcmMapping) -> f64 {
    code as f64 / mapping.scale() - 1.0
}
