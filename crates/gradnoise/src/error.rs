//! Noise configuration error types.

use thiserror::Error;

use crate::options::Axis;

/// Rejected call configuration. Coordinates themselves are never an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NoiseError {
    #[error("octave count must be at least 1 and at most {max}, got {got}")]
    InvalidOctaves { got: i64, max: u32 },

    #[error("persistence must be finite and positive, got {0}")]
    InvalidPersistence(f64),

    #[error("repeat period on {axis} axis must be 0 (off) or a positive 32-bit value, got {period}")]
    InvalidRepeat { axis: Axis, period: i64 },

    #[error("sample count must not be negative, got {0}")]
    InvalidCount(i64),

    #[error("sample start on {axis} axis is not finite: {value}")]
    InvalidStart { axis: Axis, value: f64 },

    #[error("sample delta on {axis} axis is not finite: {value}")]
    InvalidDelta { axis: Axis, value: f64 },

    #[error("parallel chunk length must be at least 1")]
    InvalidChunkLen,

    #[error("permutation must contain every value 0..=255 exactly once (duplicate {0})")]
    InvalidPermutation(u8),
}
