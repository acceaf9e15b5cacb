//! Error types for store construction and reduction

use thiserror::Error;

/// Errors raised by the LOD engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LodError {
    /// A curve does not have one sample per x value.
    #[error("Shape mismatch: curve {curve} has {actual} samples, expected {expected}")]
    ShapeMismatch {
        curve: usize,
        expected: usize,
        actual: usize,
    },

    /// The x axis has no samples.
    #[error("Store requires at least one x sample")]
    EmptyAxis,

    /// The x axis is not finite and strictly increasing.
    #[error("x axis must be finite and strictly increasing (violated at index {index})")]
    NonMonotonicAxis { index: usize },

    /// The requested x range contains no samples.
    #[error("No samples in x range [{min}, {max}]")]
    EmptyRange { min: f64, max: f64 },

    /// Curve index outside `[0, curve_count)`.
    #[error("Curve index {index} out of range (curve count {count})")]
    OutOfRange { index: usize, count: usize },

    /// Rejected configuration value.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for LOD operations
pub type Result<T> = std::result::Result<T, LodError>;
