//! Engine error type.
//!
//! Everything that can go wrong in the engine is a configuration or caller
//! contract problem; none of these are raised from inside a frame once the
//! engine is built, except `DimensionMismatch` for a bad mask.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThermalError {
    /// Color stop sequence is empty, unordered, or missing its 0.0 / 1.0 anchors.
    #[error("invalid color stops: {reason}")]
    InvalidColorStops { reason: String },

    #[error("LUT size must be at least 2, got {size}")]
    InvalidLutSize { size: usize },

    #[error("gamma must be finite and > 0, got {gamma}")]
    InvalidGamma { gamma: f32 },

    /// A numeric knob is outside its documented range.
    #[error("parameter `{name}` out of range: {value} (expected {expected})")]
    InvalidParameter {
        name: &'static str,
        value: f32,
        expected: &'static str,
    },

    #[error("dimension mismatch: expected {expected_w}x{expected_h}, got {actual_w}x{actual_h}")]
    DimensionMismatch {
        expected_w: u32,
        expected_h: u32,
        actual_w: u32,
        actual_h: u32,
    },

    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Buffer length does not match the declared dimensions.
    #[error("buffer length {len} does not match {width}x{height} (x{stride})")]
    BufferLength {
        len: usize,
        width: u32,
        height: u32,
        stride: usize,
    },

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ThermalError>;

impl From<serde_json::Error> for ThermalError {
    fn from(e: serde_json::Error) -> Self {
        ThermalError::Config(e.to_string())
    }
}
