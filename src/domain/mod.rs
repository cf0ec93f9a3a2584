//! Domain types: color ramps, the baked gradient LUT, engine configuration.

pub mod config;
pub mod lut;
pub mod ramp;

pub use config::{HeatParams, ThermalConfig};
pub use lut::GradientLut;
pub use ramp::{ColorRamp, ColorStop, RampPreset, Rgb};
