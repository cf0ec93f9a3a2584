//! Engine configuration.
//!
//! Loaded from JSON handed over by the host (camelCase keys, every field
//! optional). `validate` is the single gate: a config that passes it can be
//! turned into a running core without further errors.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThermalError};

use super::lut::{GradientLut, DEFAULT_GAMMA, DEFAULT_LUT_SIZE};
use super::ramp::{validate_stops, ColorRamp, ColorStop, RampPreset};

pub const DEFAULT_WIDTH: u32 = 160;
pub const DEFAULT_HEIGHT: u32 = 120;
pub const DEFAULT_OUTPUT_WIDTH: u32 = 640;
pub const DEFAULT_OUTPUT_HEIGHT: u32 = 480;
pub const DEFAULT_DECAY_RATE: f32 = 0.92;
pub const DEFAULT_DIFFUSION: f32 = 0.6;
pub const DEFAULT_INFLUX_RATE: f32 = 0.2;
pub const DEFAULT_ACTIVITY_THRESHOLD: f32 = 0.2;
/// Red-channel level above which a segmentation pixel counts as occupied.
pub const DEFAULT_MASK_THRESHOLD: u8 = 100;
pub const DEFAULT_MAX_PARTICLES: usize = 150;
pub const DEFAULT_SEED: u32 = 12345;

/// Heat kernel constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatParams {
    pub decay_rate: f32,
    pub diffusion: f32,
    pub influx_rate: f32,
}

impl Default for HeatParams {
    fn default() -> Self {
        Self {
            decay_rate: DEFAULT_DECAY_RATE,
            diffusion: DEFAULT_DIFFUSION,
            influx_rate: DEFAULT_INFLUX_RATE,
        }
    }
}

impl HeatParams {
    pub fn validate(&self) -> Result<()> {
        check_open_unit("decayRate", self.decay_rate)?;
        check_closed_unit("diffusion", self.diffusion)?;
        check_closed_unit("influxRate", self.influx_rate)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThermalConfig {
    pub width: u32,
    pub height: u32,
    /// Display surface size; the field is upscaled to this.
    pub output_width: u32,
    pub output_height: u32,
    pub decay_rate: f32,
    pub diffusion: f32,
    pub influx_rate: f32,
    pub activity_threshold: f32,
    pub lut_size: usize,
    pub gamma: f32,
    pub ramp: RampPreset,
    /// Explicit stops; overrides `ramp` when present.
    pub color_stops: Option<Vec<ColorStop>>,
    pub mask_threshold: u8,
    pub max_particles: usize,
    pub seed: u32,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            output_width: DEFAULT_OUTPUT_WIDTH,
            output_height: DEFAULT_OUTPUT_HEIGHT,
            decay_rate: DEFAULT_DECAY_RATE,
            diffusion: DEFAULT_DIFFUSION,
            influx_rate: DEFAULT_INFLUX_RATE,
            activity_threshold: DEFAULT_ACTIVITY_THRESHOLD,
            lut_size: DEFAULT_LUT_SIZE,
            gamma: DEFAULT_GAMMA,
            ramp: RampPreset::Thermal,
            color_stops: None,
            mask_threshold: DEFAULT_MASK_THRESHOLD,
            max_particles: DEFAULT_MAX_PARTICLES,
            seed: DEFAULT_SEED,
        }
    }
}

impl ThermalConfig {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self { width, height, ..Self::default() }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: ThermalConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn heat_params(&self) -> HeatParams {
        HeatParams {
            decay_rate: self.decay_rate,
            diffusion: self.diffusion,
            influx_rate: self.influx_rate,
        }
    }

    pub fn color_ramp(&self) -> Result<ColorRamp> {
        match &self.color_stops {
            Some(stops) => ColorRamp::new(stops),
            None => Ok(ColorRamp::from_preset(self.ramp)),
        }
    }

    pub fn build_lut(&self) -> Result<GradientLut> {
        GradientLut::from_ramp(&self.color_ramp()?, self.gamma, self.lut_size)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ThermalError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.output_width == 0 || self.output_height == 0 {
            return Err(ThermalError::InvalidDimensions {
                width: self.output_width,
                height: self.output_height,
            });
        }
        self.heat_params().validate()?;
        check_closed_unit("activityThreshold", self.activity_threshold)?;
        if self.lut_size < 2 {
            return Err(ThermalError::InvalidLutSize { size: self.lut_size });
        }
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(ThermalError::InvalidGamma { gamma: self.gamma });
        }
        if let Some(stops) = &self.color_stops {
            validate_stops(stops)?;
        }
        Ok(())
    }
}

pub(crate) fn check_open_unit(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ThermalError::InvalidParameter { name, value, expected: "(0, 1)" })
    }
}

pub(crate) fn check_closed_unit(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ThermalError::InvalidParameter { name, value, expected: "[0, 1]" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = ThermalConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!((config.width, config.height), (160, 120));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = ThermalConfig::from_json(r#"{"width": 80, "decayRate": 0.5, "ramp": "MAGMA"}"#).unwrap();
        assert_eq!(config.width, 80);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.decay_rate, 0.5);
        assert_eq!(config.ramp, RampPreset::Magma);
        assert_eq!(config.lut_size, DEFAULT_LUT_SIZE);
    }

    #[test]
    fn explicit_stops_override_preset() {
        let json = r#"{
            "colorStops": [
                {"pos": 0.0, "color": {"r": 0, "g": 0, "b": 0}},
                {"pos": 1.0, "color": {"r": 9, "g": 9, "b": 9}}
            ]
        }"#;
        let config = ThermalConfig::from_json(json).unwrap();
        let lut = config.build_lut().unwrap();
        assert_eq!(lut.entry(lut.size() - 1), [9, 9, 9, 255]);
    }

    #[test]
    fn rejects_out_of_range_knobs() {
        assert!(ThermalConfig::from_json(r#"{"decayRate": 1.0}"#).is_err());
        assert!(ThermalConfig::from_json(r#"{"decayRate": 0.0}"#).is_err());
        assert!(ThermalConfig::from_json(r#"{"diffusion": 1.5}"#).is_err());
        assert!(ThermalConfig::from_json(r#"{"width": 0}"#).is_err());
        assert!(ThermalConfig::from_json(r#"{"outputHeight": 0}"#).is_err());
        assert!(ThermalConfig::from_json(r#"{"lutSize": 1}"#).is_err());
        assert!(ThermalConfig::from_json(r#"{"gamma": -2.0}"#).is_err());
    }

    #[test]
    fn rejects_malformed_stops() {
        let json = r#"{
            "colorStops": [
                {"pos": 0.0, "color": {"r": 0, "g": 0, "b": 0}},
                {"pos": 0.8, "color": {"r": 9, "g": 9, "b": 9}}
            ]
        }"#;
        assert!(matches!(
            ThermalConfig::from_json(json),
            Err(ThermalError::InvalidColorStops { .. })
        ));
    }

    #[test]
    fn malformed_json_is_config_error() {
        assert!(matches!(ThermalConfig::from_json("{"), Err(ThermalError::Config(_))));
    }

    #[test]
    fn json_round_trips_through_host() {
        let config = ThermalConfig::with_size(64, 48);
        let back = ThermalConfig::from_json(&config.to_json()).unwrap();
        assert_eq!(back, config);
    }
}
