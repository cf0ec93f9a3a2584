//! Color ramps: ordered (position, RGB) stops with piecewise-linear
//! interpolation between neighbouring stops.
//!
//! A ramp is validated once at construction. After that `sample` cannot fail,
//! which is what lets the LUT build (and everything per-frame) stay
//! infallible.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThermalError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub pos: f32,
    pub color: Rgb,
}

impl ColorStop {
    pub const fn new(pos: f32, r: u8, g: u8, b: u8) -> Self {
        Self { pos, color: Rgb::new(r, g, b) }
    }
}

/// Deep blue -> azure -> cyan -> lime -> yellow -> orange -> red -> magenta -> white.
pub const THERMAL_STOPS: [ColorStop; 10] = [
    ColorStop::new(0.0, 0, 0, 20),
    ColorStop::new(0.15, 0, 0, 128),
    ColorStop::new(0.3, 0, 128, 255),
    ColorStop::new(0.45, 0, 255, 200),
    ColorStop::new(0.55, 50, 255, 50),
    ColorStop::new(0.65, 255, 255, 0),
    ColorStop::new(0.75, 255, 128, 0),
    ColorStop::new(0.85, 255, 0, 0),
    ColorStop::new(0.95, 255, 0, 255),
    ColorStop::new(1.0, 255, 255, 255),
];

pub const SPECTRAL_STOPS: [ColorStop; 8] = [
    ColorStop::new(0.0, 50, 20, 110),
    ColorStop::new(0.15, 50, 136, 189),
    ColorStop::new(0.3, 102, 194, 165),
    ColorStop::new(0.45, 171, 221, 164),
    ColorStop::new(0.6, 254, 224, 139),
    ColorStop::new(0.75, 253, 174, 97),
    ColorStop::new(0.9, 213, 62, 79),
    ColorStop::new(1.0, 158, 1, 66),
];

pub const MAGMA_STOPS: [ColorStop; 9] = [
    ColorStop::new(0.0, 0, 0, 4),
    ColorStop::new(0.125, 28, 16, 68),
    ColorStop::new(0.25, 79, 18, 123),
    ColorStop::new(0.375, 129, 37, 129),
    ColorStop::new(0.5, 181, 54, 122),
    ColorStop::new(0.625, 229, 80, 100),
    ColorStop::new(0.75, 251, 135, 97),
    ColorStop::new(0.875, 254, 194, 135),
    ColorStop::new(1.0, 252, 253, 191),
];

/// Named ramps selectable from the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RampPreset {
    #[default]
    Thermal,
    Spectral,
    Magma,
}

impl RampPreset {
    pub fn stops(self) -> &'static [ColorStop] {
        match self {
            RampPreset::Thermal => &THERMAL_STOPS,
            RampPreset::Spectral => &SPECTRAL_STOPS,
            RampPreset::Magma => &MAGMA_STOPS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RampPreset::Thermal => "THERMAL",
            RampPreset::Spectral => "SPECTRAL",
            RampPreset::Magma => "MAGMA",
        }
    }
}

impl fmt::Display for RampPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RampPreset {
    type Err = ThermalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "THERMAL" => Ok(RampPreset::Thermal),
            "SPECTRAL" => Ok(RampPreset::Spectral),
            "MAGMA" => Ok(RampPreset::Magma),
            other => Err(ThermalError::Config(format!("unknown ramp preset `{}`", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    stops: Vec<ColorStop>,
}

impl ColorRamp {
    pub fn new(stops: &[ColorStop]) -> Result<Self> {
        validate_stops(stops)?;
        Ok(Self { stops: stops.to_vec() })
    }

    pub fn from_preset(preset: RampPreset) -> Self {
        // Presets are compile-time constants that satisfy the stop invariants.
        Self { stops: preset.stops().to_vec() }
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Interpolate the ramp at `t` (clamped to [0, 1]).
    pub fn sample(&self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let (lower, upper) = self.segment(t);

        let range = upper.pos as f64 - lower.pos as f64;
        let local_t = if range == 0.0 { 0.0 } else { (t - lower.pos as f64) / range };

        Rgb {
            r: lerp_channel(lower.color.r, upper.color.r, local_t),
            g: lerp_channel(lower.color.g, upper.color.g, local_t),
            b: lerp_channel(lower.color.b, upper.color.b, local_t),
        }
    }

    /// First stop pair bracketing `t`. Validated ramps span [0, 1], so the
    /// (first, last) fallback is never taken for clamped input.
    fn segment(&self, t: f64) -> (ColorStop, ColorStop) {
        let first = self.stops[0];
        let last = self.stops[self.stops.len() - 1];
        for pair in self.stops.windows(2) {
            if t >= pair[0].pos as f64 && t <= pair[1].pos as f64 {
                return (pair[0], pair[1]);
            }
        }
        (first, last)
    }
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self::from_preset(RampPreset::Thermal)
    }
}

#[inline]
fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    let v = a as f64 + (b as f64 - a as f64) * t;
    v.round().clamp(0.0, 255.0) as u8
}

pub fn validate_stops(stops: &[ColorStop]) -> Result<()> {
    let invalid = |reason: String| Err(ThermalError::InvalidColorStops { reason });

    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return invalid("no stops".to_string());
    };
    if first.pos != 0.0 {
        return invalid(format!("first stop must be at 0.0, got {}", first.pos));
    }
    if last.pos != 1.0 {
        return invalid(format!("last stop must be at 1.0, got {}", last.pos));
    }
    for (i, pair) in stops.windows(2).enumerate() {
        if !(pair[1].pos > pair[0].pos) {
            return invalid(format!(
                "positions must strictly increase (stop {} at {} then {})",
                i, pair[0].pos, pair[1].pos
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for preset in [RampPreset::Thermal, RampPreset::Spectral, RampPreset::Magma] {
            assert!(ColorRamp::new(preset.stops()).is_ok(), "{}", preset);
        }
    }

    #[test]
    fn sample_hits_stops_exactly() {
        let ramp = ColorRamp::default();
        assert_eq!(ramp.sample(0.0), Rgb::new(0, 0, 20));
        assert_eq!(ramp.sample(0.65), Rgb::new(255, 255, 0));
        assert_eq!(ramp.sample(1.0), Rgb::new(255, 255, 255));
    }

    #[test]
    fn sample_interpolates_midpoint() {
        let ramp = ColorRamp::new(&[ColorStop::new(0.0, 0, 0, 0), ColorStop::new(1.0, 255, 100, 10)])
            .unwrap();
        // 127.5 rounds up, 50 exact, 5 exact
        assert_eq!(ramp.sample(0.5), Rgb::new(128, 50, 5));
    }

    #[test]
    fn sample_clamps_out_of_range() {
        let ramp = ColorRamp::default();
        assert_eq!(ramp.sample(-3.0), ramp.sample(0.0));
        assert_eq!(ramp.sample(7.0), ramp.sample(1.0));
        assert_eq!(ramp.sample(f64::NAN), ramp.sample(0.0));
    }

    #[test]
    fn rejects_missing_anchors() {
        let no_zero = [ColorStop::new(0.1, 0, 0, 0), ColorStop::new(1.0, 1, 1, 1)];
        let no_one = [ColorStop::new(0.0, 0, 0, 0), ColorStop::new(0.9, 1, 1, 1)];
        assert!(matches!(ColorRamp::new(&no_zero), Err(ThermalError::InvalidColorStops { .. })));
        assert!(matches!(ColorRamp::new(&no_one), Err(ThermalError::InvalidColorStops { .. })));
        assert!(ColorRamp::new(&[]).is_err());
    }

    #[test]
    fn rejects_non_increasing_positions() {
        let stops = [
            ColorStop::new(0.0, 0, 0, 0),
            ColorStop::new(0.5, 1, 1, 1),
            ColorStop::new(0.5, 2, 2, 2),
            ColorStop::new(1.0, 3, 3, 3),
        ];
        assert!(ColorRamp::new(&stops).is_err());

        let nan = [ColorStop::new(0.0, 0, 0, 0), ColorStop::new(f32::NAN, 1, 1, 1), ColorStop::new(1.0, 3, 3, 3)];
        assert!(ColorRamp::new(&nan).is_err());
    }

    #[test]
    fn preset_names_parse() {
        assert_eq!("magma".parse::<RampPreset>().unwrap(), RampPreset::Magma);
        assert_eq!("THERMAL".parse::<RampPreset>().unwrap(), RampPreset::Thermal);
        assert!("infrared".parse::<RampPreset>().is_err());
        assert_eq!(serde_json::to_string(&RampPreset::Spectral).unwrap(), "\"SPECTRAL\"");
    }
}
