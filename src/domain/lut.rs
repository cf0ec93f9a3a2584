//! Gradient lookup table: a color ramp baked into `size` RGBA entries so the
//! compositor does one index + 4-byte copy per pixel.

use crate::error::{Result, ThermalError};

use super::ramp::{ColorRamp, ColorStop};

pub const DEFAULT_LUT_SIZE: usize = 1024;
pub const DEFAULT_GAMMA: f32 = 2.2;

#[derive(Debug, Clone, PartialEq)]
pub struct GradientLut {
    /// RGBA bytes, `size * 4` long.
    entries: Vec<u8>,
    size: usize,
    gamma: f32,
}

impl GradientLut {
    /// Validate `stops` and bake them. All malformed-configuration errors
    /// surface here, never during lookup.
    pub fn build(stops: &[ColorStop], gamma: f32, size: usize) -> Result<Self> {
        let ramp = ColorRamp::new(stops)?;
        Self::from_ramp(&ramp, gamma, size)
    }

    pub fn from_ramp(ramp: &ColorRamp, gamma: f32, size: usize) -> Result<Self> {
        if size < 2 {
            return Err(ThermalError::InvalidLutSize { size });
        }
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(ThermalError::InvalidGamma { gamma });
        }

        let inv_gamma = 1.0 / gamma as f64;
        let last = (size - 1) as f64;
        let mut entries = vec![0u8; size * 4];

        for (i, px) in entries.chunks_exact_mut(4).enumerate() {
            // t' = t^(1/gamma): gamma > 1 stretches the low end of the ramp
            let t = (i as f64 / last).powf(inv_gamma);
            let c = ramp.sample(t);
            px[0] = c.r;
            px[1] = c.g;
            px[2] = c.b;
            px[3] = 255;
        }

        Ok(Self { entries, size, gamma })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.entries
    }

    /// LUT index for a heat value: floor(clamp(v, 0, 1) * (N - 1)).
    #[inline]
    pub fn index_for(&self, value: f32) -> usize {
        let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        (((v as f64) * (self.size - 1) as f64) as usize).min(self.size - 1)
    }

    #[inline]
    pub fn entry(&self, index: usize) -> [u8; 4] {
        let i = index.min(self.size - 1) * 4;
        [
            self.entries[i],
            self.entries[i + 1],
            self.entries[i + 2],
            self.entries[i + 3],
        ]
    }

    #[inline]
    pub fn color_for(&self, value: f32) -> [u8; 4] {
        self.entry(self.index_for(value))
    }
}
