//! HeatField - double-buffered scalar grid
//!
//! Two owned arrays of `width * height` f32 in row-major order. The step
//! kernel reads `front` (last frame) and writes `back`, then `swap` makes the
//! new values visible. Both buffers are allocated once and reused.

mod accessors;

use crate::error::{Result, ThermalError};

pub struct HeatField {
    width: u32,
    height: u32,
    size: usize,

    front: Vec<f32>,
    back: Vec<f32>,
}

impl HeatField {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ThermalError::InvalidDimensions { width, height });
        }
        let size = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            size,
            front: vec![0.0; size],
            back: vec![0.0; size],
        })
    }

    /// Build a field from existing values (clamped). Mostly for tests and
    /// hosts restoring a snapshot within the same session.
    pub fn from_values(width: u32, height: u32, values: &[f32]) -> Result<Self> {
        let mut field = Self::new(width, height)?;
        if values.len() != field.size {
            return Err(ThermalError::BufferLength {
                len: values.len(),
                width,
                height,
                stride: 1,
            });
        }
        for (dst, &v) in field.front.iter_mut().zip(values) {
            *dst = clamp_heat(v);
        }
        Ok(field)
    }

    /// Current (last completed step) values.
    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.front
    }

    /// Split borrow for the step kernel: (previous frame, buffer to write).
    #[inline]
    pub(crate) fn buffers_mut(&mut self) -> (&[f32], &mut [f32]) {
        (&self.front, &mut self.back)
    }

    /// Publish the freshly written back buffer.
    #[inline]
    pub(crate) fn swap(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
    }

    pub fn reset(&mut self) {
        self.front.fill(0.0);
        self.back.fill(0.0);
    }

    pub fn fill(&mut self, value: f32) {
        self.front.fill(clamp_heat(value));
    }

    pub fn values_ptr(&self) -> *const f32 {
        self.front.as_ptr()
    }
}

/// Clamp to [0, 1], mapping NaN to 0.
#[inline(always)]
pub fn clamp_heat(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}
