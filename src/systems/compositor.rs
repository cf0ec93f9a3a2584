//! Frame compositor: nearest-neighbour blit of the low-res heat field into a
//! display-sized RGBA surface through the gradient LUT.
//!
//! Per-pixel work is independent, so rows are rendered in parallel when the
//! `parallel` feature is on. The surface is reused across frames and only
//! reallocated when the output size changes.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::field::HeatField;
use crate::domain::GradientLut;
use crate::error::{Result, ThermalError};

/// RGBA8 pixel surface in canvas `ImageData` layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ThermalError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize) * 4],
        })
    }

    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn as_rgba_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn byte_len(&self) -> usize {
        self.pixels.len()
    }

    pub fn pixels_ptr(&self) -> *const u8 {
        self.pixels.as_ptr()
    }

    /// RGBA at (x, y), or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]])
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(ThermalError::InvalidDimensions { width, height });
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixels.resize((width as usize) * (height as usize) * 4, 0);
        }
        Ok(())
    }
}

pub struct FrameCompositor {
    surface: Surface,
    /// Source column for each output column; rebuilt on resize.
    column_map: Vec<usize>,
    column_map_key: (u32, u32),
}

impl FrameCompositor {
    pub fn new(out_width: u32, out_height: u32) -> Result<Self> {
        Ok(Self {
            surface: Surface::new(out_width, out_height)?,
            column_map: Vec::new(),
            column_map_key: (0, 0),
        })
    }

    #[inline]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    #[inline]
    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    /// Render `field` at `out_width` x `out_height` and return the surface.
    pub fn render(&mut self, field: &HeatField, lut: &GradientLut, out_width: u32, out_height: u32) -> Result<&Surface> {
        self.surface.resize(out_width, out_height)?;
        self.refresh_column_map(field.width(), out_width);

        let src_w = field.width() as usize;
        let src_h = field.height() as usize;
        let out_w = out_width as usize;
        let out_h = out_height as usize;
        let values = field.values();
        let cols = &self.column_map;

        let render_row = |oy: usize, row: &mut [u8]| {
            let sy = source_index(oy, src_h, out_h);
            let src_row = &values[sy * src_w..(sy + 1) * src_w];
            for (px, &sx) in row.chunks_exact_mut(4).zip(cols.iter()) {
                let rgba = lut.color_for(*fast!(src_row, [sx]));
                px.copy_from_slice(&rgba);
                px[3] = 255;
            }
        };

        #[cfg(feature = "parallel")]
        {
            self.surface
                .pixels
                .par_chunks_exact_mut(out_w * 4)
                .enumerate()
                .for_each(|(oy, row)| render_row(oy, row));
        }
        #[cfg(not(feature = "parallel"))]
        {
            for (oy, row) in self.surface.pixels.chunks_exact_mut(out_w * 4).enumerate() {
                render_row(oy, row);
            }
        }

        Ok(&self.surface)
    }

    fn refresh_column_map(&mut self, src_w: u32, out_w: u32) {
        if self.column_map_key == (src_w, out_w) {
            return;
        }
        self.column_map = (0..out_w as usize)
            .map(|ox| source_index(ox, src_w as usize, out_w as usize))
            .collect();
        self.column_map_key = (src_w, out_w);
    }
}

/// floor(o * src / out), clamped to the last source cell.
#[inline]
fn source_index(o: usize, src: usize, out: usize) -> usize {
    ((o * src) / out).min(src - 1)
}
