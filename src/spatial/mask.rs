//! Occupancy masks from the segmentation collaborator.
//!
//! One byte per cell (0 = background, 1 = subject). Masks arrive at whatever
//! resolution the segmenter produces; `resample_nearest` brings them onto the
//! simulation grid deterministically.

use crate::error::{Result, ThermalError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyMask {
    width: u32,
    height: u32,
    cells: Vec<u8>,
}

impl OccupancyMask {
    /// All-background mask.
    pub fn empty(width: u32, height: u32) -> Result<Self> {
        check_dims(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![0; cell_count(width, height)],
        })
    }

    pub fn full(width: u32, height: u32) -> Result<Self> {
        let mut mask = Self::empty(width, height)?;
        mask.cells.fill(1);
        Ok(mask)
    }

    /// Nonzero bytes count as occupied.
    pub fn from_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        check_dims(width, height)?;
        check_len(bytes.len(), width, height, 1)?;
        Ok(Self {
            width,
            height,
            cells: bytes.iter().map(|&b| (b != 0) as u8).collect(),
        })
    }

    pub fn from_bools(width: u32, height: u32, cells: &[bool]) -> Result<Self> {
        check_dims(width, height)?;
        check_len(cells.len(), width, height, 1)?;
        Ok(Self {
            width,
            height,
            cells: cells.iter().map(|&b| b as u8).collect(),
        })
    }

    /// Threshold the red channel of an RGBA image (canvas `ImageData`
    /// layout): occupied when `r > threshold`.
    pub fn from_rgba_threshold(rgba: &[u8], width: u32, height: u32, threshold: u8) -> Result<Self> {
        let mut mask = Self::empty(width, height)?;
        mask.load_rgba_threshold(rgba, width, height, threshold)?;
        Ok(mask)
    }

    /// Refill this mask in place from an RGBA image of the same dimensions.
    pub fn load_rgba_threshold(&mut self, rgba: &[u8], width: u32, height: u32, threshold: u8) -> Result<()> {
        self.check_same_dims(width, height)?;
        check_len(rgba.len(), width, height, 4)?;
        for (cell, px) in self.cells.iter_mut().zip(rgba.chunks_exact(4)) {
            *cell = (px[0] > threshold) as u8;
        }
        Ok(())
    }

    /// Nearest-neighbour resample of `src` onto a `width` x `height` grid.
    pub fn resample_nearest(src: &OccupancyMask, width: u32, height: u32) -> Result<Self> {
        let mut out = Self::empty(width, height)?;
        out.resample_from(src);
        Ok(out)
    }

    /// Resample `src` into this mask's existing dimensions, reusing storage.
    pub fn resample_from(&mut self, src: &OccupancyMask) {
        let (sw, sh) = (src.width as usize, src.height as usize);
        let (dw, dh) = (self.width as usize, self.height as usize);
        for dy in 0..dh {
            let sy = ((dy * sh) / dh).min(sh - 1);
            let src_row = &src.cells[sy * sw..(sy + 1) * sw];
            let dst_row = &mut self.cells[dy * dw..(dy + 1) * dw];
            for (dx, cell) in dst_row.iter_mut().enumerate() {
                let sx = ((dx * sw) / dw).min(sw - 1);
                *cell = src_row[sx];
            }
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    pub fn set(&mut self, x: u32, y: u32, occupied: bool) {
        if x < self.width && y < self.height {
            let idx = (y as usize) * (self.width as usize) + x as usize;
            self.cells[idx] = occupied as u8;
        }
    }

    #[inline]
    pub fn is_occupied(&self, x: u32, y: u32) -> bool {
        x < self.width
            && y < self.height
            && self.cells[(y as usize) * (self.width as usize) + x as usize] != 0
    }

    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) { (self.width, self.height) }

    /// Raw cells, 0 or 1, row-major.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    pub fn check_same_dims(&self, width: u32, height: u32) -> Result<()> {
        if self.width == width && self.height == height {
            Ok(())
        } else {
            Err(ThermalError::DimensionMismatch {
                expected_w: self.width,
                expected_h: self.height,
                actual_w: width,
                actual_h: height,
            })
        }
    }
}

/// A source of per-frame occupancy masks of known dimensions.
///
/// Implemented by whatever wraps the segmentation model on the host side; the
/// engine never depends on a particular detector.
pub trait MaskSource {
    fn dimensions(&self) -> (u32, u32);

    /// Write the next mask into `out`. Returns `false` when no new mask is
    /// available this frame (the caller may then reuse the previous one or
    /// feed an empty mask).
    fn next_mask(&mut self, out: &mut OccupancyMask) -> bool;
}

/// Replays a fixed list of masks, then reports exhaustion.
pub struct ReplaySource {
    masks: Vec<OccupancyMask>,
    cursor: usize,
}

impl ReplaySource {
    pub fn new(masks: Vec<OccupancyMask>) -> Self {
        Self { masks, cursor: 0 }
    }
}

impl MaskSource for ReplaySource {
    fn dimensions(&self) -> (u32, u32) {
        self.masks.first().map(|m| m.dimensions()).unwrap_or((0, 0))
    }

    fn next_mask(&mut self, out: &mut OccupancyMask) -> bool {
        let Some(mask) = self.masks.get(self.cursor) else {
            return false;
        };
        self.cursor += 1;
        if mask.dimensions() == out.dimensions() {
            out.cells.copy_from_slice(&mask.cells);
        } else {
            out.resample_from(mask);
        }
        true
    }
}

#[inline]
fn cell_count(width: u32, height: u32) -> usize {
    (width as usize) * (height as usize)
}

fn check_dims(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(ThermalError::InvalidDimensions { width, height });
    }
    Ok(())
}

fn check_len(len: usize, width: u32, height: u32, stride: usize) -> Result<()> {
    if len != cell_count(width, height) * stride {
        return Err(ThermalError::BufferLength { len, width, height, stride });
    }
    Ok(())
}
