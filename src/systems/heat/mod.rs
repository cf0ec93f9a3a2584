//! Heat System - influx, decay and 4-neighbour diffusion
//!
//! One explicit relaxation step per frame. Every cell of the new buffer is a
//! function of the previous buffer and the mask only, so rows are independent
//! and the serial and parallel paths produce bit-identical output.

mod kernel;
#[cfg(feature = "parallel")]
mod parallel;

use crate::core::field::HeatField;
use crate::domain::HeatParams;
use crate::error::Result;
use crate::spatial::OccupancyMask;

pub use kernel::step_row;

/// Advance `field` by one frame under `mask`.
///
/// The mask must match the field dimensions exactly; resampling is the
/// caller's job (see `OccupancyMask::resample_nearest`).
pub fn step_field(field: &mut HeatField, mask: &OccupancyMask, params: &HeatParams) -> Result<()> {
    mask.check_same_dims(field.width(), field.height())?;

    let width = field.width() as usize;
    let height = field.height() as usize;
    let (prev, next) = field.buffers_mut();

    #[cfg(feature = "parallel")]
    {
        parallel::step_rows_parallel(prev, next, mask.cells(), width, height, params);
    }
    #[cfg(not(feature = "parallel"))]
    {
        step_rows_serial(prev, next, mask.cells(), width, height, params);
    }

    field.swap();
    Ok(())
}

pub fn step_rows_serial(
    prev: &[f32],
    next: &mut [f32],
    mask: &[u8],
    width: usize,
    height: usize,
    params: &HeatParams,
) {
    for (y, row) in next.chunks_exact_mut(width).enumerate() {
        step_row(prev, row, &mask[y * width..(y + 1) * width], y, width, height, params);
    }
}
