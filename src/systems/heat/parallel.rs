use rayon::prelude::*;

use crate::domain::HeatParams;

use super::kernel::step_row;

/// Row-parallel step. Each task owns one output row and reads the shared
/// previous buffer, so there is no cross-row write dependency.
pub(super) fn step_rows_parallel(
    prev: &[f32],
    next: &mut [f32],
    mask: &[u8],
    width: usize,
    height: usize,
    params: &HeatParams,
) {
    next.par_chunks_exact_mut(width)
        .zip(mask.par_chunks_exact(width))
        .enumerate()
        .for_each(|(y, (row, mask_row))| {
            step_row(prev, row, mask_row, y, width, height, params);
        });
}
