use crate::core::field::clamp_heat;
use crate::domain::HeatParams;

/// Compute one output row `y` from the previous buffer.
///
/// `prev` is the whole previous field, `out` and `mask_row` are row `y` only.
/// Neighbours outside the grid are excluded from the average, not read as 0.
#[inline]
pub fn step_row(
    prev: &[f32],
    out: &mut [f32],
    mask_row: &[u8],
    y: usize,
    width: usize,
    height: usize,
    params: &HeatParams,
) {
    debug_assert_eq!(out.len(), width);
    debug_assert_eq!(mask_row.len(), width);
    debug_assert_eq!(prev.len(), width * height);

    let keep = 1.0 - params.diffusion;
    let row = y * width;
    let has_up = y > 0;
    let has_down = y + 1 < height;

    for x in 0..width {
        let i = row + x;
        let prev_val = *fast!(prev, [i]);

        let mut val = if *fast!(mask_row, [x]) != 0 {
            (prev_val + params.influx_rate).min(1.0)
        } else {
            prev_val * params.decay_rate
        };

        let mut sum = 0.0f32;
        let mut neighbors = 0u32;
        if x > 0 {
            sum += *fast!(prev, [i - 1]);
            neighbors += 1;
        }
        if x + 1 < width {
            sum += *fast!(prev, [i + 1]);
            neighbors += 1;
        }
        if has_up {
            sum += *fast!(prev, [i - width]);
            neighbors += 1;
        }
        if has_down {
            sum += *fast!(prev, [i + width]);
            neighbors += 1;
        }

        if neighbors > 0 {
            let avg = sum / neighbors as f32;
            val = val * keep + avg * params.diffusion;
        }

        fast!(out, [x] = clamp_heat(val));
    }
}
