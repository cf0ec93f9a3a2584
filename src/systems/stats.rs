//! Per-frame heat statistics: centroid of active cells, total active heat,
//! active cell count. Stateless; recomputed from scratch every frame.

use serde::Serialize;

use crate::core::field::HeatField;
use crate::domain::config::DEFAULT_ACTIVITY_THRESHOLD;

/// Normalized centroid reported when nothing is active. Means "no subject",
/// not a location.
pub const NO_SUBJECT_CENTROID: (f32, f32) = (0.5, 0.5);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub centroid: Point,
    pub total_heat: f32,
    pub pixel_count: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            centroid: Point {
                x: NO_SUBJECT_CENTROID.0,
                y: NO_SUBJECT_CENTROID.1,
            },
            total_heat: 0.0,
            pixel_count: 0,
        }
    }
}

impl Stats {
    /// True when at least one cell is above the activity threshold. The
    /// centroid is only meaningful in that case.
    #[inline]
    pub fn has_subject(&self) -> bool {
        self.pixel_count > 0
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StatsAggregator {
    threshold: f32,
}

impl Default for StatsAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVITY_THRESHOLD)
    }
}

impl StatsAggregator {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    #[inline]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold;
    }

    pub fn compute(&self, field: &HeatField) -> Stats {
        self.compute_values(field.values(), field.width() as usize, field.height() as usize)
    }

    /// Single pass over a row-major `width` x `height` slice.
    pub fn compute_values(&self, values: &[f32], width: usize, height: usize) -> Stats {
        debug_assert_eq!(values.len(), width * height);

        let mut sum_x = 0.0f64;
        let mut sum_y = 0.0f64;
        let mut sum_heat = 0.0f64;
        let mut count = 0u32;

        for (y, row) in values.chunks_exact(width).enumerate() {
            for (x, &v) in row.iter().enumerate() {
                if v > self.threshold {
                    sum_x += x as f64;
                    sum_y += y as f64;
                    sum_heat += v as f64;
                    count += 1;
                }
            }
        }

        if count == 0 {
            return Stats::default();
        }

        let n = count as f64;
        Stats {
            centroid: Point {
                x: (sum_x / n / width as f64) as f32,
                y: (sum_y / n / height as f64) as f32,
            },
            total_heat: sum_heat as f32,
            pixel_count: count,
        }
    }
}
