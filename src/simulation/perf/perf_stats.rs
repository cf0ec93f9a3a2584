use wasm_bindgen::prelude::*;

/// Per-frame timing and size snapshot. All zeros while metrics are off.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) stats_ms: f64,
    pub(super) render_ms: f64,
    pub(super) particles_ms: f64,
    pub(super) frame_ms: f64,
    pub(super) active_cells: u32,
    pub(super) particle_count: u32,
    pub(super) grid_size: u32,
    pub(super) surface_bytes: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn stats_ms(&self) -> f64 { self.stats_ms }
    #[wasm_bindgen(getter)]
    pub fn render_ms(&self) -> f64 { self.render_ms }
    #[wasm_bindgen(getter)]
    pub fn particles_ms(&self) -> f64 { self.particles_ms }
    #[wasm_bindgen(getter)]
    pub fn frame_ms(&self) -> f64 { self.frame_ms }
    #[wasm_bindgen(getter)]
    pub fn active_cells(&self) -> u32 { self.active_cells }
    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.particle_count }
    #[wasm_bindgen(getter)]
    pub fn grid_size(&self) -> u32 { self.grid_size }
    #[wasm_bindgen(getter)]
    pub fn surface_bytes(&self) -> u32 { self.surface_bytes }
}
