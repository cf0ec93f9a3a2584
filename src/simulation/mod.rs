//! ThermalCore - per-frame thermal pipeline
//!
//! Owns every buffer the pipeline touches and drives one frame at a time:
//! mask -> heat step -> stats -> LUT blit -> particle overlay.
//! Nothing is allocated per frame once the core is built (the output surface
//! only reallocates when its size changes).
//!
//! The `#[wasm_bindgen]` surface lives in `facade.rs`; this type stays plain
//! Rust so native tests and benches can drive it directly.

use crate::core::field::HeatField;
use crate::domain::{ColorRamp, GradientLut, HeatParams, RampPreset, ThermalConfig};
use crate::domain::ramp::ColorStop;
use crate::error::Result;
use crate::spatial::{MaskSource, OccupancyMask};
use crate::systems::{FrameCompositor, ParticleOverlay, Stats, StatsAggregator, Surface};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "step/step.rs"]
mod step;
#[path = "render/render_extract.rs"]
mod render_extract;
mod facade;

pub use facade::{resolve_analysis_json, FrameStats, ThermalEngine};
pub use perf_stats::PerfStats;

use perf_timer::PerfTimer;

pub struct ThermalCore {
    config: ThermalConfig,
    params: HeatParams,
    field: HeatField,

    // Mask scratch at field resolution, plus the last host-resolution mask
    // kept around so same-size RGBA frames reuse its storage.
    mask: OccupancyMask,
    ingest: Option<OccupancyMask>,

    ramp: ColorRamp,
    lut: GradientLut,
    aggregator: StatsAggregator,
    compositor: FrameCompositor,
    particles: ParticleOverlay,

    // State
    stats: Stats,
    frame: u64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl ThermalCore {
    /// Core with default settings at `width` x `height`.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        init::create_core(ThermalConfig::with_size(width, height))
    }

    pub fn from_config(config: ThermalConfig) -> Result<Self> {
        init::create_core(config)
    }

    pub fn from_config_json(json: &str) -> Result<Self> {
        init::create_core(ThermalConfig::from_json(json)?)
    }

    pub fn width(&self) -> u32 { self.field.width() }

    pub fn height(&self) -> u32 { self.field.height() }

    pub fn output_width(&self) -> u32 { self.config.output_width }

    pub fn output_height(&self) -> u32 { self.config.output_height }

    pub fn frame(&self) -> u64 { self.frame }

    pub fn config(&self) -> &ThermalConfig { &self.config }

    pub fn params(&self) -> HeatParams { self.params }

    pub fn field(&self) -> &HeatField { &self.field }

    pub fn lut(&self) -> &GradientLut { &self.lut }

    pub fn ramp(&self) -> &ColorRamp { &self.ramp }

    /// Stats of the last processed frame.
    pub fn stats(&self) -> Stats { self.stats }

    pub fn particle_count(&self) -> usize { self.particles.count() }

    pub fn particles(&self) -> &ParticleOverlay { &self.particles }

    // === PIPELINE ===

    /// Advance the heat field only. Stats, surface and particles are untouched.
    pub fn step(&mut self, mask: &OccupancyMask) -> Result<&[f32]> {
        step::step_heat(self, mask)?;
        Ok(self.field.values())
    }

    /// Run a full frame with a mask at field resolution.
    pub fn process_frame(&mut self, mask: &OccupancyMask) -> Result<Stats> {
        step::process_frame(self, Some(mask))
    }

    /// Run a full frame from segmentation `ImageData` of any size. The red
    /// channel is thresholded and the result resampled onto the field.
    pub fn process_rgba_frame(&mut self, rgba: &[u8], width: u32, height: u32) -> Result<Stats> {
        step::ingest_rgba(self, rgba, width, height)?;
        step::process_frame(self, None)
    }

    /// Pull the next mask from `source` and run a frame. When the source has
    /// nothing new the previous mask is reused.
    pub fn process_source(&mut self, source: &mut dyn MaskSource) -> Result<Stats> {
        step::pull_source(self, source);
        step::process_frame(self, None)
    }

    /// Zero the field, drop particles and forget the last stats.
    pub fn reset(&mut self) {
        settings::reset(self);
    }

    // === SETTINGS ===

    pub fn set_decay_rate(&mut self, value: f32) -> Result<()> {
        settings::set_decay_rate(self, value)
    }

    pub fn set_diffusion(&mut self, value: f32) -> Result<()> {
        settings::set_diffusion(self, value)
    }

    pub fn set_influx_rate(&mut self, value: f32) -> Result<()> {
        settings::set_influx_rate(self, value)
    }

    pub fn set_activity_threshold(&mut self, value: f32) -> Result<()> {
        settings::set_activity_threshold(self, value)
    }

    pub fn set_mask_threshold(&mut self, value: u8) {
        settings::set_mask_threshold(self, value);
    }

    /// Rebuilds the LUT unless `gamma` equals the current value.
    pub fn set_gamma(&mut self, gamma: f32) -> Result<()> {
        settings::set_gamma(self, gamma)
    }

    pub fn set_ramp(&mut self, preset: RampPreset) -> Result<()> {
        settings::set_ramp(self, preset)
    }

    pub fn set_color_stops(&mut self, stops: &[ColorStop]) -> Result<()> {
        settings::set_color_stops(self, stops)
    }

    pub fn set_lut_size(&mut self, size: usize) -> Result<()> {
        settings::set_lut_size(self, size)
    }

    pub fn set_output_size(&mut self, width: u32, height: u32) -> Result<()> {
        settings::set_output_size(self, width, height)
    }

    pub fn set_particles_enabled(&mut self, enabled: bool) {
        settings::set_particles_enabled(self, enabled);
    }

    /// Enable or disable per-frame perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last frame's perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === RENDER OUTPUT ===

    pub fn surface(&self) -> &Surface {
        self.compositor.surface()
    }

    /// Pointer to the RGBA surface (for zero-copy `ImageData` on the JS side)
    pub fn surface_ptr(&self) -> *const u8 {
        render_extract::surface_ptr(self)
    }

    pub fn surface_len_bytes(&self) -> usize {
        render_extract::surface_len_bytes(self)
    }

    /// Owned copy of the rendered frame.
    pub fn frame_rgba(&self) -> Vec<u8> {
        render_extract::frame_rgba(self)
    }

    /// Pointer to the current heat values (f32, row-major)
    pub fn heat_ptr(&self) -> *const f32 {
        render_extract::heat_ptr(self)
    }

    pub fn heat_len(&self) -> usize {
        self.field.size()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
