use wasm_bindgen::prelude::*;

use crate::analysis::{resolve_analysis, AnalysisOutcome};
use crate::domain::ramp::ColorStop;
use crate::domain::RampPreset;
use crate::error::ThermalError;
use crate::spatial::OccupancyMask;
use crate::systems::Stats;

use super::perf_stats::PerfStats;
use super::ThermalCore;

fn js_err(e: ThermalError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Stats of one frame as seen from JS.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStats {
    centroid_x: f32,
    centroid_y: f32,
    total_heat: f32,
    pixel_count: u32,
}

impl From<Stats> for FrameStats {
    fn from(s: Stats) -> Self {
        Self {
            centroid_x: s.centroid.x,
            centroid_y: s.centroid.y,
            total_heat: s.total_heat,
            pixel_count: s.pixel_count,
        }
    }
}

#[wasm_bindgen]
impl FrameStats {
    #[wasm_bindgen(getter)]
    pub fn centroid_x(&self) -> f32 { self.centroid_x }
    #[wasm_bindgen(getter)]
    pub fn centroid_y(&self) -> f32 { self.centroid_y }
    #[wasm_bindgen(getter)]
    pub fn total_heat(&self) -> f32 { self.total_heat }
    #[wasm_bindgen(getter)]
    pub fn pixel_count(&self) -> u32 { self.pixel_count }
    /// False means the centroid is the (0.5, 0.5) placeholder.
    #[wasm_bindgen(getter)]
    pub fn has_subject(&self) -> bool { self.pixel_count > 0 }
}

#[wasm_bindgen]
pub struct ThermalEngine {
    core: ThermalCore,
}

#[wasm_bindgen]
impl ThermalEngine {
    /// Engine with default settings and a `width` x `height` heat grid
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Result<ThermalEngine, JsValue> {
        let core = ThermalCore::new(width, height).map_err(js_err)?;
        Ok(Self { core })
    }

    /// Engine from a camelCase JSON config; missing keys take defaults
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str) -> Result<ThermalEngine, JsValue> {
        let core = ThermalCore::from_config_json(json).map_err(js_err)?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn output_width(&self) -> u32 { self.core.output_width() }

    #[wasm_bindgen(getter)]
    pub fn output_height(&self) -> u32 { self.core.output_height() }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> usize { self.core.particle_count() }

    pub fn config_json(&self) -> String {
        self.core.config().to_json()
    }

    // === FRAME ===

    /// Run one frame from segmentation `ImageData` bytes of any size
    pub fn process_mask_rgba(&mut self, rgba: &[u8], width: u32, height: u32) -> Result<FrameStats, JsValue> {
        self.core
            .process_rgba_frame(rgba, width, height)
            .map(FrameStats::from)
            .map_err(js_err)
    }

    /// Run one frame from a mask at grid resolution (nonzero = occupied)
    pub fn process_mask(&mut self, cells: &[u8]) -> Result<FrameStats, JsValue> {
        let mask = OccupancyMask::from_bytes(self.core.width(), self.core.height(), cells).map_err(js_err)?;
        self.core.process_frame(&mask).map(FrameStats::from).map_err(js_err)
    }

    /// Stats of the last processed frame
    pub fn stats(&self) -> FrameStats {
        self.core.stats().into()
    }

    pub fn stats_json(&self) -> String {
        self.core.stats().to_json()
    }

    pub fn reset(&mut self) {
        self.core.reset();
    }

    // === OUTPUT ===

    /// Pointer to the RGBA surface in wasm memory
    pub fn surface_ptr(&self) -> *const u8 {
        self.core.surface_ptr()
    }

    pub fn surface_len_bytes(&self) -> usize {
        self.core.surface_len_bytes()
    }

    pub fn surface_width(&self) -> u32 {
        self.core.surface().width()
    }

    pub fn surface_height(&self) -> u32 {
        self.core.surface().height()
    }

    /// Copy of the rendered frame (slower than reading through `surface_ptr`)
    pub fn frame_rgba(&self) -> Vec<u8> {
        self.core.frame_rgba()
    }

    pub fn heat_ptr(&self) -> *const f32 {
        self.core.heat_ptr()
    }

    pub fn heat_len(&self) -> usize {
        self.core.heat_len()
    }

    /// Baked gradient as RGBA bytes (for drawing a legend)
    pub fn lut_rgba(&self) -> Vec<u8> {
        self.core.lut().as_bytes().to_vec()
    }

    // === SETTINGS ===

    pub fn set_decay_rate(&mut self, value: f32) -> Result<(), JsValue> {
        self.core.set_decay_rate(value).map_err(js_err)
    }

    pub fn set_diffusion(&mut self, value: f32) -> Result<(), JsValue> {
        self.core.set_diffusion(value).map_err(js_err)
    }

    pub fn set_influx_rate(&mut self, value: f32) -> Result<(), JsValue> {
        self.core.set_influx_rate(value).map_err(js_err)
    }

    pub fn set_activity_threshold(&mut self, value: f32) -> Result<(), JsValue> {
        self.core.set_activity_threshold(value).map_err(js_err)
    }

    pub fn set_mask_threshold(&mut self, value: u8) {
        self.core.set_mask_threshold(value);
    }

    pub fn set_gamma(&mut self, gamma: f32) -> Result<(), JsValue> {
        self.core.set_gamma(gamma).map_err(js_err)
    }

    pub fn set_lut_size(&mut self, size: usize) -> Result<(), JsValue> {
        self.core.set_lut_size(size).map_err(js_err)
    }

    /// "THERMAL", "SPECTRAL" or "MAGMA"
    pub fn set_ramp(&mut self, name: &str) -> Result<(), JsValue> {
        let preset: RampPreset = name.parse().map_err(js_err)?;
        self.core.set_ramp(preset).map_err(js_err)
    }

    /// JSON array of `{"pos": f, "color": {"r","g","b"}}`
    pub fn set_color_stops_json(&mut self, json: &str) -> Result<(), JsValue> {
        let stops: Vec<ColorStop> = serde_json::from_str(json).map_err(|e| js_err(e.into()))?;
        self.core.set_color_stops(&stops).map_err(js_err)
    }

    pub fn set_output_size(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        self.core.set_output_size(width, height).map_err(js_err)
    }

    pub fn set_particles_enabled(&mut self, enabled: bool) {
        self.core.set_particles_enabled(enabled);
    }

    /// Enable or disable per-frame perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last frame perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }
}

/// Turn what the host saw from the analysis service into result JSON.
///
/// `has_key == false` short-circuits to the canned result. Otherwise pass the
/// response body on success, or the HTTP status (0 if none) and message on
/// failure.
#[wasm_bindgen]
pub fn resolve_analysis_json(
    has_key: bool,
    response: Option<String>,
    error_status: u16,
    error_message: Option<String>,
) -> String {
    let outcome = if !has_key {
        AnalysisOutcome::MissingKey
    } else if let Some(message) = error_message {
        AnalysisOutcome::Failed {
            status: (error_status != 0).then_some(error_status),
            message,
        }
    } else {
        AnalysisOutcome::Response(response.unwrap_or_default())
    };
    resolve_analysis(outcome).to_json()
}
