//! Thermal Engine - real-time pseudo-thermal visualization in WASM
//!
//! A binary occupancy mask (person vs background) goes in once per frame; a
//! decaying, diffusing heat field, its summary stats and a color-mapped RGBA
//! frame come out.
//!
//! Architecture:
//! - core/        - heat field storage, safety macros, RNG, console logger
//! - domain/      - color ramps, gradient LUT, configuration
//! - spatial/     - occupancy masks and mask sources
//! - systems/     - heat step, stats, compositor, particle overlay
//! - simulation/  - ThermalCore orchestration + wasm facade
//! - analysis     - external analysis result shape and fallback policy

// Utils with safety macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod error;
pub mod domain;
pub mod spatial;
pub mod systems;
pub mod simulation;
pub mod analysis;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine: panic hook + console logging
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    crate::core::utils::logger::init_console_logger();
    log::info!("thermal engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use analysis::{resolve_analysis, AnalysisOutcome, AnalysisResult};
pub use crate::core::field::HeatField;
pub use domain::{ColorRamp, ColorStop, GradientLut, HeatParams, RampPreset, Rgb, ThermalConfig};
pub use error::ThermalError;
pub use simulation::{FrameStats, PerfStats, ThermalCore, ThermalEngine};
pub use spatial::{MaskSource, OccupancyMask};
pub use systems::{FrameCompositor, ParticleOverlay, Stats, StatsAggregator, Surface};
