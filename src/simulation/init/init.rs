use crate::core::field::HeatField;
use crate::domain::ThermalConfig;
use crate::error::Result;
use crate::spatial::OccupancyMask;
use crate::systems::{FrameCompositor, ParticleOverlay, Stats, StatsAggregator};

use super::perf_stats::PerfStats;
use super::ThermalCore;

/// Validate `config` and allocate every buffer the pipeline needs.
pub(super) fn create_core(config: ThermalConfig) -> Result<ThermalCore> {
    config.validate()?;

    let ramp = config.color_ramp()?;
    let lut = config.build_lut()?;
    let field = HeatField::new(config.width, config.height)?;
    let mask = OccupancyMask::empty(config.width, config.height)?;
    let compositor = FrameCompositor::new(config.output_width, config.output_height)?;

    log::info!(
        "thermal core {}x{} -> {}x{}, ramp {}, LUT {} @ gamma {}",
        config.width,
        config.height,
        config.output_width,
        config.output_height,
        if config.color_stops.is_some() { "custom" } else { config.ramp.name() },
        config.lut_size,
        config.gamma,
    );

    Ok(ThermalCore {
        params: config.heat_params(),
        field,
        mask,
        ingest: None,
        ramp,
        lut,
        aggregator: StatsAggregator::new(config.activity_threshold),
        compositor,
        particles: ParticleOverlay::new(config.max_particles, config.seed),
        stats: Stats::default(),
        frame: 0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
        config,
    })
}
