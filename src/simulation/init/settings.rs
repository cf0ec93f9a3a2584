use crate::domain::config::{check_closed_unit, check_open_unit};
use crate::domain::lut::GradientLut;
use crate::domain::ramp::{ColorRamp, ColorStop, RampPreset};
use crate::error::{Result, ThermalError};
use crate::systems::Stats;

use super::perf_stats::PerfStats;
use super::ThermalCore;

pub(super) fn enable_perf_metrics(core: &mut ThermalCore, enabled: bool) {
    core.perf_enabled = enabled;
    if !enabled {
        core.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(core: &ThermalCore) -> PerfStats {
    core.perf_stats.clone()
}

pub(super) fn reset(core: &mut ThermalCore) {
    core.field.reset();
    core.particles.clear();
    core.stats = Stats::default();
    core.frame = 0;
    log::debug!("thermal core reset");
}

pub(super) fn set_decay_rate(core: &mut ThermalCore, value: f32) -> Result<()> {
    check_open_unit("decayRate", value)?;
    core.params.decay_rate = value;
    core.config.decay_rate = value;
    Ok(())
}

pub(super) fn set_diffusion(core: &mut ThermalCore, value: f32) -> Result<()> {
    check_closed_unit("diffusion", value)?;
    core.params.diffusion = value;
    core.config.diffusion = value;
    Ok(())
}

pub(super) fn set_influx_rate(core: &mut ThermalCore, value: f32) -> Result<()> {
    check_closed_unit("influxRate", value)?;
    core.params.influx_rate = value;
    core.config.influx_rate = value;
    Ok(())
}

pub(super) fn set_activity_threshold(core: &mut ThermalCore, value: f32) -> Result<()> {
    check_closed_unit("activityThreshold", value)?;
    core.aggregator.set_threshold(value);
    core.config.activity_threshold = value;
    Ok(())
}

pub(super) fn set_mask_threshold(core: &mut ThermalCore, value: u8) {
    core.config.mask_threshold = value;
}

pub(super) fn set_gamma(core: &mut ThermalCore, gamma: f32) -> Result<()> {
    if gamma == core.lut.gamma() {
        return Ok(());
    }
    let lut = GradientLut::from_ramp(&core.ramp, gamma, core.lut.size())?;
    commit_lut(core, lut);
    core.config.gamma = gamma;
    Ok(())
}

pub(super) fn set_lut_size(core: &mut ThermalCore, size: usize) -> Result<()> {
    if size == core.lut.size() {
        return Ok(());
    }
    let lut = GradientLut::from_ramp(&core.ramp, core.lut.gamma(), size)?;
    commit_lut(core, lut);
    core.config.lut_size = size;
    Ok(())
}

pub(super) fn set_ramp(core: &mut ThermalCore, preset: RampPreset) -> Result<()> {
    let ramp = ColorRamp::from_preset(preset);
    replace_ramp(core, ramp)?;
    core.config.ramp = preset;
    core.config.color_stops = None;
    Ok(())
}

pub(super) fn set_color_stops(core: &mut ThermalCore, stops: &[ColorStop]) -> Result<()> {
    let ramp = ColorRamp::new(stops)?;
    replace_ramp(core, ramp)?;
    core.config.color_stops = Some(stops.to_vec());
    Ok(())
}

pub(super) fn set_output_size(core: &mut ThermalCore, width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(ThermalError::InvalidDimensions { width, height });
    }
    if (width, height) != (core.config.output_width, core.config.output_height) {
        log::info!("output surface resized to {}x{}", width, height);
    }
    core.config.output_width = width;
    core.config.output_height = height;
    Ok(())
}

pub(super) fn set_particles_enabled(core: &mut ThermalCore, enabled: bool) {
    core.particles.enabled = enabled;
    if !enabled {
        core.particles.clear();
    }
}

/// Bake `ramp` into a new LUT first so a failure leaves the old one in place.
fn replace_ramp(core: &mut ThermalCore, ramp: ColorRamp) -> Result<()> {
    let lut = GradientLut::from_ramp(&ramp, core.lut.gamma(), core.lut.size())?;
    core.ramp = ramp;
    commit_lut(core, lut);
    Ok(())
}

fn commit_lut(core: &mut ThermalCore, lut: GradientLut) {
    log::info!(
        "gradient LUT rebuilt: {} entries, gamma {}, {} stops",
        lut.size(),
        lut.gamma(),
        core.ramp.stops().len()
    );
    core.lut = lut;
}
