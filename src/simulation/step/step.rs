use crate::error::Result;
use crate::spatial::{MaskSource, OccupancyMask};
use crate::systems::{step_field, Stats};

use super::{PerfTimer, ThermalCore};

/// Heat step only. Rejected masks leave the field untouched.
pub(super) fn step_heat(core: &mut ThermalCore, mask: &OccupancyMask) -> Result<()> {
    step_field(&mut core.field, mask, &core.params).map_err(|e| {
        log::warn!("mask rejected: {}", e);
        e
    })
}

/// Threshold host `ImageData` and resample it into the core's mask scratch.
pub(super) fn ingest_rgba(core: &mut ThermalCore, rgba: &[u8], width: u32, height: u32) -> Result<()> {
    let threshold = core.config.mask_threshold;

    if (width, height) == core.mask.dimensions() {
        return core.mask.load_rgba_threshold(rgba, width, height, threshold);
    }

    let reuse = matches!(&core.ingest, Some(m) if m.dimensions() == (width, height));
    if reuse {
        if let Some(src) = core.ingest.as_mut() {
            src.load_rgba_threshold(rgba, width, height, threshold)?;
        }
    } else {
        log::debug!("mask ingest {}x{} -> {}x{}", width, height, core.field.width(), core.field.height());
        core.ingest = Some(OccupancyMask::from_rgba_threshold(rgba, width, height, threshold)?);
    }

    if let Some(src) = core.ingest.as_ref() {
        core.mask.resample_from(src);
    }
    Ok(())
}

pub(super) fn pull_source(core: &mut ThermalCore, source: &mut dyn MaskSource) {
    if !source.next_mask(&mut core.mask) {
        log::trace!("mask source idle at frame {}, reusing previous mask", core.frame);
    }
}

/// One full frame. `external` is a caller mask at field resolution; `None`
/// runs on the core's own mask scratch.
pub(super) fn process_frame(core: &mut ThermalCore, external: Option<&OccupancyMask>) -> Result<Stats> {
    let perf_on = core.perf_enabled;
    if perf_on {
        core.perf_stats.reset();
    }
    let frame_start = PerfTimer::start_if(perf_on);

    // === HEAT ===
    let t0 = PerfTimer::start_if(perf_on);
    let mask = match external {
        Some(m) => m,
        None => &core.mask,
    };
    if let Err(e) = step_field(&mut core.field, mask, &core.params) {
        log::warn!("mask rejected: {}", e);
        return Err(e);
    }
    let step_ms = PerfTimer::ms(t0);

    // === STATS ===
    let t0 = PerfTimer::start_if(perf_on);
    let stats = core.aggregator.compute(&core.field);
    let stats_ms = PerfTimer::ms(t0);

    // === RENDER ===
    let (out_w, out_h) = (core.config.output_width, core.config.output_height);
    let t0 = PerfTimer::start_if(perf_on);
    core.compositor.render(&core.field, &core.lut, out_w, out_h)?;
    let render_ms = PerfTimer::ms(t0);

    // === PARTICLES ===
    // Drawn over the finished blit; reads the centroid only.
    let t0 = PerfTimer::start_if(perf_on);
    core.particles.update(stats.centroid, stats.has_subject(), out_w, out_h);
    core.particles.draw(core.compositor.surface_mut());
    let particles_ms = PerfTimer::ms(t0);

    core.stats = stats;
    core.frame += 1;

    if perf_on {
        let p = &mut core.perf_stats;
        p.step_ms = step_ms;
        p.stats_ms = stats_ms;
        p.render_ms = render_ms;
        p.particles_ms = particles_ms;
        p.frame_ms = PerfTimer::ms(frame_start);
        p.active_cells = stats.pixel_count;
        p.particle_count = core.particles.count() as u32;
        p.grid_size = core.field.size() as u32;
        p.surface_bytes = core.compositor.surface().byte_len() as u32;
    }

    Ok(stats)
}
