use super::*;
use crate::domain::config::DEFAULT_OUTPUT_WIDTH;
use crate::domain::ramp::THERMAL_STOPS;
use crate::error::ThermalError;
use crate::spatial::ReplaySource;

fn block_mask(w: u32, h: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> OccupancyMask {
    let mut mask = OccupancyMask::empty(w, h).unwrap();
    for y in y0..y1 {
        for x in x0..x1 {
            mask.set(x, y, true);
        }
    }
    mask
}

fn small_core() -> ThermalCore {
    let mut config = ThermalConfig::with_size(32, 24);
    config.output_width = 64;
    config.output_height = 48;
    ThermalCore::from_config(config).unwrap()
}

#[test]
fn new_core_uses_defaults() {
    let core = ThermalCore::new(160, 120).unwrap();
    assert_eq!((core.width(), core.height()), (160, 120));
    assert_eq!(core.output_width(), DEFAULT_OUTPUT_WIDTH);
    assert_eq!(core.frame(), 0);
    assert_eq!(core.stats(), Stats::default());
    assert_eq!(core.lut().size(), 1024);
    assert!(core.field().values().iter().all(|&v| v == 0.0));
}

#[test]
fn rejects_zero_grid() {
    assert!(matches!(
        ThermalCore::new(0, 10),
        Err(ThermalError::InvalidDimensions { .. })
    ));
}

#[test]
fn subject_block_heats_up_and_is_found() {
    let mut core = small_core();
    let mask = block_mask(32, 24, 12, 8, 20, 16);

    let mut stats = Stats::default();
    for _ in 0..30 {
        stats = core.process_frame(&mask).unwrap();
    }

    assert!(stats.has_subject());
    // block spans x 12..20, y 8..16 -> center near (15.5/32, 11.5/24)
    assert!((stats.centroid.x - 15.5 / 32.0).abs() < 0.05, "cx {}", stats.centroid.x);
    assert!((stats.centroid.y - 11.5 / 24.0).abs() < 0.05, "cy {}", stats.centroid.y);
    assert_eq!(core.frame(), 30);
    assert_eq!(core.stats(), stats);
}

#[test]
fn field_stays_clamped_through_pipeline() {
    let mut core = small_core();
    let full = OccupancyMask::full(32, 24).unwrap();
    let empty = OccupancyMask::empty(32, 24).unwrap();
    for i in 0..60 {
        let mask = if (i / 10) % 2 == 0 { &full } else { &empty };
        core.process_frame(mask).unwrap();
        assert!(core.field().values().iter().all(|v| (0.0..=1.0).contains(v)));
    }
}

#[test]
fn heat_fades_after_subject_leaves() {
    let mut core = small_core();
    let mask = block_mask(32, 24, 10, 10, 14, 14);
    for _ in 0..20 {
        core.process_frame(&mask).unwrap();
    }
    let hot = core.stats().total_heat;
    assert!(hot > 0.0);

    let empty = OccupancyMask::empty(32, 24).unwrap();
    for _ in 0..200 {
        core.process_frame(&empty).unwrap();
    }
    assert!(!core.stats().has_subject());
    assert_eq!(core.stats().centroid.x, 0.5);
}

#[test]
fn mismatched_mask_is_rejected_without_side_effects() {
    let mut core = small_core();
    let wrong = OccupancyMask::full(16, 12).unwrap();
    let err = core.process_frame(&wrong).unwrap_err();
    assert!(matches!(err, ThermalError::DimensionMismatch { .. }));
    assert_eq!(core.frame(), 0);
    assert!(core.field().values().iter().all(|&v| v == 0.0));
    assert!(core.step(&wrong).is_err());
}

#[test]
fn step_only_touches_the_field() {
    let mut core = small_core();
    let full = OccupancyMask::full(32, 24).unwrap();
    let values = core.step(&full).unwrap();
    assert!(values.iter().all(|&v| v > 0.0));
    assert_eq!(core.frame(), 0);
    assert_eq!(core.particle_count(), 0);
}

#[test]
fn rendered_surface_matches_output_size_and_is_opaque() {
    let mut core = small_core();
    core.process_frame(&block_mask(32, 24, 4, 4, 8, 8)).unwrap();
    let surface = core.surface();
    assert_eq!((surface.width(), surface.height()), (64, 48));
    assert_eq!(core.surface_len_bytes(), 64 * 48 * 4);
    assert_eq!(core.frame_rgba().len(), 64 * 48 * 4);
    assert!(surface.as_rgba().chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn cold_corner_renders_lut_floor() {
    let mut core = small_core();
    core.set_particles_enabled(false);
    core.process_frame(&block_mask(32, 24, 20, 12, 32, 24)).unwrap();
    let cold = core.lut().color_for(0.0);
    assert_eq!(core.surface().pixel(0, 0), Some(cold));
}

#[test]
fn rgba_ingest_resamples_host_frames() {
    let mut core = small_core();
    // 64x48 host frame, right half "person" (red > 100)
    let (w, h) = (64u32, 48u32);
    let mut rgba = vec![0u8; (w * h * 4) as usize];
    for y in 0..h {
        for x in w / 2..w {
            let i = ((y * w + x) * 4) as usize;
            rgba[i] = 255;
        }
    }
    for _ in 0..15 {
        core.process_rgba_frame(&rgba, w, h).unwrap();
    }
    let stats = core.stats();
    assert!(stats.has_subject());
    assert!(stats.centroid.x > 0.5);

    // same-size frame at grid resolution takes the direct path
    let direct = vec![0u8; 32 * 24 * 4];
    core.process_rgba_frame(&direct, 32, 24).unwrap();
}

#[test]
fn rgba_threshold_is_strict_and_configurable() {
    let mut core = small_core();
    let rgba: Vec<u8> = std::iter::repeat([100u8, 0, 0, 255]).take(32 * 24).flatten().collect();
    core.process_rgba_frame(&rgba, 32, 24).unwrap();
    assert!(core.field().values().iter().all(|&v| v == 0.0));

    core.set_mask_threshold(99);
    core.process_rgba_frame(&rgba, 32, 24).unwrap();
    assert!(core.field().values().iter().all(|&v| v > 0.0));
}

#[test]
fn rgba_buffer_length_is_checked() {
    let mut core = small_core();
    assert!(matches!(
        core.process_rgba_frame(&[0u8; 10], 64, 48),
        Err(ThermalError::BufferLength { .. })
    ));
}

#[test]
fn mask_source_drives_frames_and_idles_gracefully() {
    let mut core = small_core();
    let masks = vec![OccupancyMask::full(32, 24).unwrap(); 3];
    let mut source = ReplaySource::new(masks);
    for _ in 0..3 {
        core.process_source(&mut source).unwrap();
    }
    let after_source = core.field().values()[0];
    // exhausted: the last mask keeps feeding heat
    core.process_source(&mut source).unwrap();
    assert!(core.field().values()[0] > after_source);
    assert_eq!(core.frame(), 4);
}

#[test]
fn gamma_rebuild_is_idempotent() {
    let mut core = small_core();
    let before = core.lut().clone();
    core.set_gamma(before.gamma()).unwrap();
    assert_eq!(core.lut(), &before);

    core.set_gamma(1.0).unwrap();
    assert_ne!(core.lut(), &before);
    core.set_gamma(2.2).unwrap();
    assert_eq!(core.lut(), &before);
}

#[test]
fn same_gamma_leaves_rendered_frames_unchanged() {
    let mask = block_mask(32, 24, 8, 6, 20, 18);
    let mut touched = small_core();
    let mut untouched = small_core();

    touched.process_frame(&mask).unwrap();
    untouched.process_frame(&mask).unwrap();
    let rendered = touched.frame_rgba();

    let gamma = touched.lut().gamma();
    touched.set_gamma(gamma).unwrap();
    assert_eq!(touched.frame_rgba(), rendered);

    for _ in 0..5 {
        touched.process_frame(&mask).unwrap();
        untouched.process_frame(&mask).unwrap();
        assert_eq!(touched.frame_rgba(), untouched.frame_rgba());
    }
}

#[test]
fn bad_settings_keep_previous_state() {
    let mut core = small_core();
    let lut = core.lut().clone();
    assert!(core.set_gamma(0.0).is_err());
    assert!(core.set_lut_size(1).is_err());
    assert!(core.set_color_stops(&THERMAL_STOPS[1..]).is_err());
    assert_eq!(core.lut(), &lut);

    let params = core.params();
    assert!(core.set_decay_rate(1.0).is_err());
    assert!(core.set_diffusion(-0.1).is_err());
    assert!(core.set_influx_rate(f32::NAN).is_err());
    assert!(core.set_activity_threshold(2.0).is_err());
    assert_eq!(core.params(), params);
}

#[test]
fn setters_update_config() {
    let mut core = small_core();
    core.set_decay_rate(0.5).unwrap();
    core.set_diffusion(0.0).unwrap();
    core.set_influx_rate(0.1).unwrap();
    core.set_ramp(RampPreset::Magma).unwrap();
    core.set_lut_size(256).unwrap();

    let config = core.config();
    assert_eq!(config.decay_rate, 0.5);
    assert_eq!(config.diffusion, 0.0);
    assert_eq!(config.ramp, RampPreset::Magma);
    assert_eq!(core.lut().size(), 256);

    // zero diffusion: one full-mask frame is exactly the influx
    core.process_frame(&OccupancyMask::full(32, 24).unwrap()).unwrap();
    assert!(core.field().values().iter().all(|&v| v == 0.1));
}

#[test]
fn ramp_switch_changes_rendered_colors() {
    let mut core = small_core();
    core.set_particles_enabled(false);
    let thermal_floor = core.lut().color_for(0.0);
    core.set_ramp(RampPreset::Magma).unwrap();
    core.process_frame(&OccupancyMask::empty(32, 24).unwrap()).unwrap();
    let magma_floor = core.lut().color_for(0.0);
    assert_ne!(thermal_floor, magma_floor);
    assert_eq!(core.surface().pixel(10, 10), Some(magma_floor));
}

#[test]
fn output_resize_applies_next_frame() {
    let mut core = small_core();
    core.set_output_size(20, 10).unwrap();
    core.process_frame(&OccupancyMask::empty(32, 24).unwrap()).unwrap();
    assert_eq!(core.surface_len_bytes(), 20 * 10 * 4);
    assert!(core.set_output_size(0, 10).is_err());
}

#[test]
fn particles_follow_subject_and_stop_when_disabled() {
    let mut core = small_core();
    let mask = block_mask(32, 24, 10, 6, 22, 18);
    for _ in 0..60 {
        core.process_frame(&mask).unwrap();
    }
    assert!(core.particle_count() > 0);

    core.set_particles_enabled(false);
    core.process_frame(&mask).unwrap();
    assert_eq!(core.particle_count(), 0);
}

#[test]
fn particles_never_change_heat_or_stats() {
    let mask = block_mask(32, 24, 10, 6, 22, 18);
    let mut with = small_core();
    let mut without = small_core();
    without.set_particles_enabled(false);
    for _ in 0..40 {
        let a = with.process_frame(&mask).unwrap();
        let b = without.process_frame(&mask).unwrap();
        assert_eq!(a, b);
    }
    assert_eq!(with.field().values(), without.field().values());
}

#[test]
fn reset_returns_to_cold_start() {
    let mut core = small_core();
    let mask = block_mask(32, 24, 0, 0, 16, 12);
    for _ in 0..40 {
        core.process_frame(&mask).unwrap();
    }
    core.reset();
    assert_eq!(core.frame(), 0);
    assert_eq!(core.particle_count(), 0);
    assert_eq!(core.stats(), Stats::default());
    assert!(core.field().values().iter().all(|&v| v == 0.0));
}

#[test]
fn perf_metrics_are_opt_in() {
    let mut core = small_core();
    let mask = block_mask(32, 24, 4, 4, 20, 20);
    core.process_frame(&mask).unwrap();
    assert_eq!(core.get_perf_stats(), PerfStats::default());

    core.enable_perf_metrics(true);
    core.process_frame(&mask).unwrap();
    let perf = core.get_perf_stats();
    assert!(perf.frame_ms() >= 0.0);
    assert_eq!(perf.grid_size(), 32 * 24);
    assert_eq!(perf.surface_bytes(), 64 * 48 * 4);
    assert_eq!(perf.active_cells(), core.stats().pixel_count);

    core.enable_perf_metrics(false);
    assert_eq!(core.get_perf_stats(), PerfStats::default());
}

#[test]
fn identical_runs_are_bitwise_identical() {
    let run = || {
        let mut core = small_core();
        let mask = block_mask(32, 24, 3, 5, 17, 19);
        for _ in 0..25 {
            core.process_frame(&mask).unwrap();
        }
        (core.field().values().to_vec(), core.frame_rgba())
    };
    assert_eq!(run(), run());
}

#[test]
fn config_json_builds_core() {
    let core = ThermalCore::from_config_json(r#"{"width": 40, "height": 30, "ramp": "SPECTRAL", "gamma": 1.0}"#).unwrap();
    assert_eq!((core.width(), core.height()), (40, 30));
    assert_eq!(core.config().ramp, RampPreset::Spectral);
    assert_eq!(core.lut().gamma(), 1.0);
    assert!(ThermalCore::from_config_json(r#"{"lutSize": 0}"#).is_err());
}
