//! Decorative particle overlay anchored at the heat centroid.
//!
//! Particles live in a fixed-capacity arena with a free list, so the hot path
//! never allocates. The overlay only reads the centroid and only writes the
//! already-rendered surface; it never touches the heat field or the stats.

use crate::core::utils::random::Rng;
use crate::domain::ramp::Rgb;
use crate::systems::compositor::Surface;
use crate::systems::stats::{Point, Stats};

/// Chance per frame of spawning one particle while a subject is present.
pub const SPAWN_CHANCE: f32 = 0.3;
pub const LIFE_DECREMENT: f32 = 0.02;
pub const SIZE_SHRINK: f32 = 0.95;

const WHITE: Rgb = Rgb::new(255, 255, 255);
const AMBER: Rgb = Rgb::new(255, 170, 0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Remaining life in (0, 1]; doubles as draw alpha.
    pub life: f32,
    pub size: f32,
    pub color: Rgb,
}

impl Particle {
    /// Advance one tick. Returns false once the particle has expired.
    #[inline]
    fn advance(&mut self) -> bool {
        self.x += self.vx;
        self.y += self.vy;
        self.life -= LIFE_DECREMENT;
        self.size *= SIZE_SHRINK;
        self.life > 0.0
    }
}

/// Fixed-capacity slot arena with free-list recycling.
struct Arena {
    slots: Vec<Option<Particle>>,
    free: Vec<usize>,
}

impl Arena {
    fn with_capacity(cap: usize) -> Self {
        Self {
            slots: vec![None; cap],
            // lowest index handed out first
            free: (0..cap).rev().collect(),
        }
    }

    fn alloc(&mut self, p: Particle) -> Option<usize> {
        let idx = self.free.pop()?;
        self.slots[idx] = Some(p);
        Some(idx)
    }

    fn release(&mut self, idx: usize) {
        if self.slots[idx].take().is_some() {
            self.free.push(idx);
        }
    }

    fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    fn clear(&mut self) {
        let cap = self.slots.len();
        self.slots.fill(None);
        self.free.clear();
        self.free.extend((0..cap).rev());
    }
}

pub struct ParticleOverlay {
    arena: Arena,
    rng: Rng,
    pub enabled: bool,
}

impl ParticleOverlay {
    pub fn new(capacity: usize, seed: u32) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            rng: Rng::new(seed),
            enabled: true,
        }
    }

    pub fn capacity(&self) -> usize {
        self.arena.slots.len()
    }

    /// Number of live particles.
    pub fn count(&self) -> usize {
        self.arena.live()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.arena.slots.iter().filter_map(|s| s.as_ref())
    }

    /// Spawn (maybe) at the centroid, then advance and retire particles.
    /// `width` x `height` is the surface the normalized centroid is projected onto.
    pub fn update(&mut self, centroid: Point, has_subject: bool, width: u32, height: u32) {
        if !self.enabled {
            return;
        }

        if has_subject && self.rng.chance(SPAWN_CHANCE) {
            self.spawn(centroid.x * width as f32, centroid.y * height as f32);
        }

        for idx in 0..self.arena.slots.len() {
            let expired = match self.arena.slots[idx].as_mut() {
                Some(p) => !p.advance(),
                None => false,
            };
            if expired {
                self.arena.release(idx);
            }
        }
    }

    /// Spawn one particle at pixel position (x, y). Dropped when the arena is full.
    pub fn spawn(&mut self, x: f32, y: f32) -> bool {
        let particle = Particle {
            x,
            y,
            vx: self.rng.range(-1.0, 1.0),
            // upward bias
            vy: self.rng.range(-1.0, 1.0) - 2.0,
            life: 1.0,
            size: self.rng.range(1.0, 4.0),
            color: if self.rng.f32() > 0.5 { WHITE } else { AMBER },
        };
        self.arena.alloc(particle).is_some()
    }

    /// Composite every live particle as a filled circle, alpha = life.
    pub fn draw(&self, surface: &mut Surface) {
        if !self.enabled {
            return;
        }
        for p in self.particles() {
            fill_circle(surface, p.x, p.y, p.size, p.color, p.life.clamp(0.0, 1.0));
        }
    }

    /// Convenience over [`update`](Self::update) taking this frame's stats.
    pub fn update_from_stats(&mut self, stats: &Stats, width: u32, height: u32) {
        self.update(stats.centroid, stats.has_subject(), width, height);
    }
}

/// Source-over blend of a filled circle onto an opaque surface.
fn fill_circle(surface: &mut Surface, cx: f32, cy: f32, radius: f32, color: Rgb, alpha: f32) {
    if radius <= 0.0 || alpha <= 0.0 {
        return;
    }
    let w = surface.width() as i32;
    let h = surface.height() as i32;
    let x0 = ((cx - radius).floor() as i32).max(0);
    let x1 = ((cx + radius).ceil() as i32).min(w - 1);
    let y0 = ((cy - radius).floor() as i32).max(0);
    let y1 = ((cy + radius).ceil() as i32).min(h - 1);
    if x0 > x1 || y0 > y1 {
        return;
    }

    let r2 = radius * radius;
    let stride = w as usize * 4;
    let pixels = surface.as_rgba_mut();
    let src = [color.r as f32, color.g as f32, color.b as f32];

    for py in y0..=y1 {
        let dy = py as f32 + 0.5 - cy;
        for px in x0..=x1 {
            let dx = px as f32 + 0.5 - cx;
            if dx * dx + dy * dy > r2 {
                continue;
            }
            let i = py as usize * stride + px as usize * 4;
            for c in 0..3 {
                let dst = pixels[i + c] as f32;
                pixels[i + c] = (src[c] * alpha + dst * (1.0 - alpha)).round() as u8;
            }
            pixels[i + 3] = 255;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject_at(x: f32, y: f32) -> Stats {
        Stats {
            centroid: Point { x, y },
            total_heat: 10.0,
            pixel_count: 10,
        }
    }

    #[test]
    fn no_spawn_without_subject() {
        let mut overlay = ParticleOverlay::new(16, 1);
        for _ in 0..200 {
            overlay.update_from_stats(&Stats::default(), 640, 480);
        }
        assert_eq!(overlay.count(), 0);
    }

    #[test]
    fn spawns_near_centroid_and_drifts_up_on_average() {
        let mut overlay = ParticleOverlay::new(150, 99);
        let mut spawned_any = false;
        for _ in 0..100 {
            overlay.update_from_stats(&subject_at(0.5, 0.5), 640, 480);
            spawned_any |= overlay.count() > 0;
        }
        assert!(spawned_any);
        let mean_vy: f32 = overlay.particles().map(|p| p.vy).sum::<f32>() / overlay.count() as f32;
        assert!(mean_vy < 0.0);
    }

    #[test]
    fn particles_retire_after_fifty_ticks() {
        let mut overlay = ParticleOverlay::new(4, 3);
        assert!(overlay.spawn(10.0, 10.0));
        let mut ticks = 0;
        while overlay.count() > 0 {
            overlay.update_from_stats(&Stats::default(), 100, 100);
            ticks += 1;
            assert!(ticks <= 51, "particle outlived its life");
        }
        assert!(ticks >= 49);
    }

    #[test]
    fn full_arena_drops_spawns_and_recycles_slots() {
        let mut overlay = ParticleOverlay::new(2, 5);
        assert!(overlay.spawn(0.0, 0.0));
        assert!(overlay.spawn(1.0, 1.0));
        assert!(!overlay.spawn(2.0, 2.0));
        assert_eq!(overlay.count(), 2);

        for _ in 0..60 {
            overlay.update_from_stats(&Stats::default(), 10, 10);
        }
        assert_eq!(overlay.count(), 0);
        assert!(overlay.spawn(3.0, 3.0));
    }

    #[test]
    fn draw_blends_onto_surface() {
        let mut surface = Surface::new(20, 20).unwrap();
        for px in surface.as_rgba_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&[0, 0, 0, 255]);
        }
        fill_circle(&mut surface, 10.0, 10.0, 3.0, WHITE, 0.5);
        assert_eq!(surface.pixel(10, 10), Some([128, 128, 128, 255]));
        assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn draw_clips_at_edges() {
        let mut surface = Surface::new(4, 4).unwrap();
        fill_circle(&mut surface, -1.0, -1.0, 3.0, AMBER, 1.0);
        fill_circle(&mut surface, 50.0, 50.0, 3.0, AMBER, 1.0);
        assert_eq!(surface.pixel(0, 0), Some([255, 170, 0, 255]));
    }

    #[test]
    fn seeded_runs_repeat() {
        let run = |seed| {
            let mut overlay = ParticleOverlay::new(150, seed);
            for _ in 0..30 {
                overlay.update_from_stats(&subject_at(0.25, 0.75), 320, 240);
            }
            overlay.particles().copied().collect::<Vec<_>>()
        };
        assert_eq!(run(77), run(77));
    }
}
