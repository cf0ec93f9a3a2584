//! Seeded xorshift32 generator used by the particle overlay.
//!
//! Deterministic for a given seed so overlay behaviour can be replayed in
//! tests. Not suitable for anything beyond visual jitter.

#[inline]
pub fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

#[derive(Debug, Clone)]
pub struct Rng {
    state: u32,
}

impl Rng {
    /// Zero is a fixed point of xorshift, so it is remapped.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }

    /// Uniform in [0, 1).
    #[inline]
    pub fn f32(&mut self) -> f32 {
        // top 24 bits -> exact f32 mantissa
        (xorshift32(&mut self.state) >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform in [lo, hi).
    #[inline]
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.f32()
    }

    #[inline]
    pub fn chance(&mut self, p: f32) -> bool {
        self.f32() < p
    }
}
