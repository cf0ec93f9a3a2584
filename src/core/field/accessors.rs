use super::*;

impl HeatField {
    // === Dimensions ===
    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn size(&self) -> usize { self.size }

    // === Index conversion ===
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    #[inline]
    pub fn coords(&self, idx: usize) -> (u32, u32) {
        let w = self.width as usize;
        ((idx % w) as u32, (idx / w) as u32)
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    // === Cell access ===
    /// Heat at (x, y); 0.0 outside the grid.
    #[inline]
    pub fn value_at(&self, x: i32, y: i32) -> f32 {
        if !self.in_bounds(x, y) { return 0.0; }
        self.front[self.index(x as u32, y as u32)]
    }

    #[inline]
    pub fn set_value(&mut self, x: u32, y: u32, v: f32) {
        let idx = self.index(x, y);
        self.front[idx] = clamp_heat(v);
    }
}
