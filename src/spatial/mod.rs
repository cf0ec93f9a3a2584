//! Spatial inputs: occupancy masks and the mask source seam.

pub mod mask;

pub use mask::{MaskSource, OccupancyMask, ReplaySource};
