//! Per-frame systems, in pipeline order: heat step, stats, compositing,
//! particle overlay.

pub mod heat;
pub mod stats;
pub mod compositor;
pub mod particles;

pub use compositor::{FrameCompositor, Surface};
pub use heat::step_field;
pub use particles::ParticleOverlay;
pub use stats::{Point, Stats, StatsAggregator};
