//! Default simulation constants
//!
//! Per-profile tuning values, scaled for real-time visualization rather
//! than physical accuracy.

/// Default particle count for the banded profile
pub const PARTICLE_COUNT: usize = 450;

/// Default family count for the banded profile
pub const FAMILY_COUNT: usize = 6;

/// Default fixed timestep for the banded profile
pub const DT: f32 = 0.007;

/// Velocity damping per step, applied as a direct multiplier
/// (small values mean heavy damping)
pub const FRICTION: f32 = 0.01;

/// Inner edge of the banded interaction band; below this the
/// family-independent repulsion takes over
pub const MIN_DISTANCE: f32 = 15.0;

/// Outer edge of the banded interaction band; no interaction beyond it
pub const MAX_DISTANCE: f32 = 100.0;

/// Strength of the family-independent short-range repulsion
pub const REPULSION: f32 = 100.0;

/// Edited matrix cells live in [-1, 1]; the stepper multiplies by this
/// before the kernel sees them
pub const COEFFICIENT_SCALE: f32 = 100.0;

/// Boundary extent per axis for the banded profile
pub const BOUNDARY_SIZE: f32 = 500.0;

/// Default particle count for the normalized-ring profile
pub const RING_PARTICLE_COUNT: usize = 1000;

/// Default family count for the normalized-ring profile
pub const RING_FAMILY_COUNT: usize = 10;

/// Default fixed timestep for the normalized-ring profile
pub const RING_DT: f32 = 0.03;

/// Velocity damping per step for the normalized-ring profile
pub const RING_FRICTION: f32 = 0.2;

/// Interaction cutoff radius for the normalized-ring profile; distances
/// are divided by this before kernel evaluation
pub const RING_CUTOFF: f32 = 0.3;

/// Inner band edge for the normalized-ring profile, as a fraction of
/// the cutoff radius
pub const RING_MIN_DISTANCE: f32 = 0.3;

/// Outer band edge for the normalized-ring profile, as a fraction of
/// the cutoff radius
pub const RING_MAX_DISTANCE: f32 = 1.0;
