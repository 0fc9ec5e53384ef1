//! Simulation parameters for runtime tuning
//!
//! All tunables live in one caller-owned struct, validated as a whole
//! before the engine builds or adopts any state. Invalid combinations
//! are rejected up front, never discovered mid-simulation.

use glam::Vec2;
use particle_physics::{constants, KernelProfile, MatrixPreset};
use thiserror::Error;

/// How the boundary treats positions and pairwise separations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryTopology {
    /// Toroidal domain: separations use the minimum-image correction
    /// and positions wrap into `[0, extent)` on each axis.
    Wrap,
    /// No boundary: positions drift unconstrained.
    None,
}

/// Invalid parameter combination, rejected before anything is applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("particle count must be greater than zero")]
    ZeroParticles,
    #[error("family count must be greater than zero")]
    ZeroFamilies,
    #[error("timestep must be positive, got {dt}")]
    NonPositiveTimestep { dt: f32 },
    #[error("friction must lie in [0, 1], got {friction}")]
    FrictionOutOfRange { friction: f32 },
    #[error("min distance must be non-negative, got {min_distance}")]
    NegativeMinDistance { min_distance: f32 },
    #[error("distance band is empty: min {min_distance} >= max {max_distance}")]
    EmptyDistanceBand { min_distance: f32, max_distance: f32 },
    #[error("universal repulsion must be non-negative, got {repulsion}")]
    NegativeRepulsion { repulsion: f32 },
    #[error("max velocity must be non-negative, got {max_velocity}")]
    NegativeMaxVelocity { max_velocity: f32 },
    #[error("boundary extent must be positive on both axes, got {width}x{height}")]
    NonPositiveExtent { width: f32, height: f32 },
    #[error("spawn extent must be positive on both axes, got {width}x{height}")]
    NonPositiveSpawnExtent { width: f32, height: f32 },
    #[error("coefficient scale must be positive, got {scale}")]
    NonPositiveScale { scale: f32 },
    #[error("cutoff radius must be positive, got {r_max}")]
    NonPositiveCutoff { r_max: f32 },
    #[error("population carries family {family}, out of range for {count} families")]
    PopulationFamily { family: u32, count: usize },
}

/// Caller-owned tunables for one simulation instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    pub particle_count: usize,
    pub family_count: usize,
    /// Which force-kernel shape the stepper evaluates.
    pub profile: KernelProfile,
    /// Interaction-matrix preset, applied at construction and whenever
    /// the matrix is re-seeded.
    pub preset: MatrixPreset,
    /// Fixed integration timestep.
    pub dt: f32,
    /// Per-step velocity multiplier in `[0, 1]`; 1 means no damping.
    pub friction: f32,
    /// Inner band edge: an absolute distance under [`KernelProfile::Banded`],
    /// a fraction of `r_max` under [`KernelProfile::NormalizedRing`].
    pub min_distance: f32,
    /// Outer band edge, same units as `min_distance`.
    pub max_distance: f32,
    /// Interaction cutoff radius; only read by [`KernelProfile::NormalizedRing`].
    pub r_max: f32,
    /// Family-independent short-range repulsion strength.
    pub repulsion: f32,
    /// Per-component velocity clamp; 0 means unclamped.
    pub max_velocity: f32,
    /// Matrix cells are edited in `[-1, 1]` and multiplied by this
    /// before the kernel sees them.
    pub coefficient_scale: f32,
    /// Boundary extent per axis.
    pub extent: Vec2,
    /// Spawn region for new populations; `None` uses the full extent.
    pub spawn_extent: Option<Vec2>,
    pub topology: BoundaryTopology,
}

impl Default for SimulationParams {
    /// Banded-profile defaults.
    fn default() -> Self {
        Self {
            particle_count: constants::PARTICLE_COUNT,
            family_count: constants::FAMILY_COUNT,
            profile: KernelProfile::Banded,
            preset: MatrixPreset::Random,
            dt: constants::DT,
            friction: constants::FRICTION,
            min_distance: constants::MIN_DISTANCE,
            max_distance: constants::MAX_DISTANCE,
            r_max: constants::MAX_DISTANCE,
            repulsion: constants::REPULSION,
            max_velocity: 0.0,
            coefficient_scale: constants::COEFFICIENT_SCALE,
            extent: Vec2::splat(constants::BOUNDARY_SIZE),
            spawn_extent: None,
            topology: BoundaryTopology::None,
        }
    }
}

impl SimulationParams {
    /// Normalized-ring defaults: unit toroidal domain, band edges as
    /// fractions of the cutoff radius, matrix used unscaled.
    pub fn normalized_ring() -> Self {
        Self {
            particle_count: constants::RING_PARTICLE_COUNT,
            family_count: constants::RING_FAMILY_COUNT,
            profile: KernelProfile::NormalizedRing,
            preset: MatrixPreset::Snake,
            dt: constants::RING_DT,
            friction: constants::RING_FRICTION,
            min_distance: constants::RING_MIN_DISTANCE,
            max_distance: constants::RING_MAX_DISTANCE,
            r_max: constants::RING_CUTOFF,
            repulsion: 0.0,
            max_velocity: 0.0,
            coefficient_scale: 1.0,
            extent: Vec2::ONE,
            spawn_extent: None,
            topology: BoundaryTopology::Wrap,
        }
    }

    /// Region new particles spawn into.
    pub fn spawn_region(&self) -> Vec2 {
        self.spawn_extent.unwrap_or(self.extent)
    }

    /// Reject invalid combinations. Comparisons are written so that NaN
    /// fails the check rather than slipping through.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::ZeroParticles);
        }
        if self.family_count == 0 {
            return Err(ConfigError::ZeroFamilies);
        }
        if !(self.dt > 0.0) {
            return Err(ConfigError::NonPositiveTimestep { dt: self.dt });
        }
        if !(self.friction >= 0.0 && self.friction <= 1.0) {
            return Err(ConfigError::FrictionOutOfRange {
                friction: self.friction,
            });
        }
        if !(self.min_distance >= 0.0) {
            return Err(ConfigError::NegativeMinDistance {
                min_distance: self.min_distance,
            });
        }
        if !(self.min_distance < self.max_distance) {
            return Err(ConfigError::EmptyDistanceBand {
                min_distance: self.min_distance,
                max_distance: self.max_distance,
            });
        }
        if !(self.repulsion >= 0.0) {
            return Err(ConfigError::NegativeRepulsion {
                repulsion: self.repulsion,
            });
        }
        if !(self.max_velocity >= 0.0) {
            return Err(ConfigError::NegativeMaxVelocity {
                max_velocity: self.max_velocity,
            });
        }
        if !(self.extent.x > 0.0 && self.extent.y > 0.0) {
            return Err(ConfigError::NonPositiveExtent {
                width: self.extent.x,
                height: self.extent.y,
            });
        }
        if let Some(spawn) = self.spawn_extent {
            if !(spawn.x > 0.0 && spawn.y > 0.0) {
                return Err(ConfigError::NonPositiveSpawnExtent {
                    width: spawn.x,
                    height: spawn.y,
                });
            }
        }
        if !(self.coefficient_scale > 0.0) {
            return Err(ConfigError::NonPositiveScale {
                scale: self.coefficient_scale,
            });
        }
        if self.profile == KernelProfile::NormalizedRing && !(self.r_max > 0.0) {
            return Err(ConfigError::NonPositiveCutoff { r_max: self.r_max });
        }
        Ok(())
    }
}
