//! # Particle Physics
//!
//! Data model and pure math for the particle-life simulation: particles
//! tagged with discrete families, per-family-pair coefficient matrices,
//! and the two distance-dependent force kernels.

pub mod constants;
pub mod forces;
pub mod matrix;
pub mod particle;

pub use constants::*;
pub use forces::*;
pub use matrix::*;
pub use particle::*;
