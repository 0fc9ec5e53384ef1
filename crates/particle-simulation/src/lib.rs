//! # Particle Simulation Engine
//!
//! CPU particle-life engine: validated parameters, a single canonical
//! stepper over the all-pairs force law, and the snapshot/mutation
//! surfaces the host wires its renderer and editing UI to.

pub mod params;
pub mod simulation;

pub use params::*;
pub use simulation::*;
