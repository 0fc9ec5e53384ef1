//! Simulation state and the canonical stepper
//!
//! One engine struct owns the particle population, both coefficient
//! matrices, and the validated parameters, and advances them behind a
//! single `step()` entry point. The integration order (accumulate,
//! scale, kick, damp, clamp, drift, wrap) is one canonical sequence
//! and is not configurable.

use glam::Vec2;
use particle_physics::{
    banded_force, ring_force, spawn_population, InteractionMatrix, KernelProfile,
    MatrixIndexError, MatrixPreset, MutationMatrix, Particle, ParticleView,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::params::{BoundaryTopology, ConfigError, SimulationParams};

/// Rejected edit call; the simulation is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    MatrixIndex(#[from] MatrixIndexError),
    #[error("particle index {index} out of range for population of {len}")]
    ParticleIndex { index: usize, len: usize },
    #[error("family {family} out of range for {count} families")]
    FamilyRange { family: u32, count: usize },
}

/// Per-step observations. Coincident pairs (two distinct particles on
/// the exact same point) contribute zero force and are counted here
/// instead of poisoning the step with NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepDiagnostics {
    pub coincident_pairs: u32,
}

/// Read-only view of the state after a tick, for the host renderer.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub tick: u64,
    pub particles: Vec<ParticleView>,
    pub matrix: InteractionMatrix,
}

/// The particle-life engine.
///
/// Owns all per-tick state. Edits land through `&mut self` calls, so a
/// tick always observes one consistent matrix and population; there is
/// no way to interleave a cell write with an in-flight force pass.
pub struct Simulation {
    params: SimulationParams,
    particles: Vec<Particle>,
    matrix: InteractionMatrix,
    mutation: MutationMatrix,
    forces: Vec<Vec2>,
    rng: StdRng,
    tick: u64,
    coincident_events: u64,
}

impl Simulation {
    /// Build a simulation from validated parameters, seeded from the OS.
    pub fn new(params: SimulationParams) -> Result<Self, ConfigError> {
        Self::with_rng(params, StdRng::from_os_rng())
    }

    /// Deterministic construction for reproducible runs and tests.
    pub fn new_seeded(params: SimulationParams, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(params, StdRng::seed_from_u64(seed))
    }

    /// Build a simulation over an explicit initial population, for
    /// deterministic scenarios and replays. The particle count is taken
    /// from the population itself; every family must index the matrix.
    pub fn with_population(
        params: SimulationParams,
        particles: Vec<Particle>,
    ) -> Result<Self, ConfigError> {
        let mut params = params;
        params.particle_count = particles.len();
        params.validate()?;
        if let Some(bad) = particles
            .iter()
            .find(|p| p.family as usize >= params.family_count)
        {
            return Err(ConfigError::PopulationFamily {
                family: bad.family,
                count: params.family_count,
            });
        }
        let mut rng = StdRng::from_os_rng();
        let matrix = InteractionMatrix::generate(params.preset, params.family_count, &mut rng);
        Ok(Self {
            forces: vec![Vec2::ZERO; particles.len()],
            params,
            particles,
            matrix,
            mutation: MutationMatrix::zeroed(params.family_count),
            rng,
            tick: 0,
            coincident_events: 0,
        })
    }

    fn with_rng(params: SimulationParams, mut rng: StdRng) -> Result<Self, ConfigError> {
        params.validate()?;
        let matrix = InteractionMatrix::generate(params.preset, params.family_count, &mut rng);
        let mutation = MutationMatrix::zeroed(params.family_count);
        let particles = spawn_population(
            params.particle_count,
            params.spawn_region(),
            params.family_count as u32,
            &mut rng,
        );
        log::info!(
            "spawned {} particles across {} families ({:?} preset, {:?} kernel)",
            particles.len(),
            params.family_count,
            params.preset,
            params.profile,
        );
        Ok(Self {
            forces: vec![Vec2::ZERO; particles.len()],
            params,
            particles,
            matrix,
            mutation,
            rng,
            tick: 0,
            coincident_events: 0,
        })
    }

    /// Advance the simulation by one fixed timestep.
    ///
    /// Brute-force all-pairs force accumulation, then one integration
    /// pass: kick by the accumulated force, damp by the friction
    /// multiplier, optionally clamp, drift, and apply the boundary
    /// policy. A zero-distance pair never aborts the step.
    pub fn step(&mut self) -> StepDiagnostics {
        let params = self.params;
        let n = self.particles.len();
        if self.forces.len() != n {
            self.forces.resize(n, Vec2::ZERO);
        }

        // Normalization constant folded into the accumulated force.
        let force_scale = match params.profile {
            KernelProfile::Banded => params.max_distance,
            KernelProfile::NormalizedRing => params.r_max,
        };

        let mut coincident = 0u32;

        for i in 0..n {
            let a = self.particles[i];
            let mut force = Vec2::ZERO;

            for j in 0..n {
                if j == i {
                    continue;
                }
                let b = self.particles[j];

                // Separation sign convention is fixed per profile so
                // each kernel keeps its documented coefficient meaning.
                let mut delta = match params.profile {
                    KernelProfile::Banded => a.position - b.position,
                    KernelProfile::NormalizedRing => b.position - a.position,
                };
                if params.topology == BoundaryTopology::Wrap {
                    delta = minimum_image(delta, params.extent);
                }

                let d = delta.length();
                if d == 0.0 {
                    if i < j {
                        coincident += 1;
                    }
                    continue;
                }

                let coef = self.matrix.get(a.family as usize, b.family as usize)
                    * params.coefficient_scale;
                let magnitude = match params.profile {
                    KernelProfile::Banded => banded_force(
                        d,
                        coef,
                        params.min_distance,
                        params.max_distance,
                        params.repulsion,
                    ),
                    // Ring authoring convention: positive cells repel.
                    KernelProfile::NormalizedRing => ring_force(
                        d / params.r_max,
                        -coef,
                        params.min_distance,
                        params.max_distance,
                    ),
                };

                force += delta / d * magnitude;
            }

            self.forces[i] = force * force_scale;
        }

        for (particle, force) in self.particles.iter_mut().zip(self.forces.iter()) {
            particle.velocity += *force * params.dt;
            particle.velocity *= params.friction;
            if params.max_velocity > 0.0 {
                particle.velocity = particle.velocity.clamp(
                    Vec2::splat(-params.max_velocity),
                    Vec2::splat(params.max_velocity),
                );
            }
            particle.position += particle.velocity * params.dt;
            if params.topology == BoundaryTopology::Wrap {
                particle.position = wrap_position(particle.position, params.extent);
            }
        }

        self.tick += 1;
        if coincident > 0 {
            self.coincident_events += u64::from(coincident);
            log::debug!("tick {}: {} coincident particle pairs", self.tick, coincident);
        }

        StepDiagnostics {
            coincident_pairs: coincident,
        }
    }

    /// Read-only snapshot for the host renderer.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick,
            particles: self.particles.iter().map(Particle::view).collect(),
            matrix: self.matrix.clone(),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn matrix(&self) -> &InteractionMatrix {
        &self.matrix
    }

    pub fn mutation_matrix(&self) -> &MutationMatrix {
        &self.mutation
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Total coincident-pair events observed since construction.
    pub fn coincident_events(&self) -> u64 {
        self.coincident_events
    }

    /// Write one interaction cell, clamped into `[-1, 1]`. Touches
    /// nothing but the targeted entry.
    pub fn set_matrix_cell(&mut self, row: usize, col: usize, value: f32) -> Result<(), EngineError> {
        self.matrix.set(row, col, value)?;
        Ok(())
    }

    /// Re-seed the interaction matrix from a preset at the current
    /// family count. The preset sticks for later regenerations.
    pub fn regenerate_matrix(&mut self, preset: MatrixPreset) {
        self.params.preset = preset;
        self.matrix.regenerate(preset, &mut self.rng);
        log::info!("interaction matrix re-seeded ({preset:?})");
    }

    /// Write one mutation cell, clamped into `[0, 1]`.
    pub fn set_mutation_cell(&mut self, row: usize, col: usize, value: f32) -> Result<(), EngineError> {
        self.mutation.set(row, col, value)?;
        Ok(())
    }

    /// Re-randomize the mutation matrix, independent of the interaction
    /// matrix.
    pub fn regenerate_mutation_matrix(&mut self) {
        self.mutation.randomize(&mut self.rng);
    }

    /// Replace the whole population with `count` fresh particles. The
    /// interaction matrix is re-seeded along with it: population and
    /// matrix always regenerate together when a count changes.
    pub fn reset_particles(&mut self, count: usize) -> Result<(), ConfigError> {
        if count == 0 {
            return Err(ConfigError::ZeroParticles);
        }
        self.params.particle_count = count;
        self.matrix.regenerate(self.params.preset, &mut self.rng);
        self.respawn();
        Ok(())
    }

    /// Change the family count: both matrices are resized (zeroed, then
    /// preset-seeded) and the population is respawned so every family
    /// index is within `[0, m)`.
    pub fn set_family_count(&mut self, family_count: usize) -> Result<(), ConfigError> {
        if family_count == 0 {
            return Err(ConfigError::ZeroFamilies);
        }
        self.params.family_count = family_count;
        self.matrix
            .resize(family_count, self.params.preset, &mut self.rng);
        self.mutation.resize(family_count);
        self.respawn();
        Ok(())
    }

    /// Retag a single particle. No other state is touched.
    pub fn reassign_family(&mut self, index: usize, family: u32) -> Result<(), EngineError> {
        if index >= self.particles.len() {
            return Err(EngineError::ParticleIndex {
                index,
                len: self.particles.len(),
            });
        }
        if family as usize >= self.params.family_count {
            return Err(EngineError::FamilyRange {
                family,
                count: self.params.family_count,
            });
        }
        self.particles[index].family = family;
        Ok(())
    }

    /// Re-randomize every position inside the spawn region, keeping
    /// families and velocities.
    pub fn scatter_positions(&mut self) {
        let extent = self.params.spawn_region();
        for particle in &mut self.particles {
            particle.position = Vec2::new(
                self.rng.random_range(0.0..extent.x),
                self.rng.random_range(0.0..extent.y),
            );
        }
    }

    /// Re-randomize every family, keeping positions and velocities.
    pub fn scatter_families(&mut self) {
        let family_count = self.params.family_count as u32;
        for particle in &mut self.particles {
            particle.family = self.rng.random_range(0..family_count);
        }
    }

    /// Swap in a new parameter set between ticks. Count changes follow
    /// the lifecycle rule: a family-count change resizes both matrices
    /// and respawns, a particle-count change respawns and re-seeds the
    /// interaction matrix.
    pub fn set_params(&mut self, params: SimulationParams) -> Result<(), ConfigError> {
        params.validate()?;
        let family_changed = params.family_count != self.params.family_count;
        let count_changed = params.particle_count != self.params.particle_count;
        self.params = params;
        if family_changed {
            self.matrix
                .resize(params.family_count, params.preset, &mut self.rng);
            self.mutation.resize(params.family_count);
            self.respawn();
        } else if count_changed {
            self.matrix.regenerate(params.preset, &mut self.rng);
            self.respawn();
        }
        Ok(())
    }

    fn respawn(&mut self) {
        self.particles = spawn_population(
            self.params.particle_count,
            self.params.spawn_region(),
            self.params.family_count as u32,
            &mut self.rng,
        );
        self.forces.clear();
        self.forces.resize(self.particles.len(), Vec2::ZERO);
        log::info!(
            "population reset: {} particles, {} families",
            self.particles.len(),
            self.params.family_count,
        );
    }
}

/// Shortest separation on the torus: fold `delta` into half the extent
/// on each axis.
fn minimum_image(mut delta: Vec2, extent: Vec2) -> Vec2 {
    if delta.x.abs() > 0.5 * extent.x {
        delta.x -= extent.x.copysign(delta.x);
    }
    if delta.y.abs() > 0.5 * extent.y {
        delta.y -= extent.y.copysign(delta.y);
    }
    delta
}

fn wrap_position(position: Vec2, extent: Vec2) -> Vec2 {
    Vec2::new(
        wrap_axis(position.x, extent.x),
        wrap_axis(position.y, extent.y),
    )
}

// rem_euclid of a tiny negative value can round up to the modulus
// itself, which would violate the `[0, extent)` invariant.
fn wrap_axis(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}
