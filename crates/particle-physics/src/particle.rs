//! Particle data model and population spawning

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use rand::Rng;

/// A single point particle.
///
/// Owned exclusively by the simulation. Particles never reference each
/// other; anything pairwise (separations, in-range sets) is recomputed
/// every tick from positions alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Family index in `[0, m)`, selecting the interaction-matrix row.
    pub family: u32,
}

impl Particle {
    /// Spawn at a uniform random position inside `spawn_extent` with a
    /// uniform random family and zero velocity.
    pub fn spawn<R: Rng>(spawn_extent: Vec2, family_count: u32, rng: &mut R) -> Self {
        Self {
            position: Vec2::new(
                rng.random_range(0.0..spawn_extent.x),
                rng.random_range(0.0..spawn_extent.y),
            ),
            velocity: Vec2::ZERO,
            family: rng.random_range(0..family_count),
        }
    }

    /// Renderer-facing copy of this particle.
    pub fn view(&self) -> ParticleView {
        ParticleView {
            position: self.position.to_array(),
            family: self.family,
            _pad: 0,
        }
    }
}

/// Snapshot record for the host renderer.
///
/// `repr(C)` and `Pod` so whole snapshots can be uploaded as raw
/// vertex/storage buffers without conversion.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ParticleView {
    pub position: [f32; 2],
    pub family: u32,
    pub _pad: u32,
}

/// Spawn a fresh population, replacing nothing in place.
pub fn spawn_population<R: Rng>(
    count: usize,
    spawn_extent: Vec2,
    family_count: u32,
    rng: &mut R,
) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle::spawn(spawn_extent, family_count, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_within_extent_with_zero_velocity() {
        let mut rng = StdRng::seed_from_u64(11);
        let extent = Vec2::new(500.0, 300.0);
        for particle in spawn_population(200, extent, 6, &mut rng) {
            assert!(particle.position.x >= 0.0 && particle.position.x < extent.x);
            assert!(particle.position.y >= 0.0 && particle.position.y < extent.y);
            assert_eq!(particle.velocity, Vec2::ZERO);
            assert!(particle.family < 6);
        }
    }

    #[test]
    fn test_view_is_pod_sized() {
        assert_eq!(std::mem::size_of::<ParticleView>(), 16);
        let particle = Particle {
            position: Vec2::new(1.0, 2.0),
            velocity: Vec2::ZERO,
            family: 3,
        };
        let view = particle.view();
        assert_eq!(view.position, [1.0, 2.0]);
        assert_eq!(view.family, 3);
    }
}
