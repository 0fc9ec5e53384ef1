//! Particle-Life Simulation
//!
//! Headless driver: advances the engine at a fixed timestep and logs
//! progress. Rendering and matrix editing are host concerns layered on
//! the snapshot and mutation surfaces.

use std::time::Instant;

use particle_simulation::{Simulation, SimulationParams};

const TICKS: u64 = 2_000;
const REPORT_INTERVAL: u64 = 250;

fn main() {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting particle-life simulation...");

    let params = SimulationParams::normalized_ring();
    let mut sim = match Simulation::new(params) {
        Ok(sim) => sim,
        Err(err) => {
            log::error!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    let start = Instant::now();

    for tick in 1..=TICKS {
        sim.step();

        if tick % REPORT_INTERVAL == 0 {
            let count = sim.particles().len();
            let mean_speed = sim
                .particles()
                .iter()
                .map(|p| p.velocity.length())
                .sum::<f32>()
                / count as f32;
            log::info!(
                "tick {tick}: {count} particles, mean speed {mean_speed:.4}, coincident events {}",
                sim.coincident_events(),
            );
        }
    }

    let elapsed = start.elapsed();
    let snapshot = sim.snapshot();
    log::info!(
        "{} ticks over {} particles in {:.2?} ({:.0} ticks/s)",
        snapshot.tick,
        snapshot.particles.len(),
        elapsed,
        TICKS as f64 / elapsed.as_secs_f64(),
    );
}
