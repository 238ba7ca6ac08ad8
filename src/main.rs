//! Headless particle container simulation
//!
//! Drops a jittered block of particles (plus one fast red probe) into the
//! container, optionally with Lennard-Jones pair forces, and steps it with the
//! fixed-timestep catch-up loop a renderer would drive every frame.

use anyhow::{Context, Result};
use clap::Parser;
use glam::{Vec3, Vec4};
use particle_physics::{PairForceModel, Particle, CONTAINER_MAX, CONTAINER_MIN};
use particle_simulation::{ParticleSystem, SimulationClock, SimulationParams};
use rand::Rng;

const LATTICE_SPACING: f32 = 0.9;
const LATTICE_JITTER: f32 = 0.05;
const MAX_PARTICLES: usize = 300;
const DEMO_SIGMA: f32 = 0.8;

#[derive(Parser, Debug)]
#[command(about = "Step particles inside the container without rendering")]
struct Args {
    /// Rendered frames to simulate
    #[arg(long, default_value_t = 120)]
    frames: usize,

    /// Wall-clock seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    frame_dt: f32,

    /// Particles in the block
    #[arg(long, default_value_t = 64)]
    count: usize,

    /// Enable the all-pairs Lennard-Jones pass
    #[arg(long)]
    pairwise: bool,

    /// Use the legacy distance-scaled force law for the pair pass
    #[arg(long)]
    legacy: bool,
}

/// Fill the bottom of the container with a jittered lattice
fn initialize_particles(count: usize) -> Vec<Particle> {
    let mut rng = rand::rng();
    let min = Vec3::from_array(CONTAINER_MIN);
    let max = Vec3::from_array(CONTAINER_MAX);
    let origin = min + Vec3::splat(LATTICE_SPACING * 0.5);

    let columns = ((max.x - origin.x) / LATTICE_SPACING) as usize + 1;
    let layers = ((max.z - origin.z) / LATTICE_SPACING) as usize + 1;

    let mut particles = Vec::with_capacity(count + 1);

    // Fast probe that bounces off the left and back walls
    particles.push(Particle::new(
        1.0,
        Vec3::ZERO,
        Vec3::new(-1.0, 0.0, -1.0),
        Vec4::new(1.0, 0.0, 0.0, 1.0),
    ));

    for k in 0..count {
        let cell = Vec3::new(
            (k % columns) as f32,
            (k / (columns * layers)) as f32,
            ((k / columns) % layers) as f32,
        );
        let jitter = Vec3::new(
            rng.random_range(-LATTICE_JITTER..LATTICE_JITTER),
            rng.random_range(-LATTICE_JITTER..LATTICE_JITTER),
            rng.random_range(-LATTICE_JITTER..LATTICE_JITTER),
        );
        let position = origin + cell * LATTICE_SPACING + jitter;
        let shade = rng.random::<f32>() * 0.5 + 0.5;
        particles.push(Particle::new(
            1.0,
            position,
            Vec3::ZERO,
            Vec4::new(0.0, 0.0, shade, 1.0),
        ));
    }

    log::info!("✓ Initialized {} particles", particles.len());
    for (i, p) in particles.iter().take(5).enumerate() {
        log::debug!(
            "    [{}] pos=({:.2}, {:.2}, {:.2}) mass={:.2}",
            i,
            p.position.x,
            p.position.y,
            p.position.z,
            p.mass
        );
    }

    particles
}

fn main() -> Result<()> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Starting particle container simulation...");

    let count = args.count.min(MAX_PARTICLES);
    if count < args.count {
        log::warn!("Particle count capped at {}", MAX_PARTICLES);
    }

    let mut params = SimulationParams::default();
    if args.pairwise {
        let model = if args.legacy {
            log::warn!("The distance-scaled law is extremely stiff below unit separation");
            PairForceModel::distance_scaled()
        } else {
            PairForceModel::lennard_jones(1.0, DEMO_SIGMA)
        };
        log::info!("Pair forces enabled: {:?}", model.law);
        params = params.with_pair_forces(model);
    }

    let mut clock = SimulationClock::from_params(&params).context("invalid clock settings")?;
    let mut system = ParticleSystem::with_particles(initialize_particles(count), params);

    for frame in 0..args.frames {
        let steps = clock
            .advance(&mut system, args.frame_dt)
            .with_context(|| format!("simulation failed in frame {frame}"))?;

        if frame % 30 == 0 {
            log::info!(
                "frame {:4}: {} steps, t = {:.3}s, kinetic energy = {:.4}",
                frame,
                steps,
                clock.elapsed(),
                system.kinetic_energy()
            );
        }
    }

    system
        .check_finite()
        .context("simulation produced non-finite particle state")?;

    let probe = &system.particles()[0];
    log::info!(
        "✓ Finished {} steps ({:.3}s simulated), probe at ({:.3}, {:.3}, {:.3})",
        clock.steps(),
        clock.elapsed(),
        probe.position.x,
        probe.position.y,
        probe.position.z
    );

    Ok(())
}
