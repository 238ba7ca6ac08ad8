//! CPU particle system: all-pairs force pass followed by boundary-confined
//! integration
//!
//! NOTE: Pair forces for a step are always evaluated against the positions
//! from the start of that step. Every force is computed into a separate buffer
//! before any particle is integrated, so the result does not depend on the
//! order particles are stored in.

use crate::{ParticleInstance, SimulationError, SimulationParams};
use glam::Vec3;
use particle_physics::{validate_time_step, PairForceModel, Particle};
use rayon::prelude::*;

/// Net pairwise force on every particle in `particles`
///
/// Each particle only reads the shared slice, so the outer loop runs in
/// parallel. O(n²).
pub fn compute_pair_forces(particles: &[Particle], model: &PairForceModel) -> Vec<Vec3> {
    particles
        .par_iter()
        .enumerate()
        .map(|(i, particle)| {
            particles
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .fold(Vec3::ZERO, |net, (_, other)| {
                    net + model.force(particle, other)
                })
        })
        .collect()
}

/// An exclusively owned, ordered collection of particles
pub struct ParticleSystem {
    particles: Vec<Particle>,
    params: SimulationParams,
    // Net pairwise force per active particle from the last step
    pair_forces: Vec<Vec3>,
    steps: u64,
}

impl ParticleSystem {
    pub fn new(params: SimulationParams) -> Self {
        Self::with_particles(Vec::new(), params)
    }

    pub fn with_particles(particles: Vec<Particle>, params: SimulationParams) -> Self {
        log::info!(
            "Creating particle system with {} particles ({} walls, pair forces {})",
            particles.len(),
            params.boundary.planes().len(),
            if params.pair_forces.is_some() { "on" } else { "off" }
        );
        Self {
            particles,
            params,
            pair_forces: Vec::new(),
            steps: 0,
        }
    }

    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn extend(&mut self, particles: impl IntoIterator<Item = Particle>) {
        self.particles.extend(particles);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut SimulationParams {
        &mut self.params
    }

    /// Number of particles that get stepped
    pub fn active_count(&self) -> usize {
        self.particles.len().min(self.params.max_active)
    }

    /// Net pairwise force on each active particle from the last step
    pub fn pair_forces(&self) -> &[Vec3] {
        &self.pair_forces
    }

    /// Steps taken since creation
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Recompute the pairwise forces of the active particles without
    /// integrating. Zero for every particle when pair forces are disabled.
    pub fn accumulate_pair_forces(&mut self) -> Result<(), SimulationError> {
        let active = self.active_count();
        match &self.params.pair_forces {
            Some(model) => {
                model.validate()?;
                self.pair_forces = compute_pair_forces(&self.particles[..active], model);
            }
            None => {
                self.pair_forces.clear();
                self.pair_forces.resize(active, Vec3::ZERO);
            }
        }
        Ok(())
    }

    /// Advance every active particle by `dt`
    ///
    /// Fails without touching any particle if `dt` is invalid or an active
    /// particle is not initialized.
    pub fn update(&mut self, dt: f32) -> Result<(), SimulationError> {
        validate_time_step(dt)?;

        let active = self.active_count();
        for (index, particle) in self.particles[..active].iter().enumerate() {
            particle
                .ensure_ready()
                .map_err(SimulationError::particle(index))?;
        }

        self.accumulate_pair_forces()?;

        let boundary = &self.params.boundary;
        for (index, (particle, pair_force)) in self.particles[..active]
            .iter_mut()
            .zip(&self.pair_forces)
            .enumerate()
        {
            particle
                .update_with_force(dt, boundary, *pair_force)
                .map_err(SimulationError::particle(index))?;
        }

        self.steps += 1;
        log::trace!("Step {} advanced {} particles by {}", self.steps, active, dt);
        Ok(())
    }

    /// Report the first particle whose position or velocity is NaN/Inf
    pub fn check_finite(&self) -> Result<(), SimulationError> {
        for (index, particle) in self.particles.iter().enumerate() {
            if let Err(source) = particle.check_finite() {
                log::warn!("Particle {} has a non-finite state: {}", index, source);
                return Err(SimulationError::Particle { index, source });
            }
        }
        Ok(())
    }

    /// Total kinetic energy of all particles
    pub fn kinetic_energy(&self) -> f32 {
        self.particles.iter().map(Particle::kinetic_energy).sum()
    }

    /// Position and color of every particle, ready for upload to a renderer
    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.particles.iter().map(ParticleInstance::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use particle_physics::{BoundaryBox, PhysicsError};

    fn unbounded_pairwise() -> SimulationParams {
        SimulationParams::default()
            .with_boundary(BoundaryBox::none())
            .with_pair_forces(PairForceModel::default())
    }

    fn cluster() -> Vec<Particle> {
        vec![
            Particle::at(Vec3::new(0.0, 0.0, 0.0)),
            Particle::at(Vec3::new(1.0, 0.1, 0.0)),
            Particle::at(Vec3::new(0.2, 1.2, 0.3)),
            Particle::at(Vec3::new(-0.9, 0.4, -0.5)),
        ]
    }

    #[test]
    fn test_pair_forces_skip_self() {
        let particles = vec![Particle::at(Vec3::ZERO)];
        let forces = compute_pair_forces(&particles, &PairForceModel::default());
        assert_eq!(forces, vec![Vec3::ZERO]);
    }

    #[test]
    fn test_pair_forces_are_order_independent() {
        let particles = cluster();
        let model = PairForceModel::default();
        let forces = compute_pair_forces(&particles, &model);

        let reversed: Vec<Particle> = particles.iter().rev().cloned().collect();
        let reversed_forces = compute_pair_forces(&reversed, &model);

        for (i, force) in forces.iter().enumerate() {
            let other = reversed_forces[particles.len() - 1 - i];
            assert!((*force - other).length() < 1e-4 * force.length().max(1.0));
        }
    }

    #[test]
    fn test_pair_forces_sum_to_zero() {
        let forces = compute_pair_forces(&cluster(), &PairForceModel::default());
        let net: Vec3 = forces.iter().sum();
        let largest = forces.iter().map(|f| f.length()).fold(1.0, f32::max);
        assert!(net.length() < 1e-4 * largest);
    }

    #[test]
    fn test_update_uses_start_of_step_snapshot() {
        let particles = cluster();
        let dt = 0.001;
        let expected = compute_pair_forces(&particles, &PairForceModel::default());

        let mut system = ParticleSystem::with_particles(particles.clone(), unbounded_pairwise());
        system.update(dt).unwrap();

        assert_eq!(system.pair_forces(), expected.as_slice());
        for (i, particle) in system.particles().iter().enumerate() {
            let velocity = expected[i] * dt;
            let position = particles[i].position + velocity * dt;
            assert!((particle.velocity - velocity).length() < 1e-5);
            assert!((particle.position - position).length() < 1e-5);
        }
    }

    #[test]
    fn test_pair_and_wall_forces_combine() {
        // Both below the floor and inside each other's repulsive range
        let particles = vec![
            Particle::at(Vec3::new(1.0, -9.45, 0.0)),
            Particle::new(1.0, Vec3::new(2.0, -9.4, 0.0), Vec3::new(0.0, -0.5, 0.0), Vec4::ONE),
        ];
        let model = PairForceModel::default();
        let boundary = BoundaryBox::container();
        let pair = compute_pair_forces(&particles, &model);
        let walls: Vec<Vec3> = particles
            .iter()
            .map(|p| boundary.contact_force(p.position, p.velocity))
            .collect();
        assert!(pair[0].x < 0.0 && pair[1].x > 0.0);
        assert!(walls.iter().all(|f| f.y > 0.0));

        let params = SimulationParams::default()
            .with_boundary(boundary)
            .with_pair_forces(model);
        let mut system = ParticleSystem::with_particles(particles, params);
        system.update(0.001).unwrap();

        for (i, particle) in system.particles().iter().enumerate() {
            let expected = pair[i] + walls[i];
            assert!((particle.external_force - expected).length() < 1e-4);
            assert!((particle.acceleration - expected).length() < 1e-4);
        }
    }

    #[test]
    fn test_no_pair_forces_when_disabled() {
        let mut system = ParticleSystem::with_particles(cluster(), SimulationParams::default());
        system.update(0.001).unwrap();
        assert_eq!(system.pair_forces().len(), 4);
        assert!(system.pair_forces().iter().all(|f| *f == Vec3::ZERO));
        assert_eq!(system.particles()[1].position, Vec3::new(1.0, 0.1, 0.0));
        assert_eq!(system.steps(), 1);
    }

    #[test]
    fn test_uninitialized_particle_fails_before_mutation() {
        let mut particles = cluster();
        particles[0].velocity = Vec3::X;
        particles.push(Particle::uninitialized());
        let mut system = ParticleSystem::with_particles(particles, SimulationParams::default());

        let err = system.update(0.01).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Particle {
                index: 4,
                source: PhysicsError::InvalidState { .. }
            }
        ));
        assert_eq!(system.particles()[0].position, Vec3::ZERO);
        assert_eq!(system.steps(), 0);
    }

    #[test]
    fn test_invalid_time_step() {
        let mut system = ParticleSystem::with_particles(cluster(), SimulationParams::default());
        assert_eq!(
            system.update(0.0),
            Err(SimulationError::Physics(PhysicsError::InvalidTimestep(0.0)))
        );
    }

    #[test]
    fn test_invalid_force_model_is_reported() {
        let params = SimulationParams::default()
            .with_pair_forces(PairForceModel::default().with_epsilon(f32::NAN));
        let mut system = ParticleSystem::with_particles(cluster(), params);
        assert!(matches!(
            system.update(0.001),
            Err(SimulationError::Physics(PhysicsError::InvalidParameter(_)))
        ));
    }

    #[test]
    fn test_max_active_limits_stepped_particles() {
        let moving = |x: f32| Particle::new(1.0, Vec3::new(x, -1.0, 0.0), Vec3::Y, Vec4::ONE);
        let params = SimulationParams::default().with_max_active(2);
        let mut system =
            ParticleSystem::with_particles(vec![moving(1.0), moving(2.0), moving(3.0)], params);
        system.push(Particle::uninitialized());

        system.update(0.01).unwrap();
        assert_eq!(system.active_count(), 2);
        assert!(system.particles()[0].position.y > -1.0);
        assert!(system.particles()[1].position.y > -1.0);
        assert_eq!(system.particles()[2].position.y, -1.0);
    }

    #[test]
    fn test_check_finite_reports_index() {
        let mut system = ParticleSystem::with_particles(cluster(), SimulationParams::default());
        assert!(system.check_finite().is_ok());
        system.particles_mut()[2].position.x = f32::INFINITY;
        assert_eq!(
            system.check_finite(),
            Err(SimulationError::Particle {
                index: 2,
                source: PhysicsError::NumericAnomaly {
                    quantity: "position"
                }
            })
        );
    }

    #[test]
    fn test_instances_follow_particles() {
        let mut system = ParticleSystem::new(SimulationParams::default());
        system.push(Particle::new(
            1.0,
            Vec3::new(1.0, -2.0, 0.5),
            Vec3::ZERO,
            Vec4::new(0.1, 0.2, 0.3, 0.5),
        ));
        let instances = system.instances();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].position, [1.0, -2.0, 0.5, 1.0]);
        assert_eq!(instances[0].color, [0.1, 0.2, 0.3, 0.5]);
    }

    #[test]
    fn test_kinetic_energy_sums_particles() {
        let mut system = ParticleSystem::new(SimulationParams::default());
        system.extend([
            Particle::new(2.0, Vec3::ZERO, Vec3::X, Vec4::ONE),
            Particle::new(1.0, Vec3::X, Vec3::new(0.0, 2.0, 0.0), Vec4::ONE),
        ]);
        assert!((system.kinetic_energy() - 3.0).abs() < 1e-6);
    }
}
