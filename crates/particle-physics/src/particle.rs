//! Point-mass particle and its boundary-confined integrator

use crate::boundary::BoundaryBox;
use crate::constants::DEFAULT_MASS;
use crate::error::{validate_time_step, PhysicsError};
use glam::{Vec3, Vec4};

/// Whether a particle has everything it needs to be integrated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParticleState {
    /// Mass or position has not been provided yet
    #[default]
    Uninitialized,
    Ready,
}

fn valid_mass(mass: f32) -> bool {
    mass.is_finite() && mass > 0.0
}

/// A simulated point mass
#[derive(Debug, Clone, Default)]
pub struct Particle {
    /// Mass, must be positive before the particle can be stepped
    pub mass: f32,
    /// Position in 3D space
    pub position: Vec3,
    /// Velocity vector
    pub velocity: Vec3,
    /// Acceleration from the last step
    pub acceleration: Vec3,
    /// Net force accumulated for the last step
    pub external_force: Vec3,
    /// RGBA color in [0, 1], only read by the renderer
    pub color: Vec4,

    has_position: bool,
}

impl Particle {
    /// Create a fully initialized particle
    pub fn new(mass: f32, position: Vec3, velocity: Vec3, color: Vec4) -> Self {
        Self {
            mass,
            position,
            velocity,
            color,
            has_position: true,
            ..Default::default()
        }
    }

    /// A particle of default mass at rest at `position`
    pub fn at(position: Vec3) -> Self {
        Self::new(DEFAULT_MASS, position, Vec3::ZERO, Vec4::ONE)
    }

    /// An empty particle that must be filled in through the setters before
    /// it can be updated
    pub fn uninitialized() -> Self {
        Self::default()
    }

    /// Derived from the same check `update` runs, so it never goes stale
    /// when `mass` is written directly
    pub fn state(&self) -> ParticleState {
        if self.ensure_ready().is_ok() {
            ParticleState::Ready
        } else {
            ParticleState::Uninitialized
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state() == ParticleState::Ready
    }

    pub fn set_mass(&mut self, mass: f32) -> Result<(), PhysicsError> {
        if !valid_mass(mass) {
            return Err(PhysicsError::InvalidMass(mass));
        }
        self.mass = mass;
        Ok(())
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.has_position = true;
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    pub fn set_color(&mut self, color: Vec4) {
        self.color = color;
    }

    /// Advance one step inside `boundary`
    ///
    /// The external force is rebuilt from scratch from the wall contacts,
    /// then the particle is integrated with semi-implicit Euler.
    pub fn update(&mut self, dt: f32, boundary: &BoundaryBox) -> Result<(), PhysicsError> {
        self.update_with_force(dt, boundary, Vec3::ZERO)
    }

    /// Same as [`Particle::update`], with `applied` (e.g. the net pairwise
    /// force for this step) added on top of the wall contacts
    pub fn update_with_force(
        &mut self,
        dt: f32,
        boundary: &BoundaryBox,
        applied: Vec3,
    ) -> Result<(), PhysicsError> {
        self.ensure_ready()?;
        validate_time_step(dt)?;

        self.external_force = applied + boundary.contact_force(self.position, self.velocity);
        self.step(dt);
        Ok(())
    }

    /// Integrate with whatever is currently stored in `external_force`
    pub fn integrate(&mut self, dt: f32) -> Result<(), PhysicsError> {
        self.ensure_ready()?;
        validate_time_step(dt)?;
        self.step(dt);
        Ok(())
    }

    // Semi-implicit Euler: position advances with the updated velocity
    fn step(&mut self, dt: f32) {
        self.acceleration = self.external_force / self.mass;
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
    }

    pub fn ensure_ready(&self) -> Result<(), PhysicsError> {
        if !self.has_position {
            return Err(PhysicsError::InvalidState {
                reason: "position has not been set",
            });
        }
        if !valid_mass(self.mass) {
            return Err(PhysicsError::InvalidState {
                reason: "mass must be positive and finite",
            });
        }
        Ok(())
    }

    /// Kinetic energy: 0.5 * m * v^2
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Flag NaN/Inf that leaked into the dynamic state
    pub fn check_finite(&self) -> Result<(), PhysicsError> {
        if !self.position.is_finite() {
            return Err(PhysicsError::NumericAnomaly {
                quantity: "position",
            });
        }
        if !self.velocity.is_finite() {
            return Err(PhysicsError::NumericAnomaly {
                quantity: "velocity",
            });
        }
        Ok(())
    }
}
