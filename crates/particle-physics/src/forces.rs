//! Pairwise interparticle force laws
//!
//! Two Lennard-Jones style laws are available:
//!
//! - `PotentialGradient`: the standard Lennard-Jones force, the negative
//!   gradient of V(r) = 4α((σ/r)^12 - (σ/r)^6).
//! - `DistanceScaled`: the legacy discrete fluid model
//!   g = m1 * m2 * (α/(d+ε)^a - β/(d+ε)^b) * d applied along the
//!   unnormalized separation. The extra factor of d has no physical
//!   counterpart but is kept so old scenes reproduce.
//!
//! Coincident particles (zero separation) exert no force on each other in
//! either law.

use crate::constants::*;
use crate::error::PhysicsError;
use crate::particle::Particle;
use glam::Vec3;

/// Which force law a [`PairForceModel`] evaluates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForceLaw {
    DistanceScaled,
    #[default]
    PotentialGradient,
}

/// Parameters of the pairwise interaction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairForceModel {
    pub law: ForceLaw,
    /// Repulsive exponent (distance-scaled law)
    pub exponent_a: f32,
    /// Attractive exponent (distance-scaled law)
    pub exponent_b: f32,
    /// Repulsive scale, or well depth for the potential-gradient law
    pub alpha: f32,
    /// Attractive scale (distance-scaled law)
    pub beta: f32,
    /// Softening added to every separation
    pub epsilon: f32,
    /// Characteristic length (potential-gradient law)
    pub sigma: f32,
    /// Uniform factor applied to the final force
    pub scale: f32,
}

impl Default for PairForceModel {
    fn default() -> Self {
        Self::lennard_jones(LJ_ALPHA, LJ_SIGMA)
    }
}

impl PairForceModel {
    /// Standard Lennard-Jones force with well depth `alpha` and length `sigma`
    pub fn lennard_jones(alpha: f32, sigma: f32) -> Self {
        Self {
            law: ForceLaw::PotentialGradient,
            exponent_a: 12.0,
            exponent_b: 6.0,
            alpha,
            beta: alpha,
            epsilon: SOFTENING,
            sigma,
            scale: 1.0,
        }
    }

    /// The legacy discrete fluid model with its stock coefficients
    pub fn distance_scaled() -> Self {
        Self {
            law: ForceLaw::DistanceScaled,
            exponent_a: DFM_EXPONENT_A,
            exponent_b: DFM_EXPONENT_B,
            alpha: DFM_ALPHA,
            beta: DFM_BETA,
            epsilon: SOFTENING,
            sigma: LJ_SIGMA,
            scale: DFM_SCALE,
        }
    }

    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Check that every coefficient is finite and non-negative
    pub fn validate(&self) -> Result<(), PhysicsError> {
        let fields = [
            ("exponent_a", self.exponent_a),
            ("exponent_b", self.exponent_b),
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("epsilon", self.epsilon),
            ("sigma", self.sigma),
            ("scale", self.scale),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(PhysicsError::InvalidParameter(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Force exerted on `p1` by `p2`
    ///
    /// The caller is responsible for skipping self-interaction.
    pub fn force(&self, p1: &Particle, p2: &Particle) -> Vec3 {
        self.force_between(p1.position, p1.mass, p2.position, p2.mass)
    }

    /// Force on a mass at `pos1` from a mass at `pos2`
    pub fn force_between(&self, pos1: Vec3, mass1: f32, pos2: Vec3, mass2: f32) -> Vec3 {
        let r_vec = pos1 - pos2;
        let d = r_vec.length();

        if d == 0.0 {
            return Vec3::ZERO;
        }

        match self.law {
            ForceLaw::DistanceScaled => {
                let r = d + self.epsilon;
                let s = mass1
                    * mass2
                    * (self.alpha / r.powf(self.exponent_a) - self.beta / r.powf(self.exponent_b));
                r_vec * (s * d * self.scale)
            }
            ForceLaw::PotentialGradient => {
                (r_vec / d) * (-self.potential_derivative(d) * self.scale)
            }
        }
    }

    /// dV/dr of the Lennard-Jones potential at separation `d` (softened).
    /// Negative inside the equilibrium distance, positive outside it.
    pub fn potential_derivative(&self, d: f32) -> f32 {
        let r = d + self.epsilon;
        let sigma6 = self.sigma.powi(6);
        let sigma12 = sigma6 * sigma6;
        -48.0 * self.alpha * sigma12 / r.powi(13) + 24.0 * self.alpha * sigma6 / r.powi(7)
    }

    /// Lennard-Jones potential energy at separation `d` (softened)
    pub fn potential(&self, d: f32) -> f32 {
        let sr6 = (self.sigma / (d + self.epsilon)).powi(6);
        4.0 * self.alpha * (sr6 * sr6 - sr6)
    }

    /// Separation at which the potential-gradient force changes sign
    pub fn equilibrium_distance(&self) -> f32 {
        self.sigma * 2.0_f32.powf(1.0 / 6.0) - self.epsilon
    }
}
