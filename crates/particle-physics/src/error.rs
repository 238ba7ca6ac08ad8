//! Error types for particle physics operations

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// The particle was asked to step before it was fully initialized
    #[error("Particle is not ready to be updated: {reason}")]
    InvalidState { reason: &'static str },

    #[error("Particle mass must be positive and finite, got {0}")]
    InvalidMass(f32),

    #[error("Time step must be positive and finite, got {0}")]
    InvalidTimestep(f32),

    #[error("Invalid force model parameter: {0}")]
    InvalidParameter(String),

    /// A NaN or infinite value showed up in the particle state
    #[error("Particle {quantity} is not finite")]
    NumericAnomaly { quantity: &'static str },
}

/// Reject time steps that would make the integrator meaningless
pub fn validate_time_step(dt: f32) -> Result<(), PhysicsError> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidTimestep(dt))
    }
}
