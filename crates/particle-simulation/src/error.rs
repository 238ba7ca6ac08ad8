use particle_physics::PhysicsError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Physics(#[from] PhysicsError),

    #[error("Particle {index} failed")]
    Particle {
        index: usize,
        #[source]
        source: PhysicsError,
    },

    #[error("Pixel buffer holds {actual} pixels, expected {expected}")]
    PixelBuffer { expected: usize, actual: usize },
}

impl SimulationError {
    pub(crate) fn particle(index: usize) -> impl FnOnce(PhysicsError) -> Self {
        move |source| Self::Particle { index, source }
    }
}
