//! # Particle Physics Engine
//!
//! Point-mass particles, Lennard-Jones style pair forces, and penalty-based
//! boundary confinement integrated with semi-implicit Euler.

pub mod boundary;
pub mod constants;
pub mod error;
pub mod forces;
pub mod particle;

pub use boundary::*;
pub use constants::*;
pub use error::*;
pub use forces::*;
pub use particle::*;
