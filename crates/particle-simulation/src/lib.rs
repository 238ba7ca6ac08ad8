//! # Particle Simulation Engine
//!
//! CPU particle system stepping Lennard-Jones pair forces and container walls
//! on a fixed timestep.

pub mod clock;
pub mod error;
pub mod instance;
pub mod params;
pub mod pixels;
pub mod simulation;

pub use clock::*;
pub use error::*;
pub use instance::*;
pub use params::*;
pub use pixels::*;
pub use simulation::*;
