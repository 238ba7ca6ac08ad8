//! Default constants for the particle dynamics engine
//!
//! Values are in simulation units and match the container scene the engine
//! was tuned against.

/// Mass given to particles built from a position alone
pub const DEFAULT_MASS: f32 = 1.0;

/// Fixed integration step (seconds)
pub const DEFAULT_TIME_STEP: f32 = 0.001;

/// Largest frame delta the catch-up loop will try to simulate (seconds)
pub const MAX_FRAME_DT: f32 = 1.0 / 30.0;

/// Softening term added to pair separations to prevent singularities at r→0
pub const SOFTENING: f32 = 1.0e-5;

// Container walls

/// Penalty spring stiffness of the container walls
pub const WALL_SPRING_CONSTANT: f32 = 5000.0;

/// Penalty damping of the container walls
pub const WALL_DAMPING_CONSTANT: f32 = 1.0;

/// Interior corner of the container with the smallest coordinates
/// (left, bottom, back walls)
pub const CONTAINER_MIN: [f32; 3] = [-0.35, -9.35, -1.35];

/// Interior corner of the container with the largest coordinates
/// (right, top, front walls)
pub const CONTAINER_MAX: [f32; 3] = [9.35, 0.35, 1.35];

// Lennard-Jones (potential-gradient) defaults

/// Well depth
pub const LJ_ALPHA: f32 = 1.0;

/// Characteristic length, the separation at which the potential crosses zero
pub const LJ_SIGMA: f32 = 1.0;

// Legacy discrete fluid model (distance-scaled) defaults

/// Repulsive exponent
pub const DFM_EXPONENT_A: f32 = 100.0;

/// Attractive exponent
pub const DFM_EXPONENT_B: f32 = 1.0;

/// Repulsive scale
pub const DFM_ALPHA: f32 = 2.0;

/// Attractive scale
pub const DFM_BETA: f32 = 4.0;

/// Post-scale keeping the legacy forces in a tractable range
pub const DFM_SCALE: f32 = 0.01;
