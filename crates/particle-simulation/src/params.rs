//! Simulation parameters for runtime tuning

use particle_physics::{BoundaryBox, PairForceModel, DEFAULT_TIME_STEP, MAX_FRAME_DT};

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    /// Fixed integration step used by the catch-up loop (seconds)
    pub time_step: f32,
    /// Frame deltas above this are clamped before catching up (seconds)
    pub max_frame_dt: f32,
    /// Walls confining every particle
    pub boundary: BoundaryBox,
    /// All-pairs interaction; `None` disables the O(n²) pass
    pub pair_forces: Option<PairForceModel>,
    /// Only the first `max_active` particles are stepped
    pub max_active: usize,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            time_step: DEFAULT_TIME_STEP,
            max_frame_dt: MAX_FRAME_DT,
            boundary: BoundaryBox::container(),
            pair_forces: None,
            max_active: usize::MAX,
        }
    }
}

impl SimulationParams {
    pub fn with_pair_forces(mut self, model: PairForceModel) -> Self {
        self.pair_forces = Some(model);
        self
    }

    pub fn with_boundary(mut self, boundary: BoundaryBox) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_max_active(mut self, max_active: usize) -> Self {
        self.max_active = max_active;
        self
    }
}
