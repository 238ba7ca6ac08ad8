//! Fixed-timestep catch-up loop
//!
//! The caller hands over how much wall time passed since the last frame; the
//! clock clamps it and steps the system in fixed increments until simulated
//! time has caught up.

use crate::{ParticleSystem, SimulationError, SimulationParams};
use particle_physics::{validate_time_step, PhysicsError};

#[derive(Debug, Clone)]
pub struct SimulationClock {
    time_step: f32,
    max_frame_dt: f32,
    // Accumulated in f64 so long runs do not drift
    t_sim: f64,
    steps: u64,
}

impl SimulationClock {
    pub fn new(time_step: f32, max_frame_dt: f32) -> Result<Self, SimulationError> {
        validate_time_step(time_step)?;
        validate_time_step(max_frame_dt)?;
        Ok(Self {
            time_step,
            max_frame_dt,
            t_sim: 0.0,
            steps: 0,
        })
    }

    pub fn from_params(params: &SimulationParams) -> Result<Self, SimulationError> {
        Self::new(params.time_step, params.max_frame_dt)
    }

    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    /// Simulated seconds so far
    pub fn elapsed(&self) -> f64 {
        self.t_sim
    }

    /// Fixed steps taken so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Frame delta actually simulated for a given wall-clock delta
    pub fn clamp_frame_dt(&self, frame_dt: f32) -> f32 {
        frame_dt.min(self.max_frame_dt)
    }

    /// Catch simulated time up with one rendered frame of `frame_dt` seconds
    ///
    /// Returns the number of fixed steps taken.
    pub fn advance(
        &mut self,
        system: &mut ParticleSystem,
        frame_dt: f32,
    ) -> Result<usize, SimulationError> {
        if !frame_dt.is_finite() || frame_dt < 0.0 {
            return Err(PhysicsError::InvalidTimestep(frame_dt).into());
        }

        let t_next = self.t_sim + f64::from(self.clamp_frame_dt(frame_dt));
        let mut taken = 0;
        while self.t_sim < t_next {
            system.update(self.time_step)?;
            self.t_sim += f64::from(self.time_step);
            self.steps += 1;
            taken += 1;
        }

        log::debug!(
            "Advanced {} steps, t = {:.4}s, {} particles",
            taken,
            self.t_sim,
            system.len()
        );
        Ok(taken)
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        let params = SimulationParams::default();
        Self {
            time_step: params.time_step,
            max_frame_dt: params.max_frame_dt,
            t_sim: 0.0,
            steps: 0,
        }
    }
}
