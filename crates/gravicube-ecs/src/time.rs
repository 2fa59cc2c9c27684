//! Frame clock shared by every system.

use bevy_ecs::prelude::*;

/// Frame timing, refreshed by [`EngineSchedules::run`](crate::EngineSchedules::run).
///
/// `delta` is the scaled frame delta for variable-rate systems; `fixed_delta`
/// is the physics step used by `FixedUpdate` systems.
#[derive(Resource, Debug, Clone)]
pub struct TimeRes {
    /// Scaled seconds elapsed since the previous frame.
    pub delta: f32,
    /// Seconds per fixed-update step.
    pub fixed_delta: f32,
    /// Total scaled seconds since the world was created.
    pub elapsed: f64,
    /// Number of frames run.
    pub tick: u64,
    /// Multiplier applied to wall-clock frame time. `0.0` freezes simulation.
    pub time_scale: f32,
}

impl Default for TimeRes {
    fn default() -> Self {
        Self {
            delta: 0.0,
            fixed_delta: 1.0 / 60.0,
            elapsed: 0.0,
            tick: 0,
            time_scale: 1.0,
        }
    }
}

impl TimeRes {
    /// Starts a new frame of `frame_dt` wall-clock seconds and returns the
    /// scaled delta. A negative scale counts as frozen.
    pub fn advance(&mut self, frame_dt: f64, fixed_dt: f64) -> f64 {
        let scaled = frame_dt * f64::from(self.time_scale.max(0.0));
        self.delta = scaled as f32;
        self.fixed_delta = fixed_dt as f32;
        self.elapsed += scaled;
        self.tick += 1;
        scaled
    }
}
