//! Frame-coherent pointer motion.
//!
//! The look controls only consume the motion accumulated during a frame, so
//! that is all this tracks.

use bevy_ecs::prelude::*;
use glam::Vec2;

/// Pointer motion accumulated since the last frame boundary.
#[derive(Resource, Debug, Clone, Default)]
pub struct MouseState {
    delta: Vec2,
}

impl MouseState {
    /// Creates a mouse state with no motion.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds pointer motion in pixels. `+y` is downward on screen.
    pub fn inject_delta(&mut self, delta: Vec2) {
        self.delta += delta;
    }

    /// Clears the delta. Call once at the end of every frame.
    pub fn clear_transients(&mut self) {
        self.delta = Vec2::ZERO;
    }

    /// Motion accumulated since the last clear.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }
}
