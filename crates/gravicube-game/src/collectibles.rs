//! Pickup spheres scattered over the cube's faces.

use bevy_ecs::prelude::*;
use glam::Vec3;

/// A pickup that disappears when the player overlaps it.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Collectible {
    pub radius: f32,
}

impl Collectible {
    /// Sphere-sphere overlap between this pickup at `position` and the
    /// player ball.
    pub fn touches(&self, position: Vec3, player: Vec3, player_radius: f32) -> bool {
        let reach = self.radius + player_radius;
        position.distance_squared(player) <= reach * reach
    }
}

/// Pickup count for the current match.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollectibleTally {
    pub collected: u32,
    pub total: u32,
}

impl CollectibleTally {
    pub fn new(total: u32) -> Self {
        Self {
            collected: 0,
            total,
        }
    }

    /// Counts one pickup and returns the new `(current, total)` pair.
    pub fn collect(&mut self) -> (u32, u32) {
        self.collected += 1;
        (self.collected, self.total)
    }
}
