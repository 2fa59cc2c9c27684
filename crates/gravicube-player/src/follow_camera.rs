//! Fixed-offset chase camera.
//!
//! A simpler alternative to the orbit camera: it trails the player at an
//! offset expressed in the player's frame and always looks at them, using
//! the player's up so it rolls with gravity switches.

use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};
use gravicube_ecs::Transform;
use gravicube_math::look_rotation;

#[derive(Component, Clone, Debug)]
pub struct FollowCamera {
    /// Offset from the player in the player's local frame.
    pub offset: Vec3,
    /// Per-frame lerp/slerp factor.
    pub smooth_speed: f32,
    position: Vec3,
    rotation: Quat,
}

impl FollowCamera {
    /// Creates a camera already in place behind `target`.
    pub fn new(offset: Vec3, smooth_speed: f32, target: &Transform) -> Self {
        let position = target.transform_point(offset);
        let rotation = look_rotation(target.position - position, target.up())
            .unwrap_or(target.rotation);
        Self {
            offset,
            smooth_speed,
            position,
            rotation,
        }
    }

    pub fn update(&mut self, target: &Transform) {
        let desired = target.transform_point(self.offset);
        self.position = self.position.lerp(desired, self.smooth_speed);
        // Sitting on the target or straight above it leaves no usable look
        // direction; keep the previous rotation.
        if let Some(look) = look_rotation(target.position - self.position, target.up()) {
            self.rotation = self.rotation.slerp(look, self.smooth_speed).normalize();
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravicube_math::LOCAL_FORWARD;

    #[test]
    fn test_starts_at_offset_looking_at_target() {
        let camera = FollowCamera::new(Vec3::new(0.0, 2.5, 4.0), 0.125, &Transform::default());
        assert_eq!(camera.position(), Vec3::new(0.0, 2.5, 4.0));
        let view = camera.rotation() * LOCAL_FORWARD;
        assert!((view - Vec3::new(0.0, -2.5, -4.0).normalize()).length() < 1e-5);
    }

    #[test]
    fn test_converges_on_moving_target() {
        let mut camera = FollowCamera::new(Vec3::new(0.0, 2.5, 4.0), 0.125, &Transform::default());
        let target = Transform::from_position(Vec3::new(10.0, 0.0, 0.0));
        camera.update(&target);
        assert!(camera.position().x > 0.0 && camera.position().x < 10.0);
        for _ in 0..200 {
            camera.update(&target);
        }
        assert!((camera.position() - Vec3::new(10.0, 2.5, 4.0)).length() < 1e-3);
    }

    #[test]
    fn test_offset_follows_player_frame() {
        // Upside down on the ceiling: the offset flips with the player.
        let target = Transform::new(Vec3::ZERO, Quat::from_rotation_x(std::f32::consts::PI));
        let camera = FollowCamera::new(Vec3::new(0.0, 2.5, 4.0), 0.125, &target);
        assert!((camera.position() - Vec3::new(0.0, -2.5, -4.0)).length() < 1e-4);
    }
}
