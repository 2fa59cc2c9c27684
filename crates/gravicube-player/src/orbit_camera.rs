//! Third-person orbit camera that re-derives "up" from the player.
//!
//! The camera keeps user-controlled yaw and pitch in a gravity-neutral frame
//! and rotates that frame onto the player's up vector with a smoothed
//! alignment rotation. Walls between the pivot and the camera pull it in; it
//! relaxes back out once the line of sight is clear.

use bevy_ecs::prelude::*;
use glam::{Quat, Vec2, Vec3};
use gravicube_ecs::Transform;
use gravicube_math::{LOCAL_BACK, WORLD_UP, damp_factor, from_to_rotation, rate_factor};
use gravicube_physics::{LayerMask, SpatialQuery};

/// Orbit camera tuning. Angles are in degrees, sensitivities in degrees per
/// pixel of pointer motion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCameraSettings {
    /// Pivot offset in the gravity-aligned frame.
    pub target_offset: Vec3,
    /// Nominal distance behind the pivot.
    pub distance: f32,
    /// Closest the camera may be pulled in.
    pub min_distance: f32,
    pub sensitivity_x: f32,
    pub sensitivity_y: f32,
    pub pitch_min: f32,
    pub pitch_max: f32,
    pub initial_pitch: f32,
    /// Rate per second at which the camera frame follows the player's up.
    pub alignment_speed: f32,
    /// Rate per second at which the camera rotation eases toward the final rotation.
    pub rotation_smoothing: f32,
    /// Gap kept between the camera and an occluding surface.
    pub occlusion_buffer: f32,
    /// Rate per second at which the distance relaxes back out.
    pub relax_rate: f32,
}

impl Default for OrbitCameraSettings {
    fn default() -> Self {
        Self {
            target_offset: Vec3::new(0.0, 1.5, 0.0),
            distance: 5.0,
            min_distance: 1.0,
            sensitivity_x: 0.4,
            sensitivity_y: 0.2,
            pitch_min: -40.0,
            pitch_max: 80.0,
            initial_pitch: 20.0,
            alignment_speed: 5.0,
            rotation_smoothing: 7.5,
            occlusion_buffer: 0.2,
            relax_rate: 5.0,
        }
    }
}

/// Orbit state plus the resulting camera pose.
#[derive(Component, Clone, Debug)]
pub struct OrbitCamera {
    pub settings: OrbitCameraSettings,
    yaw: f32,
    pitch: f32,
    current_distance: f32,
    gravity_rotation: Quat,
    position: Vec3,
    rotation: Quat,
}

impl OrbitCamera {
    /// Creates a camera already aligned behind `target`.
    pub fn new(settings: OrbitCameraSettings, target: &Transform) -> Self {
        let mut camera = Self {
            yaw: 0.0,
            pitch: settings
                .initial_pitch
                .clamp(settings.pitch_min, settings.pitch_max),
            current_distance: settings.distance,
            gravity_rotation: from_to_rotation(WORLD_UP, target.up()),
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            settings,
        };
        let final_rotation = camera.final_rotation();
        camera.rotation = final_rotation;
        camera.position = camera.pivot(target) + final_rotation * (LOCAL_BACK * camera.current_distance);
        camera
    }

    /// Applies a pointer delta in pixels. `+y` is downward motion, which
    /// raises the camera.
    pub fn apply_look(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.settings.sensitivity_x;
        self.pitch = (self.pitch + delta.y * self.settings.sensitivity_y)
            .clamp(self.settings.pitch_min, self.settings.pitch_max);
    }

    /// Orbit rotation in the gravity-neutral frame.
    pub fn orbit_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw.to_radians()) * Quat::from_rotation_x(-self.pitch.to_radians())
    }

    /// Rotation the camera is easing toward.
    pub fn final_rotation(&self) -> Quat {
        (self.gravity_rotation * self.orbit_rotation()).normalize()
    }

    fn pivot(&self, target: &Transform) -> Vec3 {
        target.position + self.gravity_rotation * self.settings.target_offset
    }

    /// Follows `target` for one frame, pulling in for occluders found by `query`.
    pub fn update<Q: SpatialQuery>(&mut self, target: &Transform, query: &Q, dt: f32) {
        let aligned = from_to_rotation(WORLD_UP, target.up());
        self.gravity_rotation = self
            .gravity_rotation
            .slerp(aligned, rate_factor(self.settings.alignment_speed, dt))
            .normalize();

        let final_rotation = self.final_rotation();
        let pivot = self.pivot(target);
        let nominal = self.settings.distance;
        let desired = pivot + final_rotation * (LOCAL_BACK * nominal);

        self.current_distance = match query.linecast(pivot, desired, LayerMask::OCCLUSION) {
            Some(hit) => hit.distance - self.settings.occlusion_buffer,
            None => {
                let t = damp_factor(self.settings.relax_rate, dt);
                self.current_distance + (nominal - self.current_distance) * t
            }
        }
        .clamp(self.settings.min_distance, nominal);

        self.position = pivot + final_rotation * (LOCAL_BACK * self.current_distance);
        self.rotation = self
            .rotation
            .slerp(final_rotation, damp_factor(self.settings.rotation_smoothing, dt))
            .normalize();
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn current_distance(&self) -> f32 {
        self.current_distance
    }

    pub fn gravity_rotation(&self) -> Quat {
        self.gravity_rotation
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// The camera pose as a transform.
    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::PlaneWorld;

    const DT: f32 = 1.0 / 60.0;

    fn flat_camera() -> OrbitCameraSettings {
        OrbitCameraSettings {
            initial_pitch: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_starts_behind_target() {
        let camera = OrbitCamera::new(flat_camera(), &Transform::default());
        assert!((camera.position() - Vec3::new(0.0, 1.5, 5.0)).length() < 1e-5);
        assert_eq!(camera.current_distance(), 5.0);
    }

    #[test]
    fn test_pitch_clamped_and_yaw_free() {
        let mut camera = OrbitCamera::new(OrbitCameraSettings::default(), &Transform::default());
        camera.apply_look(Vec2::new(100.0, 10_000.0));
        assert_eq!(camera.pitch(), 80.0);
        assert!((camera.yaw() + 40.0).abs() < 1e-4);
        camera.apply_look(Vec2::new(0.0, -10_000.0));
        assert_eq!(camera.pitch(), -40.0);
    }

    #[test]
    fn test_hit_pulls_camera_in() {
        // Wall 2 m behind the pivot.
        let wall = PlaneWorld::new().with_plane(Vec3::NEG_Z, -2.0, LayerMask::OCCLUSION);
        let mut camera = OrbitCamera::new(flat_camera(), &Transform::default());
        camera.update(&Transform::default(), &wall, DT);
        assert!((camera.current_distance() - 1.8).abs() < 1e-5);
    }

    #[test]
    fn test_hit_never_closer_than_min() {
        let wall = PlaneWorld::new().with_plane(Vec3::NEG_Z, -0.5, LayerMask::OCCLUSION);
        let mut camera = OrbitCamera::new(flat_camera(), &Transform::default());
        camera.update(&Transform::default(), &wall, DT);
        assert_eq!(camera.current_distance(), 1.0);
    }

    #[test]
    fn test_relaxes_back_out() {
        let wall = PlaneWorld::new().with_plane(Vec3::NEG_Z, -2.0, LayerMask::OCCLUSION);
        let open = PlaneWorld::new();
        let mut camera = OrbitCamera::new(flat_camera(), &Transform::default());
        camera.update(&Transform::default(), &wall, DT);
        let pulled = camera.current_distance();
        camera.update(&Transform::default(), &open, DT);
        assert!(camera.current_distance() > pulled);
        for _ in 0..600 {
            camera.update(&Transform::default(), &open, DT);
        }
        assert!((camera.current_distance() - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_long_frame_does_not_pop_back_out() {
        let wall = PlaneWorld::new().with_plane(Vec3::NEG_Z, -2.0, LayerMask::OCCLUSION);
        let mut camera = OrbitCamera::new(flat_camera(), &Transform::default());
        camera.update(&Transform::default(), &wall, DT);
        camera.update(&Transform::default(), &PlaneWorld::new(), 0.25);
        let d = camera.current_distance();
        assert!(d > 1.8 && d < 4.9, "distance {d}");
    }

    #[test]
    fn test_rotation_easing_independent_of_frame_rate() {
        let mut fine = OrbitCamera::new(flat_camera(), &Transform::default());
        let mut coarse = fine.clone();
        fine.apply_look(Vec2::new(200.0, 0.0));
        coarse.apply_look(Vec2::new(200.0, 0.0));
        for _ in 0..4 {
            fine.update(&Transform::default(), &PlaneWorld::new(), DT);
        }
        coarse.update(&Transform::default(), &PlaneWorld::new(), 4.0 * DT);
        assert!(fine.rotation().angle_between(coarse.rotation()) < 1e-3);
        assert!(fine.rotation().angle_between(fine.final_rotation()) > 1e-2);
    }

    #[test]
    fn test_distance_bounds_hold_for_any_probe_sequence() {
        let near = PlaneWorld::new().with_plane(Vec3::NEG_Z, -0.3, LayerMask::OCCLUSION);
        let mid = PlaneWorld::new().with_plane(Vec3::NEG_Z, -3.0, LayerMask::OCCLUSION);
        let open = PlaneWorld::new();
        let mut camera = OrbitCamera::new(flat_camera(), &Transform::default());
        for i in 0..300 {
            match i % 7 {
                0 | 3 => camera.update(&Transform::default(), &near, DT),
                1 => camera.update(&Transform::default(), &mid, 0.5),
                _ => camera.update(&Transform::default(), &open, DT * (i % 5) as f32),
            }
            let d = camera.current_distance();
            assert!((1.0..=5.0).contains(&d), "distance {d} out of bounds at {i}");
        }
    }

    #[test]
    fn test_ignores_non_occluding_layers() {
        let ground_only = PlaneWorld::new().with_plane(Vec3::NEG_Z, -2.0, LayerMask::GROUND);
        let mut camera = OrbitCamera::new(flat_camera(), &Transform::default());
        camera.update(&Transform::default(), &ground_only, DT);
        assert_eq!(camera.current_distance(), 5.0);
    }

    #[test]
    fn test_aligns_to_player_up() {
        let ceiling_walker = Transform::new(Vec3::ZERO, Quat::from_rotation_x(std::f32::consts::PI));
        let mut camera = OrbitCamera::new(flat_camera(), &Transform::default());
        for _ in 0..600 {
            camera.update(&ceiling_walker, &PlaneWorld::new(), DT);
        }
        let camera_up = camera.gravity_rotation() * Vec3::Y;
        assert!((camera_up - Vec3::NEG_Y).length() < 1e-3);
    }

    #[test]
    fn test_orbit_angles_survive_alignment() {
        let mut camera = OrbitCamera::new(OrbitCameraSettings::default(), &Transform::default());
        camera.apply_look(Vec2::new(50.0, 25.0));
        let (yaw, pitch) = (camera.yaw(), camera.pitch());
        let wall_walker = Transform::new(Vec3::ZERO, Quat::from_rotation_z(-std::f32::consts::FRAC_PI_2));
        for _ in 0..60 {
            camera.update(&wall_walker, &PlaneWorld::new(), DT);
        }
        assert_eq!((camera.yaw(), camera.pitch()), (yaw, pitch));
    }
}
