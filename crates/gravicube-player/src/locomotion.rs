//! Walking, turning and jumping relative to the player's own up vector.
//!
//! Nothing here assumes world `+Y` is up. Every direction is derived from the
//! player's current orientation, so the same code walks on floors, walls and
//! ceilings.

use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};
use gravicube_ecs::Transform;
use gravicube_math::{LOCAL_FORWARD, LOCAL_RIGHT, look_rotation, project_on_plane, rate_factor};
use gravicube_physics::{KinematicBody, LayerMask, SpatialQuery};

use crate::input::PlayerInput;

/// Below this squared length a move direction counts as no input.
const MIN_DIRECTION_SQ: f32 = 0.01;

/// Movement tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocomotionSettings {
    /// Planar speed in meters per second.
    pub move_speed: f32,
    /// Velocity change applied along up when jumping.
    pub jump_impulse: f32,
    /// Turn smoothing rate per second.
    pub turn_rate: f32,
    /// Radius of the ground-check sphere at the foot marker.
    pub ground_check_radius: f32,
    /// Foot marker in the player's local frame.
    pub foot_offset: Vec3,
}

impl Default for LocomotionSettings {
    fn default() -> Self {
        Self {
            move_speed: 6.0,
            jump_impulse: 8.0,
            turn_rate: 10.0,
            ground_check_radius: 0.2,
            foot_offset: Vec3::new(0.0, -0.45, 0.0),
        }
    }
}

/// What an animation layer needs to pick a clip.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationSignals {
    /// `|local vx| + |local vz|`.
    pub planar_speed: f32,
    pub grounded: bool,
    /// Set for the frame a jump fired.
    pub jump_triggered: bool,
}

/// Per-player locomotion state.
#[derive(Component, Clone, Debug)]
pub struct Locomotion {
    pub settings: LocomotionSettings,
    grounded: bool,
    signals: AnimationSignals,
}

impl Locomotion {
    pub fn new(settings: LocomotionSettings) -> Self {
        Self {
            settings,
            grounded: false,
            signals: AnimationSignals::default(),
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn signals(&self) -> AnimationSignals {
        self.signals
    }

    /// Move direction on the plane orthogonal to `up`, from camera-relative
    /// input. Zero when no walk key is held.
    pub fn move_direction(input: &PlayerInput, camera_rotation: Quat, up: Vec3) -> Vec3 {
        let (x, z) = input.move_axes();
        let forward = project_on_plane(camera_rotation * LOCAL_FORWARD, up).normalize_or_zero();
        let right = project_on_plane(camera_rotation * LOCAL_RIGHT, up).normalize_or_zero();
        (forward * z + right * x).normalize_or_zero()
    }

    /// One physics step: turns toward the move direction and sets velocity.
    ///
    /// The velocity component along up is kept so gravity and jumps are not
    /// cancelled. Turning is skipped while `transitioning`; the transition
    /// owns the orientation then.
    pub fn step<B: KinematicBody>(
        &self,
        input: &PlayerInput,
        camera_rotation: Quat,
        transform: &mut Transform,
        body: &mut B,
        transitioning: bool,
        dt: f32,
    ) {
        let up = transform.up();
        let direction = Self::move_direction(input, camera_rotation, up);

        if direction.length_squared() > MIN_DIRECTION_SQ && !transitioning {
            if let Some(target) = look_rotation(direction, up) {
                let t = rate_factor(self.settings.turn_rate, dt);
                transform.rotation = transform.rotation.slerp(target, t).normalize();
            }
        }

        let velocity = body.velocity();
        body.set_velocity(direction * self.settings.move_speed + up * velocity.dot(up));
    }

    /// Checks a small sphere at the foot marker against the ground layers
    /// and stores the result.
    pub fn probe_ground<Q: SpatialQuery>(&mut self, query: &Q, transform: &Transform) -> bool {
        let foot = transform.transform_point(self.settings.foot_offset);
        self.grounded =
            query.overlap_sphere(foot, self.settings.ground_check_radius, LayerMask::GROUND);
        self.grounded
    }

    /// Jumps along the current up vector if grounded and jump was pressed.
    ///
    /// The body is stopped first so every jump has the same height.
    pub fn try_jump<B: KinematicBody>(
        &mut self,
        input: &PlayerInput,
        transform: &Transform,
        body: &mut B,
    ) -> bool {
        if !(input.jump_pressed && self.grounded) {
            return false;
        }
        body.set_velocity(Vec3::ZERO);
        body.apply_impulse(transform.up() * self.settings.jump_impulse);
        tracing::debug!(up = ?transform.up(), "jump");
        true
    }

    /// Stores this frame's animation signals from the body velocity.
    pub fn record_signals(
        &mut self,
        transform: &Transform,
        velocity: Vec3,
        jumped: bool,
    ) -> AnimationSignals {
        let local = transform.inverse_transform_direction(velocity);
        self.signals = AnimationSignals {
            planar_speed: local.x.abs() + local.z.abs(),
            grounded: self.grounded,
            jump_triggered: jumped,
        };
        self.signals
    }
}
