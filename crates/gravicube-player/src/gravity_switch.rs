//! Gravity orientation state machine.
//!
//! The player picks one of the six faces of the cube as the new floor. A
//! hologram previews the resulting pose; committing eases the player into
//! that pose around a pivot at head height and then snaps gravity and facing
//! back onto exact world axes.
//!
//! ```text
//! Idle ──select──▶ Previewing ──commit──▶ Transitioning ──elapsed ≥ duration──▶ Idle
//!                    ▲    │
//!                    └────┘ reselect
//! ```

use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};
use gravicube_ecs::{GravityState, Transform};
use gravicube_math::{
    AXIS_DIRECTIONS, LOCAL_BACK, LOCAL_DOWN, LOCAL_FORWARD, LOCAL_RIGHT, LOCAL_UP,
    look_rotation, project_on_plane, smoothstep, snap_to_nearest_axis,
};
use gravicube_physics::KinematicBody;
use tracing::{debug, info, warn};

use crate::hologram::HologramPreview;
use crate::input::PlayerInput;

/// Angles below this many degrees leave the pose untouched.
const MIN_TURN_DEG: f32 = 0.01;

/// A face of the gravity cube, named relative to the player's current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GravityFace {
    /// The wall ahead.
    Front,
    /// The wall behind.
    Back,
    /// The wall on the left.
    Left,
    /// The wall on the right.
    Right,
    /// The surface overhead.
    Ceiling,
    /// The surface underfoot. Selecting it only re-snaps the current pose.
    Floor,
}

impl GravityFace {
    /// Turn angle in degrees and the local axis it is taken about.
    pub fn turn(self) -> (f32, Vec3) {
        match self {
            GravityFace::Front => (90.0, LOCAL_RIGHT),
            GravityFace::Back => (-90.0, LOCAL_RIGHT),
            GravityFace::Left => (-90.0, LOCAL_BACK),
            GravityFace::Right => (90.0, LOCAL_BACK),
            GravityFace::Ceiling => (180.0, LOCAL_RIGHT),
            GravityFace::Floor => (0.0, LOCAL_RIGHT),
        }
    }

    /// The face selected by this frame's edges, if any.
    ///
    /// With the modifier held only up and down count, mapping to the ceiling
    /// and the floor. When several edges arrive in one frame the last in
    /// up, down, left, right order wins.
    pub fn from_input(input: &PlayerInput) -> Option<GravityFace> {
        let mut face = None;
        if input.modifier_held {
            if input.up_pressed {
                face = Some(GravityFace::Ceiling);
            }
            if input.down_pressed {
                face = Some(GravityFace::Floor);
            }
            return face;
        }
        if input.up_pressed {
            face = Some(GravityFace::Front);
        }
        if input.down_pressed {
            face = Some(GravityFace::Back);
        }
        if input.left_pressed {
            face = Some(GravityFace::Left);
        }
        if input.right_pressed {
            face = Some(GravityFace::Right);
        }
        face
    }
}

/// Tuning for previews and transitions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GravitySwitchSettings {
    /// Height of the rotation pivot above the feet.
    pub head_height: f32,
    /// Hologram easing rate per second.
    pub hologram_smooth_speed: f32,
    /// Duration of turns up to the threshold.
    pub short_duration: f32,
    /// Duration of turns past the threshold.
    pub long_duration: f32,
    /// Turns larger than this many degrees use the long duration.
    pub long_turn_threshold_deg: f32,
}

impl Default for GravitySwitchSettings {
    fn default() -> Self {
        Self {
            head_height: 1.6,
            hologram_smooth_speed: 15.0,
            short_duration: 0.5,
            long_duration: 0.8,
            long_turn_threshold_deg: 100.0,
        }
    }
}

/// Computes the pose the player ends up in after switching to `face`.
///
/// The player swings around a pivot at `head_height` along their up vector,
/// so the head stays put while the feet land on the new surface.
pub fn preview_target(pose: &Transform, face: GravityFace, head_height: f32) -> Transform {
    let (angle_deg, local_axis) = face.turn();
    if angle_deg.abs() < MIN_TURN_DEG {
        return *pose;
    }
    let axis = (pose.rotation * local_axis).normalize();
    let offset = Quat::from_axis_angle(axis, angle_deg.to_radians());
    let pivot = pose.position + pose.up() * head_height;
    Transform {
        position: pivot + offset * (pose.position - pivot),
        rotation: (offset * pose.rotation).normalize(),
    }
}

/// An in-flight eased move between two poses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GravityTransition {
    pub start: Transform,
    pub end: Transform,
    pub elapsed: f32,
    pub duration: f32,
}

impl GravityTransition {
    /// Starts a transition, picking the duration from the size of the turn.
    pub fn new(start: Transform, end: Transform, settings: &GravitySwitchSettings) -> Self {
        let angle = start.rotation.angle_between(end.rotation);
        let duration = if angle > settings.long_turn_threshold_deg.to_radians() {
            settings.long_duration
        } else {
            settings.short_duration
        };
        Self {
            start,
            end,
            elapsed: 0.0,
            duration,
        }
    }

    /// Normalized progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Advances by `dt` and returns the eased pose for this frame.
    pub fn advance(&mut self, dt: f32) -> Transform {
        self.elapsed += dt.max(0.0);
        let t = smoothstep(self.progress());
        Transform {
            position: self.start.position.lerp(self.end.position, t),
            rotation: self.start.rotation.slerp(self.end.rotation, t).normalize(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// The axis-exact pose and gravity produced when a transition ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnappedPose {
    pub transform: Transform,
    /// Exactly one of the six world axes.
    pub gravity: Vec3,
}

/// Snaps a transition's end pose onto the world axes.
///
/// Gravity becomes the axis nearest the pose's down vector and facing the
/// axis nearest its forward vector, so repeated switches never accumulate
/// drift.
pub fn snap_final_pose(end: &Transform) -> SnappedPose {
    let gravity = snap_to_nearest_axis(end.rotation * LOCAL_DOWN);
    let up = -gravity;
    let forward = snapped_forward(end.rotation, up);
    let rotation = look_rotation(forward, up).unwrap_or(end.rotation);
    SnappedPose {
        transform: Transform {
            position: end.position,
            rotation,
        },
        gravity,
    }
}

/// An axis perpendicular to `up` that best matches the pose's facing.
fn snapped_forward(rotation: Quat, up: Vec3) -> Vec3 {
    let perpendicular = |v: Vec3| v != Vec3::ZERO && v.dot(up) == 0.0;

    let forward = snap_to_nearest_axis(rotation * LOCAL_FORWARD);
    if perpendicular(forward) {
        return forward;
    }

    warn!(?forward, ?up, "snapped forward is parallel to up, re-deriving");
    let candidates = [
        project_on_plane(rotation * LOCAL_FORWARD, up),
        project_on_plane(rotation * LOCAL_UP, up),
        project_on_plane(rotation * LOCAL_BACK, up),
    ];
    for candidate in candidates {
        if candidate.length_squared() < 1e-8 {
            continue;
        }
        let snapped = snap_to_nearest_axis(candidate);
        if perpendicular(snapped) {
            return snapped;
        }
    }

    // Some axis is always perpendicular to an axis-aligned up.
    AXIS_DIRECTIONS
        .into_iter()
        .find(|axis| perpendicular(*axis))
        .unwrap_or(LOCAL_FORWARD)
}

/// Where the state machine currently is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GravityPhase {
    Idle,
    Previewing(GravityFace),
    Transitioning(GravityTransition),
}

/// Notable things a state machine update did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SwitchEvent {
    /// A face was selected and the hologram aimed at it.
    PreviewSelected(GravityFace),
    /// A commit started a transition.
    TransitionStarted { face: GravityFace, duration: f32 },
    /// A transition ended and gravity was replaced.
    TransitionFinished { gravity: Vec3 },
}

/// Per-player gravity state machine.
///
/// Without a hologram the switcher is floor-only: selections and commits are
/// ignored and the player keeps the gravity they started with.
#[derive(Component, Clone, Debug)]
pub struct GravitySwitcher {
    settings: GravitySwitchSettings,
    hologram: Option<HologramPreview>,
    phase: GravityPhase,
}

impl GravitySwitcher {
    /// Creates a switcher with a hologram preview.
    pub fn new(settings: GravitySwitchSettings) -> Self {
        Self {
            hologram: Some(HologramPreview::new(settings.hologram_smooth_speed)),
            settings,
            phase: GravityPhase::Idle,
        }
    }

    /// Creates a floor-only switcher.
    pub fn without_hologram(settings: GravitySwitchSettings) -> Self {
        warn!("no hologram preview available, gravity switching disabled");
        Self {
            hologram: None,
            settings,
            phase: GravityPhase::Idle,
        }
    }

    pub fn settings(&self) -> &GravitySwitchSettings {
        &self.settings
    }

    pub fn phase(&self) -> &GravityPhase {
        &self.phase
    }

    pub fn hologram(&self) -> Option<&HologramPreview> {
        self.hologram.as_ref()
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, GravityPhase::Transitioning(_))
    }

    /// Drops any preview and transition without touching the player.
    pub fn reset(&mut self) {
        if let Some(hologram) = self.hologram.as_mut() {
            hologram.hide();
        }
        self.phase = GravityPhase::Idle;
    }

    /// Runs one frame of the state machine.
    ///
    /// While a transition is running the transform is driven by it and all
    /// input is ignored. When it finishes, `gravity` is replaced with the
    /// snapped axis and the body comes to rest; the caller is responsible for
    /// moving the physics body to the final position.
    pub fn update<B: KinematicBody>(
        &mut self,
        input: &PlayerInput,
        transform: &mut Transform,
        gravity: &mut GravityState,
        body: &mut B,
        dt: f32,
    ) -> Option<SwitchEvent> {
        if let GravityPhase::Transitioning(transition) = &mut self.phase {
            *transform = transition.advance(dt);
            if !transition.is_finished() {
                return None;
            }
            let snapped = snap_final_pose(&transition.end);
            *transform = snapped.transform;
            gravity.direction = snapped.gravity;
            gravity.transitioning = false;
            body.set_velocity(Vec3::ZERO);
            self.phase = GravityPhase::Idle;
            info!(gravity = ?snapped.gravity, "gravity switch complete");
            return Some(SwitchEvent::TransitionFinished {
                gravity: snapped.gravity,
            });
        }

        let hologram = self.hologram.as_mut()?;
        let mut event = None;

        if let Some(face) = GravityFace::from_input(input) {
            let target = preview_target(transform, face, self.settings.head_height);
            hologram.show(transform, target);
            self.phase = GravityPhase::Previewing(face);
            debug!(?face, "gravity preview selected");
            event = Some(SwitchEvent::PreviewSelected(face));
        }

        hologram.tick(dt);

        if input.commit_pressed {
            if let GravityPhase::Previewing(face) = self.phase {
                if hologram.is_active() {
                    let end = *hologram.target();
                    hologram.hide();
                    let transition = GravityTransition::new(*transform, end, &self.settings);
                    let duration = transition.duration;
                    self.phase = GravityPhase::Transitioning(transition);
                    gravity.transitioning = true;
                    info!(?face, duration, "gravity switch started");
                    event = Some(SwitchEvent::TransitionStarted { face, duration });
                }
            }
        }

        event
    }
}
