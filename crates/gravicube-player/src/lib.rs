//! Player-side gravity switching, local-frame locomotion, and the cameras that follow it.
//!
//! Everything here is plain data plus functions over it. Physics is reached
//! only through the [`SpatialQuery`](gravicube_physics::SpatialQuery) and
//! [`KinematicBody`](gravicube_physics::KinematicBody) seams, and the ECS
//! wiring lives in the game crate.

pub mod follow_camera;
pub mod gravity_switch;
pub mod hologram;
pub mod input;
pub mod locomotion;
pub mod orbit_camera;

#[cfg(test)]
pub(crate) mod test_support;

pub use follow_camera::FollowCamera;
pub use gravity_switch::{
    GravityFace, GravityPhase, GravitySwitchSettings, GravitySwitcher, GravityTransition,
    SnappedPose, SwitchEvent, preview_target, snap_final_pose,
};
pub use hologram::HologramPreview;
pub use input::PlayerInput;
pub use locomotion::{AnimationSignals, Locomotion, LocomotionSettings};
pub use orbit_camera::{OrbitCamera, OrbitCameraSettings};
