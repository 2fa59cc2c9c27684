//! System sets inside each frame stage.
//!
//! [`EngineSchedules`](crate::EngineSchedules) chains the sets of a stage in
//! declaration order, so a system only has to name its set.

use bevy_ecs::prelude::*;

/// PreUpdate: device state becomes the frame's player input.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PreUpdateSet {
    Input,
}

/// FixedUpdate, once per physics step.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FixedUpdateSet {
    /// Movement intents from the current input.
    InputProcessing,
    /// Gravity and locomotion velocity on the player body.
    ForceApplication,
    /// Transforms into bodies, then the physics step.
    PhysicsStep,
    /// Simulated bodies back into transforms.
    PhysicsSync,
}

/// Update, once per frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum UpdateSet {
    /// Preview, commit and the running transition.
    GravitySwitch,
    /// Ground check and jumping, against the post-switch pose.
    Locomotion,
    /// Pickups, match rules, tutorial and HUD.
    Gameplay,
}

/// PostUpdate: cameras read final transforms, then transients are cleared.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PostUpdateSet {
    Camera,
    FrameEnd,
}
