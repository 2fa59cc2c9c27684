//! Core ECS components shared by the gravity, locomotion, and camera crates.

use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};
use gravicube_math::{LOCAL_DOWN, LOCAL_FORWARD, LOCAL_UP};

/// Position and orientation of an entity in world space.
///
/// Written by exactly one subsystem per tick: the gravity transition while
/// one is running, locomotion and physics sync otherwise. Cameras only read it.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// World-space position in meters.
    pub position: Vec3,
    /// Orientation as a unit quaternion.
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// Creates a transform from a position and rotation.
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Creates an unrotated transform at `position`.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// The entity's current up vector.
    pub fn up(&self) -> Vec3 {
        self.rotation * LOCAL_UP
    }

    /// The entity's current forward vector.
    pub fn forward(&self) -> Vec3 {
        self.rotation * LOCAL_FORWARD
    }

    /// Transform a point from the entity's local frame into world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    /// Rotate a world-space direction into the entity's local frame.
    pub fn inverse_transform_direction(&self, world: Vec3) -> Vec3 {
        self.rotation.inverse() * world
    }
}

/// The active gravity direction and whether a re-orientation is in progress.
///
/// `direction` is always exactly one of the six world axes; it is only ever
/// replaced by the axis-snapping step at the end of a transition.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct GravityState {
    /// Unit direction gravity pulls in.
    pub direction: Vec3,
    /// True while a gravity transition is running.
    pub transitioning: bool,
}

impl Default for GravityState {
    fn default() -> Self {
        Self {
            direction: LOCAL_DOWN,
            transitioning: false,
        }
    }
}

/// Human-readable name for an entity, used in log messages.
#[derive(Component, Clone, Debug, PartialEq, Eq, Default)]
pub struct Name(pub String);

impl Name {
    /// Creates a new [`Name`] from anything that converts to `String`.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}
