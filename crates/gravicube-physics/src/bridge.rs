//! Position sync between entity transforms and Rapier bodies.
//!
//! Outside a gravity transition the simulation owns the position and is
//! copied into the `Transform` after each step. During a transition the
//! transform is driven by the transition and pushed into the body instead.

use bevy_ecs::prelude::*;
use gravicube_ecs::{GravityState, Transform};

use crate::{PhysicsBody, PhysicsWorld};

/// Runs **before** the physics step while a transition is active.
pub fn push_transforms_to_bodies(
    gravity: Res<GravityState>,
    mut physics: ResMut<PhysicsWorld>,
    query: Query<(&Transform, &PhysicsBody)>,
) {
    if !gravity.transitioning {
        return;
    }
    for (transform, body) in query.iter() {
        physics.set_body_position(body.0, transform.position);
    }
}

/// Runs **after** the physics step while no transition is active.
pub fn pull_bodies_to_transforms(
    gravity: Res<GravityState>,
    physics: Res<PhysicsWorld>,
    mut query: Query<(&mut Transform, &PhysicsBody)>,
) {
    if gravity.transitioning {
        return;
    }
    for (mut transform, body) in query.iter_mut() {
        if let Some(position) = physics.body_position(body.0) {
            transform.position = position;
        }
    }
}
