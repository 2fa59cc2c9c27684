//! Body creation and the ECS handle component.

use bevy_ecs::prelude::*;
use glam::Vec3;
use rapier3d::prelude::*;

use crate::{LayerMask, PhysicsWorld, to_rapier};

/// Links an entity to its Rapier rigid body.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicsBody(pub RigidBodyHandle);

/// Handles for the player's body and collider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerBody {
    /// Handle to the dynamic rigid body.
    pub body_handle: RigidBodyHandle,
    /// Handle to the ball collider attached to it.
    pub collider_handle: ColliderHandle,
}

/// Spawns the player body: a dynamic, never-sleeping, rotation-locked ball of
/// unit mass on the [`LayerMask::PLAYER`] layer.
///
/// Orientation lives in the entity's `Transform`, not in the body, so the
/// gravity transition can rotate the player without fighting the solver.
pub fn spawn_player_body(physics: &mut PhysicsWorld, position: Vec3, radius: f32) -> PlayerBody {
    let body = RigidBodyBuilder::dynamic()
        .translation(to_rapier(position))
        .lock_rotations()
        .can_sleep(false)
        .ccd_enabled(true)
        .build();
    let body_handle = physics.rigid_body_set.insert(body);

    let collider = ColliderBuilder::ball(radius)
        .mass(1.0)
        .friction(0.0)
        .user_data(LayerMask::PLAYER.to_user_data())
        .build();
    let collider_handle =
        physics
            .collider_set
            .insert_with_parent(collider, body_handle, &mut physics.rigid_body_set);

    tracing::debug!(?position, radius, "Spawned player body");

    PlayerBody {
        body_handle,
        collider_handle,
    }
}

/// Spawns a fixed cuboid centred at `center` with the given half extents.
pub fn spawn_static_box(
    physics: &mut PhysicsWorld,
    center: Vec3,
    half_extents: Vec3,
    layers: LayerMask,
) -> ColliderHandle {
    let body = RigidBodyBuilder::fixed()
        .translation(to_rapier(center))
        .build();
    let body_handle = physics.rigid_body_set.insert(body);
    let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
        .user_data(layers.to_user_data())
        .build();
    physics
        .collider_set
        .insert_with_parent(collider, body_handle, &mut physics.rigid_body_set)
}

/// Mutable view of one body through the [`KinematicBody`](crate::KinematicBody) seam.
pub struct RapierBody<'a> {
    pub(crate) world: &'a mut PhysicsWorld,
    pub(crate) handle: RigidBodyHandle,
}

impl<'a> RapierBody<'a> {
    /// Borrows the body behind `handle`. A stale handle reads as a body at rest.
    pub fn new(world: &'a mut PhysicsWorld, handle: RigidBodyHandle) -> Self {
        Self { world, handle }
    }
}
