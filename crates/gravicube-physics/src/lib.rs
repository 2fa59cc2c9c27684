//! Physics integration: rigid bodies, static geometry, ray probes, and world stepping.
//!
//! Wraps the Rapier 3D physics engine behind a single [`PhysicsWorld`] resource
//! and exposes the two narrow seams the gameplay code talks to:
//! [`SpatialQuery`] for ray probes and [`KinematicBody`] for velocity control.

use bevy_ecs::prelude::*;
use glam::Vec3;
use rapier3d::prelude::*;

mod body;
mod bridge;
mod gravity;
mod layers;
mod query;

pub use body::{PhysicsBody, PlayerBody, RapierBody, spawn_player_body, spawn_static_box};
pub use bridge::{pull_bodies_to_transforms, push_transforms_to_bodies};
pub use gravity::{GravityField, gravity_force_system};
pub use layers::LayerMask;
pub use query::{KinematicBody, RayHit, SpatialQuery};
pub use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};

/// Central physics simulation resource owning all Rapier state.
///
/// Systems read via `Res<PhysicsWorld>` for ray probes or mutate via
/// `ResMut<PhysicsWorld>` to move bodies and step the simulation.
#[derive(Resource)]
pub struct PhysicsWorld {
    /// World-space gravity acceleration.
    pub gravity: Vector,
    /// Timestep and solver configuration.
    pub integration_parameters: IntegrationParameters,
    /// The main simulation pipeline.
    pub physics_pipeline: PhysicsPipeline,
    /// Tracks sleeping/awake body islands.
    pub island_manager: IslandManager,
    /// Broad-phase collision detection (also provides the query pipeline).
    pub broad_phase: BroadPhaseBvh,
    /// Narrow-phase collision detection (contact manifolds).
    pub narrow_phase: NarrowPhase,
    /// All rigid bodies in the simulation.
    pub rigid_body_set: RigidBodySet,
    /// All colliders in the simulation.
    pub collider_set: ColliderSet,
    /// Impulse-based joints.
    pub impulse_joint_set: ImpulseJointSet,
    /// Multibody joints.
    pub multibody_joint_set: MultibodyJointSet,
    /// Continuous collision detection solver.
    pub ccd_solver: CCDSolver,
}

impl PhysicsWorld {
    /// Creates a physics world with gravity `(0, -9.81, 0)` and a `1/60` s step.
    pub fn new() -> Self {
        Self::with_timestep(1.0 / 60.0)
    }

    /// Creates a physics world stepping by `dt` seconds.
    pub fn with_timestep(dt: f32) -> Self {
        let integration_parameters = IntegrationParameters {
            dt,
            ..Default::default()
        };

        Self {
            gravity: Vector::new(0.0, -9.81, 0.0),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    /// Advances the simulation by one fixed timestep.
    ///
    /// Ray probes only see colliders that have been through at least one step.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    /// Sets the world gravity acceleration.
    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = to_rapier(gravity);
    }

    /// Returns the current gravity acceleration.
    pub fn gravity(&self) -> Vec3 {
        from_rapier(&self.gravity)
    }

    /// World position of a body, if it exists.
    pub fn body_position(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.rigid_body_set
            .get(handle)
            .map(|body| from_rapier(&body.translation()))
    }

    /// Teleports a body. Missing handles are ignored.
    pub fn set_body_position(&mut self, handle: RigidBodyHandle, position: Vec3) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_translation(to_rapier(position), true);
        }
    }

    /// Linear velocity of a body, if it exists.
    pub fn body_velocity(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.rigid_body_set
            .get(handle)
            .map(|body| from_rapier(&body.linvel()))
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a glam vector into Rapier's vector type.
pub(crate) fn to_rapier(v: Vec3) -> Vector {
    Vector::new(v.x, v.y, v.z)
}

/// Converts a Rapier vector into a glam vector.
pub(crate) fn from_rapier(v: &Vector) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// ECS system that steps the physics simulation once per invocation.
///
/// Intended for the `FixedUpdate` schedule.
pub fn physics_step_system(mut physics: ResMut<PhysicsWorld>) {
    physics.step();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physics_world_initializes() {
        let world = PhysicsWorld::new();
        assert_eq!(world.rigid_body_set.len(), 0);
        assert_eq!(world.collider_set.len(), 0);
        assert_eq!(world.gravity(), Vec3::new(0.0, -9.81, 0.0));
    }

    #[test]
    fn test_gravity_set_custom() {
        let mut world = PhysicsWorld::new();
        world.set_gravity(Vec3::new(9.81, 0.0, 0.0));
        assert_eq!(world.gravity(), Vec3::new(9.81, 0.0, 0.0));
    }

    #[test]
    fn test_body_falls_along_sideways_gravity() {
        let mut world = PhysicsWorld::new();
        world.set_gravity(Vec3::new(-9.81, 0.0, 0.0));
        let player = spawn_player_body(&mut world, Vec3::ZERO, 0.5);

        for _ in 0..30 {
            world.step();
        }

        let pos = world.body_position(player.body_handle).unwrap();
        assert!(pos.x < -0.5, "body should fall toward -X, got {pos}");
        assert!(pos.y.abs() < 1e-3, "no pull along Y, got {pos}");
    }

    #[test]
    fn test_set_body_position_teleports() {
        let mut world = PhysicsWorld::new();
        let player = spawn_player_body(&mut world, Vec3::ZERO, 0.5);
        world.set_body_position(player.body_handle, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(
            world.body_position(player.body_handle),
            Some(Vec3::new(1.0, 2.0, 3.0))
        );
    }

    #[test]
    fn test_timestep_matches_fixed_update() {
        let world = PhysicsWorld::new();
        let expected = 1.0_f32 / 60.0;
        assert!((world.integration_parameters.dt - expected).abs() < f32::EPSILON);
    }
}
