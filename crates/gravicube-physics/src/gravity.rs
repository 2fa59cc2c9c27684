//! Uniform gravity driven by the active gravity direction.

use bevy_ecs::prelude::*;
use gravicube_ecs::GravityState;

use crate::PhysicsWorld;

/// Magnitude of the uniform gravity field in m/s².
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct GravityField {
    /// Acceleration applied along the active gravity direction.
    pub strength: f32,
}

impl Default for GravityField {
    fn default() -> Self {
        Self { strength: 9.81 }
    }
}

/// Points the physics world's gravity along [`GravityState::direction`].
///
/// Runs in the `ForceApplication` set so the step that follows uses the
/// direction committed by the latest gravity switch.
pub fn gravity_force_system(
    state: Res<GravityState>,
    field: Res<GravityField>,
    mut physics: ResMut<PhysicsWorld>,
) {
    let desired = state.direction * field.strength;
    if physics.gravity() != desired {
        tracing::debug!(direction = ?state.direction, "Physics gravity updated");
        physics.set_gravity(desired);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_gravity_system_follows_state() {
        let mut world = World::new();
        world.insert_resource(PhysicsWorld::new());
        world.insert_resource(GravityField { strength: 20.0 });
        world.insert_resource(GravityState {
            direction: Vec3::Z,
            transitioning: false,
        });

        let mut schedule = Schedule::default();
        schedule.add_systems(gravity_force_system);
        schedule.run(&mut world);

        assert_eq!(
            world.resource::<PhysicsWorld>().gravity(),
            Vec3::new(0.0, 0.0, 20.0)
        );
    }
}
