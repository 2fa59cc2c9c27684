//! The gravity cube itself: six static slabs enclosing a hollow interior.

use glam::Vec3;
use gravicube_config::ArenaConfig;
use gravicube_math::AXIS_DIRECTIONS;
use gravicube_physics::{ColliderHandle, LayerMask, PhysicsWorld, spawn_static_box};

/// Layers every arena slab sits on: walkable and blocking the camera.
pub const ARENA_LAYERS: LayerMask = LayerMask(LayerMask::GROUND.0 | LayerMask::OCCLUSION.0);

/// Spawns one slab per face so the interior spans `[-half_extent, half_extent]`
/// on every axis.
pub fn build_arena(physics: &mut PhysicsWorld, config: &ArenaConfig) -> Vec<ColliderHandle> {
    let h = config.half_extent;
    let t = config.wall_thickness;
    AXIS_DIRECTIONS
        .into_iter()
        .map(|normal| {
            let center = normal * (h + t * 0.5);
            // Thin along the face normal, and wide enough to seal the edges.
            let half_extents = Vec3::splat(h + t) - normal.abs() * (h + t * 0.5);
            spawn_static_box(physics, center, half_extents, ARENA_LAYERS)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravicube_physics::SpatialQuery;

    fn arena() -> PhysicsWorld {
        let mut physics = PhysicsWorld::new();
        build_arena(&mut physics, &ArenaConfig::default());
        physics.step();
        physics
    }

    #[test]
    fn test_six_slabs() {
        let mut physics = PhysicsWorld::new();
        assert_eq!(build_arena(&mut physics, &ArenaConfig::default()).len(), 6);
    }

    #[test]
    fn test_every_face_is_ten_units_from_centre() {
        let physics = arena();
        for dir in AXIS_DIRECTIONS {
            let hit = physics
                .cast_ray(Vec3::ZERO, dir, 50.0, LayerMask::GROUND)
                .expect("face should be hit");
            assert!((hit.distance - 10.0).abs() < 1e-3, "{dir:?} at {}", hit.distance);
        }
    }

    #[test]
    fn test_faces_block_the_camera() {
        let physics = arena();
        assert!(physics
            .cast_ray(Vec3::ZERO, Vec3::X, 50.0, LayerMask::OCCLUSION)
            .is_some());
        assert!(physics
            .cast_ray(Vec3::ZERO, Vec3::X, 50.0, LayerMask::PLAYER)
            .is_none());
    }
}
