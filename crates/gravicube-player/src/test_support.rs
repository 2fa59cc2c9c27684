//! Physics doubles shared by the unit tests in this crate.

use glam::Vec3;
use gravicube_physics::{KinematicBody, LayerMask, RayHit, SpatialQuery};

/// Infinite planes facing `normal`, each at signed `offset` along it.
#[derive(Default)]
pub struct PlaneWorld {
    planes: Vec<(Vec3, f32, LayerMask)>,
}

impl PlaneWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plane(mut self, normal: Vec3, offset: f32, layers: LayerMask) -> Self {
        self.planes.push((normal.normalize(), offset, layers));
        self
    }
}

impl SpatialQuery for PlaneWorld {
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        let dir = direction.normalize_or_zero();
        let mut best: Option<RayHit> = None;
        for (normal, offset, layers) in &self.planes {
            if !layers.intersects(mask) {
                continue;
            }
            let denom = normal.dot(dir);
            // Only planes the ray approaches from their front side.
            if denom >= -1e-6 {
                continue;
            }
            let t = (offset - normal.dot(origin)) / denom;
            if t < 0.0 || t > max_distance {
                continue;
            }
            if best.is_none_or(|hit| t < hit.distance) {
                best = Some(RayHit {
                    point: origin + dir * t,
                    distance: t,
                });
            }
        }
        best
    }

    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool {
        // Everything behind a plane is solid.
        self.planes.iter().any(|(normal, offset, layers)| {
            layers.intersects(mask) && normal.dot(center) - offset <= radius
        })
    }
}

/// A unit-mass body that only tracks velocity.
#[derive(Default)]
pub struct TestBody {
    pub velocity: Vec3,
}

impl KinematicBody for TestBody {
    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse;
    }
}
