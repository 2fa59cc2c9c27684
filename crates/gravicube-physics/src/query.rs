//! The two physics seams gameplay code is written against.
//!
//! [`SpatialQuery`] answers ray and sphere probes filtered by [`LayerMask`];
//! [`KinematicBody`] exposes a body's linear velocity. Both are implemented
//! for Rapier here and by small doubles in unit tests.

use glam::Vec3;
use rapier3d::prelude::*;

use crate::{LayerMask, PhysicsWorld, RapierBody, from_rapier, to_rapier};

/// Nearest hit returned by a ray probe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// World-space hit point.
    pub point: Vec3,
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
}

/// Ray and overlap probes against the static world.
pub trait SpatialQuery {
    /// Casts a ray from `origin` along `direction` (normalized internally)
    /// and returns the nearest hit on a collider in `mask` within `max_distance`.
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit>;

    /// Nearest hit on the segment `from → to`.
    fn linecast(&self, from: Vec3, to: Vec3, mask: LayerMask) -> Option<RayHit> {
        let delta = to - from;
        let length = delta.length();
        if length <= f32::EPSILON {
            return None;
        }
        self.cast_ray(from, delta / length, length, mask)
    }

    /// Whether a sphere at `center` touches any collider in `mask`.
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool;
}

/// A body whose linear velocity can be read and written directly.
///
/// Impulses are velocity changes scaled by inverse mass; the player body has
/// unit mass so an impulse of `v` adds exactly `v` to the velocity.
pub trait KinematicBody {
    /// Current linear velocity.
    fn velocity(&self) -> Vec3;
    /// Overwrites the linear velocity.
    fn set_velocity(&mut self, velocity: Vec3);
    /// Applies an instantaneous impulse.
    fn apply_impulse(&mut self, impulse: Vec3);
}

impl SpatialQuery for PhysicsWorld {
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        let dir = direction.try_normalize()?;
        if max_distance <= 0.0 {
            return None;
        }

        let in_mask =
            |_handle: ColliderHandle, collider: &Collider| {
                LayerMask::from_user_data(collider.user_data).intersects(mask)
            };
        let filter = QueryFilter::new().predicate(&in_mask);
        let query_pipeline = self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.rigid_body_set,
            &self.collider_set,
            filter,
        );

        let ray = Ray::new(to_rapier(origin), to_rapier(dir));
        query_pipeline
            .cast_ray(&ray, max_distance, true)
            .map(|(_, distance)| RayHit {
                point: origin + dir * distance,
                distance,
            })
    }

    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool {
        if radius <= 0.0 {
            return false;
        }

        let in_mask =
            |_handle: ColliderHandle, collider: &Collider| {
                LayerMask::from_user_data(collider.user_data).intersects(mask)
            };
        let filter = QueryFilter::new().predicate(&in_mask);
        let query_pipeline = self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.rigid_body_set,
            &self.collider_set,
            filter,
        );

        let ball = Ball::new(radius);
        query_pipeline
            .intersect_shape(Pose::from_translation(to_rapier(center)), &ball)
            .next()
            .is_some()
    }
}

impl KinematicBody for RapierBody<'_> {
    fn velocity(&self) -> Vec3 {
        self.world
            .rigid_body_set
            .get(self.handle)
            .map_or(Vec3::ZERO, |body| from_rapier(&body.linvel()))
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        if let Some(body) = self.world.rigid_body_set.get_mut(self.handle) {
            body.set_linvel(to_rapier(velocity), true);
        }
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        if let Some(body) = self.world.rigid_body_set.get_mut(self.handle) {
            body.apply_impulse(to_rapier(impulse), true);
        }
    }
}
