//! Local-frame helpers: basis conventions, look rotations, and plane projection.
//!
//! Conventions (right-handed, matching glam and the renderer): an entity's
//! local forward is `-Z`, local up is `+Y`, local right is `+X`.

use glam::{Mat3, Quat, Vec3};

/// Local forward axis.
pub const LOCAL_FORWARD: Vec3 = Vec3::NEG_Z;
/// Local backward axis (camera boom direction).
pub const LOCAL_BACK: Vec3 = Vec3::Z;
/// Local up axis.
pub const LOCAL_UP: Vec3 = Vec3::Y;
/// Local down axis (the direction gravity pulls in the entity's frame).
pub const LOCAL_DOWN: Vec3 = Vec3::NEG_Y;
/// Local right axis.
pub const LOCAL_RIGHT: Vec3 = Vec3::X;
/// World up, the reference the camera realigns from.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Build the orientation whose forward axis points along `forward` and whose
/// up axis is the component of `up` orthogonal to `forward`.
///
/// Returns `None` when `forward` is zero or parallel to `up`.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Option<Quat> {
    let forward = forward.normalize_or_zero();
    if forward == Vec3::ZERO {
        return None;
    }

    let right = forward.cross(up);
    if right.length_squared() < 1e-8 {
        return None;
    }
    let right = right.normalize();
    let corrected_up = right.cross(forward).normalize();

    let basis = Mat3::from_cols(right, corrected_up, -forward);
    Some(Quat::from_mat3(&basis).normalize())
}

/// Shortest rotation taking direction `from` onto direction `to`.
///
/// Antiparallel inputs rotate 180° about an arbitrary perpendicular axis.
/// Zero-length inputs yield the identity.
pub fn from_to_rotation(from: Vec3, to: Vec3) -> Quat {
    let from = from.normalize_or_zero();
    let to = to.normalize_or_zero();
    if from == Vec3::ZERO || to == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_arc(from, to)
}

/// Remove the component of `v` along `normal`. `normal` need not be unit length.
pub fn project_on_plane(v: Vec3, normal: Vec3) -> Vec3 {
    let len_sq = normal.length_squared();
    if len_sq < 1e-12 {
        return v;
    }
    v - normal * (v.dot(normal) / len_sq)
}

/// Per-tick interpolation factor for a "rate per second" smoothing constant.
pub fn rate_factor(rate: f32, dt: f32) -> f32 {
    (rate * dt).clamp(0.0, 1.0)
}

/// Exponential-decay interpolation factor. Never reaches 1 for finite `dt`,
/// so large steps ease instead of snapping.
pub fn damp_factor(rate: f32, dt: f32) -> f32 {
    if rate <= 0.0 || dt <= 0.0 {
        return 0.0;
    }
    1.0 - (-rate * dt).exp()
}
