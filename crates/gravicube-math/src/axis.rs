//! Snapping near-axis-aligned vectors onto the six perfect world axes.
//!
//! Repeated quaternion composition drifts away from exact axes. Gravity and
//! facing directions are therefore re-snapped after every orientation change
//! so the stored values are always bit-exact unit axes.

use glam::Vec3;

/// The six unit axis directions, in snapping priority order per sign.
pub const AXIS_DIRECTIONS: [Vec3; 6] = [
    Vec3::X,
    Vec3::NEG_X,
    Vec3::Y,
    Vec3::NEG_Y,
    Vec3::Z,
    Vec3::NEG_Z,
];

/// Sign used when snapping. Zero (of either sign) maps to positive.
fn axis_sign(v: f32) -> f32 {
    if v >= 0.0 { 1.0 } else { -1.0 }
}

/// Snap `direction` to the nearest of the six world axes.
///
/// The component with the strictly largest magnitude wins and keeps its
/// sign. X is checked first, then Y; exact ties fall through to Z. The
/// zero vector therefore snaps to `+Z`.
pub fn snap_to_nearest_axis(direction: Vec3) -> Vec3 {
    let x = direction.x.abs();
    let y = direction.y.abs();
    let z = direction.z.abs();

    if x > y && x > z {
        return Vec3::new(axis_sign(direction.x), 0.0, 0.0);
    }
    if y > x && y > z {
        return Vec3::new(0.0, axis_sign(direction.y), 0.0);
    }
    Vec3::new(0.0, 0.0, axis_sign(direction.z))
}

/// Returns `true` if `v` is exactly one of [`AXIS_DIRECTIONS`].
pub fn is_axis_aligned(v: Vec3) -> bool {
    AXIS_DIRECTIONS.contains(&v)
}
