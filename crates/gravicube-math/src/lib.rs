//! Axis snapping, local-frame construction, and easing curves for gravity-relative motion.

mod axis;
mod easing;
mod frame;

pub use axis::{AXIS_DIRECTIONS, is_axis_aligned, snap_to_nearest_axis};
pub use easing::smoothstep;
pub use frame::{
    LOCAL_BACK, LOCAL_DOWN, LOCAL_FORWARD, LOCAL_RIGHT, LOCAL_UP, WORLD_UP, damp_factor,
    from_to_rotation, look_rotation, project_on_plane, rate_factor,
};
