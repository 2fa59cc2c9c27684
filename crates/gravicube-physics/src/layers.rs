//! Collision layer masks used to filter ray probes.
//!
//! Each collider stores its layer bits in its `user_data`, so probes can ask
//! for "ground only" or "anything that blocks the camera" without touching
//! Rapier's contact groups.

use std::ops::{BitOr, BitOrAssign};

/// A set of collision layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// No layers.
    pub const NONE: LayerMask = LayerMask(0);
    /// Walkable surfaces.
    pub const GROUND: LayerMask = LayerMask(1 << 0);
    /// Geometry that blocks the camera's line of sight.
    pub const OCCLUSION: LayerMask = LayerMask(1 << 1);
    /// The player's own body.
    pub const PLAYER: LayerMask = LayerMask(1 << 2);
    /// Every layer.
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// Returns `true` if the two masks share at least one layer.
    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    /// Encodes the mask for a collider's `user_data`.
    pub fn to_user_data(self) -> u128 {
        u128::from(self.0)
    }

    /// Decodes a collider's `user_data`. Colliders without layer bits get [`LayerMask::NONE`].
    pub fn from_user_data(data: u128) -> LayerMask {
        LayerMask((data & u128::from(u32::MAX)) as u32)
    }
}

impl BitOr for LayerMask {
    type Output = LayerMask;

    fn bitor(self, rhs: LayerMask) -> LayerMask {
        LayerMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for LayerMask {
    fn bitor_assign(&mut self, rhs: LayerMask) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_intersect() {
        let wall = LayerMask::GROUND | LayerMask::OCCLUSION;
        assert!(wall.intersects(LayerMask::GROUND));
        assert!(wall.intersects(LayerMask::OCCLUSION));
        assert!(!wall.intersects(LayerMask::PLAYER));
        assert!(!LayerMask::NONE.intersects(LayerMask::ALL));
    }

    #[test]
    fn test_user_data_encoding() {
        let mask = LayerMask::GROUND | LayerMask::PLAYER;
        assert_eq!(LayerMask::from_user_data(mask.to_user_data()), mask);
        assert_eq!(LayerMask::from_user_data(0), LayerMask::NONE);
    }
}
