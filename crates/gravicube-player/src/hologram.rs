//! Ghost pose showing where the player will stand after a gravity switch.

use gravicube_ecs::Transform;
use gravicube_math::rate_factor;

/// A preview pose that eases toward the selected target each frame.
///
/// While active, the displayed pose chases `target`; committing a switch
/// reads `target` only, never the displayed pose.
#[derive(Clone, Debug)]
pub struct HologramPreview {
    active: bool,
    current: Transform,
    target: Transform,
    smooth_speed: f32,
}

impl HologramPreview {
    /// Creates a hidden preview that eases at `smooth_speed` per second.
    pub fn new(smooth_speed: f32) -> Self {
        Self {
            active: false,
            current: Transform::default(),
            target: Transform::default(),
            smooth_speed,
        }
    }

    /// Shows the preview aimed at `target`.
    ///
    /// A hidden preview first appears on top of `from` so it visibly swings
    /// out of the player rather than popping in at the target.
    pub fn show(&mut self, from: &Transform, target: Transform) {
        if !self.active {
            self.current = *from;
            self.active = true;
        }
        self.target = target;
    }

    /// Hides the preview. The last target is kept but no longer meaningful.
    pub fn hide(&mut self) {
        self.active = false;
    }

    /// Eases the displayed pose toward the target.
    pub fn tick(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        let t = rate_factor(self.smooth_speed, dt);
        self.current.position = self.current.position.lerp(self.target.position, t);
        self.current.rotation = self
            .current
            .rotation
            .slerp(self.target.rotation, t)
            .normalize();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The pose being displayed this frame.
    pub fn current(&self) -> &Transform {
        &self.current
    }

    /// The pose a commit will transition to.
    pub fn target(&self) -> &Transform {
        &self.target
    }
}
