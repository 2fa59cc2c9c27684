//! Frame-coherent keyboard state tracker.
//!
//! [`KeyboardState`] collects key events between two frame boundaries and
//! separates levels (held) from edges (pressed this frame).
//! Physical key codes are used so WASD and the arrow keys sit in the same
//! place on every layout.

use std::collections::HashSet;

use bevy_ecs::prelude::*;
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Minimal description of a key event, independent of a live window.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    /// The physical key involved.
    pub key: PhysicalKey,
    /// Whether the key went down or up.
    pub state: ElementState,
    /// Whether this is an OS auto-repeat.
    pub repeat: bool,
}

impl RawKeyEvent {
    /// A non-repeat press of `code`.
    pub fn press(code: KeyCode) -> Self {
        Self {
            key: PhysicalKey::Code(code),
            state: ElementState::Pressed,
            repeat: false,
        }
    }

    /// A release of `code`.
    pub fn release(code: KeyCode) -> Self {
        Self {
            key: PhysicalKey::Code(code),
            state: ElementState::Released,
            repeat: false,
        }
    }
}

/// Held keys plus the presses seen since the last [`clear_transients`](Self::clear_transients).
#[derive(Resource, Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<PhysicalKey>,
    pressed_this_frame: HashSet<PhysicalKey>,
}

impl KeyboardState {
    /// Creates a tracker with nothing held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a [`RawKeyEvent`]. Auto-repeats never produce a second edge.
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        if event.repeat {
            return;
        }
        match event.state {
            ElementState::Pressed => {
                if self.held.insert(event.key) {
                    self.pressed_this_frame.insert(event.key);
                }
            }
            ElementState::Released => {
                self.held.remove(&event.key);
            }
        }
    }

    /// `true` while the key is down.
    #[must_use]
    pub fn is_code_pressed(&self, code: KeyCode) -> bool {
        self.held.contains(&PhysicalKey::Code(code))
    }

    /// `true` if the key went down since the last clear, even if it is
    /// already back up.
    #[must_use]
    pub fn just_pressed(&self, code: KeyCode) -> bool {
        self.pressed_this_frame.contains(&PhysicalKey::Code(code))
    }

    /// Drops the per-frame edges. Call once at the end of every frame.
    pub fn clear_transients(&mut self) {
        self.pressed_this_frame.clear();
    }
}
