//! Action mapping: binds abstract game actions to physical keys.
//!
//! [`InputMap`] says which keys drive which [`Action`]. [`ActionResolver`]
//! recomputes [`ActionState`] once per frame from the keyboard, keeping the
//! previous frame's values for edge detection. Pointer motion bypasses the
//! map and is read straight from [`MouseState`](crate::MouseState).

use std::collections::HashMap;

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

use crate::keyboard::KeyboardState;

/// Semantic game actions that can be bound to physical inputs.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Action {
    /// Walk toward the camera's forward.
    MoveForward,
    /// Walk away from the camera's forward.
    MoveBack,
    /// Strafe left.
    MoveLeft,
    /// Strafe right.
    MoveRight,
    /// Jump along the current up.
    Jump,
    /// Held to turn the up/down gravity selections into ceiling/floor.
    GravityModifier,
    /// Select the wall ahead (or the ceiling with the modifier).
    GravityUp,
    /// Select the wall behind (or the floor with the modifier).
    GravityDown,
    /// Select the wall to the left.
    GravityLeft,
    /// Select the wall to the right.
    GravityRight,
    /// Commit the previewed gravity.
    CommitGravity,
    /// Restart the match after game over.
    Restart,
}

impl Action {
    /// Every action, in declaration order.
    pub const ALL: [Action; 12] = [
        Action::MoveForward,
        Action::MoveBack,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Jump,
        Action::GravityModifier,
        Action::GravityUp,
        Action::GravityDown,
        Action::GravityLeft,
        Action::GravityRight,
        Action::CommitGravity,
        Action::Restart,
    ];
}

/// Maps [`Action`]s to the physical keys that drive them.
///
/// Several keys on one action are OR-ed.
#[derive(Resource, Debug, Clone)]
pub struct InputMap {
    bindings: HashMap<Action, Vec<KeyCode>>,
}

impl Default for InputMap {
    fn default() -> Self {
        Self::default_bindings()
    }
}

impl InputMap {
    /// Create an empty input map with no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// WASD to walk, Space to jump, arrows to pick a face, Shift as the
    /// ceiling/floor modifier, Enter to commit.
    #[must_use]
    pub fn default_bindings() -> Self {
        let mut map = Self::new();
        map.set_bindings(Action::MoveForward, vec![KeyCode::KeyW]);
        map.set_bindings(Action::MoveBack, vec![KeyCode::KeyS]);
        map.set_bindings(Action::MoveLeft, vec![KeyCode::KeyA]);
        map.set_bindings(Action::MoveRight, vec![KeyCode::KeyD]);
        map.set_bindings(Action::Jump, vec![KeyCode::Space]);
        map.set_bindings(
            Action::GravityModifier,
            vec![KeyCode::ShiftLeft, KeyCode::ShiftRight],
        );
        map.set_bindings(Action::GravityUp, vec![KeyCode::ArrowUp]);
        map.set_bindings(Action::GravityDown, vec![KeyCode::ArrowDown]);
        map.set_bindings(Action::GravityLeft, vec![KeyCode::ArrowLeft]);
        map.set_bindings(Action::GravityRight, vec![KeyCode::ArrowRight]);
        map.set_bindings(
            Action::CommitGravity,
            vec![KeyCode::Enter, KeyCode::NumpadEnter],
        );
        map.set_bindings(Action::Restart, vec![KeyCode::KeyR]);
        map
    }

    /// Set the keys for an action, replacing any existing ones.
    pub fn set_bindings(&mut self, action: Action, keys: Vec<KeyCode>) {
        self.bindings.insert(action, keys);
    }

    /// Keys bound to an action.
    #[must_use]
    pub fn get_bindings(&self, action: Action) -> &[KeyCode] {
        self.bindings.get(&action).map_or(&[], |v| v.as_slice())
    }

    /// The first key bound to `action`, if any. Scripted input presses this one.
    #[must_use]
    pub fn primary_key(&self, action: Action) -> Option<KeyCode> {
        self.get_bindings(action).first().copied()
    }
}

/// Per-frame digital action state with previous-frame edge detection.
#[derive(Resource, Debug, Clone, Default)]
pub struct ActionState {
    active: HashMap<Action, bool>,
    prev_active: HashMap<Action, bool>,
}

impl ActionState {
    /// Create a new empty action state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the action is held this frame.
    #[must_use]
    pub fn is_action_active(&self, action: Action) -> bool {
        self.active.get(&action).copied().unwrap_or(false)
    }

    /// True only on the frame the action went from inactive to active.
    #[must_use]
    pub fn action_just_activated(&self, action: Action) -> bool {
        self.is_action_active(action) && !self.was_active(action)
    }

    fn was_active(&self, action: Action) -> bool {
        self.prev_active.get(&action).copied().unwrap_or(false)
    }
}

/// Reads the keyboard and populates [`ActionState`] each frame.
pub struct ActionResolver;

impl ActionResolver {
    /// Resolve all bound actions from the keyboard.
    ///
    /// A key counts while held and also in the frame it went down, so a tap
    /// released before the frame boundary still fires its action once.
    pub fn resolve(input_map: &InputMap, keyboard: &KeyboardState, state: &mut ActionState) {
        std::mem::swap(&mut state.prev_active, &mut state.active);
        state.active.clear();

        for (action, keys) in &input_map.bindings {
            let active = keys
                .iter()
                .any(|code| keyboard.is_code_pressed(*code) || keyboard.just_pressed(*code));
            state.active.insert(*action, active);
        }
    }
}
