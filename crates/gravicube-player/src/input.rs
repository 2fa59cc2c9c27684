//! The per-frame input snapshot every player subsystem reads.

use bevy_ecs::prelude::*;
use glam::Vec2;
use gravicube_input::{Action, ActionState};

/// Levels, edges and pointer motion sampled once per frame.
///
/// Levels are `true` for as long as the input is held; edges are `true` only
/// in the frame the input went down.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerInput {
    /// Walk forward (level).
    pub forward: bool,
    /// Walk back (level).
    pub back: bool,
    /// Strafe left (level).
    pub left: bool,
    /// Strafe right (level).
    pub right: bool,
    /// Jump (edge).
    pub jump_pressed: bool,
    /// Ceiling/floor modifier (level).
    pub modifier_held: bool,
    /// Select the face ahead, or the ceiling with the modifier (edge).
    pub up_pressed: bool,
    /// Select the face behind, or the floor with the modifier (edge).
    pub down_pressed: bool,
    /// Select the face on the left (edge).
    pub left_pressed: bool,
    /// Select the face on the right (edge).
    pub right_pressed: bool,
    /// Commit the previewed gravity (edge).
    pub commit_pressed: bool,
    /// Pointer motion this frame in pixels, `+y` downward.
    pub look_delta: Vec2,
}

impl PlayerInput {
    /// Builds the snapshot from resolved actions and a pointer delta.
    pub fn from_actions(actions: &ActionState, look_delta: Vec2) -> Self {
        Self {
            forward: actions.is_action_active(Action::MoveForward),
            back: actions.is_action_active(Action::MoveBack),
            left: actions.is_action_active(Action::MoveLeft),
            right: actions.is_action_active(Action::MoveRight),
            jump_pressed: actions.action_just_activated(Action::Jump),
            modifier_held: actions.is_action_active(Action::GravityModifier),
            up_pressed: actions.action_just_activated(Action::GravityUp),
            down_pressed: actions.action_just_activated(Action::GravityDown),
            left_pressed: actions.action_just_activated(Action::GravityLeft),
            right_pressed: actions.action_just_activated(Action::GravityRight),
            commit_pressed: actions.action_just_activated(Action::CommitGravity),
            look_delta,
        }
    }

    /// Strafe and walk levels as `(x, z)` in `{-1, 0, 1}`.
    ///
    /// Back wins over forward and left wins over right when both are held.
    pub fn move_axes(&self) -> (f32, f32) {
        let mut z = 0.0;
        if self.forward {
            z = 1.0;
        }
        if self.back {
            z = -1.0;
        }
        let mut x = 0.0;
        if self.right {
            x = 1.0;
        }
        if self.left {
            x = -1.0;
        }
        (x, z)
    }

    /// Whether any walk key is held.
    pub fn any_move(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravicube_input::{ActionResolver, InputMap, KeyboardState, RawKeyEvent};
    use winit::keyboard::KeyCode;

    fn snapshot(keys: &[KeyCode]) -> PlayerInput {
        let mut kb = KeyboardState::new();
        for key in keys {
            kb.process_raw(RawKeyEvent::press(*key));
        }
        let mut actions = ActionState::new();
        ActionResolver::resolve(&InputMap::default(), &kb, &mut actions);
        PlayerInput::from_actions(&actions, Vec2::ZERO)
    }

    #[test]
    fn test_back_overrides_forward_and_left_overrides_right() {
        let input = snapshot(&[KeyCode::KeyW, KeyCode::KeyS, KeyCode::KeyA, KeyCode::KeyD]);
        assert_eq!(input.move_axes(), (-1.0, -1.0));
    }

    #[test]
    fn test_single_keys_map_to_axes() {
        assert_eq!(snapshot(&[KeyCode::KeyW]).move_axes(), (0.0, 1.0));
        assert_eq!(snapshot(&[KeyCode::KeyD]).move_axes(), (1.0, 0.0));
        assert_eq!(snapshot(&[]).move_axes(), (0.0, 0.0));
        assert!(!snapshot(&[]).any_move());
    }

    #[test]
    fn test_edges_and_levels_from_actions() {
        let input = snapshot(&[KeyCode::ShiftLeft, KeyCode::ArrowUp, KeyCode::Enter]);
        assert!(input.modifier_held);
        assert!(input.up_pressed);
        assert!(input.commit_pressed);
        assert!(!input.jump_pressed);
    }
}
