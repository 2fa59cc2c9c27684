//! Input abstraction: keyboard state mapped through action bindings, plus pointer motion.

pub mod action_map;
pub mod keyboard;
pub mod mouse;

pub use action_map::{Action, ActionResolver, ActionState, InputMap};
pub use keyboard::{KeyboardState, RawKeyEvent};
pub use mouse::MouseState;
