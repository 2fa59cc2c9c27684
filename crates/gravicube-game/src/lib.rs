//! The Gravicube match: arena, rules, pickups, tutorial and the session that
//! runs them on top of the player crate.
//!
//! [`Session`] owns one match. [`app::run`] is the headless command-line
//! runner behind the `gravicube` binary.

pub mod app;
pub mod arena;
pub mod collectibles;
pub mod error;
pub mod events;
pub mod match_rules;
pub mod script;
pub mod session;
pub mod settings;
pub mod systems;
pub mod tutorial;


pub use app::{MatchReport, run};
pub use arena::{ARENA_LAYERS, build_arena};
pub use collectibles::{Collectible, CollectibleTally};
pub use error::GameError;
pub use events::{EventBus, GameEvent, SubscriberId, Subscription};
pub use match_rules::{
    FallDetector, Hud, MatchState, REASON_COMPLETE, REASON_LOST, REASON_TIME_UP, format_clock,
    format_cubes,
};
pub use script::{InputScript, ScriptRunner, ScriptStep};
pub use session::{FIXED_DT, MAX_FRAME_TIME, Session};
pub use tutorial::{Tutorial, TutorialStep};
