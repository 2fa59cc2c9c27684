//! Configuration for Gravicube.
//!
//! Tuning values persist to disk as `config.ron`. CLI overrides come from
//! clap. Every section falls back to its defaults, so older and newer files
//! both load, and the result is validated before use.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    ArenaConfig, CameraConfig, Config, DebugConfig, FollowCameraConfig, GravityConfig,
    InputConfig, LocomotionConfig, MatchRulesConfig, TutorialConfig, default_config_dir,
};
pub use error::ConfigError;
