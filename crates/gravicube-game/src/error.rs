//! Errors surfaced by the game runner.

use std::path::PathBuf;

use gravicube_config::ConfigError;

/// Failures at the edges of the game: configuration and input scripts.
///
/// The simulation itself never fails; these only come from loading things.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Loading, validating or saving the configuration failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An input script could not be read.
    #[error("failed to read input script {path}: {source}")]
    ScriptRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input script is not valid RON.
    #[error("failed to parse input script {path}: {source}")]
    ScriptParse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}
