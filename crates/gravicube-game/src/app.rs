//! Headless runner: load config, start logging, replay a script, report.

use std::path::PathBuf;

use gravicube_config::{CliArgs, Config, default_config_dir};
use gravicube_ecs::GravityState;
use tracing::info;

use crate::error::GameError;
use crate::match_rules::Hud;
use crate::script::{InputScript, ScriptRunner};
use crate::session::Session;

/// What a finished run looked like.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchReport {
    pub frames: u64,
    pub hud: Hud,
    pub gravity: GravityState,
    pub collected: u32,
    pub total: u32,
    /// `None` when the script ran out before the match ended.
    pub outcome: Option<String>,
}

impl MatchReport {
    pub fn from_session(session: &Session) -> Self {
        let state = session.match_state();
        Self {
            frames: session.frames(),
            hud: session.hud().clone(),
            gravity: session.gravity(),
            collected: state.collected,
            total: state.total,
            outcome: state.outcome().map(str::to_string),
        }
    }
}

/// Loads and validates the configuration named by `args`, creating the
/// default file on first run.
pub fn load_config(args: &CliArgs) -> Result<(PathBuf, Config), GameError> {
    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);
    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(args);
    config.validate()?;
    Ok((config_dir, config))
}

/// Runs one match from the command line and returns its report.
pub fn run(args: &CliArgs) -> Result<MatchReport, GameError> {
    let (config_dir, config) = load_config(args)?;
    gravicube_log::init_logging(
        Some(&config_dir.join("logs")),
        cfg!(debug_assertions),
        Some(&config),
    );
    info!(config_dir = %config_dir.display(), "configuration loaded");

    let script = match &args.script {
        Some(path) => {
            let script = InputScript::load(path)?;
            info!(path = %path.display(), frames = script.frame_count(), "input script loaded");
            script
        }
        None => {
            let script = InputScript::demo();
            info!(frames = script.frame_count(), "replaying built-in demo");
            script
        }
    };

    let log_hud = config.debug.log_hud;
    let mut session = Session::new(config);
    let mut runner = ScriptRunner::new(script);
    let mut last_hud = Hud::default();
    while runner.advance(&mut session, args.frame_dt) {
        if log_hud && *session.hud() != last_hud {
            last_hud = session.hud().clone();
            info!(
                clock = %last_hud.clock,
                cubes = %last_hud.cubes,
                banner = %last_hud.banner,
                "hud"
            );
        }
    }

    let report = MatchReport::from_session(&session);
    info!(
        frames = report.frames,
        collected = report.collected,
        total = report.total,
        gravity = ?report.gravity.direction,
        outcome = report.outcome.as_deref().unwrap_or("in progress"),
        "run finished"
    );
    Ok(report)
}
