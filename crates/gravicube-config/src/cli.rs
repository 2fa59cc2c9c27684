//! Command-line argument parsing for Gravicube.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Gravicube command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "gravicube", about = "Gravity-cube arena, headless runner")]
pub struct CliArgs {
    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// RON input script to replay instead of the built-in demo.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Frame delta in seconds used while replaying.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub frame_dt: f64,

    /// Match time limit in seconds.
    #[arg(long)]
    pub time_limit: Option<f32>,

    /// Walk speed in m/s.
    #[arg(long)]
    pub move_speed: Option<f32>,

    /// Gravity strength in m/s².
    #[arg(long)]
    pub gravity: Option<f32>,

    /// Disable the preview hologram (floor-only mode).
    #[arg(long)]
    pub no_hologram: bool,

    /// Skip the tutorial.
    #[arg(long)]
    pub no_tutorial: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(limit) = args.time_limit {
            self.match_rules.time_limit = limit;
        }
        if let Some(speed) = args.move_speed {
            self.locomotion.move_speed = speed;
        }
        if let Some(strength) = args.gravity {
            self.gravity.strength = strength;
        }
        if args.no_hologram {
            self.gravity.hologram_enabled = false;
        }
        if args.no_tutorial {
            self.tutorial.enabled = false;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            time_limit: Some(30.0),
            no_hologram: true,
            log_level: Some("debug".to_string()),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.match_rules.time_limit, 30.0);
        assert!(!config.gravity.hologram_enabled);
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.locomotion.move_speed, 6.0);
        assert!(config.tutorial.enabled);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "gravicube",
            "--script",
            "demo.ron",
            "--no-tutorial",
            "--gravity",
            "12.5",
        ]);
        assert_eq!(args.script, Some(PathBuf::from("demo.ron")));
        assert!(args.no_tutorial);
        assert_eq!(args.gravity, Some(12.5));
        assert!((args.frame_dt - 1.0 / 60.0).abs() < 1e-12);
    }
}
