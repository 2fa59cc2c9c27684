//! Configuration structs with gameplay defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level game configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Gravity switching.
    pub gravity: GravityConfig,
    /// Walking and jumping.
    pub locomotion: LocomotionConfig,
    /// Orbit camera.
    pub camera: CameraConfig,
    /// Fixed-offset follow camera.
    pub follow_camera: FollowCameraConfig,
    /// Input settings.
    pub input: InputConfig,
    /// Level geometry and collectible placement.
    pub arena: ArenaConfig,
    /// Timer and loss conditions.
    pub match_rules: MatchRulesConfig,
    /// Tutorial sequencing.
    pub tutorial: TutorialConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Gravity switching configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GravityConfig {
    /// Gravity acceleration in m/s².
    pub strength: f32,
    /// Height of the rotation pivot above the player origin, in meters.
    pub head_height: f32,
    /// Rate at which the hologram eases toward its target pose (1/s).
    pub hologram_smooth_speed: f32,
    /// Transition duration for turns up to the threshold, in seconds.
    pub short_duration: f32,
    /// Transition duration for turns beyond the threshold, in seconds.
    pub long_duration: f32,
    /// Turn angle in degrees above which the long duration is used.
    pub long_turn_threshold_deg: f32,
    /// Whether the preview hologram exists. Without it only the floor is reachable.
    pub hologram_enabled: bool,
}

/// Locomotion configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Planar walk speed in m/s.
    pub move_speed: f32,
    /// Jump impulse along the current up (unit-mass body, so m/s).
    pub jump_impulse: f32,
    /// Turn rate toward the walk direction (1/s).
    pub turn_rate: f32,
    /// Radius of the ground-check sphere at the foot marker, in meters.
    pub ground_check_radius: f32,
    /// Foot marker position in the player's local frame.
    pub foot_offset: [f32; 3],
}

/// Orbit camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Pivot offset from the player origin, in the gravity-aligned frame.
    pub target_offset: [f32; 3],
    /// Nominal boom length in meters.
    pub distance: f32,
    /// Closest the camera may be pulled in by occlusion.
    pub min_distance: f32,
    /// Yaw degrees per pixel of horizontal pointer motion.
    pub sensitivity_x: f32,
    /// Pitch degrees per pixel of vertical pointer motion.
    pub sensitivity_y: f32,
    /// Lowest elevation angle in degrees.
    pub pitch_min: f32,
    /// Highest elevation angle in degrees.
    pub pitch_max: f32,
    /// Elevation at startup in degrees.
    pub initial_pitch: f32,
    /// Rate at which the camera realigns with the player's up (1/s).
    pub alignment_speed: f32,
    /// Rate at which the camera rotation eases toward its target (1/s).
    pub rotation_smoothing: f32,
    /// Gap kept between the camera and an occluding surface, in meters.
    pub occlusion_buffer: f32,
    /// Rate at which the boom relaxes back to nominal length (1/s).
    pub relax_rate: f32,
}

/// Follow camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FollowCameraConfig {
    /// Offset from the player in the player's local frame.
    pub offset: [f32; 3],
    /// Per-tick lerp/slerp factor.
    pub smooth_speed: f32,
}

/// Input configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Mouse sensitivity multiplier applied on top of the camera sensitivities.
    pub mouse_sensitivity: f32,
    /// Invert Y axis for camera.
    pub invert_y: bool,
}

/// Arena configuration: a hollow cube centred on the origin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArenaConfig {
    /// Distance from the centre to the inner face of each wall.
    pub half_extent: f32,
    /// Wall thickness in meters.
    pub wall_thickness: f32,
    /// Player spawn position.
    pub spawn: [f32; 3],
    /// Radius of the player's ball collider.
    pub player_radius: f32,
    /// Pickup radius of each collectible.
    pub collectible_radius: f32,
    /// Collectible positions.
    pub collectibles: Vec<[f32; 3]>,
}

/// Match rules configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatchRulesConfig {
    /// Seconds on the countdown.
    pub time_limit: f32,
    /// Reach of the void probe in meters.
    pub fall_probe_distance: f32,
    /// Speed above which a missed void probe counts as falling.
    pub fall_speed_threshold: f32,
    /// Seconds of continuous falling before the match is lost.
    pub fall_timeout: f32,
}

/// Tutorial configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TutorialConfig {
    /// Whether the tutorial runs at all.
    pub enabled: bool,
    /// Seconds between finishing a step and showing the next instruction.
    pub step_delay: f32,
    /// Pointer motion in pixels that counts as "looked around".
    pub look_threshold: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log the HUD line once per second of match time.
    pub log_hud: bool,
}

// --- Default implementations ---

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            strength: 9.81,
            head_height: 1.6,
            hologram_smooth_speed: 15.0,
            short_duration: 0.5,
            long_duration: 0.8,
            long_turn_threshold_deg: 100.0,
            hologram_enabled: true,
        }
    }
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 6.0,
            jump_impulse: 8.0,
            turn_rate: 10.0,
            ground_check_radius: 0.2,
            foot_offset: [0.0, -0.45, 0.0],
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            target_offset: [0.0, 1.5, 0.0],
            distance: 5.0,
            min_distance: 1.0,
            sensitivity_x: 0.4,
            sensitivity_y: 0.2,
            pitch_min: -40.0,
            pitch_max: 80.0,
            initial_pitch: 20.0,
            alignment_speed: 5.0,
            rotation_smoothing: 7.5,
            occlusion_buffer: 0.2,
            relax_rate: 5.0,
        }
    }
}

impl Default for FollowCameraConfig {
    fn default() -> Self {
        Self {
            offset: [0.0, 2.5, 4.0],
            smooth_speed: 0.125,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 1.0,
            invert_y: false,
        }
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            half_extent: 10.0,
            wall_thickness: 1.0,
            spawn: [0.0, -9.0, 0.0],
            player_radius: 0.5,
            collectible_radius: 0.75,
            collectibles: vec![
                [4.0, -9.5, -4.0],
                [9.5, 0.0, 3.0],
                [-3.0, 9.5, 2.0],
                [0.0, 2.0, -9.5],
            ],
        }
    }
}

impl Default for MatchRulesConfig {
    fn default() -> Self {
        Self {
            time_limit: 120.0,
            fall_probe_distance: 50.0,
            fall_speed_threshold: 1.0,
            fall_timeout: 1.5,
        }
    }
}

impl Default for TutorialConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            step_delay: 0.5,
            look_threshold: 5.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_hud: true,
        }
    }
}

/// Default config directory: `<platform config dir>/gravicube`, or `./config`
/// when the platform has none.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("gravicube"))
        .unwrap_or_else(|| PathBuf::from("config"))
}

// --- Validation ---

fn require_positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")))
    }
}

impl Config {
    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("gravity.strength", self.gravity.strength)?;
        require_positive("gravity.short_duration", self.gravity.short_duration)?;
        require_positive("gravity.long_duration", self.gravity.long_duration)?;
        require_positive("locomotion.move_speed", self.locomotion.move_speed)?;
        require_positive("locomotion.turn_rate", self.locomotion.turn_rate)?;
        require_positive("locomotion.ground_check_radius", self.locomotion.ground_check_radius)?;
        require_positive("camera.distance", self.camera.distance)?;
        require_positive("camera.min_distance", self.camera.min_distance)?;
        require_positive("arena.half_extent", self.arena.half_extent)?;
        require_positive("arena.wall_thickness", self.arena.wall_thickness)?;
        require_positive("arena.player_radius", self.arena.player_radius)?;
        require_positive("match_rules.time_limit", self.match_rules.time_limit)?;

        if self.camera.min_distance > self.camera.distance {
            return Err(ConfigError::Invalid(format!(
                "camera.min_distance ({}) exceeds camera.distance ({})",
                self.camera.min_distance, self.camera.distance
            )));
        }
        if self.camera.pitch_min > self.camera.pitch_max {
            return Err(ConfigError::Invalid(format!(
                "camera.pitch_min ({}) exceeds camera.pitch_max ({})",
                self.camera.pitch_min, self.camera.pitch_max
            )));
        }
        if self.arena.player_radius >= self.arena.half_extent {
            return Err(ConfigError::Invalid(
                "arena.player_radius must be smaller than arena.half_extent".to_string(),
            ));
        }
        Ok(())
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("head_height:"));
        assert!(ron_str.contains("collectibles:"));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(gravity: (strength: 20.0), camera: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.gravity.strength, 20.0);
        assert_eq!(config.gravity.head_height, 1.6);
        assert_eq!(config.match_rules, MatchRulesConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_rejects_min_distance_above_distance() {
        let mut config = Config::default();
        config.camera.min_distance = 6.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("min_distance"));
    }

    #[test]
    fn test_validate_rejects_non_positive_values() {
        let mut config = Config::default();
        config.gravity.short_duration = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.locomotion.move_speed = -1.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.gravity.strength = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_pitch_limits() {
        let mut config = Config::default();
        config.camera.pitch_min = 90.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.camera.distance = 7.0;
        config.arena.collectibles.push([1.0, 2.0, 3.0]);

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.ron"),
            "(camera: (distance: 2.0, min_distance: 3.0))",
        )
        .unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_default_config_dir_ends_with_gravicube_or_fallback() {
        let dir = default_config_dir();
        assert!(dir.ends_with("gravicube") || dir == PathBuf::from("config"));
    }
}
