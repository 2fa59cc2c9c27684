//! Maps configuration sections onto the player-side tuning structs.

use glam::Vec3;
use gravicube_config::Config;
use gravicube_player::{GravitySwitchSettings, LocomotionSettings, OrbitCameraSettings};

pub fn gravity_switch_settings(config: &Config) -> GravitySwitchSettings {
    let g = &config.gravity;
    GravitySwitchSettings {
        head_height: g.head_height,
        hologram_smooth_speed: g.hologram_smooth_speed,
        short_duration: g.short_duration,
        long_duration: g.long_duration,
        long_turn_threshold_deg: g.long_turn_threshold_deg,
    }
}

pub fn locomotion_settings(config: &Config) -> LocomotionSettings {
    let l = &config.locomotion;
    LocomotionSettings {
        move_speed: l.move_speed,
        jump_impulse: l.jump_impulse,
        turn_rate: l.turn_rate,
        ground_check_radius: l.ground_check_radius,
        foot_offset: Vec3::from_array(l.foot_offset),
    }
}

pub fn orbit_camera_settings(config: &Config) -> OrbitCameraSettings {
    let c = &config.camera;
    OrbitCameraSettings {
        target_offset: Vec3::from_array(c.target_offset),
        distance: c.distance,
        min_distance: c.min_distance,
        sensitivity_x: c.sensitivity_x,
        sensitivity_y: c.sensitivity_y,
        pitch_min: c.pitch_min,
        pitch_max: c.pitch_max,
        initial_pitch: c.initial_pitch,
        alignment_speed: c.alignment_speed,
        rotation_smoothing: c.rotation_smoothing,
        occlusion_buffer: c.occlusion_buffer,
        relax_rate: c.relax_rate,
    }
}
