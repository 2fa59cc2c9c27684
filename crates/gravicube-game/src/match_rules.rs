//! Win and loss bookkeeping: the match clock, the cube count, and the
//! "lost in space" detector.

use bevy_ecs::prelude::*;
use glam::Vec3;
use gravicube_config::MatchRulesConfig;
use gravicube_physics::{LayerMask, SpatialQuery};

pub const REASON_TIME_UP: &str = "Time's Up!";
pub const REASON_COMPLETE: &str = "Mission Complete!";
pub const REASON_LOST: &str = "Lost in Space!";

/// Height above the feet the fall probe starts from, so it never begins
/// inside the floor.
const FALL_PROBE_LIFT: f32 = 0.5;

/// Live state of the current match.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct MatchState {
    pub time_remaining: f32,
    pub collected: u32,
    pub total: u32,
    outcome: Option<String>,
}

impl MatchState {
    pub fn new(time_limit: f32, total: u32) -> Self {
        Self {
            time_remaining: time_limit,
            collected: 0,
            total,
            outcome: None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Why the match ended, once it has.
    pub fn outcome(&self) -> Option<&str> {
        self.outcome.as_deref()
    }

    /// Ends the match. Only the first reason sticks; returns whether this
    /// call ended it.
    pub fn end(&mut self, reason: &str) -> bool {
        if self.is_over() {
            return false;
        }
        tracing::info!(reason, collected = self.collected, total = self.total, "match over");
        self.outcome = Some(reason.to_string());
        true
    }

    /// Counts down by `dt`. Returns `true` when the clock has run out.
    pub fn tick_clock(&mut self, dt: f32) -> bool {
        self.time_remaining = (self.time_remaining - dt).max(0.0);
        self.time_remaining <= 0.0
    }

    /// Records the pickup count. Returns `true` once every cube is in.
    pub fn record_collected(&mut self, current: u32) -> bool {
        self.collected = current;
        self.collected >= self.total
    }
}

/// Tracks how long the player has been drifting with nothing below them.
#[derive(Resource, Clone, Debug, Default)]
pub struct FallDetector {
    falling_for: f32,
}

impl FallDetector {
    pub fn falling_for(&self) -> f32 {
        self.falling_for
    }

    /// Advances the detector. Returns `true` when the player counts as lost.
    ///
    /// The probe runs from just above the feet along `-up`. A miss only
    /// counts while the player is moving; standing still over a gap neither
    /// adds to nor clears the timer. Any hit clears it.
    pub fn update<Q: SpatialQuery>(
        &mut self,
        query: &Q,
        rules: &MatchRulesConfig,
        position: Vec3,
        up: Vec3,
        speed: f32,
        dt: f32,
    ) -> bool {
        let origin = position + up * FALL_PROBE_LIFT;
        let hit = query
            .cast_ray(origin, -up, rules.fall_probe_distance, LayerMask::GROUND)
            .is_some();
        if hit {
            self.falling_for = 0.0;
            return false;
        }
        if speed > rules.fall_speed_threshold {
            self.falling_for += dt;
        }
        self.falling_for > rules.fall_timeout
    }
}

/// Formats seconds as `MM:SS`, flooring both parts.
pub fn format_clock(seconds: f32) -> String {
    let seconds = seconds.max(0.0);
    let minutes = (seconds / 60.0).floor() as u32;
    let secs = (seconds % 60.0).floor() as u32;
    format!("{minutes:02}:{secs:02}")
}

pub fn format_cubes(collected: u32, total: u32) -> String {
    format!("Cubes: {collected} / {total}")
}

/// Text shown on screen.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct Hud {
    pub clock: String,
    pub cubes: String,
    /// Game-over banner, empty while playing.
    pub banner: String,
}

impl Hud {
    pub fn refresh(&mut self, state: &MatchState) {
        self.clock = format_clock(state.time_remaining);
        self.cubes = format_cubes(state.collected, state.total);
        self.banner = state.outcome().unwrap_or_default().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use gravicube_physics::RayHit;

    struct Floor(bool);

    impl SpatialQuery for Floor {
        fn cast_ray(&self, origin: Vec3, _: Vec3, _: f32, _: LayerMask) -> Option<RayHit> {
            self.0.then_some(RayHit {
                point: origin,
                distance: 0.0,
            })
        }

        fn overlap_sphere(&self, _: Vec3, _: f32, _: LayerMask) -> bool {
            self.0
        }
    }

    #[test]
    fn test_clock_format() {
        assert_eq!(format_clock(120.0), "02:00");
        assert_eq!(format_clock(119.99), "01:59");
        assert_eq!(format_clock(61.5), "01:01");
        assert_eq!(format_clock(9.0), "00:09");
        assert_eq!(format_clock(-3.0), "00:00");
    }

    #[test]
    fn test_cube_format() {
        assert_eq!(format_cubes(2, 4), "Cubes: 2 / 4");
    }

    #[test]
    fn test_clock_runs_out() {
        let mut state = MatchState::new(1.0, 4);
        assert!(!state.tick_clock(0.6));
        assert!(state.tick_clock(0.6));
        assert_eq!(state.time_remaining, 0.0);
    }

    #[test]
    fn test_first_reason_wins() {
        let mut state = MatchState::new(10.0, 1);
        assert!(state.end(REASON_TIME_UP));
        assert!(!state.end(REASON_LOST));
        assert_eq!(state.outcome(), Some(REASON_TIME_UP));
    }

    #[test]
    fn test_all_cubes_completes() {
        let mut state = MatchState::new(10.0, 2);
        assert!(!state.record_collected(1));
        assert!(state.record_collected(2));
    }

    #[test]
    fn test_fall_needs_miss_and_speed_for_timeout() {
        let rules = MatchRulesConfig::default();
        let mut fall = FallDetector::default();
        let step = |fall: &mut FallDetector, hit: bool, speed: f32| {
            fall.update(&Floor(hit), &rules, Vec3::ZERO, Vec3::Y, speed, 0.5)
        };
        assert!(!step(&mut fall, false, 5.0));
        assert!(!step(&mut fall, false, 5.0));
        assert!(!step(&mut fall, false, 5.0));
        assert!(step(&mut fall, false, 5.0));
    }

    #[test]
    fn test_slow_drift_holds_timer() {
        let rules = MatchRulesConfig::default();
        let mut fall = FallDetector::default();
        fall.update(&Floor(false), &rules, Vec3::ZERO, Vec3::Y, 5.0, 1.0);
        fall.update(&Floor(false), &rules, Vec3::ZERO, Vec3::Y, 0.5, 1.0);
        assert_eq!(fall.falling_for(), 1.0);
        fall.update(&Floor(true), &rules, Vec3::ZERO, Vec3::Y, 5.0, 1.0);
        assert_eq!(fall.falling_for(), 0.0);
    }

    #[test]
    fn test_hud_refresh() {
        let mut state = MatchState::new(75.0, 4);
        state.record_collected(3);
        let mut hud = Hud::default();
        hud.refresh(&state);
        assert_eq!(hud.clock, "01:15");
        assert_eq!(hud.cubes, "Cubes: 3 / 4");
        assert!(hud.banner.is_empty());
        state.end(REASON_COMPLETE);
        hud.refresh(&state);
        assert_eq!(hud.banner, "Mission Complete!");
    }
}
