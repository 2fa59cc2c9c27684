//! Scripted input for headless runs.
//!
//! A script is a list of steps. Each step lasts `frames` frames, holds its
//! `hold` actions throughout, presses its `press` actions on its first frame
//! only, and adds `look` pointer motion every frame. Keys are fed to the
//! session through each action's primary binding.
//!
//! ```ron
//! (
//!     steps: [
//!         (frames: 30, look: (12.0, 0.0)),
//!         (frames: 60, hold: [MoveForward]),
//!         (press: [GravityLeft]),
//!         (frames: 2),
//!         (press: [CommitGravity], frames: 90),
//!     ],
//! )
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use glam::Vec2;
use gravicube_input::{Action, RawKeyEvent};
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::session::Session;

fn one_frame() -> u32 {
    1
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    #[serde(default = "one_frame")]
    pub frames: u32,
    #[serde(default)]
    pub hold: Vec<Action>,
    #[serde(default)]
    pub press: Vec<Action>,
    #[serde(default)]
    pub look: (f32, f32),
}

impl ScriptStep {
    fn wait(frames: u32) -> Self {
        Self {
            frames,
            ..Default::default()
        }
    }

    fn hold(frames: u32, actions: &[Action]) -> Self {
        Self {
            frames,
            hold: actions.to_vec(),
            ..Default::default()
        }
    }

    fn press(frames: u32, actions: &[Action]) -> Self {
        Self {
            frames,
            press: actions.to_vec(),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    pub steps: Vec<ScriptStep>,
}

impl InputScript {
    pub fn from_ron(source: &str, path: &Path) -> Result<Self, GameError> {
        ron::from_str(source).map_err(|source| GameError::ScriptParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, GameError> {
        let source = std::fs::read_to_string(path).map_err(|source| GameError::ScriptRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&source, path)
    }

    /// Total frames the script runs for.
    pub fn frame_count(&self) -> u64 {
        self.steps.iter().map(|s| u64::from(s.frames.max(1))).sum()
    }

    /// A short tour: look around, walk, jump, then take the left wall and
    /// the ceiling.
    pub fn demo() -> Self {
        use Action::*;
        Self {
            steps: vec![
                ScriptStep::wait(40),
                ScriptStep {
                    frames: 20,
                    look: (10.0, -2.0),
                    ..Default::default()
                },
                ScriptStep::wait(40),
                ScriptStep::hold(60, &[MoveForward]),
                ScriptStep::hold(30, &[MoveForward, MoveLeft]),
                ScriptStep::wait(40),
                ScriptStep::press(60, &[Jump]),
                ScriptStep::wait(30),
                ScriptStep::press(40, &[GravityLeft]),
                ScriptStep::press(120, &[CommitGravity]),
                ScriptStep::hold(45, &[MoveForward]),
                ScriptStep::wait(60),
                ScriptStep {
                    frames: 10,
                    hold: vec![GravityModifier],
                    press: vec![GravityUp],
                    look: (0.0, 0.0),
                },
                ScriptStep::press(150, &[CommitGravity]),
                ScriptStep::hold(60, &[MoveBack, MoveRight]),
                ScriptStep::wait(60),
            ],
        }
    }
}

/// Replays an [`InputScript`] into a [`Session`] one frame at a time.
pub struct ScriptRunner {
    script: InputScript,
    step: usize,
    frame_in_step: u32,
    held: BTreeSet<Action>,
}

impl ScriptRunner {
    pub fn new(script: InputScript) -> Self {
        Self {
            script,
            step: 0,
            frame_in_step: 0,
            held: BTreeSet::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.script.steps.len()
    }

    /// Feeds the next frame of input and runs it. Returns `false` once the
    /// script is exhausted.
    pub fn advance(&mut self, session: &mut Session, dt: f64) -> bool {
        let Some(step) = self.script.steps.get(self.step) else {
            self.release_all(session);
            return false;
        };

        let mut wanted: BTreeSet<Action> = step.hold.iter().copied().collect();
        if self.frame_in_step == 0 {
            wanted.extend(step.press.iter().copied());
        }
        let look = Vec2::new(step.look.0, step.look.1);
        let frames = step.frames.max(1);

        self.apply(session, wanted);
        if look != Vec2::ZERO {
            session.look(look);
        }
        session.frame(dt);

        self.frame_in_step += 1;
        if self.frame_in_step >= frames {
            self.frame_in_step = 0;
            self.step += 1;
        }
        true
    }

    /// Runs the whole script, then releases every key.
    pub fn run_to_end(&mut self, session: &mut Session, dt: f64) {
        while self.advance(session, dt) {}
    }

    fn apply(&mut self, session: &mut Session, wanted: BTreeSet<Action>) {
        for action in self.held.difference(&wanted) {
            if let Some(key) = session.input_map().primary_key(*action) {
                session.key(RawKeyEvent::release(key));
            }
        }
        for action in wanted.difference(&self.held) {
            if let Some(key) = session.input_map().primary_key(*action) {
                session.key(RawKeyEvent::press(key));
            }
        }
        self.held = wanted;
    }

    fn release_all(&mut self, session: &mut Session) {
        self.apply(session, BTreeSet::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_defaults() {
        let script = InputScript::from_ron(
            "(steps: [(frames: 3, hold: [MoveForward]), (press: [Jump]), (look: (4.0, -1.0))])",
            Path::new("inline.ron"),
        )
        .unwrap();
        assert_eq!(script.steps.len(), 3);
        assert_eq!(script.steps[1].frames, 1);
        assert_eq!(script.steps[1].press, vec![Action::Jump]);
        assert_eq!(script.steps[2].look, (4.0, -1.0));
        assert_eq!(script.frame_count(), 5);
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = InputScript::from_ron("(steps: [(frames: \"x\")])", Path::new("bad.ron"))
            .unwrap_err();
        assert!(matches!(err, GameError::ScriptParse { .. }));
        assert!(err.to_string().contains("bad.ron"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = InputScript::load(&dir.path().join("nope.ron")).unwrap_err();
        assert!(matches!(err, GameError::ScriptRead { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("walk.ron");
        std::fs::write(&path, "(steps: [(frames: 10, hold: [MoveLeft])])").unwrap();
        let script = InputScript::load(&path).unwrap();
        assert_eq!(script.frame_count(), 10);
    }

    #[test]
    fn test_demo_switches_gravity_twice() {
        let demo = InputScript::demo();
        let commits = demo
            .steps
            .iter()
            .filter(|s| s.press.contains(&Action::CommitGravity))
            .count();
        assert_eq!(commits, 2);
    }
}
