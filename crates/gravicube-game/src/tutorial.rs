//! First-run walkthrough of the controls.
//!
//! Each step shows its instruction after a short delay and waits for the
//! matching input. Steps only advance while their instruction is visible.
//! After the last step the panel stays hidden for one more delay before the
//! walkthrough reports completion.

use bevy_ecs::prelude::*;
use gravicube_config::TutorialConfig;
use gravicube_player::PlayerInput;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TutorialStep {
    Look,
    Move,
    Jump,
    SelectWall,
    Commit,
    Complete,
}

impl TutorialStep {
    pub fn instruction(self) -> Option<&'static str> {
        match self {
            TutorialStep::Look => Some("Move the Mouse to look around."),
            TutorialStep::Move => Some("Use W, A, S, D to move."),
            TutorialStep::Jump => Some("Press SPACE to Jump."),
            TutorialStep::SelectWall => Some(
                "Press ARROW KEYS to select Wall Gravity.\nHold SHIFT + UP ARROW to select Ceiling Gravity.",
            ),
            TutorialStep::Commit => Some("Press ENTER to switch gravity."),
            TutorialStep::Complete => None,
        }
    }

    fn next(self) -> TutorialStep {
        match self {
            TutorialStep::Look => TutorialStep::Move,
            TutorialStep::Move => TutorialStep::Jump,
            TutorialStep::Jump => TutorialStep::SelectWall,
            TutorialStep::SelectWall => TutorialStep::Commit,
            TutorialStep::Commit | TutorialStep::Complete => TutorialStep::Complete,
        }
    }
}

#[derive(Resource, Clone, Debug)]
pub struct Tutorial {
    step: TutorialStep,
    /// Time left before the current instruction appears.
    delay: f32,
    visible: bool,
    /// The last step was satisfied; completion waits out one more delay.
    finishing: bool,
    step_delay: f32,
    look_threshold: f32,
}

impl Tutorial {
    pub fn new(config: &TutorialConfig) -> Self {
        let step = if config.enabled {
            TutorialStep::Look
        } else {
            TutorialStep::Complete
        };
        Self {
            step,
            delay: config.step_delay,
            visible: false,
            finishing: false,
            step_delay: config.step_delay,
            look_threshold: config.look_threshold,
        }
    }

    pub fn step(&self) -> TutorialStep {
        self.step
    }

    pub fn is_complete(&self) -> bool {
        self.step == TutorialStep::Complete
    }

    /// The instruction on screen, if any.
    pub fn panel_text(&self) -> Option<&'static str> {
        if self.visible {
            self.step.instruction()
        } else {
            None
        }
    }

    fn satisfied(&self, input: &PlayerInput) -> bool {
        match self.step {
            TutorialStep::Look => {
                input.look_delta.x.abs() > self.look_threshold
                    || input.look_delta.y.abs() > self.look_threshold
            }
            TutorialStep::Move => input.any_move(),
            TutorialStep::Jump => input.jump_pressed,
            TutorialStep::SelectWall => {
                !input.modifier_held
                    && (input.up_pressed || input.left_pressed || input.right_pressed)
            }
            TutorialStep::Commit => input.commit_pressed,
            TutorialStep::Complete => false,
        }
    }

    /// Advances the walkthrough. Returns the step just finished, if any.
    pub fn update(&mut self, input: &PlayerInput, dt: f32) -> Option<TutorialStep> {
        if self.is_complete() {
            return None;
        }
        if !self.visible {
            self.delay -= dt;
            if self.delay > 0.0 {
                return None;
            }
            if self.finishing {
                self.step = TutorialStep::Complete;
                tracing::info!("Tutorial completed");
            } else {
                self.visible = true;
            }
            return None;
        }
        if !self.satisfied(input) {
            return None;
        }

        let done = self.step;
        self.visible = false;
        self.delay = self.step_delay;
        match done.next() {
            TutorialStep::Complete => self.finishing = true,
            next => {
                self.step = next;
                tracing::debug!(step = ?next, "tutorial step");
            }
        }
        Some(done)
    }
}
