//! Frame stages and the runner that drives them.
//!
//! A frame is PreUpdate, then as many fixed steps as the accumulated scaled
//! time allows, then Update and PostUpdate. Fixed steps are capped per frame
//! and any backlog past the cap is dropped.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::{ExecutorKind, IntoSystemConfigs, ScheduleBuildError, ScheduleLabel};

use crate::sets::{FixedUpdateSet, PostUpdateSet, PreUpdateSet, UpdateSet};
use crate::{GravityState, TimeRes};

/// Most fixed steps a single frame may run.
pub const MAX_FIXED_STEPS_PER_FRAME: u32 = 10;

/// The four stages of a frame, in run order.
#[derive(ScheduleLabel, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineSchedule {
    PreUpdate,
    FixedUpdate,
    Update,
    PostUpdate,
}

const STAGES: [EngineSchedule; 4] = [
    EngineSchedule::PreUpdate,
    EngineSchedule::FixedUpdate,
    EngineSchedule::Update,
    EngineSchedule::PostUpdate,
];

/// A world holding the shared resources: a fresh [`TimeRes`] and floor gravity.
pub fn create_world() -> World {
    let mut world = World::new();
    world.init_resource::<TimeRes>();
    world.init_resource::<GravityState>();
    world
}

/// One single-threaded schedule per stage with its sets chained in order.
fn stage_schedule(stage: EngineSchedule) -> Schedule {
    let mut schedule = Schedule::new(stage);
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    match stage {
        EngineSchedule::PreUpdate => {
            schedule.configure_sets(PreUpdateSet::Input);
        }
        EngineSchedule::FixedUpdate => {
            schedule.configure_sets(
                (
                    FixedUpdateSet::InputProcessing,
                    FixedUpdateSet::ForceApplication,
                    FixedUpdateSet::PhysicsStep,
                    FixedUpdateSet::PhysicsSync,
                )
                    .chain(),
            );
        }
        EngineSchedule::Update => {
            schedule.configure_sets(
                (UpdateSet::GravitySwitch, UpdateSet::Locomotion, UpdateSet::Gameplay).chain(),
            );
        }
        EngineSchedule::PostUpdate => {
            schedule.configure_sets((PostUpdateSet::Camera, PostUpdateSet::FrameEnd).chain());
        }
    }
    schedule
}

/// Runs the stages of a frame against a world.
pub struct EngineSchedules {
    pre_update: Schedule,
    fixed_update: Schedule,
    update: Schedule,
    post_update: Schedule,
    fixed_dt: f64,
    accumulator: f64,
}

impl EngineSchedules {
    /// Stages with their set ordering in place; `fixed_dt` is the physics step in seconds.
    pub fn new(fixed_dt: f64) -> Self {
        Self {
            pre_update: stage_schedule(EngineSchedule::PreUpdate),
            fixed_update: stage_schedule(EngineSchedule::FixedUpdate),
            update: stage_schedule(EngineSchedule::Update),
            post_update: stage_schedule(EngineSchedule::PostUpdate),
            fixed_dt,
            accumulator: 0.0,
        }
    }

    fn stage_mut(&mut self, stage: EngineSchedule) -> &mut Schedule {
        match stage {
            EngineSchedule::PreUpdate => &mut self.pre_update,
            EngineSchedule::FixedUpdate => &mut self.fixed_update,
            EngineSchedule::Update => &mut self.update,
            EngineSchedule::PostUpdate => &mut self.post_update,
        }
    }

    pub fn add_system<M>(&mut self, stage: EngineSchedule, systems: impl IntoSystemConfigs<M>) {
        self.stage_mut(stage).add_systems(systems);
    }

    /// Builds every stage's system graph now instead of on the first frame.
    pub fn initialize(&mut self, world: &mut World) -> Result<(), ScheduleBuildError> {
        for stage in STAGES {
            self.stage_mut(stage).initialize(world)?;
        }
        Ok(())
    }

    /// Runs one frame of `frame_dt` wall-clock seconds.
    ///
    /// With a [`TimeRes`] present the frame time is scaled by its
    /// `time_scale` first, so a zero scale runs no fixed steps at all.
    pub fn run(&mut self, world: &mut World, frame_dt: f64) {
        let scaled_dt = match world.get_resource_mut::<TimeRes>() {
            Some(mut time) => time.advance(frame_dt, self.fixed_dt),
            None => frame_dt,
        };

        self.pre_update.run(world);

        self.accumulator += scaled_dt;
        let mut steps = 0;
        while self.accumulator >= self.fixed_dt {
            if steps == MAX_FIXED_STEPS_PER_FRAME {
                self.accumulator %= self.fixed_dt;
                break;
            }
            self.fixed_update.run(world);
            self.accumulator -= self.fixed_dt;
            steps += 1;
        }

        self.update.run(world);
        self.post_update.run(world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f64 = 1.0 / 60.0;

    #[derive(Resource, Default)]
    struct Steps(u32);

    fn count_step(mut steps: ResMut<Steps>) {
        steps.0 += 1;
    }

    fn counting() -> (World, EngineSchedules) {
        let mut world = create_world();
        world.init_resource::<Steps>();
        let mut schedules = EngineSchedules::new(STEP);
        schedules.add_system(EngineSchedule::FixedUpdate, count_step);
        (world, schedules)
    }

    #[test]
    fn test_world_has_shared_resources_and_no_entities() {
        let world = create_world();
        assert!(world.contains_resource::<TimeRes>());
        assert_eq!(world.resource::<GravityState>().direction, glam::Vec3::NEG_Y);
        assert_eq!(world.entities().len(), 0);
    }

    #[test]
    fn test_stages_run_in_frame_order() {
        #[derive(Resource, Default)]
        struct Seen(Vec<EngineSchedule>);

        let mut world = create_world();
        world.init_resource::<Seen>();
        let mut schedules = EngineSchedules::new(STEP);
        for stage in STAGES {
            schedules.add_system(stage, move |mut seen: ResMut<Seen>| seen.0.push(stage));
        }
        schedules.run(&mut world, STEP);
        assert_eq!(world.resource::<Seen>().0, STAGES);
    }

    #[test]
    fn test_slow_frames_catch_up_on_fixed_steps() {
        let (mut world, mut schedules) = counting();
        // 50 ms frames hold three 1/60 s steps each.
        for _ in 0..3 {
            schedules.run(&mut world, 0.05);
        }
        assert_eq!(world.resource::<Steps>().0, 9);
    }

    #[test]
    fn test_short_frame_runs_no_fixed_step() {
        let (mut world, mut schedules) = counting();
        schedules.run(&mut world, 0.001);
        assert_eq!(world.resource::<Steps>().0, 0);
    }

    #[test]
    fn test_hitch_is_capped_and_backlog_dropped() {
        let (mut world, mut schedules) = counting();
        schedules.run(&mut world, 5.0);
        assert_eq!(world.resource::<Steps>().0, MAX_FIXED_STEPS_PER_FRAME);
        assert!(schedules.accumulator < schedules.fixed_dt);

        schedules.run(&mut world, 0.0);
        assert_eq!(world.resource::<Steps>().0, MAX_FIXED_STEPS_PER_FRAME);
    }

    #[test]
    fn test_frozen_time_runs_no_fixed_steps() {
        let (mut world, mut schedules) = counting();
        world.resource_mut::<TimeRes>().time_scale = 0.0;
        for _ in 0..5 {
            schedules.run(&mut world, 0.05);
        }
        assert_eq!(world.resource::<Steps>().0, 0);
        assert_eq!(world.resource::<TimeRes>().delta, 0.0);
    }

    #[test]
    fn test_initialize_accepts_ordered_sets() {
        let (mut world, mut schedules) = counting();
        schedules.add_system(
            EngineSchedule::Update,
            (count_step.in_set(UpdateSet::Gameplay), count_step.in_set(UpdateSet::GravitySwitch)),
        );
        assert!(schedules.initialize(&mut world).is_ok());
    }
}
