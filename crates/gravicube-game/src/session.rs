//! One match: the ECS world, its schedules, and the knobs to drive them.

use bevy_ecs::prelude::*;
use glam::{Vec2, Vec3};
use gravicube_config::Config;
use gravicube_ecs::{
    EngineSchedule, EngineSchedules, FixedUpdateSet, GravityState, Name, PostUpdateSet,
    PreUpdateSet, Transform, UpdateSet, create_world,
};
use gravicube_input::{Action, ActionState, InputMap, KeyboardState, MouseState, RawKeyEvent};
use gravicube_physics::{
    GravityField, PhysicsBody, PhysicsWorld, gravity_force_system, physics_step_system,
    pull_bodies_to_transforms, push_transforms_to_bodies, spawn_player_body,
};
use gravicube_player::{
    FollowCamera, GravitySwitcher, Locomotion, OrbitCamera, PlayerInput,
};
use tracing::{error, info, warn};

use crate::arena::build_arena;
use crate::collectibles::{Collectible, CollectibleTally};
use crate::events::{EventBus, Subscription};
use crate::match_rules::{FallDetector, Hud, MatchState};
use crate::settings::{gravity_switch_settings, locomotion_settings, orbit_camera_settings};
use crate::systems::*;
use crate::tutorial::Tutorial;

/// Fixed physics step in seconds.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Longest frame the session will simulate in one go.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// A running match.
///
/// Input is fed in with [`key`](Self::key) and [`look`](Self::look) before
/// each [`frame`](Self::frame); per-frame input state is cleared at the end
/// of every frame.
pub struct Session {
    world: World,
    schedules: EngineSchedules,
    config: Config,
    player: Entity,
    frames: u64,
}

impl Session {
    /// Builds the arena, player, cameras and pickups described by `config`.
    pub fn new(config: Config) -> Self {
        Self::with_bus(config, EventBus::new())
    }

    fn with_bus(config: Config, mut bus: EventBus) -> Self {
        let mut world = create_world();

        let mut physics = PhysicsWorld::with_timestep(FIXED_DT as f32);
        build_arena(&mut physics, &config.arena);
        let spawn = Vec3::from_array(config.arena.spawn);
        let body = spawn_player_body(&mut physics, spawn, config.arena.player_radius);
        // Ray probes only see colliders after a step.
        physics.step();

        let player_pose = Transform::from_position(spawn);
        let switch_settings = gravity_switch_settings(&config);
        let switcher = if config.gravity.hologram_enabled {
            GravitySwitcher::new(switch_settings)
        } else {
            GravitySwitcher::without_hologram(switch_settings)
        };
        let player = world
            .spawn((
                Name::new("player"),
                Player,
                player_pose,
                PhysicsBody(body.body_handle),
                switcher,
                Locomotion::new(locomotion_settings(&config)),
            ))
            .id();

        let orbit = OrbitCamera::new(orbit_camera_settings(&config), &player_pose);
        world.spawn((Name::new("orbit camera"), orbit.transform(), orbit));
        let follow = FollowCamera::new(
            Vec3::from_array(config.follow_camera.offset),
            config.follow_camera.smooth_speed,
            &player_pose,
        );
        world.spawn((Name::new("follow camera"), follow.transform(), follow));

        let pickup = Collectible {
            radius: config.arena.collectible_radius,
        };
        for (i, position) in config.arena.collectibles.iter().enumerate() {
            world.spawn((
                Name::new(format!("cube {i}")),
                pickup,
                Transform::from_position(Vec3::from_array(*position)),
            ));
        }
        let total = config.arena.collectibles.len() as u32;

        world.insert_resource(physics);
        world.insert_resource(GravityField {
            strength: config.gravity.strength,
        });
        world.insert_resource(InputMap::default());
        world.insert_resource(KeyboardState::new());
        world.insert_resource(MouseState::new());
        world.insert_resource(ActionState::new());
        world.insert_resource(PlayerInput::default());
        world.insert_resource(PlayerControl {
            enabled: true,
            mouse_sensitivity: config.input.mouse_sensitivity,
            invert_y: config.input.invert_y,
        });
        world.insert_resource(GameRules {
            rules: config.match_rules.clone(),
            player_radius: config.arena.player_radius,
        });
        world.insert_resource(MatchState::new(config.match_rules.time_limit, total));
        world.insert_resource(FallDetector::default());
        world.insert_resource(Hud::default());
        world.insert_resource(CollectibleTally::new(total));
        world.insert_resource(Tutorial::new(&config.tutorial));
        world.insert_resource(MatchInbox(bus.subscribe()));
        world.insert_resource(bus);

        let mut schedules = EngineSchedules::new(FIXED_DT);
        add_systems(&mut schedules);
        if let Err(err) = schedules.initialize(&mut world) {
            error!(%err, "frame schedule is inconsistent");
        }

        info!(
            cubes = total,
            time_limit = config.match_rules.time_limit,
            hologram = config.gravity.hologram_enabled,
            "match ready"
        );

        Self {
            world,
            schedules,
            config,
            player,
            frames: 0,
        }
    }

    /// Runs one frame of `dt` seconds. Overlong frames are clamped.
    pub fn frame(&mut self, dt: f64) {
        let dt = if dt > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                dt * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            MAX_FRAME_TIME
        } else {
            dt.max(0.0)
        };
        self.schedules.run(&mut self.world, dt);
        self.frames += 1;

        if self
            .world
            .resource::<ActionState>()
            .action_just_activated(Action::Restart)
        {
            self.restart();
        }
    }

    /// Throws the match away and starts a fresh one. Event subscribers stay
    /// subscribed.
    pub fn restart(&mut self) {
        let bus = self.world.remove_resource::<EventBus>().unwrap_or_default();
        info!("restarting match");
        *self = Self::with_bus(self.config.clone(), bus);
    }

    /// Feeds a key event into the next frame.
    pub fn key(&mut self, event: RawKeyEvent) {
        self.world.resource_mut::<KeyboardState>().process_raw(event);
    }

    /// Adds pointer motion for the next frame, in pixels.
    pub fn look(&mut self, delta: Vec2) {
        self.world.resource_mut::<MouseState>().inject_delta(delta);
    }

    pub fn subscribe(&mut self) -> Subscription {
        self.world.resource_mut::<EventBus>().subscribe()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn input_map(&self) -> &InputMap {
        self.world.resource::<InputMap>()
    }

    pub fn player_transform(&self) -> Option<Transform> {
        self.world.get::<Transform>(self.player).copied()
    }

    pub fn switcher(&self) -> Option<&GravitySwitcher> {
        self.world.get::<GravitySwitcher>(self.player)
    }

    pub fn locomotion(&self) -> Option<&Locomotion> {
        self.world.get::<Locomotion>(self.player)
    }

    pub fn player_velocity(&self) -> Option<Vec3> {
        let body = self.world.get::<PhysicsBody>(self.player)?;
        self.world.resource::<PhysicsWorld>().body_velocity(body.0)
    }

    pub fn gravity(&self) -> GravityState {
        *self.world.resource::<GravityState>()
    }

    pub fn match_state(&self) -> &MatchState {
        self.world.resource::<MatchState>()
    }

    pub fn hud(&self) -> &Hud {
        self.world.resource::<Hud>()
    }

    pub fn tutorial(&self) -> &Tutorial {
        self.world.resource::<Tutorial>()
    }

    /// The first orbit camera, if one exists.
    pub fn orbit_camera(&mut self) -> Option<OrbitCamera> {
        let mut cameras = self.world.query::<&OrbitCamera>();
        cameras.iter(&self.world).next().cloned()
    }

    /// Pickups still in the arena.
    pub fn remaining_cubes(&mut self) -> usize {
        let mut pickups = self.world.query::<&Collectible>();
        pickups.iter(&self.world).count()
    }
}

fn add_systems(schedules: &mut EngineSchedules) {
    schedules.add_system(
        EngineSchedule::PreUpdate,
        (resolve_actions_system, player_input_system)
            .chain()
            .in_set(PreUpdateSet::Input),
    );

    schedules.add_system(
        EngineSchedule::FixedUpdate,
        (gravity_force_system, locomotion_step_system)
            .chain()
            .in_set(FixedUpdateSet::ForceApplication),
    );
    schedules.add_system(
        EngineSchedule::FixedUpdate,
        (push_transforms_to_bodies, physics_step_system)
            .chain()
            .in_set(FixedUpdateSet::PhysicsStep),
    );
    schedules.add_system(
        EngineSchedule::FixedUpdate,
        pull_bodies_to_transforms.in_set(FixedUpdateSet::PhysicsSync),
    );

    schedules.add_system(
        EngineSchedule::Update,
        gravity_switch_system.in_set(UpdateSet::GravitySwitch),
    );
    schedules.add_system(
        EngineSchedule::Update,
        ground_and_jump_system.in_set(UpdateSet::Locomotion),
    );
    schedules.add_system(
        EngineSchedule::Update,
        (collect_system, match_rules_system, tutorial_system, hud_system)
            .chain()
            .in_set(UpdateSet::Gameplay),
    );

    schedules.add_system(
        EngineSchedule::PostUpdate,
        (orbit_camera_system, follow_camera_system)
            .chain()
            .in_set(PostUpdateSet::Camera),
    );
    schedules.add_system(
        EngineSchedule::PostUpdate,
        clear_input_transients_system.in_set(PostUpdateSet::FrameEnd),
    );
}
