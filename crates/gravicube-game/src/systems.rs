//! ECS systems wiring the player crate into the frame stages.

use bevy_ecs::prelude::*;
use glam::Vec3;
use gravicube_config::MatchRulesConfig;
use gravicube_ecs::{GravityState, Name, TimeRes, Transform};
use gravicube_input::{ActionResolver, ActionState, InputMap, KeyboardState, MouseState};
use gravicube_physics::{KinematicBody, PhysicsBody, PhysicsWorld, RapierBody};
use gravicube_player::{
    FollowCamera, GravitySwitcher, Locomotion, OrbitCamera, PlayerInput, SwitchEvent,
};

use crate::collectibles::{Collectible, CollectibleTally};
use crate::events::{EventBus, GameEvent, Subscription};
use crate::match_rules::{
    FallDetector, Hud, MatchState, REASON_COMPLETE, REASON_LOST, REASON_TIME_UP,
};
use crate::tutorial::Tutorial;

/// Marks the controllable entity.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Player;

/// Whether input reaches the player, and how pointer motion is scaled.
#[derive(Resource, Clone, Copy, Debug)]
pub struct PlayerControl {
    pub enabled: bool,
    pub mouse_sensitivity: f32,
    pub invert_y: bool,
}

/// Match tuning plus the player size the pickups test against.
#[derive(Resource, Clone, Debug)]
pub struct GameRules {
    pub rules: MatchRulesConfig,
    pub player_radius: f32,
}

/// The match's own subscription to the event bus.
#[derive(Resource)]
pub struct MatchInbox(pub Subscription);

// --- PreUpdate ---

pub fn resolve_actions_system(
    map: Res<InputMap>,
    keyboard: Res<KeyboardState>,
    mut actions: ResMut<ActionState>,
) {
    ActionResolver::resolve(&map, &keyboard, &mut actions);
}

/// Builds this frame's [`PlayerInput`]. A disabled player sees no input.
pub fn player_input_system(
    actions: Res<ActionState>,
    mouse: Res<MouseState>,
    control: Res<PlayerControl>,
    mut input: ResMut<PlayerInput>,
) {
    if !control.enabled {
        *input = PlayerInput::default();
        return;
    }
    let mut look = mouse.delta() * control.mouse_sensitivity;
    if control.invert_y {
        look.y = -look.y;
    }
    *input = PlayerInput::from_actions(&actions, look);
}

// --- FixedUpdate ---

pub fn locomotion_step_system(
    input: Res<PlayerInput>,
    time: Res<TimeRes>,
    gravity: Res<GravityState>,
    mut physics: ResMut<PhysicsWorld>,
    cameras: Query<&OrbitCamera>,
    mut players: Query<(&mut Transform, &PhysicsBody, &Locomotion), With<Player>>,
) {
    let camera_rotation = cameras.iter().next().map(OrbitCamera::rotation);
    for (mut transform, body, locomotion) in &mut players {
        let view = camera_rotation.unwrap_or(transform.rotation);
        let mut rapier = RapierBody::new(&mut physics, body.0);
        locomotion.step(
            &input,
            view,
            &mut transform,
            &mut rapier,
            gravity.transitioning,
            time.fixed_delta,
        );
    }
}

// --- Update ---

pub fn gravity_switch_system(
    input: Res<PlayerInput>,
    time: Res<TimeRes>,
    mut gravity: ResMut<GravityState>,
    mut physics: ResMut<PhysicsWorld>,
    mut players: Query<(&mut Transform, &PhysicsBody, &mut GravitySwitcher), With<Player>>,
) {
    for (mut transform, body, mut switcher) in &mut players {
        let event = {
            let mut rapier = RapierBody::new(&mut physics, body.0);
            switcher.update(&input, &mut transform, &mut gravity, &mut rapier, time.delta)
        };
        if let Some(SwitchEvent::TransitionFinished { .. }) = event {
            physics.set_body_position(body.0, transform.position);
        }
    }
}

pub fn ground_and_jump_system(
    input: Res<PlayerInput>,
    mut physics: ResMut<PhysicsWorld>,
    mut players: Query<(&Transform, &PhysicsBody, &mut Locomotion), With<Player>>,
) {
    for (transform, body, mut locomotion) in &mut players {
        locomotion.probe_ground(&*physics, transform);
        let mut rapier = RapierBody::new(&mut physics, body.0);
        let jumped = locomotion.try_jump(&input, transform, &mut rapier);
        locomotion.record_signals(transform, rapier.velocity(), jumped);
    }
}

pub fn collect_system(
    mut commands: Commands,
    rules: Res<GameRules>,
    mut tally: ResMut<CollectibleTally>,
    mut bus: ResMut<EventBus>,
    players: Query<&Transform, With<Player>>,
    pickups: Query<(Entity, &Transform, &Collectible, Option<&Name>), Without<Player>>,
) {
    let Ok(player) = players.get_single() else {
        return;
    };
    for (entity, at, pickup, name) in &pickups {
        if pickup.touches(at.position, player.position, rules.player_radius) {
            commands.entity(entity).despawn();
            let (current, total) = tally.collect();
            let name = name.map_or("cube", |n| n.0.as_str());
            tracing::info!(name, current, total, "cube collected");
            bus.publish(GameEvent::CubeCollected { current, total });
        }
    }
}

/// Clock, pickups and the fall detector. Ending the match freezes time and
/// takes control away from the player.
#[allow(clippy::too_many_arguments)]
pub fn match_rules_system(
    rules: Res<GameRules>,
    physics: Res<PhysicsWorld>,
    inbox: Res<MatchInbox>,
    mut time: ResMut<TimeRes>,
    mut state: ResMut<MatchState>,
    mut fall: ResMut<FallDetector>,
    mut control: ResMut<PlayerControl>,
    mut bus: ResMut<EventBus>,
    players: Query<(&Transform, &PhysicsBody), With<Player>>,
) {
    let mut reason = None;
    for event in inbox.0.drain() {
        if let GameEvent::CubeCollected { current, .. } = event {
            if state.record_collected(current) {
                reason = Some(REASON_COMPLETE);
            }
        }
    }
    if state.is_over() {
        return;
    }

    let dt = time.delta;
    if reason.is_none() {
        if state.tick_clock(dt) {
            reason = Some(REASON_TIME_UP);
        }
        bus.publish(GameEvent::TimerUpdated(state.time_remaining));
    }
    if reason.is_none() {
        if let Ok((transform, body)) = players.get_single() {
            let speed = physics.body_velocity(body.0).map_or(0.0, Vec3::length);
            let lost = fall.update(
                &*physics,
                &rules.rules,
                transform.position,
                transform.up(),
                speed,
                dt,
            );
            if lost {
                reason = Some(REASON_LOST);
            }
        }
    }

    if let Some(reason) = reason {
        if state.end(reason) {
            time.time_scale = 0.0;
            control.enabled = false;
            bus.publish(GameEvent::GameOver(reason.to_string()));
        }
    }
}

pub fn tutorial_system(input: Res<PlayerInput>, time: Res<TimeRes>, mut tutorial: ResMut<Tutorial>) {
    tutorial.update(&input, time.delta);
}

pub fn hud_system(state: Res<MatchState>, mut hud: ResMut<Hud>) {
    hud.refresh(&state);
}

// --- PostUpdate ---

pub fn orbit_camera_system(
    input: Res<PlayerInput>,
    time: Res<TimeRes>,
    physics: Res<PhysicsWorld>,
    players: Query<&Transform, With<Player>>,
    mut cameras: Query<(&mut OrbitCamera, &mut Transform), Without<Player>>,
) {
    let Ok(target) = players.get_single() else {
        return;
    };
    for (mut camera, mut transform) in &mut cameras {
        camera.apply_look(input.look_delta);
        camera.update(target, &*physics, time.delta);
        *transform = camera.transform();
    }
}

pub fn follow_camera_system(
    players: Query<&Transform, With<Player>>,
    mut cameras: Query<(&mut FollowCamera, &mut Transform), Without<Player>>,
) {
    let Ok(target) = players.get_single() else {
        return;
    };
    for (mut camera, mut transform) in &mut cameras {
        camera.update(target);
        *transform = camera.transform();
    }
}

pub fn clear_input_transients_system(
    mut keyboard: ResMut<KeyboardState>,
    mut mouse: ResMut<MouseState>,
) {
    keyboard.clear_transients();
    mouse.clear_transients();
}
