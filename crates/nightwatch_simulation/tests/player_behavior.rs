//! Player behavior graph end-to-end (facade level, no Bevy app)

use std::sync::Arc;

use bevy::prelude::*;
use nightwatch_simulation::player::states::anim;
use nightwatch_simulation::shared::HeadlessTerrain;
use nightwatch_simulation::{
    CameraBasis, HeadlessRig, PlayerActor, PlayerConfig, PlayerInput, PlayerStateId, Pose,
};

const DT: f32 = 1.0 / 60.0;

fn spawn_with(config: PlayerConfig, rig: &HeadlessRig) -> PlayerActor {
    PlayerActor::new("Player", Arc::new(config), rig.ports(), Pose::at(Vec3::ZERO), 5)
        .expect("valid config")
}

fn tick(player: &mut PlayerActor, delta: f32) {
    player.logic_update(delta).unwrap();
    player.physics_update(delta).unwrap();
    player.late_update(delta).unwrap();
}

fn trigger_held() -> PlayerInput {
    PlayerInput {
        aim: true,
        fire: true,
        ..Default::default()
    }
}

/// Idle → Aim → Shoot (first shot on entry), outbox drained
fn start_shooting(player: &mut PlayerActor) {
    player.set_input(trigger_held());
    tick(player, DT);
    tick(player, DT);
    assert_eq!(player.state(), Some(PlayerStateId::Shoot));
    assert_eq!(player.drain_shots().len(), 1);
}

#[test]
fn test_fire_requests_half_interval_apart() {
    let rig = HeadlessRig::new();
    let mut player = spawn_with(
        PlayerConfig {
            fire_interval: 0.1,
            ..Default::default()
        },
        &rig,
    );
    start_shooting(&mut player);

    tick(&mut player, 0.05);
    assert!(player.drain_shots().is_empty());
}

#[test]
fn test_fire_requests_past_interval() {
    let rig = HeadlessRig::new();
    let mut player = spawn_with(
        PlayerConfig {
            fire_interval: 0.1,
            ..Default::default()
        },
        &rig,
    );
    start_shooting(&mut player);

    tick(&mut player, 0.15);
    assert_eq!(player.drain_shots().len(), 1);
    assert_eq!(rig.animator.trigger_count(anim::FIRE), 2);
}

#[test]
fn test_sustained_fire_cadence() {
    let rig = HeadlessRig::new();
    let mut player = spawn_with(
        PlayerConfig {
            fire_interval: 0.125,
            ..Default::default()
        },
        &rig,
    );
    start_shooting(&mut player);

    // One second at 32 Hz: a shot every fourth tick
    let mut fired = 0;
    for _ in 0..32 {
        tick(&mut player, 1.0 / 32.0);
        fired += player.drain_shots().len();
    }
    assert_eq!(fired, 8);
}

#[test]
fn test_spread_stays_inside_bounds() {
    let rig = HeadlessRig::new();
    let mut player = spawn_with(
        PlayerConfig {
            spread_horizontal: 4.0,
            spread_vertical: 2.0,
            ..Default::default()
        },
        &rig,
    );
    player.set_input(PlayerInput {
        spread_expanded: true,
        ..trigger_held()
    });
    tick(&mut player, DT);

    let mut shots = Vec::new();
    for _ in 0..40 {
        tick(&mut player, 0.1);
        shots.extend(player.drain_shots());
    }
    assert!(shots.len() >= 40);

    let mut deflected = false;
    for shot in shots {
        // Combined yaw/pitch deflection never exceeds the diagonal of the bounds
        let angle = shot.direction.angle_between(Vec3::NEG_Z).to_degrees();
        assert!(angle <= (4.0f32.hypot(2.0)) + 1e-2, "angle {}", angle);
        deflected |= angle > 1e-3;
    }
    assert!(deflected);
}

#[test]
fn test_debug_override_in_aim() {
    let rig = HeadlessRig::new();
    let mut player = spawn_with(PlayerConfig::default(), &rig);
    player.set_input(PlayerInput {
        aim: true,
        ..Default::default()
    });
    tick(&mut player, DT);
    assert_eq!(player.state(), Some(PlayerStateId::Aim));

    player.set_debug_override(true);
    player.set_input(trigger_held());
    for _ in 0..10 {
        tick(&mut player, DT);
    }
    assert_eq!(player.state(), Some(PlayerStateId::Aim));
    assert!(player.drain_shots().is_empty());

    // Forced transitions still run Enter
    player.force_state("Shoot").unwrap();
    assert_eq!(player.state(), Some(PlayerStateId::Shoot));
    assert!(rig.animator.flag(anim::IS_SHOOTING));
    assert_eq!(player.drain_shots().len(), 1);
}

#[test]
fn test_backing_into_wall_slides_along_it() {
    // Wall right behind the spawn, facing the player
    let rig = HeadlessRig::new().with_terrain(HeadlessTerrain::flat().with_wall(Vec3::NEG_Z));
    let mut player = spawn_with(PlayerConfig::default(), &rig);

    player.set_input(PlayerInput {
        move_axis: Vec2::new(1.0, -1.0),
        ..Default::default()
    });
    for _ in 0..30 {
        tick(&mut player, DT);
    }

    assert_eq!(player.state(), Some(PlayerStateId::Strafe));
    let velocity = player.velocity();
    assert!(velocity.x > 0.0);
    assert!(velocity.z.abs() < 1e-4, "still pushing into the wall: {:?}", velocity);
}

#[test]
fn test_slope_keeps_velocity_on_surface() {
    let normal = Vec3::new(0.0, 1.0, 0.5).normalize();
    let rig = HeadlessRig::new().with_terrain(HeadlessTerrain::slope(normal));
    let mut player = spawn_with(PlayerConfig::default(), &rig);
    player.set_camera(CameraBasis::default());

    player.set_input(PlayerInput {
        move_axis: Vec2::new(0.0, 1.0),
        sprint: true,
        ..Default::default()
    });
    for _ in 0..30 {
        tick(&mut player, DT);
    }

    assert_eq!(player.state(), Some(PlayerStateId::Sprint));
    let velocity = player.velocity();
    assert!(velocity.length() > 0.0);
    assert!(velocity.dot(normal).abs() < 1e-4);
}
