//! Enemy behavior graph end-to-end (facade level, no Bevy app)
//!
//! Scripted perception + callbacks, checks the transitions an encounter
//! designer relies on.

use std::sync::Arc;

use bevy::prelude::*;
use nightwatch_simulation::ai::states::anim;
use nightwatch_simulation::shared::{geometry, TurnPhases, TwoPhaseTurn};
use nightwatch_simulation::{
    AnimationEvent, BehaviorError, Enemy, EnemyConfig, EnemyStateId, HeadlessRig, Hit, HitOutcome,
    Pose, SubPartId,
};

const DT: f32 = 1.0 / 60.0;

fn spawn(config: EnemyConfig) -> (Enemy, HeadlessRig) {
    let rig = HeadlessRig::new();
    let enemy = Enemy::new("Sentry", Arc::new(config), rig.ports(), Pose::at(Vec3::ZERO), 11)
        .expect("valid config");
    (enemy, rig)
}

fn tick(enemy: &mut Enemy, delta: f32) {
    enemy.logic_update(delta).unwrap();
    enemy.physics_update(delta).unwrap();
    enemy.late_update(delta).unwrap();
}

fn ahead(distance: f32) -> Vec3 {
    Vec3::new(0.0, 0.0, -distance)
}

#[test]
fn test_range_monotonicity() {
    let (mut enemy, rig) = spawn(EnemyConfig {
        attack_range: 2.0,
        aggro_range: 10.0,
        alert_range: 15.0,
        ..Default::default()
    });

    enemy.set_target(Some(ahead(20.0)));
    for _ in 0..30 {
        tick(&mut enemy, DT);
    }
    assert_eq!(enemy.state(), Some(EnemyStateId::Idle));

    enemy.set_target(Some(ahead(12.0)));
    tick(&mut enemy, DT);
    assert_eq!(enemy.state(), Some(EnemyStateId::Alert));

    enemy.set_target(Some(ahead(8.0)));
    tick(&mut enemy, DT);
    assert_eq!(enemy.state(), Some(EnemyStateId::Aggro));
    assert_eq!(rig.animator.trigger_count(anim::AGGRO), 1);

    enemy.handle_animation_event(AnimationEvent::AggroFinished).unwrap();
    assert_eq!(enemy.state(), Some(EnemyStateId::Chase));

    enemy.set_target(Some(ahead(1.0)));
    tick(&mut enemy, DT);
    assert_eq!(enemy.state(), Some(EnemyStateId::Attack));
    assert!(rig.animator.flag(anim::IS_ATTACKING));
    assert!(!rig.navigation.snapshot().enabled);
}

#[test]
fn test_first_hit_then_chase_hit() {
    let (mut enemy, _rig) = spawn(EnemyConfig {
        starts_patrolling: true,
        ..Default::default()
    });
    assert_eq!(enemy.state(), Some(EnemyStateId::Patrol));
    assert!(!enemy.has_aggroed_before());

    let outcome = enemy.process_hit(Hit::new(10, SubPartId::Torso)).unwrap();
    assert_eq!(outcome, HitOutcome::Damaged);
    assert_eq!(enemy.state(), Some(EnemyStateId::Aggro));
    assert!(enemy.has_aggroed_before());

    enemy.set_target(Some(ahead(8.0)));
    enemy.handle_animation_event(AnimationEvent::AggroFinished).unwrap();
    tick(&mut enemy, DT);
    assert_eq!(enemy.state(), Some(EnemyStateId::Chase));

    enemy.process_hit(Hit::new(10, SubPartId::LeftArm)).unwrap();
    assert_eq!(enemy.state(), Some(EnemyStateId::Chase));
    assert_eq!(enemy.current_health(), 80);
}

#[test]
fn test_debug_override_blocks_range_checks() {
    let (mut enemy, rig) = spawn(EnemyConfig::default());
    enemy.set_debug_override(true);
    enemy.set_target(Some(ahead(1.0)));

    for _ in 0..120 {
        tick(&mut enemy, DT);
    }
    assert_eq!(enemy.state(), Some(EnemyStateId::Idle));

    enemy.force_state("Attack").unwrap();
    assert_eq!(enemy.state(), Some(EnemyStateId::Attack));
    assert!(rig.animator.flag(anim::IS_ATTACKING));
    assert!(rig.animator.flag(anim::IN_ATTACK_RANGE));

    // Out of range, override still holds the state
    enemy.set_target(Some(ahead(30.0)));
    for _ in 0..60 {
        tick(&mut enemy, DT);
    }
    assert_eq!(enemy.state(), Some(EnemyStateId::Attack));
    assert!(!rig.animator.flag(anim::IN_ATTACK_RANGE));
}

#[test]
fn test_death_is_terminal() {
    let (mut enemy, rig) = spawn(EnemyConfig::default());
    enemy.set_target(Some(ahead(1.0)));

    let outcome = enemy.process_hit(Hit::new(250, SubPartId::Head)).unwrap();
    assert_eq!(outcome, HitOutcome::Killed);
    assert!(enemy.is_dead());
    assert_eq!(rig.body.snapshot().ragdoll_activations, 1);

    for _ in 0..60 {
        tick(&mut enemy, DT);
    }
    for event in [
        AnimationEvent::AggroFinished,
        AnimationEvent::AttackFinished,
        AnimationEvent::TurnFinished,
    ] {
        enemy.handle_animation_event(event).unwrap();
    }
    assert_eq!(
        enemy.force_state("Idle"),
        Err(BehaviorError::TerminalState {
            owner: "Sentry".to_string()
        })
    );
    assert_eq!(
        enemy.process_hit(Hit::new(10, SubPartId::Torso)).unwrap(),
        HitOutcome::Ignored
    );

    assert_eq!(enemy.state(), Some(EnemyStateId::Death));
    assert_eq!(rig.body.snapshot().ragdoll_activations, 1);
}

#[test]
fn test_reentering_current_state_keeps_timers() {
    let (mut enemy, _rig) = spawn(EnemyConfig {
        alert_duration: 2.0,
        ..Default::default()
    });
    enemy.set_target(Some(ahead(12.0)));
    tick(&mut enemy, DT);
    assert_eq!(enemy.state(), Some(EnemyStateId::Alert));

    for _ in 0..90 {
        tick(&mut enemy, DT);
    }
    let in_state = enemy.time_in_state();

    enemy.force_state("alert").unwrap();
    assert_eq!(enemy.time_in_state(), in_state);
    assert_eq!(enemy.previous_state(), Some(EnemyStateId::Idle));

    // Alert timer keeps counting from 1.5s; a reset would need another 2s
    for _ in 0..40 {
        tick(&mut enemy, DT);
    }
    assert_eq!(enemy.state(), Some(EnemyStateId::Patrol));
}

#[test]
fn test_turn_lands_exactly_on_target() {
    let phases = TurnPhases::new(0.6, 0.4, 0.2);
    let start = Quat::IDENTITY;
    let target = Quat::from_rotation_y(135f32.to_radians());

    let slicings: [&[f32]; 3] = [&[1.0 / 60.0], &[1.0 / 30.0, 0.007], &[0.25, 0.001, 0.1, 0.05]];
    for steps in slicings {
        let mut turn = TwoPhaseTurn::new(start, target, phases);
        let mut i = 0;
        while !turn.is_finished() {
            turn.advance(steps[i % steps.len()]);
            i += 1;
        }
        assert_eq!(turn.rotation(), target);
    }
}

#[test]
fn test_alert_turn_ends_facing_target() {
    let (mut enemy, rig) = spawn(EnemyConfig::default());
    enemy.set_target(Some(Vec3::new(-12.0, 0.0, 0.0)));

    tick(&mut enemy, DT);
    assert_eq!(enemy.state(), Some(EnemyStateId::Alert));

    // Uneven frame times
    let mut frame = 0;
    tick(&mut enemy, DT);
    assert!(enemy.is_turning());
    while enemy.is_turning() {
        let delta = if frame % 3 == 0 { 0.031 } else { 0.009 };
        tick(&mut enemy, delta);
        frame += 1;
        assert!(frame < 500, "turn never finished");
    }

    let yaw = geometry::signed_yaw_to(
        enemy.pose().position,
        enemy.pose().rotation,
        Vec3::new(-12.0, 0.0, 0.0),
    );
    assert!(yaw.abs() < 1e-2, "residual yaw {}", yaw);
    assert!(!rig.animator.flag(anim::IS_TURNING));
    assert_eq!(rig.animator.snapshot().played.last().map(String::as_str), Some(anim::TURN_LEFT));
}
