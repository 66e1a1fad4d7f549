//! Simulation app integration test
//!
//! Full Bevy App (MinimalPlugins + SimulationPlugin), actors driven only
//! through components and events:
//! - perception (player Transform → enemy target)
//! - HitEvent / AnimationCallback / ForceStateRequest / DebugOverrideToggle
//! - EntityDied / PlayerShotFired outputs
//! - fixed-step physics pass moving the player

use std::sync::Arc;
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use nightwatch_simulation::player::PlayerShotFired;
use nightwatch_simulation::*;

#[derive(Resource, Default)]
struct Outbox {
    deaths: Vec<Entity>,
    shots: Vec<PlayerShotFired>,
}

fn collect_outputs(
    mut deaths: EventReader<EntityDied>,
    mut shots: EventReader<PlayerShotFired>,
    mut outbox: ResMut<Outbox>,
) {
    outbox.deaths.extend(deaths.read().map(|death| death.entity));
    outbox.shots.extend(shots.read().copied());
}

/// Helper: headless app, one update = 1/60s
fn create_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)))
        .init_resource::<Outbox>()
        .add_systems(Update, collect_outputs);
    app
}

fn spawn_player(app: &mut App, position: Vec3) -> Entity {
    let seed = app.world_mut().resource_mut::<DeterministicRng>().next_seed();
    let player = PlayerActor::new(
        "Player",
        Arc::new(PlayerConfig::default()),
        HeadlessRig::new().ports(),
        Pose::at(position),
        seed,
    )
    .unwrap();
    app.world_mut()
        .spawn((player, Transform::from_translation(position), PlayerInput::default()))
        .id()
}

fn spawn_enemy(app: &mut App, position: Vec3, config: EnemyConfig) -> (Entity, HeadlessRig) {
    let seed = app.world_mut().resource_mut::<DeterministicRng>().next_seed();
    let rig = HeadlessRig::new();
    let enemy = Enemy::new("Sentry", Arc::new(config), rig.ports(), Pose::at(position), seed)
        .unwrap();
    let entity = app
        .world_mut()
        .spawn((enemy, Transform::from_translation(position)))
        .id();
    (entity, rig)
}

fn enemy_state(app: &App, entity: Entity) -> Option<EnemyStateId> {
    app.world().get::<Enemy>(entity).and_then(Enemy::state)
}

fn run(app: &mut App, updates: usize) {
    for _ in 0..updates {
        app.update();
    }
}

#[test]
fn test_enemy_notices_player() {
    let mut app = create_app(42);
    spawn_player(&mut app, Vec3::ZERO);
    let (sentry, _rig) = spawn_enemy(&mut app, Vec3::new(0.0, 0.0, -12.0), EnemyConfig::default());

    run(&mut app, 2);
    assert_eq!(enemy_state(&app, sentry), Some(EnemyStateId::Alert));
}

#[test]
fn test_hit_and_callbacks_through_events() {
    let mut app = create_app(42);
    spawn_player(&mut app, Vec3::ZERO);
    let (sentry, _rig) = spawn_enemy(&mut app, Vec3::new(0.0, 0.0, -8.0), EnemyConfig::default());
    app.world_mut().send_event(DebugOverrideToggle {
        entity: sentry,
        enabled: true,
    });
    run(&mut app, 5);
    assert_eq!(enemy_state(&app, sentry), Some(EnemyStateId::Idle));

    app.world_mut().send_event(DebugOverrideToggle {
        entity: sentry,
        enabled: false,
    });
    app.world_mut().send_event(HitEvent {
        target: sentry,
        hit: Hit::new(10, SubPartId::Torso),
    });
    app.update();
    assert_eq!(enemy_state(&app, sentry), Some(EnemyStateId::Aggro));

    app.world_mut().send_event(AnimationCallback {
        entity: sentry,
        event: AnimationEvent::AggroFinished,
    });
    app.update();
    assert_eq!(enemy_state(&app, sentry), Some(EnemyStateId::Chase));
}

#[test]
fn test_kill_emits_single_death() {
    let mut app = create_app(7);
    let player = spawn_player(&mut app, Vec3::ZERO);
    let (sentry, rig) = spawn_enemy(&mut app, Vec3::new(0.0, 0.0, -5.0), EnemyConfig::default());
    run(&mut app, 2);

    for _ in 0..3 {
        app.world_mut().send_event(HitEvent {
            target: sentry,
            hit: Hit::new(60, SubPartId::Torso),
        });
    }
    run(&mut app, 3);

    let outbox = app.world().resource::<Outbox>();
    assert_eq!(outbox.deaths, vec![sentry]);
    assert_eq!(enemy_state(&app, sentry), Some(EnemyStateId::Death));
    assert!(rig.body.snapshot().ragdoll_active);

    // Hits on the player only clamp its health
    app.world_mut().send_event(HitEvent {
        target: player,
        hit: Hit::new(30, SubPartId::Torso),
    });
    app.update();
    let health = app.world().get::<PlayerActor>(player).unwrap().current_health();
    assert_eq!(health, 70);
}

#[test]
fn test_force_requests() {
    let mut app = create_app(3);
    spawn_player(&mut app, Vec3::ZERO);
    let (sentry, _rig) =
        spawn_enemy(&mut app, Vec3::new(0.0, 0.0, -30.0), EnemyConfig::default());

    app.world_mut().send_event(ForceStateRequest {
        entity: sentry,
        state: "NoSuchState".to_string(),
    });
    app.update();
    assert_eq!(enemy_state(&app, sentry), Some(EnemyStateId::Idle));

    app.world_mut().send_event(DebugOverrideToggle {
        entity: sentry,
        enabled: true,
    });
    app.world_mut().send_event(ForceStateRequest {
        entity: sentry,
        state: "attack".to_string(),
    });
    run(&mut app, 10);
    assert_eq!(enemy_state(&app, sentry), Some(EnemyStateId::Attack));

    app.world_mut().send_event(ForceStateRequest {
        entity: sentry,
        state: "Death".to_string(),
    });
    app.update();
    assert_eq!(app.world().resource::<Outbox>().deaths, vec![sentry]);
}

#[test]
fn test_player_walks_and_shoots() {
    let mut app = create_app(42);
    let player = spawn_player(&mut app, Vec3::ZERO);

    app.world_mut()
        .entity_mut(player)
        .insert(PlayerInput {
            move_axis: Vec2::new(0.0, 1.0),
            ..Default::default()
        });
    run(&mut app, 60);

    let transform = *app.world().get::<Transform>(player).unwrap();
    assert!(transform.translation.z < -1.0, "player did not move: {:?}", transform.translation);
    assert_eq!(
        app.world().get::<PlayerActor>(player).unwrap().state(),
        Some(PlayerStateId::Strafe)
    );

    app.world_mut().entity_mut(player).insert(PlayerInput {
        aim: true,
        fire: true,
        ..Default::default()
    });
    // 0.5s of held trigger at 0.1s interval
    run(&mut app, 31);

    let outbox = app.world().resource::<Outbox>();
    assert!((5..=6).contains(&outbox.shots.len()), "shots: {}", outbox.shots.len());
    assert!(outbox.shots.iter().all(|shot| shot.shooter == player));
}

#[test]
fn test_same_seed_same_world() {
    fn scripted_run(seed: u64) -> (Vec<ActorSnapshot>, Option<Vec3>) {
        let mut app = create_app(seed);
        spawn_player(&mut app, Vec3::ZERO);
        let (sentry, rig) = spawn_enemy(
            &mut app,
            Vec3::new(0.0, 0.0, -30.0),
            EnemyConfig {
                starts_patrolling: true,
                ..Default::default()
            },
        );
        run(&mut app, 30);
        app.world_mut().send_event(HitEvent {
            target: sentry,
            hit: Hit::new(20, SubPartId::LeftLeg),
        });
        run(&mut app, 30);

        (world_snapshot(app.world_mut()), rig.navigation.snapshot().target)
    }

    let (actors, nav_target) = scripted_run(42);
    assert_eq!(actors.len(), 2);
    assert_eq!(actors[1].label, "Sentry");
    assert_eq!(actors[1].health, 80);
    assert_eq!(actors[1].state, "Aggro");
    assert_eq!((actors, nav_target), scripted_run(42));
}
