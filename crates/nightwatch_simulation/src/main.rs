//! Headless Nightwatch encounter
//!
//! Player walks toward a sentry, the sentry notices, aggroes and closes in,
//! the player aims and shoots until it goes down. Animation callbacks are
//! scripted from time-in-state (no animation layer in headless mode).

use std::sync::Arc;
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use nightwatch_simulation::player::PlayerShotFired;
use nightwatch_simulation::{
    create_headless_app, AnimationCallback, AnimationEvent, DeterministicRng, Enemy, EnemyConfig,
    EnemyStateId, EntityDied, HeadlessRig, Hit, HitEvent, PlayerActor, PlayerConfig, PlayerInput,
    Pose, SubPartId,
};

const TICK_COUNT: usize = 1200;
const SHOT_DAMAGE: i32 = 12;

#[derive(Resource, Default)]
struct Encounter {
    sentry_down: bool,
}

/// Sends the callbacks an animation tree would raise when a clip ends
fn script_animation_callbacks(
    enemies: Query<(Entity, &Enemy)>,
    mut callbacks: EventWriter<AnimationCallback>,
) {
    for (entity, enemy) in enemies.iter() {
        let event = match enemy.state() {
            Some(EnemyStateId::Aggro) if enemy.time_in_state() >= 0.8 => AnimationEvent::AggroFinished,
            Some(EnemyStateId::Attack) if enemy.time_in_state() >= 1.2 => AnimationEvent::AttackFinished,
            _ => continue,
        };
        callbacks.write(AnimationCallback { entity, event });
    }
}

/// Hitscan stand-in: every player shot lands on the closest living enemy
fn resolve_shots(
    mut shots: EventReader<PlayerShotFired>,
    enemies: Query<(Entity, &Enemy, &Transform)>,
    mut hits: EventWriter<HitEvent>,
) {
    for shot in shots.read() {
        let target = enemies
            .iter()
            .filter(|(_, enemy, _)| !enemy.is_dead())
            .min_by(|(_, _, a), (_, _, b)| {
                let da = a.translation.distance_squared(shot.origin);
                let db = b.translation.distance_squared(shot.origin);
                da.total_cmp(&db)
            });

        if let Some((entity, _, _)) = target {
            hits.write(HitEvent {
                target: entity,
                hit: Hit::new(SHOT_DAMAGE, SubPartId::Torso).with_impulse(shot.direction, 4.0),
            });
        }
    }
}

/// Player script: walk in until the sentry engages, then hold still and fire
fn drive_player(
    mut players: Query<(&Transform, &mut PlayerInput), With<PlayerActor>>,
    enemies: Query<(&Enemy, &Transform)>,
) {
    let Some((sentry, sentry_transform)) = enemies.iter().next() else {
        return;
    };

    for (transform, mut input) in players.iter_mut() {
        let engaged = matches!(
            sentry.state(),
            Some(EnemyStateId::Aggro | EnemyStateId::Chase | EnemyStateId::Attack | EnemyStateId::HitReaction)
        );
        let close = transform.translation.distance(sentry_transform.translation) <= 6.0;

        *input = if sentry.is_dead() {
            PlayerInput::default()
        } else if engaged && close {
            PlayerInput {
                aim: true,
                fire: true,
                ..Default::default()
            }
        } else {
            PlayerInput {
                move_axis: Vec2::new(0.0, 1.0),
                ..Default::default()
            }
        };
    }
}

fn report_deaths(mut deaths: EventReader<EntityDied>, mut encounter: ResMut<Encounter>) {
    for death in deaths.read() {
        println!("☠️ {:?} died", death.entity);
        encounter.sentry_down = true;
    }
}

fn main() {
    let seed = 42;
    println!("Starting Nightwatch headless encounter (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)))
        .init_resource::<Encounter>()
        .add_systems(First, (drive_player, script_animation_callbacks))
        .add_systems(Update, (resolve_shots, report_deaths));

    let (player_seed, sentry_seed) = {
        let mut rng = app.world_mut().resource_mut::<DeterministicRng>();
        (rng.next_seed(), rng.next_seed())
    };

    let player_rig = HeadlessRig::new();
    let player = PlayerActor::new(
        "Player",
        Arc::new(PlayerConfig::default()),
        player_rig.ports(),
        Pose::default(),
        player_seed,
    );

    let sentry_rig = HeadlessRig::new();
    let sentry_spawn = Vec3::new(0.0, 0.0, -20.0);
    let sentry = Enemy::new(
        "Sentry",
        Arc::new(EnemyConfig::default()),
        sentry_rig.ports(),
        // Facing the player's approach
        Pose::new(sentry_spawn, Quat::from_rotation_y(std::f32::consts::PI)),
        sentry_seed,
    );

    let (player, sentry) = match (player, sentry) {
        (Ok(player), Ok(sentry)) => (player, sentry),
        (Err(err), _) | (_, Err(err)) => {
            eprintln!("Failed to spawn actors: {}", err);
            return;
        }
    };

    app.world_mut()
        .spawn((player, Transform::default(), PlayerInput::default()));
    app.world_mut().spawn((
        sentry,
        Transform::from_translation(sentry_spawn)
            .with_rotation(Quat::from_rotation_y(std::f32::consts::PI)),
    ));

    let mut last_state = None;
    for tick in 0..TICK_COUNT {
        app.update();

        let world = app.world_mut();
        let mut query = world.query::<&Enemy>();
        if let Some(enemy) = query.iter(world).next() {
            if enemy.state() != last_state {
                println!(
                    "Tick {}: Sentry → {} (HP {}/{})",
                    tick,
                    enemy.state_name(),
                    enemy.current_health(),
                    enemy.health().max
                );
                last_state = enemy.state();
            }
        }

        if app.world().resource::<Encounter>().sentry_down {
            println!("Encounter finished at tick {}", tick);
            break;
        }
    }

    let record = sentry_rig.body.snapshot();
    println!(
        "Sentry rig: {} impulses, ragdoll {}",
        record.impulses.len(),
        if record.ragdoll_active { "active" } else { "inactive" }
    );
    println!("Simulation complete!");
}
