//! Nightwatch Simulation Core
//!
//! Actor behavior layer on Bevy 0.16: hierarchical-free FSM core, enemy AI
//! graph, player locomotion/combat graph.
//!
//! HYBRID ARCHITECTURE:
//! - Behavior layer = states, transitions, timers, ranges, health
//! - Engine layer = animation, navigation, ragdoll, raycasts (behind ports)
//!
//! Tick order per frame: logic (PreUpdate) → physics (FixedUpdate, 60Hz) →
//! late (PostUpdate).

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod error;
pub mod fsm;
pub mod logger;
pub mod player;
pub mod shared;

// Re-export базовых типов для удобства
pub use ai::{AIPlugin, Enemy, EnemyConfig, EnemyStateId, HitOutcome};
pub use error::{BehaviorError, BehaviorResult};
pub use fsm::{BehaviorState, StateId, StateMachine, StateRegistry};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, log_with_level, set_log_level, set_logger,
    LogLevel, LogPrinter,
};
pub use player::{CameraBasis, PlayerActor, PlayerConfig, PlayerInput, PlayerPlugin, PlayerStateId};
pub use shared::{
    ActorPorts, AnimationCallback, AnimationEvent, DebugOverrideToggle, EntityDied,
    ForceStateRequest, HeadlessRig, Health, Hit, HitEvent, Pose, SubPartId,
};

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для physics pass
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .add_plugins((AIPlugin, PlayerPlugin));

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
    }
}

/// Детерминистичный RNG resource (seeded)
///
/// Every actor gets its own ChaCha stream seeded from here, so spawn order
/// alone decides the random sequence of each actor.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed for the next spawned actor
    pub fn next_seed(&mut self) -> u64 {
        self.rng.gen()
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);

    app
}

/// Behavior-level view of one actor, for determinism checks and debugging
#[derive(Debug, Clone, PartialEq)]
pub struct ActorSnapshot {
    pub entity: u32,
    pub label: String,
    pub state: &'static str,
    pub health: i32,
    pub pose: Pose,
}

/// Snapshot мира для сравнения детерминизма
///
/// Every enemy and player actor, ordered by entity index.
pub fn world_snapshot(world: &mut World) -> Vec<ActorSnapshot> {
    let mut snapshot: Vec<ActorSnapshot> = world
        .query::<(Entity, &Enemy)>()
        .iter(world)
        .map(|(entity, enemy)| ActorSnapshot {
            entity: entity.index(),
            label: enemy.label().to_string(),
            state: enemy.state_name(),
            health: enemy.current_health(),
            pose: enemy.pose(),
        })
        .collect();

    snapshot.extend(
        world
            .query::<(Entity, &PlayerActor)>()
            .iter(world)
            .map(|(entity, player)| ActorSnapshot {
                entity: entity.index(),
                label: player.label().to_string(),
                state: player.state_name(),
                health: player.current_health(),
                pose: player.pose(),
            }),
    );

    snapshot.sort_by_key(|actor| actor.entity);
    snapshot
}
