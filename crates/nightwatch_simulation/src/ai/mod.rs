//! AI behavior module
//!
//! Enemy = StateMachine + 8 states (Idle/Alert/Patrol/Aggro/Chase/Attack/
//! Death + HitReaction interrupt) + EnemyBody context + sub-part damage.

use bevy::prelude::*;

pub mod body;
pub mod config;
pub mod enemy;
pub mod limbs;
pub mod states;
pub mod systems;


// Re-export основных типов
pub use body::{EnemyBody, ImpactRecord};
pub use config::EnemyConfig;
pub use enemy::{Enemy, HitOutcome};
pub use limbs::{Limb, LimbSet};
pub use states::EnemyStateId;

/// AI Plugin
///
/// Порядок выполнения (PreUpdate, chained):
/// 1. sync_enemy_perception — Transform / player position → Enemy
/// 2. apply_enemy_hits — HitEvent → process_hit (+ EntityDied)
/// 3. route_enemy_animation_callbacks — AnimationCallback → active state
/// 4. apply_enemy_force_requests / apply_enemy_debug_toggles — debug tooling
/// 5. enemy_logic_pass
///
/// FixedUpdate: enemy_physics_pass. PostUpdate: enemy_late_pass.
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        crate::shared::register_actor_events(app);

        app.add_systems(
            PreUpdate,
            (
                systems::sync_enemy_perception,
                systems::apply_enemy_hits,
                systems::route_enemy_animation_callbacks,
                systems::apply_enemy_force_requests,
                systems::apply_enemy_debug_toggles,
                systems::enemy_logic_pass,
            )
                .chain(),
        )
        .add_systems(FixedUpdate, systems::enemy_physics_pass)
        .add_systems(PostUpdate, systems::enemy_late_pass);
    }
}
