//! AI systems (Bevy host for the Enemy facade)
//!
//! - perception: Transform → Enemy pose, player position → Enemy target
//! - events: hits, animation callbacks, forced states, debug toggles
//! - passes: logic (PreUpdate), physics (FixedUpdate), late (PostUpdate)

pub mod events;
pub mod passes;

pub use events::*;
pub use passes::*;

use bevy::prelude::*;

use crate::ai::Enemy;
use crate::player::PlayerActor;
use crate::shared::Pose;

/// System: perception snapshot, pulled by value every frame
///
/// Target = first player in the world (single-player encounter).
pub fn sync_enemy_perception(
    mut enemies: Query<(&mut Enemy, &Transform)>,
    players: Query<&Transform, With<PlayerActor>>,
) {
    let target = players.iter().next().map(|transform| transform.translation);

    for (mut enemy, transform) in enemies.iter_mut() {
        enemy.set_pose(Pose::from(transform));
        enemy.set_target(target);
    }
}
