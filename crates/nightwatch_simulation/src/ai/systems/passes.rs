//! Enemy update passes
//!
//! Frame order: logic (PreUpdate) → physics (FixedUpdate, 0..n per frame)
//! → late (PostUpdate). Rotations written by the physics pass go back into
//! `Transform`; position belongs to the navigation agent.

use bevy::prelude::*;

use crate::ai::Enemy;

/// System: logic pass (perception checks, timers, transitions)
pub fn enemy_logic_pass(time: Res<Time>, mut enemies: Query<&mut Enemy>) {
    let delta = time.delta_secs();

    for mut enemy in enemies.iter_mut() {
        if let Err(err) = enemy.logic_update(delta) {
            crate::log_error(&format!("❌ {}: logic pass failed: {}", enemy.label(), err));
        }
    }
}

/// System: physics pass (turn phases, attack facing, muscle restoration)
pub fn enemy_physics_pass(time: Res<Time<Fixed>>, mut enemies: Query<(&mut Enemy, &mut Transform)>) {
    let delta = time.delta_secs();

    for (mut enemy, mut transform) in enemies.iter_mut() {
        if let Err(err) = enemy.physics_update(delta) {
            crate::log_error(&format!("❌ {}: physics pass failed: {}", enemy.label(), err));
            continue;
        }
        transform.rotation = enemy.pose().rotation;
    }
}

/// System: late pass (post-animation flag refresh)
pub fn enemy_late_pass(time: Res<Time>, mut enemies: Query<&mut Enemy>) {
    let delta = time.delta_secs();

    for mut enemy in enemies.iter_mut() {
        if let Err(err) = enemy.late_update(delta) {
            crate::log_error(&format!("❌ {}: late pass failed: {}", enemy.label(), err));
        }
    }
}
