//! External events → Enemy facade

use bevy::prelude::*;

use crate::ai::{Enemy, HitOutcome};
use crate::shared::{AnimationCallback, DebugOverrideToggle, EntityDied, ForceStateRequest, HitEvent};

/// System: damage → `Enemy::process_hit`, emits `EntityDied` on the killing blow
pub fn apply_enemy_hits(
    mut hits: EventReader<HitEvent>,
    mut enemies: Query<&mut Enemy>,
    mut died: EventWriter<EntityDied>,
) {
    for event in hits.read() {
        let Ok(mut enemy) = enemies.get_mut(event.target) else {
            continue;
        };

        match enemy.process_hit(event.hit) {
            Ok(HitOutcome::Killed) => {
                died.write(EntityDied {
                    entity: event.target,
                });
            }
            Ok(_) => {}
            Err(err) => crate::log_error(&format!("❌ {}: hit not applied: {}", enemy.label(), err)),
        }
    }
}

/// System: animation-complete callbacks → active state (or dropped)
pub fn route_enemy_animation_callbacks(
    mut callbacks: EventReader<AnimationCallback>,
    mut enemies: Query<&mut Enemy>,
) {
    for callback in callbacks.read() {
        let Ok(mut enemy) = enemies.get_mut(callback.entity) else {
            continue;
        };

        if let Err(err) = enemy.handle_animation_event(callback.event) {
            crate::log_error(&format!(
                "❌ {}: {:?} failed: {}",
                enemy.label(),
                callback.event,
                err
            ));
        }
    }
}

/// System: debug console `force_state`
pub fn apply_enemy_force_requests(
    mut requests: EventReader<ForceStateRequest>,
    mut enemies: Query<&mut Enemy>,
    mut died: EventWriter<EntityDied>,
) {
    for request in requests.read() {
        let Ok(mut enemy) = enemies.get_mut(request.entity) else {
            continue;
        };

        let was_dead = enemy.is_dead();
        match enemy.force_state(&request.state) {
            Ok(()) if !was_dead && enemy.is_dead() => {
                died.write(EntityDied {
                    entity: request.entity,
                });
            }
            Ok(()) => {}
            Err(err) => crate::log_error(&format!("❌ force_state rejected: {}", err)),
        }
    }
}

/// System: debug override on/off
pub fn apply_enemy_debug_toggles(
    mut toggles: EventReader<DebugOverrideToggle>,
    mut enemies: Query<&mut Enemy>,
) {
    for toggle in toggles.read() {
        if let Ok(mut enemy) = enemies.get_mut(toggle.entity) {
            enemy.set_debug_override(toggle.enabled);
        }
    }
}
