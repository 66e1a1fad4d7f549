//! Player systems (Bevy host for PlayerActor)
//!
//! Position is integrated here from the desired velocity (headless stand-in
//! for the engine's character controller).

use bevy::prelude::*;

use crate::shared::{AnimationCallback, DebugOverrideToggle, ForceStateRequest, HitEvent, Pose};

use super::actor::PlayerActor;
use super::input::{CameraBasis, PlayerInput};

/// Player shot accepted by the fire-rate gate
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerShotFired {
    pub shooter: Entity,
    pub origin: Vec3,
    pub direction: Vec3,
}

/// System: Transform / input / camera → PlayerActor
pub fn sync_player_perception(
    camera: Res<CameraBasis>,
    mut players: Query<(&mut PlayerActor, &Transform, &PlayerInput)>,
) {
    for (mut player, transform, input) in players.iter_mut() {
        player.set_pose(Pose::from(transform));
        player.set_input(*input);
        player.set_camera(*camera);
    }
}

/// System: damage on players (health clamp only)
pub fn apply_player_hits(mut hits: EventReader<HitEvent>, mut players: Query<&mut PlayerActor>) {
    for event in hits.read() {
        if let Ok(mut player) = players.get_mut(event.target) {
            player.process_hit(event.hit);
        }
    }
}

pub fn route_player_animation_callbacks(
    mut callbacks: EventReader<AnimationCallback>,
    mut players: Query<&mut PlayerActor>,
) {
    for callback in callbacks.read() {
        let Ok(mut player) = players.get_mut(callback.entity) else {
            continue;
        };
        if let Err(err) = player.handle_animation_event(callback.event) {
            crate::log_error(&format!("❌ {}: {:?} failed: {}", player.label(), callback.event, err));
        }
    }
}

pub fn apply_player_force_requests(
    mut requests: EventReader<ForceStateRequest>,
    mut players: Query<&mut PlayerActor>,
) {
    for request in requests.read() {
        let Ok(mut player) = players.get_mut(request.entity) else {
            continue;
        };
        if let Err(err) = player.force_state(&request.state) {
            crate::log_error(&format!("❌ force_state rejected: {}", err));
        }
    }
}

pub fn apply_player_debug_toggles(
    mut toggles: EventReader<DebugOverrideToggle>,
    mut players: Query<&mut PlayerActor>,
) {
    for toggle in toggles.read() {
        if let Ok(mut player) = players.get_mut(toggle.entity) {
            player.set_debug_override(toggle.enabled);
        }
    }
}

/// System: logic pass + shot outbox → `PlayerShotFired`
pub fn player_logic_pass(
    time: Res<Time>,
    mut players: Query<(Entity, &mut PlayerActor)>,
    mut shots: EventWriter<PlayerShotFired>,
) {
    let delta = time.delta_secs();

    for (entity, mut player) in players.iter_mut() {
        if let Err(err) = player.logic_update(delta) {
            crate::log_error(&format!("❌ {}: logic pass failed: {}", player.label(), err));
        }

        for shot in player.drain_shots() {
            shots.write(PlayerShotFired {
                shooter: entity,
                origin: shot.origin,
                direction: shot.direction,
            });
        }
    }
}

/// System: physics pass, then velocity integration + facing write-back
pub fn player_physics_pass(
    time: Res<Time<Fixed>>,
    mut players: Query<(&mut PlayerActor, &mut Transform)>,
) {
    let delta = time.delta_secs();

    for (mut player, mut transform) in players.iter_mut() {
        if let Err(err) = player.physics_update(delta) {
            crate::log_error(&format!("❌ {}: physics pass failed: {}", player.label(), err));
            continue;
        }

        transform.translation += player.velocity() * delta;
        transform.rotation = player.pose().rotation;
        player.set_pose(Pose::from(&*transform));
    }
}

pub fn player_late_pass(time: Res<Time>, mut players: Query<&mut PlayerActor>) {
    let delta = time.delta_secs();

    for mut player in players.iter_mut() {
        if let Err(err) = player.late_update(delta) {
            crate::log_error(&format!("❌ {}: late pass failed: {}", player.label(), err));
        }
    }
}
