//! Shared Move logic (Idle / Strafe / Sprint)

use crate::player::body::PlayerBody;

use super::PlayerStateId;

/// Where the input points the locomotion part of the graph
pub(super) fn desired_state(body: &PlayerBody) -> PlayerStateId {
    if body.input.aim {
        PlayerStateId::Aim
    } else if !body.has_move_input() {
        PlayerStateId::Idle
    } else if body.input.sprint {
        PlayerStateId::Sprint
    } else {
        PlayerStateId::Strafe
    }
}

/// Transition request unless the input already matches `current`
pub(super) fn transition_from(current: PlayerStateId, body: &PlayerBody) -> Option<PlayerStateId> {
    let desired = desired_state(body);
    (desired != current).then_some(desired)
}

/// Velocity + facing toward the movement direction (slow turn)
pub(super) fn move_physics(body: &mut PlayerBody) {
    let direction = body.steer();
    let rate = body.config.move_turn_rate;
    body.face_direction(direction, rate);
}
