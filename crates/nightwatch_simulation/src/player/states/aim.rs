use crate::fsm::BehaviorState;
use crate::player::body::PlayerBody;
use crate::player::config::PlayerConfig;

use super::{anim, PlayerStateId};

/// Aiming down sights; slow movement, fast turn toward camera forward
pub struct AimState {
    move_speed: f32,
}

impl AimState {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            move_speed: config.aim_move_speed,
        }
    }
}

/// Aim → Strafe/Idle once aim is released (Shoot shares it)
pub(super) fn released_aim(body: &PlayerBody) -> Option<PlayerStateId> {
    if body.input.aim {
        return None;
    }
    Some(if body.has_move_input() {
        PlayerStateId::Strafe
    } else {
        PlayerStateId::Idle
    })
}

pub(super) fn aim_speed(body: &mut PlayerBody, move_speed: f32) {
    let target = if body.has_move_input() { move_speed } else { 0.0 };
    body.blend_speed_to(target);
}

pub(super) fn aim_physics(body: &mut PlayerBody) {
    body.steer();
    body.face_camera();
}

/// IK / aim offset refresh (runs under debug override too)
pub(super) fn aim_late(body: &mut PlayerBody) {
    let pitch = body.camera.pitch();
    body.animator.set_float(anim::AIM_PITCH, pitch);
}

impl BehaviorState<PlayerStateId, PlayerBody> for AimState {
    fn id(&self) -> PlayerStateId {
        PlayerStateId::Aim
    }

    fn enter(&mut self, body: &mut PlayerBody) {
        aim_speed(body, self.move_speed);
        body.animator.set_flag(anim::IS_AIMING, true);
    }

    fn exit(&mut self, body: &mut PlayerBody, next: PlayerStateId) {
        // Shoot keeps aiming
        if next != PlayerStateId::Shoot {
            body.animator.set_flag(anim::IS_AIMING, false);
        }
    }

    fn logic_update(&mut self, body: &mut PlayerBody) -> Option<PlayerStateId> {
        aim_speed(body, self.move_speed);

        if body.debug_override {
            return None;
        }
        if let Some(next) = released_aim(body) {
            return Some(next);
        }
        body.input.fire.then_some(PlayerStateId::Shoot)
    }

    fn physics_update(&mut self, body: &mut PlayerBody) -> Option<PlayerStateId> {
        aim_physics(body);
        None
    }

    fn late_update(&mut self, body: &mut PlayerBody) {
        aim_late(body);
    }
}
