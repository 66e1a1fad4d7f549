use crate::fsm::BehaviorState;
use crate::player::body::PlayerBody;
use crate::player::config::PlayerConfig;

use super::aim::{aim_late, aim_physics, aim_speed, released_aim};
use super::{anim, PlayerStateId};

/// Aim + held trigger. Fires on entry and every tick the cooldown allows.
pub struct ShootState {
    move_speed: f32,
}

impl ShootState {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            move_speed: config.aim_move_speed,
        }
    }
}

impl BehaviorState<PlayerStateId, PlayerBody> for ShootState {
    fn id(&self) -> PlayerStateId {
        PlayerStateId::Shoot
    }

    fn enter(&mut self, body: &mut PlayerBody) {
        aim_speed(body, self.move_speed);
        body.animator.set_flag(anim::IS_AIMING, true);
        body.animator.set_flag(anim::IS_SHOOTING, true);
        body.try_fire();
    }

    fn exit(&mut self, body: &mut PlayerBody, next: PlayerStateId) {
        body.animator.set_flag(anim::IS_SHOOTING, false);
        if next != PlayerStateId::Aim {
            body.animator.set_flag(anim::IS_AIMING, false);
        }
    }

    fn logic_update(&mut self, body: &mut PlayerBody) -> Option<PlayerStateId> {
        aim_speed(body, self.move_speed);

        if !body.debug_override {
            if let Some(next) = released_aim(body) {
                return Some(next);
            }
            if !body.input.fire {
                return Some(PlayerStateId::Aim);
            }
        }

        if body.input.fire {
            body.try_fire();
        }
        None
    }

    fn physics_update(&mut self, body: &mut PlayerBody) -> Option<PlayerStateId> {
        aim_physics(body);
        None
    }

    fn late_update(&mut self, body: &mut PlayerBody) {
        aim_late(body);
    }
}
