use crate::fsm::BehaviorState;
use crate::player::body::PlayerBody;
use crate::player::config::PlayerConfig;

use super::{anim, moving, PlayerStateId};

/// Non-sprint movement
pub struct StrafeState {
    speed: f32,
}

impl StrafeState {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            speed: config.strafe_speed,
        }
    }
}

impl BehaviorState<PlayerStateId, PlayerBody> for StrafeState {
    fn id(&self) -> PlayerStateId {
        PlayerStateId::Strafe
    }

    fn enter(&mut self, body: &mut PlayerBody) {
        body.blend_speed_to(self.speed);
        body.animator.set_flag(anim::IS_MOVING, true);
    }

    fn exit(&mut self, body: &mut PlayerBody, _next: PlayerStateId) {
        body.animator.set_flag(anim::IS_MOVING, false);
    }

    fn logic_update(&mut self, body: &mut PlayerBody) -> Option<PlayerStateId> {
        moving::transition_from(PlayerStateId::Strafe, body)
    }

    fn physics_update(&mut self, body: &mut PlayerBody) -> Option<PlayerStateId> {
        moving::move_physics(body);
        None
    }
}
