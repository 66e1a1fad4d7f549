use crate::fsm::BehaviorState;
use crate::player::body::PlayerBody;
use crate::player::config::PlayerConfig;

use super::{anim, moving, PlayerStateId};

pub struct SprintState {
    speed: f32,
}

impl SprintState {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            speed: config.sprint_speed,
        }
    }
}

impl BehaviorState<PlayerStateId, PlayerBody> for SprintState {
    fn id(&self) -> PlayerStateId {
        PlayerStateId::Sprint
    }

    fn enter(&mut self, body: &mut PlayerBody) {
        body.blend_speed_to(self.speed);
        body.animator.set_flag(anim::IS_MOVING, true);
        body.animator.set_flag(anim::IS_SPRINTING, true);
    }

    fn exit(&mut self, body: &mut PlayerBody, _next: PlayerStateId) {
        body.animator.set_flag(anim::IS_MOVING, false);
        body.animator.set_flag(anim::IS_SPRINTING, false);
    }

    fn logic_update(&mut self, body: &mut PlayerBody) -> Option<PlayerStateId> {
        moving::transition_from(PlayerStateId::Sprint, body)
    }

    fn physics_update(&mut self, body: &mut PlayerBody) -> Option<PlayerStateId> {
        moving::move_physics(body);
        None
    }
}
