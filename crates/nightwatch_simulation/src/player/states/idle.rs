use crate::fsm::BehaviorState;
use crate::player::body::PlayerBody;

use super::{anim, moving, PlayerStateId};

#[derive(Default)]
pub struct IdleState;

impl IdleState {
    pub fn new() -> Self {
        Self
    }
}

impl BehaviorState<PlayerStateId, PlayerBody> for IdleState {
    fn id(&self) -> PlayerStateId {
        PlayerStateId::Idle
    }

    fn enter(&mut self, body: &mut PlayerBody) {
        body.blend_speed_to(0.0);
        body.animator.set_flag(anim::IS_MOVING, false);
    }

    fn logic_update(&mut self, body: &mut PlayerBody) -> Option<PlayerStateId> {
        moving::transition_from(PlayerStateId::Idle, body)
    }

    fn physics_update(&mut self, body: &mut PlayerBody) -> Option<PlayerStateId> {
        body.steer();
        None
    }
}
