use crate::ai::body::EnemyBody;
use crate::ai::states::{anim, EnemyStateId};
use crate::fsm::BehaviorState;

/// Terminal. Only `Enemy::revive` leaves it.
#[derive(Default)]
pub struct DeathState;

impl DeathState {
    pub fn new() -> Self {
        Self
    }
}

impl BehaviorState<EnemyStateId, EnemyBody> for DeathState {
    fn id(&self) -> EnemyStateId {
        EnemyStateId::Death
    }

    fn enter(&mut self, body: &mut EnemyBody) {
        body.navigation.disable();
        body.stop_immediately();
        body.is_turning = false;
        body.animator.set_flag(anim::IS_DEAD, true);
        body.animator.play(anim::DEATH);

        if !body.ragdoll_active {
            body.ragdoll_active = true;
            body.reactions.activate_ragdoll();
            crate::log(&format!("💀 {}: ragdoll activated", body.label));
        }
    }

    fn exit(&mut self, body: &mut EnemyBody, _next: EnemyStateId) {
        body.animator.set_flag(anim::IS_DEAD, false);
    }

    fn logic_update(&mut self, _body: &mut EnemyBody) -> Option<EnemyStateId> {
        None
    }
}
