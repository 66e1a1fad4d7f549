use crate::ai::body::EnemyBody;
use crate::ai::config::EnemyConfig;
use crate::ai::states::{anim, EnemyStateId};
use crate::fsm::BehaviorState;

/// Standing still until the target comes into alert range
pub struct IdleState {
    alert_range: f32,
}

impl IdleState {
    pub fn new(config: &EnemyConfig) -> Self {
        Self {
            alert_range: config.alert_range,
        }
    }
}

impl BehaviorState<EnemyStateId, EnemyBody> for IdleState {
    fn id(&self) -> EnemyStateId {
        EnemyStateId::Idle
    }

    fn enter(&mut self, body: &mut EnemyBody) {
        body.navigation.disable();
        body.blend_speed_to(0.0);
        body.animator.set_flag(anim::IS_IDLE, true);
    }

    fn exit(&mut self, body: &mut EnemyBody, _next: EnemyStateId) {
        body.animator.set_flag(anim::IS_IDLE, false);
    }

    fn logic_update(&mut self, body: &mut EnemyBody) -> Option<EnemyStateId> {
        if body.debug_override {
            return None;
        }
        body.target_in_range(self.alert_range)
            .then_some(EnemyStateId::Alert)
    }
}
