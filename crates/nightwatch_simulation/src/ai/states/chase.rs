use crate::ai::body::EnemyBody;
use crate::ai::config::EnemyConfig;
use crate::ai::states::{anim, EnemyStateId};
use crate::fsm::BehaviorState;

/// Navigation pursuit at chase speed until the target is within attack range
pub struct ChaseState {
    attack_range: f32,
    chase_speed: f32,
}

impl ChaseState {
    pub fn new(config: &EnemyConfig) -> Self {
        Self {
            attack_range: config.attack_range,
            chase_speed: config.chase_speed,
        }
    }
}

impl BehaviorState<EnemyStateId, EnemyBody> for ChaseState {
    fn id(&self) -> EnemyStateId {
        EnemyStateId::Chase
    }

    fn enter(&mut self, body: &mut EnemyBody) {
        if let Some(target) = body.target {
            body.navigation.set_target(target);
        }
        body.navigation.enable();
        body.blend_speed_to(self.chase_speed);
        body.animator.set_flag(anim::IS_CHASING, true);
    }

    fn exit(&mut self, body: &mut EnemyBody, _next: EnemyStateId) {
        body.animator.set_flag(anim::IS_CHASING, false);
    }

    fn logic_update(&mut self, body: &mut EnemyBody) -> Option<EnemyStateId> {
        if let Some(target) = body.target {
            body.navigation.set_target(target);
        }

        if body.debug_override {
            return None;
        }
        body.target_in_range(self.attack_range)
            .then_some(EnemyStateId::Attack)
    }
}
