use crate::ai::body::EnemyBody;
use crate::ai::config::EnemyConfig;
use crate::ai::states::{anim, EnemyStateId};
use crate::fsm::BehaviorState;
use crate::shared::{geometry, AnimationEvent};

/// Swinging at the target
///
/// Leaves for Aggro once the target is beyond `attack_range + attack_exit_margin`
/// (margin 0 = re-checked every tick without hysteresis) or when the attack
/// animation finishes. Lost momentum only drops the attacking flag.
pub struct AttackState {
    attack_range: f32,
    exit_range: f32,
    rotation_speed: f32,
}

impl AttackState {
    pub fn new(config: &EnemyConfig) -> Self {
        Self {
            attack_range: config.attack_range,
            exit_range: config.attack_range + config.attack_exit_margin,
            rotation_speed: config.rotation_speed,
        }
    }
}

impl BehaviorState<EnemyStateId, EnemyBody> for AttackState {
    fn id(&self) -> EnemyStateId {
        EnemyStateId::Attack
    }

    fn enter(&mut self, body: &mut EnemyBody) {
        body.navigation.disable();
        body.blend_speed_to(0.0);
        body.animator.set_flag(anim::IS_ATTACKING, true);
        body.animator.set_flag(anim::IN_ATTACK_RANGE, true);
    }

    fn exit(&mut self, body: &mut EnemyBody, _next: EnemyStateId) {
        body.animator.set_flag(anim::IS_ATTACKING, false);
        body.animator.set_flag(anim::IN_ATTACK_RANGE, false);
    }

    fn logic_update(&mut self, body: &mut EnemyBody) -> Option<EnemyStateId> {
        if body.debug_override {
            return None;
        }
        (!body.target_in_range(self.exit_range)).then_some(EnemyStateId::Aggro)
    }

    fn physics_update(&mut self, body: &mut EnemyBody) -> Option<EnemyStateId> {
        if let Some(facing) = body.facing_target() {
            body.pose.rotation = geometry::rotate_towards(
                body.pose.rotation,
                facing,
                self.rotation_speed * body.delta,
            );
        }
        None
    }

    fn late_update(&mut self, body: &mut EnemyBody) {
        let in_range = body.target_in_range(self.attack_range);
        body.animator.set_flag(anim::IN_ATTACK_RANGE, in_range);
    }

    fn handles(&self, event: AnimationEvent) -> bool {
        matches!(
            event,
            AnimationEvent::AttackFinished | AnimationEvent::AttackLostMomentum
        )
    }

    fn on_animation_event(
        &mut self,
        body: &mut EnemyBody,
        event: AnimationEvent,
    ) -> Option<EnemyStateId> {
        match event {
            AnimationEvent::AttackFinished => Some(EnemyStateId::Aggro),
            _ => {
                body.animator.set_flag(anim::IS_ATTACKING, false);
                None
            }
        }
    }
}
