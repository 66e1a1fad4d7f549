use crate::ai::body::EnemyBody;
use crate::ai::config::EnemyConfig;
use crate::ai::states::{anim, EnemyStateId};
use crate::fsm::BehaviorState;

/// Stagger after a heavy hit, then back to Aggro
///
/// Damage is already applied by the facade; entering consumes the pending
/// hit's physical impact.
pub struct HitReactionState {
    duration: f32,

    remaining: f32,
}

impl HitReactionState {
    pub fn new(config: &EnemyConfig) -> Self {
        Self {
            duration: config.hit_reaction_duration,
            remaining: 0.0,
        }
    }
}

impl BehaviorState<EnemyStateId, EnemyBody> for HitReactionState {
    fn id(&self) -> EnemyStateId {
        EnemyStateId::HitReaction
    }

    fn enter(&mut self, body: &mut EnemyBody) {
        self.remaining = self.duration;

        if let Some(hit) = body.take_pending_hit() {
            body.apply_impact(&hit);
        }
        body.navigation.disable();
        body.blend_speed_to(0.0);
        body.animator.set_flag(anim::IS_HIT, true);
        body.animator.set_trigger(anim::HIT);
    }

    fn exit(&mut self, body: &mut EnemyBody, _next: EnemyStateId) {
        body.animator.set_flag(anim::IS_HIT, false);
    }

    fn logic_update(&mut self, body: &mut EnemyBody) -> Option<EnemyStateId> {
        // Timer, not a range check: runs under debug override too
        self.remaining -= body.delta;
        (self.remaining <= 0.0).then_some(EnemyStateId::Aggro)
    }
}
