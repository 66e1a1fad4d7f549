use crate::ai::body::EnemyBody;
use crate::ai::config::EnemyConfig;
use crate::ai::states::{anim, turning, EnemyStateId};
use crate::fsm::BehaviorState;
use crate::shared::{AnimationEvent, TurnPhases, TwoPhaseTurn};

/// Aggro roar; turns once toward a target behind it, then Chase when the
/// aggro sequence finishes
pub struct AggroState {
    turn_threshold: f32,
    phases: TurnPhases,

    /// At most one turn per activation
    has_turned: bool,
    turn: Option<TwoPhaseTurn>,
}

impl AggroState {
    pub fn new(config: &EnemyConfig) -> Self {
        Self {
            turn_threshold: config.aggro_turn_threshold,
            phases: config.aggro_turn,
            has_turned: false,
            turn: None,
        }
    }
}

impl BehaviorState<EnemyStateId, EnemyBody> for AggroState {
    fn id(&self) -> EnemyStateId {
        EnemyStateId::Aggro
    }

    fn enter(&mut self, body: &mut EnemyBody) {
        self.has_turned = false;
        self.turn = None;

        body.has_aggroed_before = true;
        body.navigation.disable();
        body.blend_speed_to(0.0);
        body.animator.set_flag(anim::IS_AGGRO, true);
        body.animator.set_trigger(anim::AGGRO);
    }

    fn exit(&mut self, body: &mut EnemyBody, _next: EnemyStateId) {
        turning::cancel(&mut self.turn, body);
        body.animator.set_flag(anim::IS_AGGRO, false);
    }

    fn logic_update(&mut self, body: &mut EnemyBody) -> Option<EnemyStateId> {
        let yaw = body.yaw_to_target()?;
        body.animator.set_float(anim::TURN_ANGLE, yaw);

        if !self.has_turned && yaw.abs() > self.turn_threshold {
            self.has_turned = true;
            self.turn = Some(turning::start(body, yaw, self.phases));
        }
        None
    }

    fn physics_update(&mut self, body: &mut EnemyBody) -> Option<EnemyStateId> {
        turning::advance(&mut self.turn, body);
        None
    }

    fn handles(&self, event: AnimationEvent) -> bool {
        event == AnimationEvent::AggroFinished
    }

    fn on_animation_event(
        &mut self,
        _body: &mut EnemyBody,
        _event: AnimationEvent,
    ) -> Option<EnemyStateId> {
        Some(EnemyStateId::Chase)
    }
}
