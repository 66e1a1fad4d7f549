use crate::ai::body::EnemyBody;
use crate::ai::config::EnemyConfig;
use crate::ai::states::{anim, turning, EnemyStateId};
use crate::fsm::BehaviorState;
use crate::shared::{geometry, AnimationEvent, TurnPhases, TwoPhaseTurn};

/// Target noticed but not close enough to commit
///
/// - aggro range → Aggro
/// - alert range → keep facing the target (two-phase turn above threshold)
/// - alert range for longer than `alert_duration` → Patrol
/// - out of range → Idle
pub struct AlertState {
    alert_range: f32,
    aggro_range: f32,
    alert_duration: f32,
    turn_threshold: f32,
    phases: TurnPhases,

    timer: f32,
    turn: Option<TwoPhaseTurn>,
}

impl AlertState {
    pub fn new(config: &EnemyConfig) -> Self {
        Self {
            alert_range: config.alert_range,
            aggro_range: config.aggro_range,
            alert_duration: config.alert_duration,
            turn_threshold: config.alert_turn_threshold,
            phases: config.alert_turn,
            timer: 0.0,
            turn: None,
        }
    }

    /// Turn toward the target: a running turn follows the target,
    /// a new one only starts above the threshold
    fn track_target(&mut self, body: &mut EnemyBody) {
        let Some(yaw) = body.yaw_to_target() else {
            return;
        };
        body.animator.set_float(anim::TURN_ANGLE, yaw);

        match self.turn.as_mut() {
            Some(turn) => turn.retarget(geometry::yawed(body.pose.rotation, yaw)),
            None if yaw.abs() > self.turn_threshold => {
                self.turn = Some(turning::start(body, yaw, self.phases));
            }
            None => {}
        }
    }
}

impl BehaviorState<EnemyStateId, EnemyBody> for AlertState {
    fn id(&self) -> EnemyStateId {
        EnemyStateId::Alert
    }

    fn enter(&mut self, body: &mut EnemyBody) {
        self.timer = 0.0;
        self.turn = None;
        body.navigation.disable();
        body.blend_speed_to(0.0);
        body.animator.set_flag(anim::IS_ALERT, true);
    }

    fn exit(&mut self, body: &mut EnemyBody, _next: EnemyStateId) {
        turning::cancel(&mut self.turn, body);
        body.animator.set_flag(anim::IS_ALERT, false);
    }

    fn logic_update(&mut self, body: &mut EnemyBody) -> Option<EnemyStateId> {
        // Debug override freezes transitions and the timeout, facing keeps working
        let automatic = !body.debug_override;
        if automatic {
            self.timer += body.delta;
        }

        if automatic && body.target_in_range(self.aggro_range) {
            return Some(EnemyStateId::Aggro);
        }
        if !body.target_in_range(self.alert_range) {
            return automatic.then_some(EnemyStateId::Idle);
        }

        self.track_target(body);

        (automatic && self.timer >= self.alert_duration).then_some(EnemyStateId::Patrol)
    }

    fn physics_update(&mut self, body: &mut EnemyBody) -> Option<EnemyStateId> {
        turning::advance(&mut self.turn, body);
        None
    }

    fn handles(&self, event: AnimationEvent) -> bool {
        event == AnimationEvent::TurnFinished
    }

    fn on_animation_event(
        &mut self,
        body: &mut EnemyBody,
        _event: AnimationEvent,
    ) -> Option<EnemyStateId> {
        // Clip is over; the rotation itself still runs its phases to the end
        body.animator.set_flag(anim::IS_TURNING, false);
        None
    }
}
