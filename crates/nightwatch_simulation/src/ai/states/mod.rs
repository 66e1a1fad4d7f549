//! AI behavior graph
//!
//! ```text
//! Idle → Alert → Aggro → Chase → Attack
//!          ↓       ↑ ↖______________↙
//!        Patrol ───┘
//! HitReaction (interrupt) → Aggro
//! Death (terminal, guarded by the Enemy facade)
//! ```
//!
//! Range-triggered transitions are skipped while `debug_override` is on;
//! forced transitions and animation callbacks still work.

use crate::ai::body::EnemyBody;
use crate::ai::config::EnemyConfig;
use crate::fsm::{StateId, StateRegistry};

mod aggro;
mod alert;
mod attack;
mod chase;
mod death;
mod hit_reaction;
mod idle;
mod patrol;
mod turning;

pub use aggro::AggroState;
pub use alert::AlertState;
pub use attack::AttackState;
pub use chase::ChaseState;
pub use death::DeathState;
pub use hit_reaction::HitReactionState;
pub use idle::IdleState;
pub use patrol::PatrolState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyStateId {
    Idle,
    Alert,
    Patrol,
    Aggro,
    Chase,
    Attack,
    Death,
    HitReaction,
}

impl EnemyStateId {
    /// Calm states: later hits skip the aggro animation and go straight to Chase
    pub fn is_calm(self) -> bool {
        matches!(
            self,
            EnemyStateId::Idle | EnemyStateId::Patrol | EnemyStateId::Alert
        )
    }
}

impl StateId for EnemyStateId {
    fn name(self) -> &'static str {
        match self {
            EnemyStateId::Idle => "Idle",
            EnemyStateId::Alert => "Alert",
            EnemyStateId::Patrol => "Patrol",
            EnemyStateId::Aggro => "Aggro",
            EnemyStateId::Chase => "Chase",
            EnemyStateId::Attack => "Attack",
            EnemyStateId::Death => "Death",
            EnemyStateId::HitReaction => "HitReaction",
        }
    }

    fn all() -> &'static [Self] {
        &[
            EnemyStateId::Idle,
            EnemyStateId::Alert,
            EnemyStateId::Patrol,
            EnemyStateId::Aggro,
            EnemyStateId::Chase,
            EnemyStateId::Attack,
            EnemyStateId::Death,
            EnemyStateId::HitReaction,
        ]
    }
}

pub type EnemyStates = StateRegistry<EnemyStateId, EnemyBody>;

/// Every AI state, constructed once per actor
pub fn build_registry(config: &EnemyConfig) -> EnemyStates {
    let mut states = EnemyStates::new();
    states
        .register(IdleState::new(config))
        .register(AlertState::new(config))
        .register(PatrolState::new(config))
        .register(AggroState::new(config))
        .register(ChaseState::new(config))
        .register(AttackState::new(config))
        .register(DeathState::new())
        .register(HitReactionState::new(config));
    states
}

/// Animator parameter names (AnimationTree contract)
pub mod anim {
    pub const SPEED: &str = "Speed";
    pub const TURN_ANGLE: &str = "TurnAngle";

    pub const IS_IDLE: &str = "IsIdle";
    pub const IS_ALERT: &str = "IsAlert";
    pub const IS_PATROLLING: &str = "IsPatrolling";
    pub const IS_AGGRO: &str = "IsAggro";
    pub const IS_CHASING: &str = "IsChasing";
    pub const IS_ATTACKING: &str = "IsAttacking";
    pub const IN_ATTACK_RANGE: &str = "InAttackRange";
    pub const IS_HIT: &str = "IsHit";
    pub const IS_DEAD: &str = "IsDead";
    pub const IS_TURNING: &str = "IsTurning";

    pub const AGGRO: &str = "Aggro";
    pub const HIT: &str = "Hit";

    pub const TURN_LEFT: &str = "TurnLeft";
    pub const TURN_RIGHT: &str = "TurnRight";
    pub const DEATH: &str = "Death";
}

/// Turn clip for a signed yaw (positive = left)
pub(crate) fn turn_clip(yaw: f32) -> &'static str {
    if yaw >= 0.0 {
        anim::TURN_LEFT
    } else {
        anim::TURN_RIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_every_state() {
        let states = build_registry(&EnemyConfig::default());

        assert_eq!(states.len(), EnemyStateId::all().len());
        for id in EnemyStateId::all() {
            assert!(states.contains(*id), "{:?} missing", id);
            assert_eq!(states.get(*id).map(|s| s.id()), Some(*id));
        }
    }

    #[test]
    fn test_state_names() {
        assert_eq!(EnemyStateId::from_name("attack"), Some(EnemyStateId::Attack));
        assert_eq!(
            EnemyStateId::from_name("HitReaction"),
            Some(EnemyStateId::HitReaction)
        );
        assert_eq!(EnemyStateId::from_name("Dance"), None);
    }
}
