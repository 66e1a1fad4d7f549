//! Player behavior graph
//!
//! ```text
//! Idle ⇄ Strafe ⇄ Sprint
//!   ↘     ↓      ↙
//!        Aim ⇄ Shoot
//! ```
//!
//! Input-driven; no death state (player damage only clamps health).
//! Debug override freezes Aim/Shoot transitions, the aim IK refresh keeps
//! running.

use crate::fsm::{StateId, StateRegistry};

use super::body::PlayerBody;
use super::config::PlayerConfig;

mod aim;
mod idle;
mod moving;
mod shoot;
mod sprint;
mod strafe;

pub use aim::AimState;
pub use idle::IdleState;
pub use shoot::ShootState;
pub use sprint::SprintState;
pub use strafe::StrafeState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerStateId {
    Idle,
    Strafe,
    Sprint,
    Aim,
    Shoot,
}

impl StateId for PlayerStateId {
    fn name(self) -> &'static str {
        match self {
            PlayerStateId::Idle => "Idle",
            PlayerStateId::Strafe => "Strafe",
            PlayerStateId::Sprint => "Sprint",
            PlayerStateId::Aim => "Aim",
            PlayerStateId::Shoot => "Shoot",
        }
    }

    fn all() -> &'static [Self] {
        &[
            PlayerStateId::Idle,
            PlayerStateId::Strafe,
            PlayerStateId::Sprint,
            PlayerStateId::Aim,
            PlayerStateId::Shoot,
        ]
    }
}

pub type PlayerStates = StateRegistry<PlayerStateId, PlayerBody>;

pub fn build_registry(config: &PlayerConfig) -> PlayerStates {
    let mut states = PlayerStates::new();
    states
        .register(IdleState::new())
        .register(StrafeState::new(config))
        .register(SprintState::new(config))
        .register(AimState::new(config))
        .register(ShootState::new(config));
    states
}

/// Animator parameter names
pub mod anim {
    pub const SPEED: &str = "Speed";
    pub const MOVE_X: &str = "MoveX";
    pub const MOVE_Y: &str = "MoveY";
    pub const AIM_PITCH: &str = "AimPitch";

    pub const IS_MOVING: &str = "IsMoving";
    pub const IS_SPRINTING: &str = "IsSprinting";
    pub const IS_AIMING: &str = "IsAiming";
    pub const IS_SHOOTING: &str = "IsShooting";

    pub const FIRE: &str = "Fire";
}
