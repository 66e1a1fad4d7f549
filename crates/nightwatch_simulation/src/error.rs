//! Behavior errors
//!
//! Only programming/configuration mistakes are errors here.
//! Missing ports degrade to no-ops, unhandled animation callbacks and
//! out-of-range damage are normal gameplay and never show up as `Err`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BehaviorError {
    /// Transition target was never registered for this actor (construction-order bug)
    #[error("{owner}: state {state} is not registered")]
    UnregisteredState { owner: String, state: &'static str },

    /// `force_state` with a name no state of the graph answers to
    #[error("{owner}: unknown state name '{name}'")]
    UnknownStateName { owner: String, name: String },

    /// Actor is dead, Death accepts no further transitions
    #[error("{owner}: actor is dead, transition rejected")]
    TerminalState { owner: String },

    #[error("invalid config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
