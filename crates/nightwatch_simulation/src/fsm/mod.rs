//! Finite state machine core shared by every actor graph
//!
//! - `StateId` — closed identity of a graph node (enum)
//! - `BehaviorState` — Enter / Exit / LogicUpdate / PhysicsUpdate / LateUpdate
//! - `StateRegistry` — states constructed once per actor
//! - `StateMachine` — pointer to the active state + dispatch

pub mod machine;
pub mod state;


pub use machine::StateMachine;
pub use state::{BehaviorState, StateId, StateRegistry};
