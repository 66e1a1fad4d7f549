//! Shared domain — cross-cutting pieces used by both actor graphs
//!
//! Содержит:
//! - geometry: range checks, signed yaw, yaw-only rotations
//! - tween: two-phase turn + scalar blend holders
//! - body: Health, Pose, SubPartId, Hit
//! - events: Bevy events in/out of the behavior layer
//! - ports: engine-facing traits + no-op-when-missing handles
//! - headless: recording port backends (headless binary, tests)

pub mod body;
pub mod events;
pub mod geometry;
pub mod headless;
pub mod ports;
pub mod tween;

pub use body::*;
pub use events::*;
pub use headless::*;
pub use ports::*;
pub use tween::*;
