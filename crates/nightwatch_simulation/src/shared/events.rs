//! Actor events — external inputs into the behavior layer + its outputs
//!
//! Architecture: engine/UI/debug layers never call facades directly.
//! They write Bevy events; `AIPlugin` / `PlayerPlugin` systems read them
//! before the logic pass. Every reader keeps its own cursor, so both plugins
//! see every event and pick the ones targeting their actors.

use bevy::prelude::*;

use crate::shared::{AnimationEvent, Hit};

/// Damage landed on an actor (weapon, explosion, debug console)
#[derive(Event, Debug, Clone, Copy)]
pub struct HitEvent {
    pub target: Entity,
    pub hit: Hit,
}

/// Animation-complete callback from the animation layer
#[derive(Event, Debug, Clone, Copy)]
pub struct AnimationCallback {
    pub entity: Entity,
    pub event: AnimationEvent,
}

/// Debug tooling: jump straight into a state by display name
#[derive(Event, Debug, Clone)]
pub struct ForceStateRequest {
    pub entity: Entity,
    pub state: String,
}

/// Debug tooling: suppress automatic transitions on one actor
#[derive(Event, Debug, Clone, Copy)]
pub struct DebugOverrideToggle {
    pub entity: Entity,
    pub enabled: bool,
}

/// Actor entered Death (emitted once per death)
#[derive(Event, Debug, Clone, Copy)]
pub struct EntityDied {
    pub entity: Entity,
}

/// Registers the shared events (safe to call from several plugins)
pub fn register_actor_events(app: &mut App) {
    app.add_event::<HitEvent>()
        .add_event::<AnimationCallback>()
        .add_event::<ForceStateRequest>()
        .add_event::<DebugOverrideToggle>()
        .add_event::<EntityDied>();
}
