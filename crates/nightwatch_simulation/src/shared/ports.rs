//! Ports to the engine-side collaborators
//!
//! Architecture:
//! - Behavior logic never talks to rendering/physics/navigation directly
//! - Engine adapters implement the port traits (Godot, Bevy render app, headless)
//! - Every port is optional on the actor: a missing one turns its calls into
//!   no-ops (actor goes inert instead of crashing), reported once at spawn
//!
//! Flow: Behavior state → `Animator` / `Navigator` / `PhysicalReactions` →
//! `Option<Box<dyn Port>>` → engine

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::SubPartId;

/// Animation-complete callbacks raised by the animation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum AnimationEvent {
    TurnFinished,
    AggroFinished,
    AttackFinished,
    AttackLostMomentum,
}

impl AnimationEvent {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "turn_finished" | "TurnFinished" => Some(Self::TurnFinished),
            "aggro_finished" | "AggroFinished" => Some(Self::AggroFinished),
            "attack_finished" | "AttackFinished" => Some(Self::AttackFinished),
            "attack_lost_momentum" | "AttackLostMomentum" => Some(Self::AttackLostMomentum),
            _ => None,
        }
    }
}

/// Animation signaling (AnimationTree / Animator parameters)
pub trait AnimationPort: Send + Sync {
    fn play(&mut self, name: &str);
    fn set_flag(&mut self, name: &str, value: bool);
    fn set_float(&mut self, name: &str, value: f32);
    fn set_trigger(&mut self, name: &str);
    fn is_playing(&self, name: &str) -> bool;
}

/// Navigation agent (pathfinding lives engine-side)
pub trait NavigationPort: Send + Sync {
    fn set_target(&mut self, point: Vec3);
    fn enable(&mut self);
    fn disable(&mut self);
    fn set_max_speed(&mut self, speed: f32);
}

/// Physical reactions on the ragdoll / muscle rig
pub trait PhysicalReactionPort: Send + Sync {
    fn apply_impulse(&mut self, part: SubPartId, direction: Vec3, magnitude: f32);
    /// 1.0 = fully driven by animation, 0.0 = limp
    fn set_muscle_strength(&mut self, part: SubPartId, strength: f32);
    fn detach(&mut self, part: SubPartId);
    fn activate_ragdoll(&mut self);
    fn deactivate_ragdoll(&mut self);
}

/// Environment queries used by player locomotion
pub trait EnvironmentProbe: Send + Sync {
    /// Surface normal of an obstacle within `max_distance` along `direction`
    fn obstruction(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<Vec3>;
    /// Ground normal below `origin` within `max_distance`
    fn ground_normal(&self, origin: Vec3, max_distance: f32) -> Option<Vec3>;
}

/// Animation port handle, no-op when the actor has no animator
#[derive(Default)]
pub struct Animator {
    port: Option<Box<dyn AnimationPort>>,
}

impl Animator {
    pub fn new(port: Option<Box<dyn AnimationPort>>) -> Self {
        Self { port }
    }

    pub fn is_connected(&self) -> bool {
        self.port.is_some()
    }

    pub fn play(&mut self, name: &str) {
        if let Some(port) = self.port.as_mut() {
            port.play(name);
        }
    }

    pub fn set_flag(&mut self, name: &str, value: bool) {
        if let Some(port) = self.port.as_mut() {
            port.set_flag(name, value);
        }
    }

    pub fn set_float(&mut self, name: &str, value: f32) {
        if let Some(port) = self.port.as_mut() {
            port.set_float(name, value);
        }
    }

    pub fn set_trigger(&mut self, name: &str) {
        if let Some(port) = self.port.as_mut() {
            port.set_trigger(name);
        }
    }

    pub fn is_playing(&self, name: &str) -> bool {
        self.port.as_ref().is_some_and(|port| port.is_playing(name))
    }
}

/// Navigation port handle, no-op when the actor has no agent
#[derive(Default)]
pub struct Navigator {
    port: Option<Box<dyn NavigationPort>>,
}

impl Navigator {
    pub fn new(port: Option<Box<dyn NavigationPort>>) -> Self {
        Self { port }
    }

    pub fn is_connected(&self) -> bool {
        self.port.is_some()
    }

    pub fn set_target(&mut self, point: Vec3) {
        if let Some(port) = self.port.as_mut() {
            port.set_target(point);
        }
    }

    pub fn enable(&mut self) {
        if let Some(port) = self.port.as_mut() {
            port.enable();
        }
    }

    pub fn disable(&mut self) {
        if let Some(port) = self.port.as_mut() {
            port.disable();
        }
    }

    pub fn set_max_speed(&mut self, speed: f32) {
        if let Some(port) = self.port.as_mut() {
            port.set_max_speed(speed);
        }
    }
}

/// Physical reaction handle, no-op without a rig
#[derive(Default)]
pub struct PhysicalReactions {
    port: Option<Box<dyn PhysicalReactionPort>>,
}

impl PhysicalReactions {
    pub fn new(port: Option<Box<dyn PhysicalReactionPort>>) -> Self {
        Self { port }
    }

    pub fn is_connected(&self) -> bool {
        self.port.is_some()
    }

    pub fn apply_impulse(&mut self, part: SubPartId, direction: Vec3, magnitude: f32) {
        if let Some(port) = self.port.as_mut() {
            port.apply_impulse(part, direction, magnitude);
        }
    }

    pub fn set_muscle_strength(&mut self, part: SubPartId, strength: f32) {
        if let Some(port) = self.port.as_mut() {
            port.set_muscle_strength(part, strength);
        }
    }

    pub fn detach(&mut self, part: SubPartId) {
        if let Some(port) = self.port.as_mut() {
            port.detach(part);
        }
    }

    pub fn activate_ragdoll(&mut self) {
        if let Some(port) = self.port.as_mut() {
            port.activate_ragdoll();
        }
    }

    pub fn deactivate_ragdoll(&mut self) {
        if let Some(port) = self.port.as_mut() {
            port.deactivate_ragdoll();
        }
    }
}

/// Ports handed to an actor facade at spawn
#[derive(Default)]
pub struct ActorPorts {
    pub animator: Option<Box<dyn AnimationPort>>,
    pub navigation: Option<Box<dyn NavigationPort>>,
    pub reactions: Option<Box<dyn PhysicalReactionPort>>,
    pub probe: Option<Box<dyn EnvironmentProbe>>,
}

impl ActorPorts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_animator(mut self, port: impl AnimationPort + 'static) -> Self {
        self.animator = Some(Box::new(port));
        self
    }

    pub fn with_navigation(mut self, port: impl NavigationPort + 'static) -> Self {
        self.navigation = Some(Box::new(port));
        self
    }

    pub fn with_reactions(mut self, port: impl PhysicalReactionPort + 'static) -> Self {
        self.reactions = Some(Box::new(port));
        self
    }

    pub fn with_probe(mut self, probe: impl EnvironmentProbe + 'static) -> Self {
        self.probe = Some(Box::new(probe));
        self
    }
}

/// Logs a warning for every port the actor needs but did not get
pub fn report_missing_ports(owner: &str, ports: &[(&str, bool)]) {
    for (port, connected) in ports {
        if !connected {
            crate::log_warning(&format!(
                "⚠️ {}: no {} port, dependent behavior disabled",
                owner, port
            ));
        }
    }
}
