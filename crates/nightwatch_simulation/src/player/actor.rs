//! PlayerActor facade
//!
//! Same shape as `Enemy`: machine + states + body. Input and camera arrive
//! by value each frame; accepted shots pile up in an outbox the host drains.

use std::sync::Arc;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::{BehaviorError, BehaviorResult};
use crate::fsm::{StateId, StateMachine};
use crate::shared::{report_missing_ports, ActorPorts, AnimationEvent, Animator, Health, Hit, Pose};

use super::body::PlayerBody;
use super::config::PlayerConfig;
use super::fire::Shot;
use super::input::{CameraBasis, PlayerInput};
use super::states::{build_registry, PlayerStateId, PlayerStates};

/// Player-controlled actor
///
/// AI systems use it as the perception target (`With<PlayerActor>`).
#[derive(Component)]
pub struct PlayerActor {
    machine: StateMachine<PlayerStateId>,
    states: PlayerStates,
    body: PlayerBody,
}

impl PlayerActor {
    pub fn new(
        label: impl Into<String>,
        config: Arc<PlayerConfig>,
        ports: ActorPorts,
        spawn: Pose,
        seed: u64,
    ) -> BehaviorResult<Self> {
        config.validate()?;
        let label = label.into();

        let animator = Animator::new(ports.animator);
        report_missing_ports(
            &label,
            &[
                ("animation", animator.is_connected()),
                ("environment probe", ports.probe.is_some()),
            ],
        );

        let states = build_registry(&config);
        let body = PlayerBody::new(
            label.clone(),
            config,
            spawn,
            animator,
            ports.probe,
            ChaCha8Rng::seed_from_u64(seed),
        );

        let mut player = Self {
            machine: StateMachine::new(label),
            states,
            body,
        };
        player
            .machine
            .set_state(PlayerStateId::Idle, &mut player.states, &mut player.body)?;

        crate::log(&format!("🎮 {} spawned at {:?}", player.label(), spawn.position));
        Ok(player)
    }

    pub fn label(&self) -> &str {
        &self.body.label
    }

    pub fn state(&self) -> Option<PlayerStateId> {
        self.machine.current()
    }

    pub fn state_name(&self) -> &'static str {
        self.machine.current_name()
    }

    pub fn health(&self) -> Health {
        self.body.health
    }

    pub fn current_health(&self) -> i32 {
        self.body.health.current
    }

    pub fn pose(&self) -> Pose {
        self.body.pose
    }

    pub fn velocity(&self) -> Vec3 {
        self.body.velocity
    }

    pub fn input(&self) -> PlayerInput {
        self.body.input
    }

    pub fn body(&self) -> &PlayerBody {
        &self.body
    }

    pub fn debug_override(&self) -> bool {
        self.body.debug_override
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.body.pose = pose;
    }

    pub fn set_input(&mut self, input: PlayerInput) {
        self.body.input = input;
    }

    pub fn set_camera(&mut self, camera: CameraBasis) {
        self.body.camera = camera;
    }

    pub fn set_debug_override(&mut self, enabled: bool) {
        if self.body.debug_override != enabled {
            crate::log(&format!(
                "🛠️ {}: debug override {}",
                self.label(),
                if enabled { "ON" } else { "OFF" }
            ));
        }
        self.body.debug_override = enabled;
    }

    pub fn logic_update(&mut self, delta: f32) -> BehaviorResult<()> {
        self.body.delta = delta;
        self.body.tick_fire();
        self.body.advance_speed_blend();
        self.machine
            .logic_update(delta, &mut self.states, &mut self.body)
    }

    pub fn physics_update(&mut self, delta: f32) -> BehaviorResult<()> {
        self.body.delta = delta;
        self.machine.physics_update(&mut self.states, &mut self.body)
    }

    pub fn late_update(&mut self, delta: f32) -> BehaviorResult<()> {
        self.body.delta = delta;
        self.machine.late_update(&mut self.states, &mut self.body)
    }

    /// No player state declares callbacks today; they are logged and dropped
    pub fn handle_animation_event(&mut self, event: AnimationEvent) -> BehaviorResult<bool> {
        self.machine
            .dispatch_animation_event(event, &mut self.states, &mut self.body)
    }

    pub fn force_state(&mut self, name: &str) -> BehaviorResult<()> {
        let id = PlayerStateId::from_name(name).ok_or_else(|| BehaviorError::UnknownStateName {
            owner: self.label().to_string(),
            name: name.to_string(),
        })?;
        self.machine.set_state(id, &mut self.states, &mut self.body)
    }

    /// Clamps health; the player graph has no death state, game rules on top
    /// decide what zero health means
    pub fn process_hit(&mut self, hit: Hit) -> i32 {
        self.body.health.apply_damage(hit.damage);
        crate::log(&format!(
            "💥 {} hit in {:?}: HP {}/{}",
            self.label(),
            hit.part,
            self.body.health.current,
            self.body.health.max
        ));
        self.body.health.current
    }

    /// Accepted shots since the last drain
    pub fn drain_shots(&mut self) -> Vec<Shot> {
        self.body.drain_shots()
    }
}

impl std::fmt::Debug for PlayerActor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerActor")
            .field("label", &self.body.label)
            .field("state", &self.machine.current_name())
            .field("health", &self.body.health)
            .finish()
    }
}
