//! Enemy facade — owns the state machine, the states and the body
//!
//! Architecture:
//! - `machine` only points at the active state, `states` owns them,
//!   `body` is the shared context; three fields so passes can borrow them
//!   separately
//! - Facade-level rules: Death is terminal, hit routing, sub-part damage,
//!   debug override, revive
//! - Engine hosts drive the three passes (logic / physics / late) and feed
//!   perception by value (`set_pose`, `set_target`)

use std::sync::Arc;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::ai::body::EnemyBody;
use crate::ai::config::EnemyConfig;
use crate::ai::limbs::LimbSet;
use crate::ai::states::{build_registry, EnemyStateId, EnemyStates};
use crate::error::{BehaviorError, BehaviorResult};
use crate::fsm::{StateId, StateMachine};
use crate::shared::{
    report_missing_ports, ActorPorts, AnimationEvent, Animator, Health, Hit, Navigator,
    PhysicalReactions, Pose,
};

/// What a hit did to the enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Already dead
    Ignored,
    Damaged,
    /// Heavy hit, interrupted into HitReaction
    Staggered,
    Killed,
}

#[derive(Component)]
pub struct Enemy {
    machine: StateMachine<EnemyStateId>,
    states: EnemyStates,
    body: EnemyBody,
    limbs: LimbSet,
}

impl Enemy {
    /// Validates config, reports missing ports, enters the initial state
    pub fn new(
        label: impl Into<String>,
        config: Arc<EnemyConfig>,
        ports: ActorPorts,
        spawn: Pose,
        seed: u64,
    ) -> BehaviorResult<Self> {
        config.validate()?;
        let label = label.into();

        let animator = Animator::new(ports.animator);
        let navigation = Navigator::new(ports.navigation);
        let reactions = PhysicalReactions::new(ports.reactions);
        report_missing_ports(
            &label,
            &[
                ("animation", animator.is_connected()),
                ("navigation", navigation.is_connected()),
                ("physical reaction", reactions.is_connected()),
            ],
        );

        let states = build_registry(&config);
        let limbs = LimbSet::new(config.limb_max_health);
        let body = EnemyBody::new(
            label.clone(),
            config,
            spawn,
            animator,
            navigation,
            reactions,
            ChaCha8Rng::seed_from_u64(seed),
        );

        let mut enemy = Self {
            machine: StateMachine::new(label),
            states,
            body,
            limbs,
        };
        let initial = enemy.initial_state();
        enemy
            .machine
            .set_state(initial, &mut enemy.states, &mut enemy.body)?;

        crate::log(&format!(
            "🤖 {} spawned at {:?} in {}",
            enemy.label(),
            spawn.position,
            initial.name()
        ));
        Ok(enemy)
    }

    fn initial_state(&self) -> EnemyStateId {
        if self.body.config.starts_patrolling {
            EnemyStateId::Patrol
        } else {
            EnemyStateId::Idle
        }
    }

    // ========================================================================
    // Read access (HUD, debug tooling, tests)
    // ========================================================================

    pub fn label(&self) -> &str {
        &self.body.label
    }

    pub fn state(&self) -> Option<EnemyStateId> {
        self.machine.current()
    }

    pub fn previous_state(&self) -> Option<EnemyStateId> {
        self.machine.previous()
    }

    pub fn state_name(&self) -> &'static str {
        self.machine.current_name()
    }

    pub fn time_in_state(&self) -> f32 {
        self.machine.time_in_state()
    }

    pub fn health(&self) -> Health {
        self.body.health
    }

    pub fn current_health(&self) -> i32 {
        self.body.health.current
    }

    pub fn is_dead(&self) -> bool {
        self.machine.is_in(EnemyStateId::Death)
    }

    pub fn has_aggroed_before(&self) -> bool {
        self.body.has_aggroed_before
    }

    pub fn is_turning(&self) -> bool {
        self.body.is_turning
    }

    pub fn debug_override(&self) -> bool {
        self.body.debug_override
    }

    pub fn limbs(&self) -> &LimbSet {
        &self.limbs
    }

    pub fn body(&self) -> &EnemyBody {
        &self.body
    }

    pub fn config(&self) -> &EnemyConfig {
        &self.body.config
    }

    pub fn pose(&self) -> Pose {
        self.body.pose
    }

    // ========================================================================
    // Perception input
    // ========================================================================

    pub fn set_pose(&mut self, pose: Pose) {
        self.body.pose = pose;
    }

    pub fn set_target(&mut self, target: Option<Vec3>) {
        self.body.target = target;
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

    // ========================================================================
    // Passes
    // ========================================================================

    pub fn logic_update(&mut self, delta: f32) -> BehaviorResult<()> {
        self.body.delta = delta;
        self.body.advance_speed_blend();
        self.machine
            .logic_update(delta, &mut self.states, &mut self.body)
    }

    pub fn physics_update(&mut self, delta: f32) -> BehaviorResult<()> {
        self.body.delta = delta;
        self.body.tick_impacts();
        self.machine.physics_update(&mut self.states, &mut self.body)
    }

    pub fn late_update(&mut self, delta: f32) -> BehaviorResult<()> {
        self.body.delta = delta;
        self.machine.late_update(&mut self.states, &mut self.body)
    }

    /// Routes an animation-complete callback; `false` = dropped
    pub fn handle_animation_event(&mut self, event: AnimationEvent) -> BehaviorResult<bool> {
        self.machine
            .dispatch_animation_event(event, &mut self.states, &mut self.body)
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Internal transition; silently refused once dead
    fn transition(&mut self, next: EnemyStateId) -> BehaviorResult<()> {
        if self.is_dead() {
            crate::log(&format!(
                "{}: dead, {} ignored",
                self.label(),
                next.name()
            ));
            return Ok(());
        }
        self.machine.set_state(next, &mut self.states, &mut self.body)
    }

    /// Debug tooling: transition by display name (case-insensitive)
    pub fn force_state(&mut self, name: &str) -> BehaviorResult<()> {
        let id = EnemyStateId::from_name(name).ok_or_else(|| BehaviorError::UnknownStateName {
            owner: self.label().to_string(),
            name: name.to_string(),
        })?;
        self.force_state_id(id)
    }

    pub fn force_state_id(&mut self, next: EnemyStateId) -> BehaviorResult<()> {
        if self.is_dead() {
            return Err(BehaviorError::TerminalState {
                owner: self.label().to_string(),
            });
        }
        self.machine.set_state(next, &mut self.states, &mut self.body)
    }

    /// Damage + routing
    ///
    /// - dead → ignored
    /// - health reaches 0 → Death (pre-empts everything)
    /// - first hit ever → Aggro (unless already there)
    /// - later hits → calm states go straight to Chase, others stay
    /// - damage ≥ `stagger_damage` (when set) detours through HitReaction,
    ///   only where the routing above changes state
    pub fn process_hit(&mut self, hit: Hit) -> BehaviorResult<HitOutcome> {
        if self.is_dead() {
            crate::log(&format!("{}: hit on a corpse ignored", self.label()));
            return Ok(HitOutcome::Ignored);
        }

        let removed = self.body.health.apply_damage(hit.damage);
        crate::log(&format!(
            "💥 {} hit in {:?}: {} damage, HP {}/{}",
            self.label(),
            hit.part,
            removed,
            self.body.health.current,
            self.body.health.max
        ));

        if let Some(part) = self.limbs.damage(hit.part, hit.damage) {
            self.body.reactions.detach(part);
            crate::log(&format!("🦴 {}: {:?} detached", self.label(), part));
        }

        if !self.body.health.is_alive() {
            self.machine
                .set_state(EnemyStateId::Death, &mut self.states, &mut self.body)?;
            // Ragdoll is live now, the killing blow still pushes it
            self.body.apply_impact(&hit);
            return Ok(HitOutcome::Killed);
        }

        let routed = self.route_hit();
        self.body.has_aggroed_before = true;

        let heavy = self
            .body
            .config
            .stagger_damage
            .is_some_and(|threshold| hit.damage >= threshold);

        if heavy && self.machine.is_in(EnemyStateId::HitReaction) {
            // Enter does not rerun, push right away
            self.body.apply_impact(&hit);
            return Ok(HitOutcome::Staggered);
        }
        if heavy && routed.is_some() {
            self.body.set_pending_hit(hit);
            self.transition(EnemyStateId::HitReaction)?;
            return Ok(HitOutcome::Staggered);
        }

        self.body.apply_impact(&hit);
        if let Some(next) = routed {
            self.transition(next)?;
        }
        Ok(HitOutcome::Damaged)
    }

    /// Where a non-lethal hit sends the enemy (None = stay)
    fn route_hit(&self) -> Option<EnemyStateId> {
        let current = self.machine.current();
        if !self.body.has_aggroed_before {
            (current != Some(EnemyStateId::Aggro)).then_some(EnemyStateId::Aggro)
        } else if current.is_some_and(EnemyStateId::is_calm) {
            Some(EnemyStateId::Chase)
        } else {
            None
        }
    }

    /// Explicit revive: the only way out of Death
    pub fn revive(&mut self) -> BehaviorResult<()> {
        self.body.health.restore_full();
        self.body.has_aggroed_before = false;
        self.body.clear_impacts();
        self.limbs.restore();

        if self.body.ragdoll_active {
            self.body.ragdoll_active = false;
            self.body.reactions.deactivate_ragdoll();
        }

        let initial = self.initial_state();
        self.machine
            .set_state(initial, &mut self.states, &mut self.body)?;

        crate::log(&format!("✨ {} revived in {}", self.label(), initial.name()));
        Ok(())
    }
}

impl std::fmt::Debug for Enemy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enemy")
            .field("label", &self.body.label)
            .field("state", &self.machine.current_name())
            .field("health", &self.body.health)
            .field("has_aggroed_before", &self.body.has_aggroed_before)
            .finish()
    }
}
