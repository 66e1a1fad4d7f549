//! EnemyBody — everything an AI behavior state may touch
//!
//! Config, perception snapshot, runtime flags, ports, speed blend and
//! pending physical impacts. Passed as `&mut` context into every state pass,
//! so states never hold references back to the actor.

use std::sync::Arc;

use bevy::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::ai::config::EnemyConfig;
use crate::ai::states::anim;
use crate::shared::geometry;
use crate::shared::{
    Animator, Health, Hit, Navigator, PhysicalReactions, Pose, ScalarBlend, SubPartId,
};

/// Muscle weakened by a hit, restored after a tick countdown
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactRecord {
    pub part: SubPartId,
    pub ticks_remaining: u32,
}

pub struct EnemyBody {
    pub label: String,
    pub config: Arc<EnemyConfig>,

    /// Perception (pulled from the host every tick)
    pub pose: Pose,
    pub target: Option<Vec3>,
    /// Spawn position, center of random patrol points
    pub home: Vec3,
    /// Seconds covered by the running pass
    pub delta: f32,

    pub health: Health,
    /// Monotonic: only `revive` resets it
    pub has_aggroed_before: bool,
    /// Mirrors an in-flight two-phase turn
    pub is_turning: bool,
    pub debug_override: bool,
    /// One-shot ragdoll guard
    pub ragdoll_active: bool,

    pub animator: Animator,
    pub navigation: Navigator,
    pub reactions: PhysicalReactions,

    pub rng: ChaCha8Rng,

    speed: ScalarBlend,
    pending_hit: Option<Hit>,
    impacts: Vec<ImpactRecord>,
}

impl EnemyBody {
    pub fn new(
        label: impl Into<String>,
        config: Arc<EnemyConfig>,
        spawn: Pose,
        animator: Animator,
        navigation: Navigator,
        reactions: PhysicalReactions,
        rng: ChaCha8Rng,
    ) -> Self {
        let health = Health::new(config.max_health);
        Self {
            label: label.into(),
            config,
            pose: spawn,
            target: None,
            home: spawn.position,
            delta: 0.0,
            health,
            has_aggroed_before: false,
            is_turning: false,
            debug_override: false,
            ragdoll_active: false,
            animator,
            navigation,
            reactions,
            rng,
            speed: ScalarBlend::settled(0.0),
            pending_hit: None,
            impacts: Vec::new(),
        }
    }

    // ========================================================================
    // Perception
    // ========================================================================

    /// Inclusive squared-distance check; no target → never in range
    pub fn target_in_range(&self, range: f32) -> bool {
        self.target
            .is_some_and(|target| geometry::in_range(self.pose.position, target, range))
    }

    /// Signed yaw (degrees) toward the target, positive = turn left
    pub fn yaw_to_target(&self) -> Option<f32> {
        self.target
            .map(|target| geometry::signed_yaw_to(self.pose.position, self.pose.rotation, target))
    }

    /// Orientation that faces the target (yaw only)
    pub fn facing_target(&self) -> Option<Quat> {
        self.yaw_to_target()
            .map(|yaw| geometry::yawed(self.pose.rotation, yaw))
    }

    /// Random point on the configured route or around spawn
    pub fn pick_patrol_point(&mut self, route: &[Vec3], avoid: Option<Vec3>) -> Vec3 {
        if route.is_empty() {
            let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
            let radius = self.config.patrol_radius;
            let distance = if radius > 0.0 {
                self.rng.gen_range(radius * 0.5..=radius)
            } else {
                0.0
            };
            return self.home + Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance);
        }

        let candidates: Vec<Vec3> = route
            .iter()
            .copied()
            .filter(|point| Some(*point) != avoid)
            .collect();
        if candidates.is_empty() {
            return route[0];
        }
        candidates[self.rng.gen_range(0..candidates.len())]
    }

    // ========================================================================
    // Speed
    // ========================================================================

    pub fn speed(&self) -> f32 {
        self.speed.value()
    }

    /// Starts a blend toward `target` (replaces the one in flight).
    /// Navigation gets the new cap right away, the animator follows the blend.
    pub fn blend_speed_to(&mut self, target: f32) {
        if self.speed.target() == target {
            return;
        }
        self.speed = ScalarBlend::new(self.speed.value(), target, self.config.speed_blend_duration);
        self.navigation.set_max_speed(target);
    }

    /// Zero speed without blending (death)
    pub fn stop_immediately(&mut self) {
        self.speed = ScalarBlend::settled(0.0);
        self.navigation.set_max_speed(0.0);
        self.animator.set_float(anim::SPEED, 0.0);
    }

    pub(crate) fn advance_speed_blend(&mut self) {
        let speed = self.speed.advance(self.delta);
        self.animator.set_float(anim::SPEED, speed);
    }

    // ========================================================================
    // Physical impacts
    // ========================================================================

    pub(crate) fn set_pending_hit(&mut self, hit: Hit) {
        self.pending_hit = Some(hit);
    }

    pub fn take_pending_hit(&mut self) -> Option<Hit> {
        self.pending_hit.take()
    }

    /// Pushes the struck part and goes limp on it until the record expires.
    /// A second hit on the same part overwrites its record.
    pub fn apply_impact(&mut self, hit: &Hit) {
        if hit.impulse > 0.0 && hit.direction != Vec3::ZERO {
            self.reactions
                .apply_impulse(hit.part, hit.direction, hit.impulse);
        }
        self.reactions
            .set_muscle_strength(hit.part, self.config.impact_muscle_strength);

        let ticks = self.config.muscle_restore_ticks;
        match self.impacts.iter_mut().find(|record| record.part == hit.part) {
            Some(record) => record.ticks_remaining = ticks,
            None => self.impacts.push(ImpactRecord {
                part: hit.part,
                ticks_remaining: ticks,
            }),
        }
    }

    pub fn impacts(&self) -> &[ImpactRecord] {
        &self.impacts
    }

    /// One physics tick of muscle restoration
    pub(crate) fn tick_impacts(&mut self) {
        let reactions = &mut self.reactions;
        self.impacts.retain_mut(|record| {
            if record.ticks_remaining > 0 {
                record.ticks_remaining -= 1;
            }
            if record.ticks_remaining == 0 {
                reactions.set_muscle_strength(record.part, 1.0);
                false
            } else {
                true
            }
        });
    }

    /// Back to full strength on every recorded part
    pub(crate) fn clear_impacts(&mut self) {
        for record in self.impacts.drain(..) {
            self.reactions.set_muscle_strength(record.part, 1.0);
        }
        self.pending_hit = None;
    }
}
