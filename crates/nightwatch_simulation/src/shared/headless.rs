//! Headless port backends
//!
//! Record every call into shared state so the headless binary can print what
//! an engine would have received, and tests can assert on it.
//! Cloning a backend clones the handle, not the recorded state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use bevy::prelude::*;

use crate::shared::{
    ActorPorts, AnimationPort, EnvironmentProbe, NavigationPort, PhysicalReactionPort, SubPartId,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Clone, Default)]
pub struct AnimatorRecord {
    pub flags: HashMap<String, bool>,
    pub floats: HashMap<String, f32>,
    pub triggers: Vec<String>,
    pub played: Vec<String>,
    pub playing: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessAnimator {
    record: Arc<Mutex<AnimatorRecord>>,
}

impl HeadlessAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> AnimatorRecord {
        lock(&self.record).clone()
    }

    pub fn flag(&self, name: &str) -> bool {
        lock(&self.record).flags.get(name).copied().unwrap_or(false)
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        lock(&self.record).floats.get(name).copied()
    }

    pub fn trigger_count(&self, name: &str) -> usize {
        lock(&self.record)
            .triggers
            .iter()
            .filter(|trigger| trigger.as_str() == name)
            .count()
    }

    /// Simulates the current clip running out
    pub fn finish_playing(&self) {
        lock(&self.record).playing = None;
    }
}

impl AnimationPort for HeadlessAnimator {
    fn play(&mut self, name: &str) {
        let mut record = lock(&self.record);
        record.played.push(name.to_string());
        record.playing = Some(name.to_string());
    }

    fn set_flag(&mut self, name: &str, value: bool) {
        lock(&self.record).flags.insert(name.to_string(), value);
    }

    fn set_float(&mut self, name: &str, value: f32) {
        lock(&self.record).floats.insert(name.to_string(), value);
    }

    fn set_trigger(&mut self, name: &str) {
        lock(&self.record).triggers.push(name.to_string());
    }

    fn is_playing(&self, name: &str) -> bool {
        lock(&self.record).playing.as_deref() == Some(name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NavigationRecord {
    pub enabled: bool,
    pub target: Option<Vec3>,
    pub max_speed: f32,
    pub target_updates: usize,
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessNavigator {
    record: Arc<Mutex<NavigationRecord>>,
}

impl HeadlessNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> NavigationRecord {
        lock(&self.record).clone()
    }
}

impl NavigationPort for HeadlessNavigator {
    fn set_target(&mut self, point: Vec3) {
        let mut record = lock(&self.record);
        record.target = Some(point);
        record.target_updates += 1;
    }

    fn enable(&mut self) {
        lock(&self.record).enabled = true;
    }

    fn disable(&mut self) {
        lock(&self.record).enabled = false;
    }

    fn set_max_speed(&mut self, speed: f32) {
        lock(&self.record).max_speed = speed;
    }
}

#[derive(Debug, Clone, Default)]
pub struct BodyRecord {
    pub impulses: Vec<(SubPartId, Vec3, f32)>,
    pub muscle_strength: HashMap<SubPartId, f32>,
    pub detached: Vec<SubPartId>,
    pub ragdoll_active: bool,
    pub ragdoll_activations: u32,
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessBody {
    record: Arc<Mutex<BodyRecord>>,
}

impl HeadlessBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> BodyRecord {
        lock(&self.record).clone()
    }

    pub fn muscle_strength(&self, part: SubPartId) -> f32 {
        lock(&self.record)
            .muscle_strength
            .get(&part)
            .copied()
            .unwrap_or(1.0)
    }
}

impl PhysicalReactionPort for HeadlessBody {
    fn apply_impulse(&mut self, part: SubPartId, direction: Vec3, magnitude: f32) {
        lock(&self.record).impulses.push((part, direction, magnitude));
    }

    fn set_muscle_strength(&mut self, part: SubPartId, strength: f32) {
        lock(&self.record).muscle_strength.insert(part, strength);
    }

    fn detach(&mut self, part: SubPartId) {
        lock(&self.record).detached.push(part);
    }

    fn activate_ragdoll(&mut self) {
        let mut record = lock(&self.record);
        record.ragdoll_active = true;
        record.ragdoll_activations += 1;
    }

    fn deactivate_ragdoll(&mut self) {
        lock(&self.record).ragdoll_active = false;
    }
}

/// Infinite ground plane + optional wall, enough for locomotion checks
#[derive(Debug, Clone, Copy)]
pub struct HeadlessTerrain {
    ground_normal: Option<Vec3>,
    wall_normal: Option<Vec3>,
}

impl Default for HeadlessTerrain {
    fn default() -> Self {
        Self::flat()
    }
}

impl HeadlessTerrain {
    pub fn flat() -> Self {
        Self {
            ground_normal: Some(Vec3::Y),
            wall_normal: None,
        }
    }

    pub fn slope(normal: Vec3) -> Self {
        Self {
            ground_normal: normal.try_normalize(),
            wall_normal: None,
        }
    }

    /// Nothing below the actor (mid-air)
    pub fn void() -> Self {
        Self {
            ground_normal: None,
            wall_normal: None,
        }
    }

    /// Wall hit by any probe heading into `normal`
    pub fn with_wall(mut self, normal: Vec3) -> Self {
        self.wall_normal = normal.try_normalize();
        self
    }
}

impl EnvironmentProbe for HeadlessTerrain {
    fn obstruction(&self, _origin: Vec3, direction: Vec3, max_distance: f32) -> Option<Vec3> {
        let normal = self.wall_normal?;
        (max_distance > 0.0 && direction.dot(normal) < 0.0).then_some(normal)
    }

    fn ground_normal(&self, _origin: Vec3, max_distance: f32) -> Option<Vec3> {
        (max_distance > 0.0).then_some(self.ground_normal).flatten()
    }
}

/// One recorder per port; `ports()` hands out connected handles
#[derive(Debug, Clone, Default)]
pub struct HeadlessRig {
    pub animator: HeadlessAnimator,
    pub navigation: HeadlessNavigator,
    pub body: HeadlessBody,
    pub terrain: HeadlessTerrain,
}

impl HeadlessRig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_terrain(mut self, terrain: HeadlessTerrain) -> Self {
        self.terrain = terrain;
        self
    }

    pub fn ports(&self) -> ActorPorts {
        ActorPorts::new()
            .with_animator(self.animator.clone())
            .with_navigation(self.navigation.clone())
            .with_reactions(self.body.clone())
            .with_probe(self.terrain)
    }
}
