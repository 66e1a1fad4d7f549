//! Actor body data: health, pose, damageable sub-parts

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Health pool
///
/// Invariant: 0 ≤ current ≤ max
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: i32) -> Self {
        let max = max.max(0);
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Any amount is accepted, the result is clamped to `[0, max]`.
    /// Returns how much health was actually removed (negative = healed).
    pub fn apply_damage(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.current = before.saturating_sub(amount).clamp(0, self.max);
        before - self.current
    }

    pub fn restore_full(&mut self) {
        self.current = self.max;
    }

    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }
}

/// World position + orientation, pulled from the host every tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Pose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn at(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    pub fn forward(&self) -> Vec3 {
        crate::shared::geometry::forward(self.rotation)
    }
}

impl From<&Transform> for Pose {
    fn from(transform: &Transform) -> Self {
        Self::new(transform.translation, transform.rotation)
    }
}

/// Independently damageable portion of an AI body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum SubPartId {
    Head,
    Torso,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl SubPartId {
    pub const ALL: [SubPartId; 6] = [
        SubPartId::Head,
        SubPartId::Torso,
        SubPartId::LeftArm,
        SubPartId::RightArm,
        SubPartId::LeftLeg,
        SubPartId::RightLeg,
    ];

    /// Torso stays attached no matter what
    pub fn is_detachable(self) -> bool {
        !matches!(self, SubPartId::Torso)
    }
}

/// One incoming hit (from a weapon, explosion, debug tooling)
///
/// Damage is accepted as-is: zero and negative values are legal and only
/// clamped by `Health`.
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct Hit {
    pub damage: i32,
    pub part: SubPartId,
    /// World-space push direction (zero = no push)
    pub direction: Vec3,
    pub impulse: f32,
}

impl Hit {
    pub fn new(damage: i32, part: SubPartId) -> Self {
        Self {
            damage,
            part,
            direction: Vec3::ZERO,
            impulse: 0.0,
        }
    }

    pub fn with_impulse(mut self, direction: Vec3, impulse: f32) -> Self {
        self.direction = direction.normalize_or_zero();
        self.impulse = impulse;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage_clamps_at_zero() {
        let mut health = Health::new(100);

        assert_eq!(health.apply_damage(30), 30);
        assert_eq!(health.current, 70);
        assert!(health.is_alive());

        assert_eq!(health.apply_damage(500), 70);
        assert_eq!(health.current, 0);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_health_zero_and_negative_damage() {
        let mut health = Health::new(100);
        health.apply_damage(40);

        assert_eq!(health.apply_damage(0), 0);
        assert_eq!(health.current, 60);

        // Negative damage heals but never past max
        assert_eq!(health.apply_damage(-1000), -40);
        assert_eq!(health.current, 100);

        assert_eq!(health.apply_damage(i32::MIN), 0);
        assert_eq!(health.current, 100);
    }

    #[test]
    fn test_health_fraction() {
        let mut health = Health::new(80);
        health.apply_damage(20);
        assert_eq!(health.fraction(), 0.75);
        assert_eq!(Health::new(0).fraction(), 0.0);
    }
}
