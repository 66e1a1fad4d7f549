//! Fire rate + spread
//!
//! Cooldown counts down every logic tick (whatever the state); a shot is only
//! accepted at ≤ 0, then the cooldown restarts at `fire_interval`.

use bevy::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::shared::geometry;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireControl {
    interval: f32,
    cooldown: f32,
}

impl FireControl {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            cooldown: 0.0,
        }
    }

    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown <= 0.0
    }

    pub fn tick(&mut self, delta: f32) {
        self.cooldown = (self.cooldown - delta.max(0.0)).max(0.0);
    }

    /// Accepts the shot and restarts the cooldown, or rejects it
    pub fn try_fire(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.cooldown = self.interval;
        true
    }
}

/// One accepted shot (consumed by the weapon / VFX layer)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Camera forward, deflected by a uniform random yaw/pitch inside the spread
/// bounds (degrees) while the spread indicator is expanded
pub fn shot_direction(
    camera_forward: Vec3,
    spread_expanded: bool,
    horizontal: f32,
    vertical: f32,
    rng: &mut ChaCha8Rng,
) -> Vec3 {
    let forward = camera_forward.normalize_or(Vec3::NEG_Z);
    if !spread_expanded {
        return forward;
    }

    let yaw = rng.gen_range(-horizontal..=horizontal);
    let pitch = rng.gen_range(-vertical..=vertical);

    let right = forward.cross(geometry::UP).normalize_or(Vec3::X);
    let deflection =
        Quat::from_axis_angle(geometry::UP, yaw.to_radians()) * Quat::from_axis_angle(right, pitch.to_radians());
    (deflection * forward).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_fire_requests_half_interval_apart() {
        let mut fire = FireControl::new(0.1);

        assert!(fire.try_fire());
        fire.tick(0.05);
        assert!(!fire.try_fire());
    }

    #[test]
    fn test_fire_requests_beyond_interval() {
        let mut fire = FireControl::new(0.1);

        assert!(fire.try_fire());
        fire.tick(0.15);
        assert!(fire.try_fire());
        assert_eq!(fire.cooldown(), 0.1);
    }

    #[test]
    fn test_sustained_fire_cadence() {
        let mut fire = FireControl::new(0.1);
        let mut shots = 0;

        // 1s of held trigger at 100Hz
        for _ in 0..100 {
            fire.tick(0.01);
            if fire.try_fire() {
                shots += 1;
            }
        }
        assert!((9..=10).contains(&shots), "shots = {}", shots);
    }

    #[test]
    fn test_spread_only_when_expanded() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let forward = Vec3::new(0.0, 0.0, -2.0);

        assert_eq!(shot_direction(forward, false, 5.0, 5.0, &mut rng), Vec3::NEG_Z);

        for _ in 0..50 {
            let direction = shot_direction(forward, true, 5.0, 3.0, &mut rng);
            let angle = direction.angle_between(Vec3::NEG_Z).to_degrees();
            assert!(angle <= 5.9 + 1e-3, "angle = {}", angle);
            assert!((direction.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_spread_is_deterministic_per_seed() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..10 {
            assert_eq!(
                shot_direction(Vec3::NEG_Z, true, 4.0, 2.0, &mut a),
                shot_direction(Vec3::NEG_Z, true, 4.0, 2.0, &mut b)
            );
        }
    }
}
