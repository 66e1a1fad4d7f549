//! Camera-relative movement, surface conformance and facing
//!
//! Flow: stick axis → camera basis (flattened) → clamp to unit length →
//! backward obstruction probe (only when backing up) → ground-normal probe
//! → projected direction. Facing is a slerp step, never a snap.

use bevy::prelude::*;

use crate::shared::{geometry, EnvironmentProbe};

use super::config::PlayerConfig;
use super::input::CameraBasis;

/// Stick axis rotated into the flattened camera basis, length ≤ 1
pub fn camera_relative(axis: Vec2, camera: &CameraBasis) -> Vec3 {
    let (forward, right) = camera.flattened();
    (right * axis.x + forward * axis.y).clamp_length_max(1.0)
}

/// Removes the component of `direction` along the plane `normal`
pub fn project_on_plane(direction: Vec3, normal: Vec3) -> Vec3 {
    match normal.try_normalize() {
        Some(normal) => direction.reject_from_normalized(normal),
        None => direction,
    }
}

/// Slides along walls hit while backing up, then follows the ground slope
pub fn conform_to_environment(
    direction: Vec3,
    position: Vec3,
    moving_backward: bool,
    probe: Option<&dyn EnvironmentProbe>,
    config: &PlayerConfig,
) -> Vec3 {
    let Some(probe) = probe else {
        return direction;
    };
    if direction == Vec3::ZERO {
        return direction;
    }

    let mut adjusted = direction;

    if moving_backward {
        if let Some(wall) = probe.obstruction(
            position,
            adjusted.normalize_or_zero(),
            config.backward_probe_distance,
        ) {
            adjusted = project_on_plane(adjusted, wall);
        }
    }

    if let Some(ground) = probe.ground_normal(position, config.ground_probe_distance) {
        adjusted = project_on_plane(adjusted, ground);
    }

    adjusted
}

/// One slerp step from `current` toward `target` (`rate` per second)
pub fn facing_step(current: Quat, target: Quat, rate: f32, delta: f32) -> Quat {
    let t = (rate * delta).clamp(0.0, 1.0);
    if t >= 1.0 {
        target
    } else {
        current.slerp(target, t)
    }
}

/// Facing for a movement direction (None when not moving horizontally)
pub fn facing_for(direction: Vec3) -> Option<Quat> {
    geometry::yaw_towards(direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::HeadlessTerrain;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_camera_relative_forward() {
        let camera = CameraBasis::default();
        let direction = camera_relative(Vec2::new(0.0, 1.0), &camera);
        assert!(direction.abs_diff_eq(Vec3::NEG_Z, EPS));
    }

    #[test]
    fn test_camera_relative_rotated_camera() {
        // Camera looking along +X
        let camera = CameraBasis::from_rotation(Quat::from_rotation_y(-90f32.to_radians()));
        let direction = camera_relative(Vec2::new(0.0, 1.0), &camera);
        assert!(direction.abs_diff_eq(Vec3::X, EPS), "direction = {:?}", direction);
    }

    #[test]
    fn test_diagonal_is_clamped() {
        let camera = CameraBasis::default();
        let direction = camera_relative(Vec2::new(1.0, 1.0), &camera);
        assert!((direction.length() - 1.0).abs() < EPS);

        let half = camera_relative(Vec2::new(0.5, 0.0), &camera);
        assert!((half.length() - 0.5).abs() < EPS);
    }

    #[test]
    fn test_pitched_camera_stays_horizontal() {
        let camera = CameraBasis::from_rotation(Quat::from_rotation_x(-40f32.to_radians()));
        let direction = camera_relative(Vec2::new(0.0, 1.0), &camera);
        assert_eq!(direction.y, 0.0);
        assert!((direction.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_slope_projection() {
        let config = PlayerConfig::default();
        let normal = Vec3::new(0.0, 1.0, 1.0).normalize();
        let terrain = HeadlessTerrain::slope(normal);

        let adjusted =
            conform_to_environment(Vec3::NEG_Z, Vec3::ZERO, false, Some(&terrain), &config);

        assert!(adjusted.dot(normal).abs() < EPS);
        assert!(adjusted.y > 0.0, "walking uphill: {:?}", adjusted);
    }

    #[test]
    fn test_backward_wall_slide_only_when_backing_up() {
        let config = PlayerConfig::default();
        // Wall behind (+Z side), facing the player
        let terrain = HeadlessTerrain::flat().with_wall(Vec3::NEG_Z);
        let backing_diagonal = Vec3::new(1.0, 0.0, 1.0).normalize();

        let slid =
            conform_to_environment(backing_diagonal, Vec3::ZERO, true, Some(&terrain), &config);
        assert!(slid.z.abs() < EPS);
        assert!(slid.x > 0.0);

        let unprobed =
            conform_to_environment(backing_diagonal, Vec3::ZERO, false, Some(&terrain), &config);
        assert!(unprobed.abs_diff_eq(backing_diagonal, EPS));
    }

    #[test]
    fn test_no_probe_no_adjustment() {
        let config = PlayerConfig::default();
        let direction = Vec3::new(0.3, 0.0, -0.7);
        assert_eq!(
            conform_to_environment(direction, Vec3::ZERO, true, None, &config),
            direction
        );

        let void = HeadlessTerrain::void();
        assert_eq!(
            conform_to_environment(direction, Vec3::ZERO, false, Some(&void), &config),
            direction
        );
    }

    #[test]
    fn test_facing_step_is_gradual() {
        let target = Quat::from_rotation_y(90f32.to_radians());

        let step = facing_step(Quat::IDENTITY, target, 5.0, 0.1);
        let turned = step.angle_between(Quat::IDENTITY).to_degrees();
        assert!((turned - 45.0).abs() < 0.05, "turned = {}", turned);

        assert_eq!(facing_step(Quat::IDENTITY, target, 20.0, 1.0), target);
    }
}
