//! Range checks and yaw helpers
//!
//! Conventions (Bevy): +Y up, actor forward = `rotation * -Z`.
//! Angles exposed in degrees (config + animator parameters), radians inside.

use bevy::prelude::*;

pub const UP: Vec3 = Vec3::Y;

/// Squared-distance range check (no sqrt in the per-tick perception path)
pub fn in_range(from: Vec3, to: Vec3, range: f32) -> bool {
    from.distance_squared(to) <= range * range
}

/// Drops the vertical component (yaw-only logic)
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

pub fn forward(rotation: Quat) -> Vec3 {
    rotation * Vec3::NEG_Z
}

/// Signed angle (radians) from `from` to `to` around `axis`.
///
/// Positive = counter-clockwise when looking down the axis (left turn for +Y).
/// Zero for degenerate inputs.
pub fn signed_angle(from: Vec3, to: Vec3, axis: Vec3) -> f32 {
    if from.length_squared() <= f32::EPSILON || to.length_squared() <= f32::EPSILON {
        return 0.0;
    }
    let sin = axis.dot(from.cross(to));
    let cos = from.dot(to);
    sin.atan2(cos)
}

/// Signed yaw (degrees) the actor has to turn to face `target`
pub fn signed_yaw_to(position: Vec3, rotation: Quat, target: Vec3) -> f32 {
    let to_target = flatten(target - position);
    let facing = flatten(forward(rotation));
    signed_angle(facing, to_target, UP).to_degrees()
}

/// Yaw-only orientation looking along `direction` (None for vertical/zero input)
pub fn yaw_towards(direction: Vec3) -> Option<Quat> {
    let flat = flatten(direction);
    if flat.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(Quat::from_rotation_y((-flat.x).atan2(-flat.z)))
}

/// Orientation after turning by `yaw_degrees` around up
pub fn yawed(rotation: Quat, yaw_degrees: f32) -> Quat {
    Quat::from_rotation_y(yaw_degrees.to_radians()) * rotation
}

/// Rotates `current` toward `target` by at most `max_degrees`
pub fn rotate_towards(current: Quat, target: Quat, max_degrees: f32) -> Quat {
    let angle = current.angle_between(target);
    let max_step = max_degrees.max(0.0).to_radians();
    if angle <= max_step || angle <= f32::EPSILON {
        target
    } else {
        current.slerp(target, max_step / angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_in_range_is_inclusive() {
        assert!(in_range(Vec3::ZERO, Vec3::new(3.0, 0.0, 4.0), 5.0));
        assert!(!in_range(Vec3::ZERO, Vec3::new(3.0, 0.0, 4.01), 5.0));
        assert!(in_range(Vec3::ONE, Vec3::ONE, 0.0));
    }

    #[test]
    fn test_signed_yaw_sign() {
        // Identity looks down -Z
        let right = signed_yaw_to(Vec3::ZERO, Quat::IDENTITY, Vec3::new(5.0, 0.0, 0.0));
        let left = signed_yaw_to(Vec3::ZERO, Quat::IDENTITY, Vec3::new(-5.0, 0.0, 0.0));
        let behind = signed_yaw_to(Vec3::ZERO, Quat::IDENTITY, Vec3::new(0.0, 0.0, 5.0));

        assert!((right + 90.0).abs() < EPS, "right = {}", right);
        assert!((left - 90.0).abs() < EPS, "left = {}", left);
        assert!((behind.abs() - 180.0).abs() < EPS, "behind = {}", behind);
    }

    #[test]
    fn test_signed_yaw_ignores_height() {
        let yaw = signed_yaw_to(Vec3::ZERO, Quat::IDENTITY, Vec3::new(0.0, 10.0, -5.0));
        assert!(yaw.abs() < EPS);
    }

    #[test]
    fn test_yawed_faces_target() {
        let target = Vec3::new(4.0, 0.0, 4.0);
        let yaw = signed_yaw_to(Vec3::ZERO, Quat::IDENTITY, target);
        let turned = yawed(Quat::IDENTITY, yaw);

        let remaining = signed_yaw_to(Vec3::ZERO, turned, target);
        assert!(remaining.abs() < 1e-3, "remaining = {}", remaining);
    }

    #[test]
    fn test_yaw_towards() {
        let rotation = yaw_towards(Vec3::new(1.0, 3.0, 0.0)).unwrap();
        assert!(forward(rotation).abs_diff_eq(Vec3::X, EPS));
        assert!(yaw_towards(Vec3::Y).is_none());
    }

    #[test]
    fn test_rotate_towards_caps_step() {
        let target = Quat::from_rotation_y(90f32.to_radians());
        let step = rotate_towards(Quat::IDENTITY, target, 30.0);
        assert!((step.angle_between(Quat::IDENTITY).to_degrees() - 30.0).abs() < 1e-2);

        let done = rotate_towards(step, target, 180.0);
        assert_eq!(done, target);
    }
}
