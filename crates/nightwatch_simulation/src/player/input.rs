//! Player input snapshot + camera basis
//!
//! Device polling and camera rigging live outside; they write these values
//! every frame and the player graph reads them by value.

use bevy::prelude::*;

use crate::shared::geometry;

/// Raw input for one frame
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    /// x = right, y = forward (stick space, any length)
    pub move_axis: Vec2,
    pub sprint: bool,
    pub aim: bool,
    pub fire: bool,
    /// Crosshair "spread expanded" indicator
    pub spread_expanded: bool,
}

impl PlayerInput {
    pub fn has_move(&self, deadzone: f32) -> bool {
        self.move_axis.length_squared() > deadzone * deadzone
    }

    pub fn moving_backward(&self, deadzone: f32) -> bool {
        self.move_axis.y < -deadzone
    }
}

/// Camera orientation used for camera-relative movement and aiming
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub forward: Vec3,
    pub right: Vec3,
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self {
            forward: Vec3::NEG_Z,
            right: Vec3::X,
        }
    }
}

impl CameraBasis {
    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            forward: rotation * Vec3::NEG_Z,
            right: rotation * Vec3::X,
        }
    }

    /// Horizontal forward/right, unit length (zero when looking straight down)
    pub fn flattened(&self) -> (Vec3, Vec3) {
        (
            geometry::flatten(self.forward).normalize_or_zero(),
            geometry::flatten(self.right).normalize_or_zero(),
        )
    }

    /// Pitch of the camera forward (degrees, positive = up)
    pub fn pitch(&self) -> f32 {
        let forward = self.forward.normalize_or_zero();
        forward.y.clamp(-1.0, 1.0).asin().to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadzone() {
        let input = PlayerInput {
            move_axis: Vec2::new(0.05, 0.05),
            ..Default::default()
        };
        assert!(!input.has_move(0.1));
        assert!(input.has_move(0.0));
    }

    #[test]
    fn test_camera_pitch() {
        let camera = CameraBasis::from_rotation(Quat::from_rotation_x(30f32.to_radians()));
        assert!((camera.pitch() - 30.0).abs() < 1e-3);

        let (forward, right) = camera.flattened();
        assert!(forward.abs_diff_eq(Vec3::NEG_Z, 1e-5));
        assert!(right.abs_diff_eq(Vec3::X, 1e-5));
    }
}
