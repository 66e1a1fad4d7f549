//! Player configuration

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{BehaviorError, BehaviorResult};

/// Параметры player controller
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// m/s
    pub strafe_speed: f32,
    /// m/s
    pub sprint_speed: f32,
    /// m/s while aiming
    pub aim_move_speed: f32,

    /// Slerp rate toward the movement direction (1/s, slow)
    pub move_turn_rate: f32,
    /// Slerp rate toward camera forward while aiming (1/s, fast)
    pub aim_turn_rate: f32,

    /// Seconds between accepted shots
    pub fire_interval: f32,
    /// Max yaw deflection while spread is expanded (degrees)
    pub spread_horizontal: f32,
    /// Max pitch deflection while spread is expanded (degrees)
    pub spread_vertical: f32,

    /// Obstruction probe length when moving backward (meters)
    pub backward_probe_distance: f32,
    /// Ground probe length (meters)
    pub ground_probe_distance: f32,

    pub speed_blend_duration: f32,
    /// Stick magnitude below this counts as no input
    pub input_deadzone: f32,

    pub max_health: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            strafe_speed: 3.0,
            sprint_speed: 6.0,
            aim_move_speed: 2.0,
            move_turn_rate: 5.0,
            aim_turn_rate: 20.0,
            fire_interval: 0.1,
            spread_horizontal: 3.0,
            spread_vertical: 2.0,
            backward_probe_distance: 0.6,
            ground_probe_distance: 1.2,
            speed_blend_duration: 0.2,
            input_deadzone: 0.1,
            max_health: 100,
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> BehaviorResult<()> {
        let values = [
            ("strafe_speed", self.strafe_speed),
            ("sprint_speed", self.sprint_speed),
            ("aim_move_speed", self.aim_move_speed),
            ("move_turn_rate", self.move_turn_rate),
            ("aim_turn_rate", self.aim_turn_rate),
            ("fire_interval", self.fire_interval),
            ("spread_horizontal", self.spread_horizontal),
            ("spread_vertical", self.spread_vertical),
            ("backward_probe_distance", self.backward_probe_distance),
            ("ground_probe_distance", self.ground_probe_distance),
            ("speed_blend_duration", self.speed_blend_duration),
            ("input_deadzone", self.input_deadzone),
        ];
        for (field, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(BehaviorError::InvalidConfig {
                    field,
                    reason: format!("must be finite and >= 0, got {}", value),
                });
            }
        }

        if self.max_health <= 0 {
            return Err(BehaviorError::InvalidConfig {
                field: "max_health",
                reason: format!("must be > 0, got {}", self.max_health),
            });
        }

        if self.sprint_speed < self.strafe_speed {
            crate::log_warning(&format!(
                "PlayerConfig: sprint_speed {} is slower than strafe_speed {}",
                self.sprint_speed, self.strafe_speed
            ));
        }
        Ok(())
    }
}
