//! Enemy configuration (read-only at runtime, shared between actors via `Arc`)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{BehaviorError, BehaviorResult};
use crate::shared::TurnPhases;

/// Параметры enemy AI
///
/// Intended ordering: `attack_range ≤ aggro_range ≤ alert_range`.
/// Not enforced, `validate()` only warns about it.
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Target inside → Idle wakes up into Alert (meters)
    pub alert_range: f32,
    /// Target inside → Alert escalates to Aggro (meters)
    pub aggro_range: f32,
    /// Target inside → Chase switches to Attack (meters)
    pub attack_range: f32,
    /// Patrol detection radius (meters)
    pub detection_range: f32,

    /// m/s
    pub patrol_speed: f32,
    /// m/s
    pub chase_speed: f32,
    /// Facing correction while attacking (deg/s)
    pub rotation_speed: f32,

    /// |angle| above → Alert starts a turn (degrees)
    pub alert_turn_threshold: f32,
    /// |angle| above → Aggro turns once per activation (degrees)
    pub aggro_turn_threshold: f32,
    pub alert_turn: TurnPhases,
    pub aggro_turn: TurnPhases,

    /// Seconds of staring in Alert before giving up and patrolling
    pub alert_duration: f32,

    /// Fixed patrol route (world positions). Empty → random points around spawn
    pub patrol_points: Vec<[f32; 3]>,
    /// Random patrol radius around spawn (meters)
    pub patrol_radius: f32,
    /// Waypoint counts as reached inside this radius (meters)
    pub waypoint_tolerance: f32,

    /// Animator speed blend length (seconds)
    pub speed_blend_duration: f32,

    /// HitReaction length (seconds)
    pub hit_reaction_duration: f32,
    /// Hits with at least this much damage stagger into HitReaction, but only
    /// where the hit would change state anyway (None = never stagger)
    pub stagger_damage: Option<i32>,

    pub max_health: i32,
    pub limb_max_health: i32,

    /// Muscle strength of a freshly hit sub-part (0 = limp, 1 = full)
    pub impact_muscle_strength: f32,
    /// Physics ticks until a hit sub-part gets its strength back
    pub muscle_restore_ticks: u32,

    /// Extra distance beyond `attack_range` before Attack gives up (hysteresis)
    pub attack_exit_margin: f32,

    /// Spawn into Patrol instead of Idle
    pub starts_patrolling: bool,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            alert_range: 15.0,
            aggro_range: 10.0,
            attack_range: 2.0,
            detection_range: 10.0,
            patrol_speed: 1.5,
            chase_speed: 4.5,
            rotation_speed: 180.0,
            alert_turn_threshold: 30.0,
            aggro_turn_threshold: 90.0,
            alert_turn: TurnPhases::new(0.6, 0.4, 0.2), // 20% медленно, остальное быстро
            aggro_turn: TurnPhases::new(0.5, 0.3, 0.5),
            alert_duration: 4.0,
            patrol_points: Vec::new(),
            patrol_radius: 10.0,
            waypoint_tolerance: 0.5,
            speed_blend_duration: 0.25,
            hit_reaction_duration: 0.6,
            stagger_damage: None,
            max_health: 100,
            limb_max_health: 40,
            impact_muscle_strength: 0.2,
            muscle_restore_ticks: 30, // 0.5s при 60Hz
            attack_exit_margin: 0.0,
            starts_patrolling: false,
        }
    }
}

fn non_negative(field: &'static str, value: f32) -> BehaviorResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(BehaviorError::InvalidConfig {
            field,
            reason: format!("must be finite and >= 0, got {}", value),
        })
    }
}

impl EnemyConfig {
    pub fn patrol_route(&self) -> Vec<Vec3> {
        self.patrol_points.iter().map(|p| Vec3::from_array(*p)).collect()
    }

    /// Rejects unusable values; range ordering problems are only logged
    pub fn validate(&self) -> BehaviorResult<()> {
        non_negative("alert_range", self.alert_range)?;
        non_negative("aggro_range", self.aggro_range)?;
        non_negative("attack_range", self.attack_range)?;
        non_negative("detection_range", self.detection_range)?;
        non_negative("patrol_speed", self.patrol_speed)?;
        non_negative("chase_speed", self.chase_speed)?;
        non_negative("rotation_speed", self.rotation_speed)?;
        non_negative("alert_turn_threshold", self.alert_turn_threshold)?;
        non_negative("aggro_turn_threshold", self.aggro_turn_threshold)?;
        non_negative("alert_duration", self.alert_duration)?;
        non_negative("patrol_radius", self.patrol_radius)?;
        non_negative("waypoint_tolerance", self.waypoint_tolerance)?;
        non_negative("speed_blend_duration", self.speed_blend_duration)?;
        non_negative("hit_reaction_duration", self.hit_reaction_duration)?;
        non_negative("attack_exit_margin", self.attack_exit_margin)?;
        self.alert_turn.validate("alert_turn")?;
        self.aggro_turn.validate("aggro_turn")?;

        if self.max_health <= 0 {
            return Err(BehaviorError::InvalidConfig {
                field: "max_health",
                reason: format!("must be > 0, got {}", self.max_health),
            });
        }
        if let Some(threshold) = self.stagger_damage.filter(|threshold| *threshold <= 0) {
            return Err(BehaviorError::InvalidConfig {
                field: "stagger_damage",
                reason: format!("must be > 0 when set, got {}", threshold),
            });
        }
        if !(0.0..=1.0).contains(&self.impact_muscle_strength) {
            return Err(BehaviorError::InvalidConfig {
                field: "impact_muscle_strength",
                reason: format!("outside 0..=1, got {}", self.impact_muscle_strength),
            });
        }

        if !(self.attack_range <= self.aggro_range && self.aggro_range <= self.alert_range) {
            crate::log_warning(&format!(
                "EnemyConfig: expected attack_range ≤ aggro_range ≤ alert_range, got {} / {} / {}",
                self.attack_range, self.aggro_range, self.alert_range
            ));
        }

        Ok(())
    }
}
