//! Timed interpolation holders (turns, speed blends)
//!
//! Explicit per-frame state instead of coroutines: the owner calls
//! `advance(delta)` from its update pass. Cancelling = replacing the holder.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{BehaviorError, BehaviorResult};

/// Durations + progress split of a two-phase turn
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct TurnPhases {
    /// Phase 1 length (seconds)
    pub slow_duration: f32,
    /// Phase 2 length (seconds)
    pub fast_duration: f32,
    /// Share of the full rotation covered by phase 1 (0..=1)
    pub slow_fraction: f32,
}

impl TurnPhases {
    pub const fn new(slow_duration: f32, fast_duration: f32, slow_fraction: f32) -> Self {
        Self {
            slow_duration,
            fast_duration,
            slow_fraction,
        }
    }

    pub fn total_duration(&self) -> f32 {
        self.slow_duration + self.fast_duration
    }

    pub fn validate(&self, field: &'static str) -> BehaviorResult<()> {
        let durations_ok = self.slow_duration.is_finite()
            && self.fast_duration.is_finite()
            && self.slow_duration >= 0.0
            && self.fast_duration >= 0.0;
        if !durations_ok {
            return Err(BehaviorError::InvalidConfig {
                field,
                reason: format!(
                    "durations must be finite and >= 0 (slow {}, fast {})",
                    self.slow_duration, self.fast_duration
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.slow_fraction) {
            return Err(BehaviorError::InvalidConfig {
                field,
                reason: format!("slow_fraction {} outside 0..=1", self.slow_fraction),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    Slow,
    Fast,
    Done,
}

/// Two-phase yaw turn
///
/// - Phase 1: `start → slerp(start, target, slow_fraction)` over `slow_duration`
/// - Phase 2: phase-1 end → `target` over `fast_duration`
/// - Last write is exactly `target` (no float residual)
///
/// Time left over from a phase spills into the next one, so the result does
/// not depend on how the total time was sliced into steps.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoPhaseTurn {
    start: Quat,
    target: Quat,
    phase_one_end: Quat,
    rotation: Quat,
    phases: TurnPhases,
    phase: TurnPhase,
    elapsed: f32,
}

impl TwoPhaseTurn {
    pub fn new(start: Quat, target: Quat, phases: TurnPhases) -> Self {
        Self {
            start,
            target,
            phase_one_end: start.slerp(target, phases.slow_fraction),
            rotation: start,
            phases,
            phase: TurnPhase::Slow,
            elapsed: 0.0,
        }
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn target(&self) -> Quat {
        self.target
    }

    /// Last written orientation
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn is_finished(&self) -> bool {
        self.phase == TurnPhase::Done
    }

    /// Moves the goal while the turn is in flight (target keeps moving).
    /// Phase 2 keeps its origin and bends toward the new goal.
    pub fn retarget(&mut self, target: Quat) {
        self.target = target;
        if self.phase == TurnPhase::Slow {
            self.phase_one_end = self.start.slerp(target, self.phases.slow_fraction);
        }
    }

    pub fn advance(&mut self, delta: f32) -> Quat {
        let mut step = delta.max(0.0);

        loop {
            match self.phase {
                TurnPhase::Slow => {
                    self.elapsed += step;
                    if self.elapsed < self.phases.slow_duration {
                        let t = self.elapsed / self.phases.slow_duration;
                        self.rotation = self
                            .start
                            .slerp(self.target, self.phases.slow_fraction * t);
                        return self.rotation;
                    }
                    step = self.elapsed - self.phases.slow_duration;
                    self.elapsed = 0.0;
                    self.phase_one_end = self.start.slerp(self.target, self.phases.slow_fraction);
                    self.rotation = self.phase_one_end;
                    self.phase = TurnPhase::Fast;
                }
                TurnPhase::Fast => {
                    self.elapsed += step;
                    if self.elapsed < self.phases.fast_duration {
                        let t = self.elapsed / self.phases.fast_duration;
                        self.rotation = self.phase_one_end.slerp(self.target, t);
                        return self.rotation;
                    }
                    // Snap: the last write is the target itself
                    self.rotation = self.target;
                    self.phase = TurnPhase::Done;
                    return self.rotation;
                }
                TurnPhase::Done => return self.rotation,
            }
        }
    }
}

/// Linear scalar blend (animator speed, locomotion speed)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarBlend {
    start: f32,
    target: f32,
    elapsed: f32,
    duration: f32,
    value: f32,
}

impl ScalarBlend {
    pub fn new(start: f32, target: f32, duration: f32) -> Self {
        let mut blend = Self {
            start,
            target,
            elapsed: 0.0,
            duration: duration.max(0.0),
            value: start,
        };
        if blend.duration <= 0.0 {
            blend.value = target;
        }
        blend
    }

    /// Already settled at `value`
    pub fn settled(value: f32) -> Self {
        Self::new(value, value, 0.0)
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.value == self.target
    }

    pub fn advance(&mut self, delta: f32) -> f32 {
        self.elapsed += delta.max(0.0);
        self.value = if self.duration <= 0.0 || self.elapsed >= self.duration {
            self.target
        } else {
            self.start + (self.target - self.start) * (self.elapsed / self.duration)
        };
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quarter_turn() -> (Quat, Quat) {
        (Quat::IDENTITY, Quat::from_rotation_y(120f32.to_radians()))
    }

    #[test]
    fn test_turn_phase_one_covers_fraction() {
        let (start, target) = quarter_turn();
        let mut turn = TwoPhaseTurn::new(start, target, TurnPhases::new(1.0, 0.5, 0.2));

        turn.advance(0.5);
        let half_phase_one = turn.rotation().angle_between(start).to_degrees();
        assert!((half_phase_one - 12.0).abs() < 0.05, "angle = {}", half_phase_one);
        assert_eq!(turn.phase(), TurnPhase::Slow);

        turn.advance(0.5);
        let phase_one_end = turn.rotation().angle_between(start).to_degrees();
        assert!((phase_one_end - 24.0).abs() < 0.05, "angle = {}", phase_one_end);
        assert_eq!(turn.phase(), TurnPhase::Fast);
    }

    #[test]
    fn test_turn_arrives_exactly_with_irregular_steps() {
        let (start, target) = quarter_turn();
        let steps = [0.016, 0.033, 0.007, 0.1, 0.05, 0.0, 0.021, 0.3, 0.013, 0.25, 0.4];

        for phases in [TurnPhases::new(0.6, 0.4, 0.2), TurnPhases::new(0.5, 0.3, 0.5)] {
            let mut turn = TwoPhaseTurn::new(start, target, phases);
            for dt in steps {
                turn.advance(dt);
            }
            assert!(turn.is_finished());
            assert_eq!(turn.rotation(), target);
        }
    }

    #[test]
    fn test_turn_single_large_step_finishes() {
        let (start, target) = quarter_turn();
        let mut turn = TwoPhaseTurn::new(start, target, TurnPhases::new(0.5, 0.3, 0.5));

        assert_eq!(turn.advance(10.0), target);
        assert!(turn.is_finished());
    }

    #[test]
    fn test_turn_zero_durations_snap() {
        let (start, target) = quarter_turn();
        let mut turn = TwoPhaseTurn::new(start, target, TurnPhases::new(0.0, 0.0, 0.2));

        assert_eq!(turn.advance(0.0), target);
    }

    #[test]
    fn test_turn_retarget_lands_on_new_target() {
        let (start, target) = quarter_turn();
        let moved = Quat::from_rotation_y(-60f32.to_radians());
        let mut turn = TwoPhaseTurn::new(start, target, TurnPhases::new(0.2, 0.2, 0.2));

        turn.advance(0.25);
        turn.retarget(moved);
        turn.advance(0.5);

        assert_eq!(turn.rotation(), moved);
    }

    #[test]
    fn test_turn_phases_validation() {
        assert!(TurnPhases::new(0.5, 0.3, 0.5).validate("aggro_turn").is_ok());
        assert!(TurnPhases::new(-0.1, 0.3, 0.5).validate("aggro_turn").is_err());
        assert!(TurnPhases::new(0.5, 0.3, 1.5).validate("aggro_turn").is_err());
        assert!(TurnPhases::new(f32::NAN, 0.3, 0.5).validate("aggro_turn").is_err());
    }

    #[test]
    fn test_scalar_blend() {
        let mut blend = ScalarBlend::new(0.0, 4.0, 0.5);
        assert_eq!(blend.value(), 0.0);

        assert_eq!(blend.advance(0.25), 2.0);
        assert!(!blend.is_finished());

        assert_eq!(blend.advance(0.5), 4.0);
        assert!(blend.is_finished());
    }

    #[test]
    fn test_scalar_blend_zero_duration_is_immediate() {
        let blend = ScalarBlend::new(3.0, 0.0, 0.0);
        assert_eq!(blend.value(), 0.0);
        assert!(blend.is_finished());
    }
}
