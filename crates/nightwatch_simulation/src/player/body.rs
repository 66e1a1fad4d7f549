//! PlayerBody — context of the player behavior states

use std::sync::Arc;

use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::shared::{Animator, EnvironmentProbe, Health, Pose, ScalarBlend};

use super::config::PlayerConfig;
use super::fire::{shot_direction, FireControl, Shot};
use super::input::{CameraBasis, PlayerInput};
use super::locomotion;
use super::states::anim;

pub struct PlayerBody {
    pub label: String,
    pub config: Arc<PlayerConfig>,

    pub pose: Pose,
    pub input: PlayerInput,
    pub camera: CameraBasis,
    pub delta: f32,

    pub health: Health,
    pub debug_override: bool,

    pub animator: Animator,
    pub probe: Option<Box<dyn EnvironmentProbe>>,
    pub rng: ChaCha8Rng,

    /// Desired velocity for the character controller (m/s)
    pub velocity: Vec3,

    speed: ScalarBlend,
    fire: FireControl,
    shots: Vec<Shot>,
}

impl PlayerBody {
    pub fn new(
        label: impl Into<String>,
        config: Arc<PlayerConfig>,
        spawn: Pose,
        animator: Animator,
        probe: Option<Box<dyn EnvironmentProbe>>,
        rng: ChaCha8Rng,
    ) -> Self {
        Self {
            label: label.into(),
            health: Health::new(config.max_health),
            fire: FireControl::new(config.fire_interval),
            config,
            pose: spawn,
            input: PlayerInput::default(),
            camera: CameraBasis::default(),
            delta: 0.0,
            debug_override: false,
            animator,
            probe,
            rng,
            velocity: Vec3::ZERO,
            speed: ScalarBlend::settled(0.0),
            shots: Vec::new(),
        }
    }

    pub fn has_move_input(&self) -> bool {
        self.input.has_move(self.config.input_deadzone)
    }

    // ========================================================================
    // Speed
    // ========================================================================

    pub fn speed(&self) -> f32 {
        self.speed.value()
    }

    pub fn blend_speed_to(&mut self, target: f32) {
        if self.speed.target() == target {
            return;
        }
        self.speed = ScalarBlend::new(self.speed.value(), target, self.config.speed_blend_duration);
    }

    pub(crate) fn advance_speed_blend(&mut self) {
        let speed = self.speed.advance(self.delta);
        self.animator.set_float(anim::SPEED, speed);
    }

    // ========================================================================
    // Locomotion
    // ========================================================================

    /// Camera-relative, surface-conformed direction for the current input
    pub fn move_direction(&self) -> Vec3 {
        if !self.has_move_input() {
            return Vec3::ZERO;
        }
        let direction = locomotion::camera_relative(self.input.move_axis, &self.camera);
        locomotion::conform_to_environment(
            direction,
            self.pose.position,
            self.input.moving_backward(self.config.input_deadzone),
            self.probe.as_deref(),
            &self.config,
        )
    }

    /// Velocity = direction × blended speed; local direction feeds the
    /// strafe blend space
    pub fn steer(&mut self) -> Vec3 {
        let direction = self.move_direction();
        self.velocity = direction * self.speed.value();

        let local = self.pose.rotation.inverse() * direction;
        self.animator.set_float(anim::MOVE_X, local.x);
        self.animator.set_float(anim::MOVE_Y, -local.z);
        direction
    }

    pub fn face_direction(&mut self, direction: Vec3, rate: f32) {
        if let Some(target) = locomotion::facing_for(direction) {
            self.pose.rotation =
                locomotion::facing_step(self.pose.rotation, target, rate, self.delta);
        }
    }

    pub fn face_camera(&mut self) {
        let forward = self.camera.forward;
        self.face_direction(forward, self.config.aim_turn_rate);
    }

    // ========================================================================
    // Fire
    // ========================================================================

    pub fn fire_cooldown(&self) -> f32 {
        self.fire.cooldown()
    }

    pub(crate) fn tick_fire(&mut self) {
        self.fire.tick(self.delta);
    }

    /// Fires if the cooldown allows; accepted shots go to the outbox
    pub fn try_fire(&mut self) -> bool {
        if !self.fire.try_fire() {
            return false;
        }

        let direction = shot_direction(
            self.camera.forward,
            self.input.spread_expanded,
            self.config.spread_horizontal,
            self.config.spread_vertical,
            &mut self.rng,
        );
        self.shots.push(Shot {
            origin: self.pose.position,
            direction,
        });
        self.animator.set_trigger(anim::FIRE);
        true
    }

    pub(crate) fn drain_shots(&mut self) -> Vec<Shot> {
        std::mem::take(&mut self.shots)
    }
}
