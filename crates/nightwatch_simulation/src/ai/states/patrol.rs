use bevy::prelude::*;

use crate::ai::body::EnemyBody;
use crate::ai::config::EnemyConfig;
use crate::ai::states::{anim, EnemyStateId};
use crate::fsm::BehaviorState;

/// Walking between random waypoints until the target is detected
pub struct PatrolState {
    detection_range: f32,
    patrol_speed: f32,
    waypoint_tolerance: f32,
    route: Vec<Vec3>,

    waypoint: Option<Vec3>,
}

impl PatrolState {
    pub fn new(config: &EnemyConfig) -> Self {
        Self {
            detection_range: config.detection_range,
            patrol_speed: config.patrol_speed,
            waypoint_tolerance: config.waypoint_tolerance,
            route: config.patrol_route(),
            waypoint: None,
        }
    }

    pub fn waypoint(&self) -> Option<Vec3> {
        self.waypoint
    }

    fn next_waypoint(&mut self, body: &mut EnemyBody) {
        let point = body.pick_patrol_point(&self.route, self.waypoint);
        self.waypoint = Some(point);
        body.navigation.set_target(point);
    }

    fn reached(&self, body: &EnemyBody) -> bool {
        // Height is the navmesh's business
        self.waypoint.is_some_and(|point| {
            let offset = point - body.pose.position;
            Vec2::new(offset.x, offset.z).length_squared()
                <= self.waypoint_tolerance * self.waypoint_tolerance
        })
    }
}

impl BehaviorState<EnemyStateId, EnemyBody> for PatrolState {
    fn id(&self) -> EnemyStateId {
        EnemyStateId::Patrol
    }

    fn enter(&mut self, body: &mut EnemyBody) {
        self.waypoint = None;
        self.next_waypoint(body);
        body.navigation.enable();
        body.blend_speed_to(self.patrol_speed);
        body.animator.set_flag(anim::IS_PATROLLING, true);
    }

    fn exit(&mut self, body: &mut EnemyBody, _next: EnemyStateId) {
        body.animator.set_flag(anim::IS_PATROLLING, false);
    }

    fn logic_update(&mut self, body: &mut EnemyBody) -> Option<EnemyStateId> {
        if !body.debug_override && body.target_in_range(self.detection_range) {
            return Some(EnemyStateId::Aggro);
        }

        if self.reached(body) {
            self.next_waypoint(body);
        }
        None
    }
}
