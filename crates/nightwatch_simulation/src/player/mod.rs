//! Player behavior module
//!
//! PlayerActor = StateMachine + Idle/Strafe/Sprint/Aim/Shoot + PlayerBody.
//! Camera-relative locomotion, fire-rate gate, shot spread.

use bevy::prelude::*;

pub mod actor;
pub mod body;
pub mod config;
pub mod fire;
pub mod input;
pub mod locomotion;
pub mod states;
pub mod systems;


pub use actor::PlayerActor;
pub use body::PlayerBody;
pub use config::PlayerConfig;
pub use fire::{FireControl, Shot};
pub use input::{CameraBasis, PlayerInput};
pub use states::PlayerStateId;
pub use systems::PlayerShotFired;

/// Player Plugin
///
/// PreUpdate (chained): perception → hits → callbacks → debug tooling →
/// logic pass (+ PlayerShotFired). FixedUpdate: physics pass.
/// PostUpdate: late pass (aim IK refresh).
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        crate::shared::register_actor_events(app);

        app.add_event::<PlayerShotFired>()
            .init_resource::<CameraBasis>()
            .add_systems(
                PreUpdate,
                (
                    systems::sync_player_perception,
                    systems::apply_player_hits,
                    systems::route_player_animation_callbacks,
                    systems::apply_player_force_requests,
                    systems::apply_player_debug_toggles,
                    systems::player_logic_pass,
                )
                    .chain(),
            )
            .add_systems(FixedUpdate, systems::player_physics_pass)
            .add_systems(PostUpdate, systems::player_late_pass);
    }
}
