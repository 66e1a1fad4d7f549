//! Two-phase turn plumbing shared by Alert and Aggro
//!
//! The turn lives in the owning state (`Option<TwoPhaseTurn>`), the body only
//! mirrors `is_turning` for the facade and the animator.

use crate::ai::body::EnemyBody;
use crate::ai::states::{anim, turn_clip};
use crate::shared::{geometry, TurnPhases, TwoPhaseTurn};

/// Starts a turn by `yaw` degrees from the current facing
pub(crate) fn start(body: &mut EnemyBody, yaw: f32, phases: TurnPhases) -> TwoPhaseTurn {
    let start = body.pose.rotation;
    let target = geometry::yawed(start, yaw);

    body.is_turning = true;
    body.animator.set_flag(anim::IS_TURNING, true);
    body.animator.play(turn_clip(yaw));

    TwoPhaseTurn::new(start, target, phases)
}

/// One physics step; drops the holder once the target orientation is written
pub(crate) fn advance(turn: &mut Option<TwoPhaseTurn>, body: &mut EnemyBody) {
    let Some(active) = turn.as_mut() else {
        return;
    };

    body.pose.rotation = active.advance(body.delta);

    if active.is_finished() {
        *turn = None;
        body.is_turning = false;
        body.animator.set_flag(anim::IS_TURNING, false);
    }
}

/// Abandons the turn where it is (state exit)
pub(crate) fn cancel(turn: &mut Option<TwoPhaseTurn>, body: &mut EnemyBody) {
    if turn.take().is_some() {
        body.is_turning = false;
        body.animator.set_flag(anim::IS_TURNING, false);
    }
}
