//! Generic state machine
//!
//! Owns only the pointer to the active state (`current`), never the states
//! themselves; they live in the actor's `StateRegistry`.
//!
//! Contract:
//! - `set_state(x)` while `x` is active → no-op (no Exit/Enter, timers untouched)
//! - otherwise `current.exit(x)` → `current = x` → `x.enter()`
//! - update passes forward to the active state and apply the transition it
//!   requests before returning
//! - terminal states are a facade concern, the machine has no such notion

use crate::error::{BehaviorError, BehaviorResult};
use crate::fsm::{BehaviorState, StateId, StateRegistry};
use crate::shared::AnimationEvent;

#[derive(Debug, Clone)]
pub struct StateMachine<I: StateId> {
    owner_label: String,
    current: Option<I>,
    previous: Option<I>,
    /// Seconds spent in the current state (logic ticks only)
    time_in_state: f32,
}

impl<I: StateId> StateMachine<I> {
    pub fn new(owner_label: impl Into<String>) -> Self {
        Self {
            owner_label: owner_label.into(),
            current: None,
            previous: None,
            time_in_state: 0.0,
        }
    }

    pub fn owner_label(&self) -> &str {
        &self.owner_label
    }

    pub fn current(&self) -> Option<I> {
        self.current
    }

    pub fn previous(&self) -> Option<I> {
        self.previous
    }

    pub fn time_in_state(&self) -> f32 {
        self.time_in_state
    }

    pub fn is_in(&self, id: I) -> bool {
        self.current == Some(id)
    }

    /// Display name of the active state ("None" before the first transition)
    pub fn current_name(&self) -> &'static str {
        self.current.map(|id| id.name()).unwrap_or("None")
    }

    fn unregistered(&self, id: I) -> BehaviorError {
        BehaviorError::UnregisteredState {
            owner: self.owner_label.clone(),
            state: id.name(),
        }
    }

    pub fn set_state<C>(
        &mut self,
        next: I,
        states: &mut StateRegistry<I, C>,
        ctx: &mut C,
    ) -> BehaviorResult<()> {
        if self.current == Some(next) {
            crate::log(&format!(
                "{}: already in {}, transition ignored",
                self.owner_label,
                next.name()
            ));
            return Ok(());
        }

        // Validate before Exit so a bad target never leaves the actor stateless
        if !states.contains(next) {
            return Err(self.unregistered(next));
        }

        if let Some(prev) = self.current {
            if let Some(state) = states.get_mut(prev) {
                state.exit(ctx, next);
            }
        }

        crate::log(&format!(
            "{}: {} → {}",
            self.owner_label,
            self.current_name(),
            next.name()
        ));

        self.previous = self.current;
        self.current = Some(next);
        self.time_in_state = 0.0;

        let state = states.get_mut(next).ok_or_else(|| self.unregistered(next))?;
        state.enter(ctx);
        Ok(())
    }

    /// Runs `pass` on the active state and applies the transition it asks for
    fn dispatch<C>(
        &mut self,
        states: &mut StateRegistry<I, C>,
        ctx: &mut C,
        pass: impl FnOnce(&mut (dyn BehaviorState<I, C> + 'static), &mut C) -> Option<I>,
    ) -> BehaviorResult<()> {
        let Some(current) = self.current else {
            return Ok(());
        };

        let state = states
            .get_mut(current)
            .ok_or_else(|| self.unregistered(current))?;

        match pass(state, ctx) {
            Some(next) => self.set_state(next, states, ctx),
            None => Ok(()),
        }
    }

    pub fn logic_update<C>(
        &mut self,
        delta: f32,
        states: &mut StateRegistry<I, C>,
        ctx: &mut C,
    ) -> BehaviorResult<()> {
        if self.current.is_some() {
            self.time_in_state += delta;
        }
        self.dispatch(states, ctx, |state, ctx| state.logic_update(ctx))
    }

    pub fn physics_update<C>(
        &mut self,
        states: &mut StateRegistry<I, C>,
        ctx: &mut C,
    ) -> BehaviorResult<()> {
        self.dispatch(states, ctx, |state, ctx| state.physics_update(ctx))
    }

    pub fn late_update<C>(
        &mut self,
        states: &mut StateRegistry<I, C>,
        ctx: &mut C,
    ) -> BehaviorResult<()> {
        self.dispatch(states, ctx, |state, ctx| {
            state.late_update(ctx);
            None
        })
    }

    /// Routes an animation-complete callback to the active state.
    ///
    /// Returns `false` when the state does not declare the callback
    /// (dropped, only logged).
    pub fn dispatch_animation_event<C>(
        &mut self,
        event: AnimationEvent,
        states: &mut StateRegistry<I, C>,
        ctx: &mut C,
    ) -> BehaviorResult<bool> {
        let Some(current) = self.current else {
            crate::log(&format!(
                "{}: {:?} dropped (no active state)",
                self.owner_label, event
            ));
            return Ok(false);
        };

        let handles = states
            .get(current)
            .map(|state| state.handles(event))
            .unwrap_or(false);

        if !handles {
            crate::log(&format!(
                "{}: {:?} dropped ({} does not handle it)",
                self.owner_label,
                event,
                current.name()
            ));
            return Ok(false);
        }

        self.dispatch(states, ctx, |state, ctx| state.on_animation_event(ctx, event))?;
        Ok(true)
    }
}
