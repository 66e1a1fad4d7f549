//! Behavior state capability set + per-actor state registry.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::shared::AnimationEvent;

/// Closed identity of a state inside one actor graph (usually a fieldless enum).
pub trait StateId: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Display name (HUD, debug console, `force_state`)
    fn name(self) -> &'static str;

    /// Every state of the graph, used for name lookup
    fn all() -> &'static [Self];

    fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|id| id.name().eq_ignore_ascii_case(name))
    }
}

/// One node of an actor's behavior graph.
///
/// `C` is the actor body (config, runtime flags, ports, perception snapshot).
/// The state itself only keeps cached config and per-activation fields,
/// which `enter` resets.
///
/// Update passes return the requested transition instead of calling the
/// machine; the machine applies it before the pass returns (synchronous,
/// depth-first).
pub trait BehaviorState<I: StateId, C>: Send + Sync {
    fn id(&self) -> I;

    fn enter(&mut self, ctx: &mut C);

    fn exit(&mut self, _ctx: &mut C, _next: I) {}

    fn logic_update(&mut self, ctx: &mut C) -> Option<I>;

    fn physics_update(&mut self, _ctx: &mut C) -> Option<I> {
        None
    }

    fn late_update(&mut self, _ctx: &mut C) {}

    /// Declares which animation-complete callbacks this state reacts to
    fn handles(&self, _event: AnimationEvent) -> bool {
        false
    }

    fn on_animation_event(&mut self, _ctx: &mut C, _event: AnimationEvent) -> Option<I> {
        None
    }
}

/// States constructed once per actor, alive for the actor's lifetime.
pub struct StateRegistry<I: StateId, C> {
    states: HashMap<I, Box<dyn BehaviorState<I, C>>>,
}

impl<I: StateId, C> Default for StateRegistry<I, C> {
    fn default() -> Self {
        Self {
            states: HashMap::new(),
        }
    }
}

impl<I: StateId, C> StateRegistry<I, C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a state under its own id (replaces a previous registration)
    pub fn register(&mut self, state: impl BehaviorState<I, C> + 'static) -> &mut Self {
        self.states.insert(state.id(), Box::new(state));
        self
    }

    pub fn contains(&self, id: I) -> bool {
        self.states.contains_key(&id)
    }

    pub fn get(&self, id: I) -> Option<&dyn BehaviorState<I, C>> {
        self.states.get(&id).map(|state| state.as_ref())
    }

    pub fn get_mut(&mut self, id: I) -> Option<&mut (dyn BehaviorState<I, C> + 'static)> {
        self.states.get_mut(&id).map(|state| state.as_mut())
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
