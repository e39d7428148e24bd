//! Hook registry: before/after keyed by event, enter/leave keyed by state,
//! plus one optional hook run after every committed transition.

use crate::core::{Callback, Event, State};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Hooks keyed by event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventHook {
    /// Runs first, before the destination is entered or the source is left.
    Before,
    /// Runs after the state has changed. Never runs for loop transitions.
    After,
}

/// Hooks keyed by state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateHook {
    /// Runs when a transition is about to enter the state.
    Enter,
    /// Runs when a transition is about to leave the state.
    Leave,
}

/// Holds every registered hook. A missing entry means that phase is skipped.
pub struct CallbackRegistry<S: State, E: Event, A, X> {
    before: HashMap<E, Callback<S, A, X>>,
    after: HashMap<E, Callback<S, A, X>>,
    enter: HashMap<S, Callback<S, A, X>>,
    leave: HashMap<S, Callback<S, A, X>>,
    after_any: Option<Callback<S, A, X>>,
}

impl<S: State, E: Event, A, X> Default for CallbackRegistry<S, E, A, X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event, A, X> CallbackRegistry<S, E, A, X> {
    pub fn new() -> Self {
        Self {
            before: HashMap::new(),
            after: HashMap::new(),
            enter: HashMap::new(),
            leave: HashMap::new(),
            after_any: None,
        }
    }

    /// Register an event hook, replacing any previous one for `(hook, event)`.
    pub fn set_event(&mut self, hook: EventHook, event: E, callback: Callback<S, A, X>) {
        match hook {
            EventHook::Before => self.before.insert(event, callback),
            EventHook::After => self.after.insert(event, callback),
        };
    }

    /// Register a state hook, replacing any previous one for `(hook, state)`.
    pub fn set_state(&mut self, hook: StateHook, state: S, callback: Callback<S, A, X>) {
        match hook {
            StateHook::Enter => self.enter.insert(state, callback),
            StateHook::Leave => self.leave.insert(state, callback),
        };
    }

    /// Register the hook run after every committed transition.
    pub fn set_after_any(&mut self, callback: Callback<S, A, X>) {
        self.after_any = Some(callback);
    }

    pub fn event(&self, hook: EventHook, event: &E) -> Option<&Callback<S, A, X>> {
        match hook {
            EventHook::Before => self.before.get(event),
            EventHook::After => self.after.get(event),
        }
    }

    pub fn state(&self, hook: StateHook, state: &S) -> Option<&Callback<S, A, X>> {
        match hook {
            StateHook::Enter => self.enter.get(state),
            StateHook::Leave => self.leave.get(state),
        }
    }

    pub fn after_any(&self) -> Option<&Callback<S, A, X>> {
        self.after_any.as_ref()
    }

    /// Total number of registered hooks, the global one included.
    pub fn len(&self) -> usize {
        self.before.len()
            + self.after.len()
            + self.enter.len()
            + self.leave.len()
            + usize::from(self.after_any.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
