//! Builder for constructing state machines.

use crate::builder::descriptors::{EventCallbackDesc, EventDesc, LoopDesc, StateCallbackDesc};
use crate::builder::error::BuildError;
use crate::core::{callback, Event, State, StateHistory};
use crate::engine::{CallbackRegistry, EventHook, StateHook, StateMachine, TransitionTable};

/// Builder for constructing state machines with a fluent API.
///
/// Steps may be given in any order. A later step for the same key replaces
/// the earlier one, whether the key is a transition `(event, from)` or a
/// hook `(kind, event)` / `(kind, state)`.
pub struct StateMachineBuilder<S: State, E: Event, A, X> {
    initial: Option<S>,
    table: TransitionTable<S, E>,
    callbacks: CallbackRegistry<S, E, A, X>,
    record_history: bool,
}

impl<S: State, E: Event, A, X> StateMachineBuilder<S, E, A, X> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            table: TransitionTable::new(),
            callbacks: CallbackRegistry::new(),
            record_history: false,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Add a batch of transitions, one table entry per source state.
    pub fn events(mut self, events: Vec<EventDesc<S, E>>) -> Self {
        for desc in events {
            for from in desc.from {
                self.table.insert(desc.event.clone(), from, desc.to.clone());
            }
        }
        self
    }

    /// Add a single transition from each of `from` to `to`.
    pub fn event(self, event: E, from: impl IntoIterator<Item = S>, to: S) -> Self {
        self.events(vec![EventDesc::new(event, from, to)])
    }

    /// Add a batch of loop transitions.
    pub fn loops(mut self, loops: Vec<LoopDesc<S, E>>) -> Self {
        for desc in loops {
            for stay in desc.stay {
                self.table.insert_loop(desc.event.clone(), stay);
            }
        }
        self
    }

    /// Let `event` keep the machine in each of `states`.
    pub fn stay(self, event: E, states: impl IntoIterator<Item = S>) -> Self {
        self.loops(vec![LoopDesc::new(event, states)])
    }

    /// Register a batch of before/after hooks.
    pub fn event_callbacks(mut self, callbacks: Vec<EventCallbackDesc<S, E, A, X>>) -> Self {
        for desc in callbacks {
            self.callbacks.set_event(desc.hook, desc.event, desc.callback);
        }
        self
    }

    /// Register a batch of enter/leave hooks.
    pub fn state_callbacks(mut self, callbacks: Vec<StateCallbackDesc<S, A, X>>) -> Self {
        for desc in callbacks {
            self.callbacks.set_state(desc.hook, desc.state, desc.callback);
        }
        self
    }

    /// Hook run before `event` changes anything.
    pub fn before<F>(mut self, event: E, f: F) -> Self
    where
        F: Fn(&S, &A) -> Result<(), X> + Send + Sync + 'static,
    {
        self.callbacks.set_event(EventHook::Before, event, callback(f));
        self
    }

    /// Hook run after `event` has changed the state.
    pub fn after<F>(mut self, event: E, f: F) -> Self
    where
        F: Fn(&S, &A) -> Result<(), X> + Send + Sync + 'static,
    {
        self.callbacks.set_event(EventHook::After, event, callback(f));
        self
    }

    /// Hook run when a transition is about to enter `state`.
    pub fn on_enter<F>(mut self, state: S, f: F) -> Self
    where
        F: Fn(&S, &A) -> Result<(), X> + Send + Sync + 'static,
    {
        self.callbacks.set_state(StateHook::Enter, state, callback(f));
        self
    }

    /// Hook run when a transition is about to leave `state`.
    pub fn on_leave<F>(mut self, state: S, f: F) -> Self
    where
        F: Fn(&S, &A) -> Result<(), X> + Send + Sync + 'static,
    {
        self.callbacks.set_state(StateHook::Leave, state, callback(f));
        self
    }

    /// Hook run after every committed, non-loop transition.
    pub fn after_any<F>(mut self, f: F) -> Self
    where
        F: Fn(&S, &A) -> Result<(), X> + Send + Sync + 'static,
    {
        self.callbacks.set_after_any(callback(f));
        self
    }

    /// Keep a [`StateHistory`] of committed transitions.
    pub fn record_history(mut self) -> Self {
        self.record_history = true;
        self
    }

    /// Build the state machine.
    /// Returns an error if the initial state is missing.
    pub fn build(self) -> Result<StateMachine<S, E, A, X>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        let history = self.record_history.then(StateHistory::new);

        tracing::debug!(
            initial = ?initial,
            transitions = self.table.len(),
            callbacks = self.callbacks.len(),
            "state machine built"
        );

        Ok(StateMachine::from_parts(
            initial,
            self.table,
            self.callbacks,
            history,
        ))
    }
}

impl<S: State, E: Event, A, X> Default for StateMachineBuilder<S, E, A, X> {
    fn default() -> Self {
        Self::new()
    }
}
