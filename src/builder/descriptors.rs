//! Declarative descriptors consumed by the builder.
//!
//! Transition descriptors are plain data and can be loaded from any serde
//! format. Hook descriptors carry closures and are built in code.

use crate::core::{callback, Callback, Event, State};
use crate::engine::{EventHook, StateHook};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// `event` moves each state in `from` to `to`.
///
/// # Example
///
/// ```rust
/// use statehook::builder::EventDesc;
///
/// let desc: EventDesc<String, String> =
///     serde_json::from_str(r#"{"event": "a-b", "from": ["a"], "to": "b"}"#).unwrap();
/// assert_eq!(desc.from, vec!["a".to_string()]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventDesc<S, E> {
    pub event: E,
    pub from: Vec<S>,
    pub to: S,
}

impl<S, E> EventDesc<S, E> {
    pub fn new(event: E, from: impl IntoIterator<Item = S>, to: S) -> Self {
        Self {
            event,
            from: from.into_iter().collect(),
            to,
        }
    }
}

/// `event` keeps the machine in place for each state in `stay`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoopDesc<S, E> {
    pub event: E,
    pub stay: Vec<S>,
}

impl<S, E> LoopDesc<S, E> {
    pub fn new(event: E, stay: impl IntoIterator<Item = S>) -> Self {
        Self {
            event,
            stay: stay.into_iter().collect(),
        }
    }
}

/// A before or after hook for one event.
pub struct EventCallbackDesc<S, E, A, X> {
    pub hook: EventHook,
    pub event: E,
    pub callback: Callback<S, A, X>,
}

impl<S: State, E: Event, A, X> EventCallbackDesc<S, E, A, X> {
    pub fn new<F>(hook: EventHook, event: E, f: F) -> Self
    where
        F: Fn(&S, &A) -> Result<(), X> + Send + Sync + 'static,
    {
        Self {
            hook,
            event,
            callback: callback(f),
        }
    }

    pub fn before<F>(event: E, f: F) -> Self
    where
        F: Fn(&S, &A) -> Result<(), X> + Send + Sync + 'static,
    {
        Self::new(EventHook::Before, event, f)
    }

    pub fn after<F>(event: E, f: F) -> Self
    where
        F: Fn(&S, &A) -> Result<(), X> + Send + Sync + 'static,
    {
        Self::new(EventHook::After, event, f)
    }
}

impl<S, E: Clone, A, X> Clone for EventCallbackDesc<S, E, A, X> {
    fn clone(&self) -> Self {
        Self {
            hook: self.hook,
            event: self.event.clone(),
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<S, E: fmt::Debug, A, X> fmt::Debug for EventCallbackDesc<S, E, A, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventCallbackDesc")
            .field("hook", &self.hook)
            .field("event", &self.event)
            .finish_non_exhaustive()
    }
}

/// An enter or leave hook for one state.
pub struct StateCallbackDesc<S, A, X> {
    pub hook: StateHook,
    pub state: S,
    pub callback: Callback<S, A, X>,
}

impl<S: State, A, X> StateCallbackDesc<S, A, X> {
    pub fn new<F>(hook: StateHook, state: S, f: F) -> Self
    where
        F: Fn(&S, &A) -> Result<(), X> + Send + Sync + 'static,
    {
        Self {
            hook,
            state,
            callback: callback(f),
        }
    }

    pub fn enter<F>(state: S, f: F) -> Self
    where
        F: Fn(&S, &A) -> Result<(), X> + Send + Sync + 'static,
    {
        Self::new(StateHook::Enter, state, f)
    }

    pub fn leave<F>(state: S, f: F) -> Self
    where
        F: Fn(&S, &A) -> Result<(), X> + Send + Sync + 'static,
    {
        Self::new(StateHook::Leave, state, f)
    }
}

impl<S: Clone, A, X> Clone for StateCallbackDesc<S, A, X> {
    fn clone(&self) -> Self {
        Self {
            hook: self.hook,
            state: self.state.clone(),
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<S: fmt::Debug, A, X> fmt::Debug for StateCallbackDesc<S, A, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCallbackDesc")
            .field("hook", &self.hook)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
