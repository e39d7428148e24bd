//! Transition table keyed by `(event, from)`.

use crate::core::{Event, State};
use std::collections::HashMap;

/// Mapping `(event, from) -> to`.
///
/// Each key holds at most one destination; inserting an existing key
/// replaces its destination. Loop transitions are ordinary entries whose
/// destination equals the source.
#[derive(Clone, Debug)]
pub struct TransitionTable<S: State, E: Event> {
    entries: HashMap<(E, S), S>,
}

impl<S: State, E: Event> Default for TransitionTable<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> TransitionTable<S, E> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register `event` moving `from` to `to`, replacing any previous entry.
    pub fn insert(&mut self, event: E, from: S, to: S) -> Option<S> {
        self.entries.insert((event, from), to)
    }

    /// Register `event` keeping the machine in `state`.
    pub fn insert_loop(&mut self, event: E, state: S) -> Option<S> {
        self.entries.insert((event, state.clone()), state)
    }

    /// Destination for `event` fired from `from`.
    pub fn destination(&self, event: &E, from: &S) -> Option<&S> {
        // HashMap<(E, S), _> can only be probed with an owned tuple.
        self.entries.get(&(event.clone(), from.clone()))
    }

    pub fn contains(&self, event: &E, from: &S) -> bool {
        self.destination(event, from).is_some()
    }

    /// Events that have an entry for `from`, in no particular order.
    pub fn events_from(&self, from: &S) -> Vec<&E> {
        self.entries
            .keys()
            .filter(|(_, src)| src == from)
            .map(|(event, _)| event)
            .collect()
    }

    /// Every `(event, from, to)` entry, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&E, &S, &S)> {
        self.entries
            .iter()
            .map(|((event, from), to)| (event, from, to))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
