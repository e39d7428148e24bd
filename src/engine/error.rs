//! Errors returned by dispatch and query.

use thiserror::Error;

/// Errors that can occur when firing or querying an event.
///
/// `X` is the host's callback error type. A failing hook's error is carried
/// in [`Error::Callback`] exactly as the hook returned it.
#[derive(Debug, Error, PartialEq)]
pub enum Error<S, E, X> {
    /// No transition is registered for the event from the current state.
    #[error("Invalid transition error [Event: {event:?}, From: {from:?}]")]
    InvalidTransition { event: E, from: S },

    /// A hook returned an error.
    #[error("{0}")]
    Callback(X),
}

impl<S, E, X> Error<S, E, X> {
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }

    /// The hook error, if this error came from a hook.
    pub fn callback(&self) -> Option<&X> {
        match self {
            Self::Callback(err) => Some(err),
            Self::InvalidTransition { .. } => None,
        }
    }

    /// Take the hook error out, if this error came from a hook.
    pub fn into_callback(self) -> Option<X> {
        match self {
            Self::Callback(err) => Some(err),
            Self::InvalidTransition { .. } => None,
        }
    }
}
