//! Value domains for states, events and hook callbacks.
//!
//! The engine treats states and events as opaque values. It only needs to
//! clone them, compare them for equality and hash them as table keys, so any
//! type with those capabilities qualifies automatically.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

/// Marker trait for state machine states.
///
/// Implemented for every `Clone + Eq + Hash + Debug` type, so application
/// enums and strings can be used without any extra code. No ordering is
/// assumed and the engine never checks that a value belongs to the intended
/// domain.
///
/// # Example
///
/// ```rust
/// use statehook::core::State;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// fn assert_state<S: State>(_: &S) {}
///
/// assert_state(&Door::Open);
/// assert_state(&"closed");
/// ```
pub trait State: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> State for T {}

/// Marker trait for events that trigger transitions.
///
/// Same requirements as [`State`]. Events and states are separate type
/// parameters on the machine, so an event can never be passed where a state
/// is expected.
pub trait Event: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Event for T {}

/// A user-supplied hook.
///
/// Receives the machine's current state and the argument value passed to
/// [`StateMachine::event`](crate::engine::StateMachine::event) or
/// [`StateMachine::can`](crate::engine::StateMachine::can). Returning an
/// error aborts the remaining hooks of that call and the error is handed
/// back to the caller unchanged.
pub type Callback<S, A, X> = Arc<dyn Fn(&S, &A) -> Result<(), X> + Send + Sync>;

/// Wrap a closure as a [`Callback`].
pub fn callback<S, A, X, F>(f: F) -> Callback<S, A, X>
where
    F: Fn(&S, &A) -> Result<(), X> + Send + Sync + 'static,
{
    Arc::new(f)
}
