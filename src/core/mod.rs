//! Core value types shared by the builder and the engine.
//!
//! - State and event domains via the `State` and `Event` marker traits
//! - The `Callback` hook type
//! - Transition history tracking

mod history;
mod state;

pub use history::{StateHistory, StateTransition};
pub use state::{callback, Callback, Event, State};
