//! Transition table, hook registry, and the machine that dispatches events.

mod error;
mod machine;
mod registry;
mod table;

pub use error::Error;
pub use machine::StateMachine;
pub use registry::{CallbackRegistry, EventHook, StateHook};
pub use table::TransitionTable;
