//! Builder API for state machine construction.
//!
//! Transitions and hooks are declared on a [`StateMachineBuilder`], either
//! one at a time or as batches of descriptors, and frozen by
//! [`StateMachineBuilder::build`].

pub mod descriptors;
pub mod error;
pub mod machine;

pub use descriptors::{EventCallbackDesc, EventDesc, LoopDesc, StateCallbackDesc};
pub use error::BuildError;
pub use machine::StateMachineBuilder;
