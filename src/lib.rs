//! Statehook: a declarative finite state machine with transition hooks
//!
//! A machine is a transition table, `(event, from) -> to`, plus hooks that
//! run at fixed points of every transition. The host declares both once
//! through a builder and then fires events; no hand-written `match` on
//! state/event pairs is needed.
//!
//! # Core Concepts
//!
//! - **States and events**: any `Clone + Eq + Hash + Debug` values
//! - **Transitions**: `(event, from) -> to`, with loops where `to == from`
//! - **Hooks**: `Before`/`After` keyed by event, `Enter`/`Leave` keyed by
//!   state, and one optional hook after every committed transition
//! - **Dispatch**: [`StateMachine::event`] validates, runs hooks and moves
//! - **Query**: [`StateMachine::can`] validates and runs the pre-transition
//!   hooks without moving
//!
//! # Example
//!
//! ```rust
//! use statehook::{Error, StateMachine};
//!
//! #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
//! enum Phase {
//!     A,
//!     B,
//!     C,
//! }
//!
//! let mut machine: StateMachine<Phase, &str, (), String> = StateMachine::builder()
//!     .initial(Phase::A)
//!     .event("a-b", [Phase::A], Phase::B)
//!     .event("b-c", [Phase::B], Phase::C)
//!     .stay("loop", [Phase::A, Phase::B])
//!     .after_any(|state, _| {
//!         println!("now in {:?}", state);
//!         Ok(())
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     machine.can(&"b-c", &()),
//!     Err(Error::InvalidTransition { event: "b-c", from: Phase::A })
//! );
//!
//! machine.event("loop", &()).unwrap();
//! assert_eq!(machine.current(), &Phase::A);
//!
//! machine.event("a-b", &()).unwrap();
//! machine.event("b-c", &()).unwrap();
//! assert_eq!(machine.current(), &Phase::C);
//! ```

pub mod builder;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use crate::core::{Callback, Event, State};
pub use engine::{Error, EventHook, StateHook, StateMachine};
