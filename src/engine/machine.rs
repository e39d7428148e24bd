//! State machine that dispatches events through the transition table and
//! runs the registered hooks.

use crate::builder::StateMachineBuilder;
use crate::core::{Event, State, StateHistory, StateTransition};
use crate::engine::error::Error;
use crate::engine::registry::{CallbackRegistry, EventHook, StateHook};
use crate::engine::table::TransitionTable;
use chrono::Utc;

/// A finite state machine with a fixed transition table and hook registry.
///
/// The table and registry are frozen at [`build`](StateMachineBuilder::build)
/// time; only the current state (and the optional history) changes
/// afterwards. There is no internal locking: hosts that share a machine
/// between threads wrap it in their own mutex.
///
/// Hook order for [`event`](Self::event):
///
/// 1. `Before(event)` with the current state
/// 2. `Enter(destination)` with the current state
/// 3. `Leave(current)` with the current state
/// 4. loop transitions stop here; otherwise the state changes
/// 5. `After(event)` with the new state
/// 6. the global after hook with the new state
pub struct StateMachine<S: State, E: Event, A, X> {
    current: S,
    table: TransitionTable<S, E>,
    callbacks: CallbackRegistry<S, E, A, X>,
    history: Option<StateHistory<S, E>>,
}

impl<S: State, E: Event, A, X> StateMachine<S, E, A, X> {
    /// Start configuring a new machine.
    pub fn builder() -> StateMachineBuilder<S, E, A, X> {
        StateMachineBuilder::new()
    }

    pub(crate) fn from_parts(
        initial: S,
        table: TransitionTable<S, E>,
        callbacks: CallbackRegistry<S, E, A, X>,
        history: Option<StateHistory<S, E>>,
    ) -> Self {
        Self {
            current: initial,
            table,
            callbacks,
            history,
        }
    }

    /// Get current state (pure)
    pub fn current(&self) -> &S {
        &self.current
    }

    /// Overwrite the current state.
    ///
    /// Skips the transition table, every hook and the history.
    pub fn set_current(&mut self, state: S) {
        tracing::trace!(from = ?self.current, to = ?state, "current state overridden");
        self.current = state;
    }

    pub fn table(&self) -> &TransitionTable<S, E> {
        &self.table
    }

    pub fn callbacks(&self) -> &CallbackRegistry<S, E, A, X> {
        &self.callbacks
    }

    /// Recorded transitions, if history was enabled on the builder.
    pub fn history(&self) -> Option<&StateHistory<S, E>> {
        self.history.as_ref()
    }

    /// Events with a table entry for the current state (pure, runs no hooks).
    pub fn permitted_events(&self) -> Vec<&E> {
        self.table.events_from(&self.current)
    }

    /// Fire `event`, passing `args` to every hook that runs.
    ///
    /// Fails with [`Error::InvalidTransition`] before running any hook if the
    /// table has no entry for `(event, current)`. A hook error is returned as
    /// [`Error::Callback`] and stops the remaining hooks: if it came from
    /// `Before`, `Enter` or `Leave` the state is unchanged, if it came from
    /// `After` or the global hook the state has already moved.
    pub fn event(&mut self, event: E, args: &A) -> Result<(), Error<S, E, X>> {
        let dst = self.pre_transition(&event, args)?;

        if dst == self.current {
            tracing::trace!(event = ?event, state = ?self.current, "loop transition");
            return Ok(());
        }

        let from = std::mem::replace(&mut self.current, dst);
        tracing::debug!(
            event = ?event,
            from = ?from,
            to = ?self.current,
            "state transition committed"
        );

        if let Some(history) = self.history.as_mut() {
            history.record(StateTransition {
                event: event.clone(),
                from,
                to: self.current.clone(),
                timestamp: Utc::now(),
            });
        }

        if let Some(cb) = self.callbacks.event(EventHook::After, &event) {
            cb(&self.current, args).map_err(Error::Callback)?;
        }

        if let Some(cb) = self.callbacks.after_any() {
            cb(&self.current, args).map_err(Error::Callback)?;
        }

        Ok(())
    }

    /// Check whether `event` could fire from the current state.
    ///
    /// Performs the same lookup as [`event`](Self::event) and runs the same
    /// `Before`, `Enter` and `Leave` hooks, so any side effects of those hooks
    /// do happen. The state is never changed and `After` hooks never run.
    /// Returns `Ok(true)` when the lookup and all three hooks succeed.
    pub fn can(&self, event: &E, args: &A) -> Result<bool, Error<S, E, X>> {
        let dst = self.pre_transition(event, args)?;
        tracing::trace!(event = ?event, from = ?self.current, to = ?dst, "transition permitted");
        Ok(true)
    }

    /// Table lookup followed by the before/enter/leave hooks.
    fn pre_transition(&self, event: &E, args: &A) -> Result<S, Error<S, E, X>> {
        let Some(dst) = self.table.destination(event, &self.current) else {
            tracing::trace!(event = ?event, from = ?self.current, "no transition registered");
            return Err(Error::InvalidTransition {
                event: event.clone(),
                from: self.current.clone(),
            });
        };

        if let Some(cb) = self.callbacks.event(EventHook::Before, event) {
            cb(&self.current, args).map_err(Error::Callback)?;
        }

        if let Some(cb) = self.callbacks.state(StateHook::Enter, dst) {
            cb(&self.current, args).map_err(Error::Callback)?;
        }

        if let Some(cb) = self.callbacks.state(StateHook::Leave, &self.current) {
            cb(&self.current, args).map_err(Error::Callback)?;
        }

        Ok(dst.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{EventDesc, LoopDesc};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Light {
        Red,
        Green,
        Yellow,
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Signal {
        Go,
        Slow,
        Stop,
        Blink,
    }

    type Machine = StateMachine<Light, Signal, (), String>;

    fn builder() -> StateMachineBuilder<Light, Signal, (), String> {
        StateMachine::builder()
            .initial(Light::Red)
            .events(vec![
                EventDesc::new(Signal::Go, vec![Light::Red], Light::Green),
                EventDesc::new(Signal::Slow, vec![Light::Green], Light::Yellow),
                EventDesc::new(Signal::Stop, vec![Light::Yellow], Light::Red),
            ])
            .loops(vec![LoopDesc::new(
                Signal::Blink,
                vec![Light::Red, Light::Yellow],
            )])
    }

    fn log_into(
        log: &Arc<Mutex<Vec<String>>>,
        label: &'static str,
    ) -> impl Fn(&Light, &()) -> Result<(), String> + Send + Sync + 'static {
        let log = Arc::clone(log);
        move |state, _| {
            log.lock().unwrap().push(format!("{}:{:?}", label, state));
            Ok(())
        }
    }

    #[test]
    fn event_moves_to_registered_destination() {
        let mut machine: Machine = builder().build().unwrap();

        machine.event(Signal::Go, &()).unwrap();
        assert_eq!(machine.current(), &Light::Green);
        machine.event(Signal::Slow, &()).unwrap();
        machine.event(Signal::Stop, &()).unwrap();
        assert_eq!(machine.current(), &Light::Red);
    }

    #[test]
    fn unknown_pair_is_invalid_and_runs_nothing() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut machine: Machine = builder()
            .before(Signal::Slow, log_into(&log, "before"))
            .after_any(log_into(&log, "any"))
            .build()
            .unwrap();

        let err = machine.event(Signal::Slow, &()).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidTransition {
                event: Signal::Slow,
                from: Light::Red
            }
        );
        assert_eq!(machine.current(), &Light::Red);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn hooks_run_in_order_with_expected_state() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut machine: Machine = builder()
            .before(Signal::Go, log_into(&log, "before"))
            .on_enter(Light::Green, log_into(&log, "enter"))
            .on_leave(Light::Red, log_into(&log, "leave"))
            .after(Signal::Go, log_into(&log, "after"))
            .after_any(log_into(&log, "any"))
            .build()
            .unwrap();

        machine.event(Signal::Go, &()).unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "before:Red",
                "enter:Red",
                "leave:Red",
                "after:Green",
                "any:Green"
            ]
        );
    }

    #[test]
    fn loop_skips_after_hooks_and_keeps_state() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut machine: Machine = builder()
            .before(Signal::Blink, log_into(&log, "before"))
            .on_enter(Light::Red, log_into(&log, "enter"))
            .on_leave(Light::Red, log_into(&log, "leave"))
            .after(Signal::Blink, log_into(&log, "after"))
            .after_any(log_into(&log, "any"))
            .record_history()
            .build()
            .unwrap();

        machine.event(Signal::Blink, &()).unwrap();

        assert_eq!(machine.current(), &Light::Red);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["before:Red", "enter:Red", "leave:Red"]
        );
        assert!(machine.history().unwrap().is_empty());
    }

    #[test]
    fn pre_hook_failure_keeps_state() {
        let mut machine: Machine = builder()
            .on_leave(Light::Red, |_, _| Err("stuck".to_string()))
            .build()
            .unwrap();

        let err = machine.event(Signal::Go, &()).unwrap_err();
        assert_eq!(err, Error::Callback("stuck".to_string()));
        assert_eq!(machine.current(), &Light::Red);
    }

    #[test]
    fn after_hook_failure_commits_state() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut machine: Machine = builder()
            .after(Signal::Go, |_, _| Err("late".to_string()))
            .after_any(log_into(&log, "any"))
            .record_history()
            .build()
            .unwrap();

        let err = machine.event(Signal::Go, &()).unwrap_err();
        assert_eq!(err.into_callback(), Some("late".to_string()));
        assert_eq!(machine.current(), &Light::Green);
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(machine.history().unwrap().len(), 1);
    }

    #[test]
    fn global_hook_failure_commits_state() {
        let mut machine: Machine = builder()
            .after_any(|_, _| Err("audit".to_string()))
            .build()
            .unwrap();

        assert_eq!(
            machine.event(Signal::Go, &()),
            Err(Error::Callback("audit".to_string()))
        );
        assert_eq!(machine.current(), &Light::Green);
    }

    #[test]
    fn can_runs_pre_hooks_without_committing() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let machine: Machine = builder()
            .before(Signal::Go, log_into(&log, "before"))
            .on_enter(Light::Green, log_into(&log, "enter"))
            .on_leave(Light::Red, log_into(&log, "leave"))
            .after(Signal::Go, log_into(&log, "after"))
            .after_any(log_into(&log, "any"))
            .build()
            .unwrap();

        assert_eq!(machine.can(&Signal::Go, &()), Ok(true));
        assert_eq!(machine.current(), &Light::Red);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["before:Red", "enter:Red", "leave:Red"]
        );
    }

    #[test]
    fn can_reports_invalid_and_hook_errors() {
        let machine: Machine = builder()
            .on_enter(Light::Green, |_, _| Err("closed".to_string()))
            .build()
            .unwrap();

        assert!(machine
            .can(&Signal::Stop, &())
            .unwrap_err()
            .is_invalid_transition());
        assert_eq!(
            machine.can(&Signal::Go, &()),
            Err(Error::Callback("closed".to_string()))
        );
    }

    #[test]
    fn set_current_bypasses_table_and_hooks() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut machine: Machine = builder()
            .on_enter(Light::Yellow, log_into(&log, "enter"))
            .record_history()
            .build()
            .unwrap();

        machine.set_current(Light::Yellow);

        assert_eq!(machine.current(), &Light::Yellow);
        assert!(log.lock().unwrap().is_empty());
        assert!(machine.history().unwrap().is_empty());
        machine.event(Signal::Stop, &()).unwrap();
        assert_eq!(machine.current(), &Light::Red);
    }

    #[test]
    fn args_are_forwarded_to_hooks() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut machine: StateMachine<Light, Signal, (u32, &'static str), String> =
            StateMachine::builder()
                .initial(Light::Red)
                .event(Signal::Go, vec![Light::Red], Light::Green)
                .before(Signal::Go, move |_, args: &(u32, &'static str)| {
                    sink.lock().unwrap().push(*args);
                    Ok(())
                })
                .build()
                .unwrap();

        machine.event(Signal::Go, &(7, "hello")).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![(7, "hello")]);
    }

    #[test]
    fn history_tracks_committed_transitions() {
        let mut machine: Machine = builder().record_history().build().unwrap();

        machine.event(Signal::Go, &()).unwrap();
        machine.event(Signal::Slow, &()).unwrap();

        let history = machine.history().unwrap();
        assert_eq!(
            history.get_path(),
            vec![&Light::Red, &Light::Green, &Light::Yellow]
        );
        assert_eq!(history.events(), vec![&Signal::Go, &Signal::Slow]);
    }

    #[test]
    fn history_is_off_by_default() {
        let mut machine: Machine = builder().build().unwrap();
        machine.event(Signal::Go, &()).unwrap();
        assert!(machine.history().is_none());
    }

    #[test]
    fn permitted_events_follow_current_state() {
        let mut machine: Machine = builder().build().unwrap();

        let mut events = machine.permitted_events();
        events.sort_by_key(|e| format!("{:?}", e));
        assert_eq!(events, vec![&Signal::Blink, &Signal::Go]);

        machine.set_current(Light::Green);
        assert_eq!(machine.permitted_events(), vec![&Signal::Slow]);
    }
}
