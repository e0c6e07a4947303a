//! Task lifecycle state machine
//!
//! Every animation task moves through the same flat machine:
//!
//! ```text
//! Idle --start--> Running --finish--> Ended(Natural)
//!                    |  \--cancel---> Ended(Cancelled)
//!                    \----skip------> Ended(SkippedToEnd)
//! ```
//!
//! `Ended` tasks may be started again. Starting a running task is a no-op.

/// Why a task stopped running
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    /// Reached equilibrium, a bound, or the end of its timeline
    Natural,
    /// Stopped by `cancel()`
    Cancelled,
    /// Jumped straight to its rest state
    SkippedToEnd,
}

/// Lifecycle events accepted by [`TaskState::on`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    Start,
    Finish,
    Cancel,
    Skip,
}

/// Current state of an animation task
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TaskState {
    #[default]
    Idle,
    Running,
    Ended(EndReason),
}

impl TaskState {
    pub fn is_running(self) -> bool {
        self == TaskState::Running
    }

    /// Apply an event, returning the next state.
    ///
    /// Events that make no sense in the current state leave it unchanged,
    /// e.g. cancelling an idle task.
    pub fn on(self, event: LifecycleEvent) -> TaskState {
        match (self, event) {
            (_, LifecycleEvent::Start) => TaskState::Running,
            (TaskState::Running, LifecycleEvent::Finish) => TaskState::Ended(EndReason::Natural),
            (TaskState::Running, LifecycleEvent::Cancel) => TaskState::Ended(EndReason::Cancelled),
            (TaskState::Running, LifecycleEvent::Skip) => {
                TaskState::Ended(EndReason::SkippedToEnd)
            }
            (state, _) => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_lifecycle() {
        let state = TaskState::default();
        assert_eq!(state, TaskState::Idle);

        let state = state.on(LifecycleEvent::Start);
        assert!(state.is_running());

        let state = state.on(LifecycleEvent::Finish);
        assert_eq!(state, TaskState::Ended(EndReason::Natural));
    }

    #[test]
    fn test_cancel_idle_is_noop() {
        assert_eq!(TaskState::Idle.on(LifecycleEvent::Cancel), TaskState::Idle);
    }

    #[test]
    fn test_restart_after_end() {
        let state = TaskState::Ended(EndReason::Cancelled).on(LifecycleEvent::Start);
        assert_eq!(state, TaskState::Running);
    }

    #[test]
    fn test_skip_while_running() {
        let state = TaskState::Running.on(LifecycleEvent::Skip);
        assert_eq!(state, TaskState::Ended(EndReason::SkippedToEnd));
    }
}
