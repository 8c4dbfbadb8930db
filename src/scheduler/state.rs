//! Scheduler lifecycle state.

/// Current state of a [`Scheduler`](crate::Scheduler).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Nothing in flight and admission is allowed; waiting for work.
    Idle,

    /// Work is actively being admitted or executed.
    Busy,

    /// Admission halted by `stop()` (or never started). In-flight items keep
    /// running; sticky until `start()`.
    Stopped,
}
