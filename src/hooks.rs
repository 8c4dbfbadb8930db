//! # Lifecycle and result hooks.
//!
//! [`Hooks`] bundles the five observer callbacks a scheduler fires:
//!
//! - `on_busy` / `on_idle` / `on_stop` — state transitions, exactly one per
//!   transition;
//! - `on_success` — a work item completed successfully;
//! - `on_error` — a work item attempt failed (once per failed attempt,
//!   including the terminal one).
//!
//! ## Rules
//! - Unset hooks are no-ops.
//! - Hooks are invoked synchronously and their return is ignored.
//! - A panicking hook is caught and logged (warn); scheduler bookkeeping
//!   always completes before the hook fires, so a faulty observer cannot
//!   desynchronize the queue.
//!
//! ## Example
//! ```rust
//! use taskgate::Hooks;
//!
//! let hooks = Hooks::new()
//!     .on_busy(|| println!("queue woke up"))
//!     .on_idle(|| println!("queue drained"))
//!     .on_error(|err| eprintln!("attempt failed: {err}"));
//! ```

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use tracing::warn;

use crate::error::TaskError;

type Hook = Arc<dyn Fn() + Send + Sync>;
type ErrorHook = Arc<dyn Fn(&TaskError) + Send + Sync>;

/// Observer callbacks for scheduler lifecycle and task outcomes.
///
/// Construct with [`Hooks::new`] and chain the setters; every hook is
/// optional and defaults to a no-op.
#[derive(Clone, Default)]
pub struct Hooks {
    on_success: Option<Hook>,
    on_error: Option<ErrorHook>,
    on_idle: Option<Hook>,
    on_busy: Option<Hook>,
    on_stop: Option<Hook>,
}

impl Hooks {
    /// Creates an empty hook set (all no-ops).
    pub fn new() -> Self {
        Self::default()
    }

    /// Called after a work item completes successfully.
    pub fn on_success(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(f));
        self
    }

    /// Called once per failed attempt, including the terminal failure.
    pub fn on_error(mut self, f: impl Fn(&TaskError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(f));
        self
    }

    /// Called when the scheduler enters the idle state.
    pub fn on_idle(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_idle = Some(Arc::new(f));
        self
    }

    /// Called when the scheduler enters the busy state.
    pub fn on_busy(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_busy = Some(Arc::new(f));
        self
    }

    /// Called when the scheduler enters the stopped state.
    pub fn on_stop(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_stop = Some(Arc::new(f));
        self
    }

    pub(crate) fn fire_success(&self) {
        if let Some(f) = &self.on_success {
            isolate("on_success", || f());
        }
    }

    pub(crate) fn fire_error(&self, err: &TaskError) {
        if let Some(f) = &self.on_error {
            isolate("on_error", || f(err));
        }
    }

    pub(crate) fn fire_idle(&self) {
        if let Some(f) = &self.on_idle {
            isolate("on_idle", || f());
        }
    }

    pub(crate) fn fire_busy(&self) {
        if let Some(f) = &self.on_busy {
            isolate("on_busy", || f());
        }
    }

    pub(crate) fn fire_stop(&self) {
        if let Some(f) = &self.on_stop {
            isolate("on_stop", || f());
        }
    }
}

/// Runs one hook invocation, containing any panic it raises.
fn isolate(hook: &'static str, call: impl FnOnce()) {
    if catch_unwind(AssertUnwindSafe(call)).is_err() {
        warn!(hook, "lifecycle hook panicked; ignoring");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_unset_hooks_are_noops() {
        let hooks = Hooks::new();
        hooks.fire_success();
        hooks.fire_error(&TaskError::fail("x"));
        hooks.fire_idle();
        hooks.fire_busy();
        hooks.fire_stop();
    }

    #[test]
    fn test_hooks_fire() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let hooks = Hooks::new().on_success(move || {
            h.fetch_add(1, Ordering::SeqCst);
        });

        hooks.fire_success();
        hooks.fire_success();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_panicking_hook_is_contained() {
        let hooks = Hooks::new().on_idle(|| panic!("observer bug"));
        hooks.fire_idle();
        // Still usable afterwards.
        hooks.fire_idle();
    }

    #[test]
    fn test_error_hook_receives_error() {
        let seen = Arc::new(AtomicUsize::new(0));
        let s = seen.clone();
        let hooks = Hooks::new().on_error(move |err| {
            assert!(err.to_string().contains("boom"));
            s.fetch_add(1, Ordering::SeqCst);
        });

        hooks.fire_error(&TaskError::fail("boom"));
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
