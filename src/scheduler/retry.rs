//! # Run one work item with bounded sequential retries.
//!
//! Executes a [`WorkItem`]'s task up to `retries + 1` times. Attempts are
//! strictly sequential; each failed non-terminal attempt fires `on_error`
//! and optionally sleeps per the [`Backoff`] policy before the next attempt.
//!
//! ## Flow
//! ```text
//! attempt 0 ──► Ok  ──► return Ok (no further attempts, no on_error)
//!           └─► Err ──► retryable && budget left?
//!                         ├─ yes ─► on_error ─► sleep(backoff) ─► attempt k+1
//!                         └─ no  ─► return Err   (terminal failure;
//!                                                 caller fires on_error)
//! ```
//!
//! ## Rules
//! - A task failing every attempt runs exactly `retries + 1` times; with the
//!   caller's terminal `on_error`, the hook fires `retries + 1` times total.
//! - [`TaskError::Fatal`] short-circuits the remaining budget.
//! - A panicking attempt is contained and converted to `Fatal`.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tokio::time;
use tracing::debug;

use crate::{error::TaskError, hooks::Hooks, policies::Backoff, tasks::Task, tasks::WorkItem};

/// Runs `item` to success or terminal failure.
///
/// Returns `Ok(())` as soon as any attempt succeeds. Returns the last error
/// once the retry budget is exhausted or a non-retryable error occurs; the
/// caller is responsible for firing `on_error` for that terminal failure.
pub(super) async fn run_with_retries(
    item: &WorkItem,
    backoff: &Backoff,
    hooks: &Hooks,
) -> Result<(), TaskError> {
    let mut attempt: u32 = 0;

    loop {
        match attempt_once(item.task().as_ref()).await {
            Ok(()) => return Ok(()),
            Err(err) => {
                if attempt >= item.retries() || !err.is_retryable() {
                    return Err(err);
                }

                hooks.fire_error(&err);
                debug!(task = item.name(), attempt, error = %err, "attempt failed; retrying");

                let delay = backoff.delay(attempt);
                if !delay.is_zero() {
                    time::sleep(delay).await;
                }
                attempt += 1;
            }
        }
    }
}

/// Executes a single attempt, containing panics.
async fn attempt_once(task: &dyn Task) -> Result<(), TaskError> {
    match AssertUnwindSafe(task.spawn()).catch_unwind().await {
        Ok(res) => res,
        Err(panic) => Err(TaskError::fatal(panic_message(panic))),
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("task panicked: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("task panicked: {s}")
    } else {
        "task panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::TaskFn;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn failing_task(calls: Arc<AtomicUsize>) -> Arc<TaskFn<impl Fn() -> BoxedFut>> {
        TaskFn::arc("flaky", move || {
            calls.fetch_add(1, Ordering::SeqCst);
            boxed_fail()
        })
    }

    type BoxedFut = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<(), TaskError>> + Send + 'static>,
    >;

    fn boxed_fail() -> BoxedFut {
        Box::pin(async { Err(TaskError::fail("boom")) })
    }

    #[tokio::test]
    async fn test_success_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        let task = TaskFn::arc("ok", move || {
            c.fetch_add(1, Ordering::SeqCst);
            async { Ok(()) }
        });
        let item = WorkItem::new(task, 5);

        let res = run_with_retries(&item, &Backoff::default(), &Hooks::new()).await;
        assert!(res.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_exhausts_budget_then_fails() {
        let calls = Arc::new(AtomicUsize::new(0));
        let errors = Arc::new(AtomicUsize::new(0));
        let e = errors.clone();
        let hooks = Hooks::new().on_error(move |_| {
            e.fetch_add(1, Ordering::SeqCst);
        });

        let item = WorkItem::new(failing_task(calls.clone()), 3);
        let res = run_with_retries(&item, &Backoff::default(), &hooks).await;

        assert!(res.is_err());
        // retries = 3 → 4 attempts total.
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        // Wrapper fires on_error only for the 3 non-terminal failures.
        assert_eq!(errors.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_retries_is_single_attempt() {
        let calls = Arc::new(AtomicUsize::new(0));
        let item = WorkItem::new(failing_task(calls.clone()), 0);

        let res = run_with_retries(&item, &Backoff::default(), &Hooks::new()).await;
        assert!(res.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fatal_skips_remaining_budget() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        let task = TaskFn::arc("doomed", move || {
            c.fetch_add(1, Ordering::SeqCst);
            async { Err(TaskError::fatal("wedged")) }
        });
        let item = WorkItem::new(task, 10);

        let res = run_with_retries(&item, &Backoff::default(), &Hooks::new()).await;
        assert!(matches!(res, Err(TaskError::Fatal { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recovers_mid_budget() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        let task = TaskFn::arc("eventually", move || {
            let n = c.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(TaskError::fail("not yet"))
                } else {
                    Ok(())
                }
            }
        });
        let item = WorkItem::new(task, 5);

        let res = run_with_retries(&item, &Backoff::default(), &Hooks::new()).await;
        assert!(res.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_panic_becomes_fatal() {
        let task = TaskFn::arc("bomb", || async { panic!("kaboom") });
        let item = WorkItem::new(task, 5);

        let res = run_with_retries(&item, &Backoff::default(), &Hooks::new()).await;
        match res {
            Err(TaskError::Fatal { error }) => assert!(error.contains("kaboom")),
            other => panic!("expected fatal, got {other:?}"),
        }
    }
}
