//! A flaky task retried with exponential backoff and jitter.
//!
//! Run with: `cargo run --example retry_with_backoff`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use taskgate::{Backoff, Config, Hooks, Jitter, Scheduler, TaskError, TaskFn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config {
        backoff: Backoff {
            first: Duration::from_millis(50),
            max: Duration::from_secs(1),
            factor: 2.0,
            jitter: Jitter::Equal,
        },
        ..Config::default()
    };

    let hooks = Hooks::new()
        .on_error(|err| println!("attempt failed: {err}"))
        .on_success(|| println!("recovered"));
    let sched = Scheduler::new(cfg, hooks);

    let attempts = Arc::new(AtomicUsize::new(0));
    sched.enqueue(
        TaskFn::arc("flaky", move || {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 3 {
                    Err(TaskError::fail(format!("transient glitch #{n}")))
                } else {
                    Ok(())
                }
            }
        }),
        5,
    );

    sched.drain(Duration::from_secs(10)).await?;
    Ok(())
}
