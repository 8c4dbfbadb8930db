//! Minimal usage: enqueue a few items and wait for the queue to drain.
//!
//! Run with: `cargo run --example basic`

use std::time::Duration;

use taskgate::{Config, Hooks, Scheduler, TaskError, TaskFn, TaskRef};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("taskgate=debug")
        .init();

    let cfg = Config {
        max_concurrent: 2,
        ..Config::default()
    };
    let sched = Scheduler::new(cfg, Hooks::new().on_idle(|| println!("all done")));

    let tasks: Vec<TaskRef> = (1..=5)
        .map(|i| {
            TaskFn::arc(format!("job-{i}"), move || async move {
                tokio::time::sleep(Duration::from_millis(50 * i)).await;
                println!("job-{i} finished");
                Ok::<_, TaskError>(())
            }) as TaskRef
        })
        .collect();

    sched.enqueue_all(tasks, 0);
    sched.drain(Duration::from_secs(5)).await?;
    Ok(())
}
