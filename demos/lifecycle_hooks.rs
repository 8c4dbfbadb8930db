//! Observing the Idle/Busy/Stopped state machine through hooks.
//!
//! Run with: `cargo run --example lifecycle_hooks`

use std::time::Duration;

use taskgate::{Config, Hooks, Scheduler, TaskError, TaskFn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let hooks = Hooks::new()
        .on_busy(|| println!("-> busy"))
        .on_idle(|| println!("-> idle"))
        .on_stop(|| println!("-> stopped"));

    let cfg = Config {
        auto_start: false,
        max_concurrent: 1,
        ..Config::default()
    };
    let sched = Scheduler::new(cfg, hooks);
    println!("constructed: {:?}", sched.state());

    for i in 1..=3 {
        sched.enqueue(
            TaskFn::arc(format!("step-{i}"), move || async move {
                tokio::time::sleep(Duration::from_millis(100)).await;
                println!("step-{i} done");
                Ok::<_, TaskError>(())
            }),
            0,
        );
    }
    println!("pending: {}", sched.pending_count());

    sched.start();
    sched.drain(Duration::from_secs(5)).await?;

    sched.stop();
    println!("final: {:?}", sched.state());
    Ok(())
}
