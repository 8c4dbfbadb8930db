//! # taskgate
//!
//! **Taskgate** is a bounded-concurrency task queue for Rust.
//!
//! Callers enqueue asynchronous units of work and the scheduler runs at most
//! `max_concurrent` of them at a time, retrying failed attempts and firing
//! lifecycle hooks as the queue moves between states.
//!
//! ## Architecture
//! ```text
//!   enqueue / enqueue_all                     start() / stop()
//!            │                                       │
//!            ▼                                       ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Scheduler                                                    │
//! │  - pending: VecDeque<WorkItem>          (strict FIFO)         │
//! │  - running: HashMap<u64, RunningHandle> (monotonic keys)      │
//! │  - state:   Idle | Busy | Stopped                             │
//! └──────┬────────────────────────────────────────────────────────┘
//!        │ admission loop (iterative, capacity-bounded)
//!        ▼
//!   tokio::spawn ──► retry wrapper ──► task attempt 0..=retries
//!        │                                   │
//!        │                       per-attempt failure ─► on_error
//!        ▼
//!   completion: unregister handle
//!        ├─ success          ─► on_success
//!        ├─ terminal failure ─► on_error
//!        └─ re-enter admission loop
//!                ├─ pending left + capacity ─► launch next
//!                └─ pending empty + running 0 ─► Idle, on_idle
//! ```
//!
//! ## State machine
//! - Constructed `Idle` when `auto_start` is set, `Stopped` otherwise.
//! - `start()` flips `Idle`/`Stopped` → `Busy` when pending is non-empty.
//! - `Busy` → `Idle` exactly when the last in-flight item completes with an
//!   empty pending list.
//! - `stop()` flips any state to `Stopped`; in-flight items keep running but
//!   their completions admit nothing new. `Stopped` is sticky until `start()`.
//!
//! Every transition fires exactly one hook: `on_idle`, `on_busy`, or
//! `on_stop`. Hooks are fire-and-forget; a panicking hook is caught and
//! logged, never corrupting the queue bookkeeping.
//!
//! ## Features
//! | Area            | Description                                        | Key types                         |
//! |-----------------|----------------------------------------------------|-----------------------------------|
//! | **Scheduling**  | FIFO admission under a hard concurrency cap.       | [`Scheduler`], [`State`]          |
//! | **Retries**     | Bounded sequential retries with optional backoff.  | [`Backoff`], [`Jitter`]           |
//! | **Hooks**       | Observe lifecycle and per-task outcomes.           | [`Hooks`]                         |
//! | **Tasks**       | Define work as trait impls or plain closures.      | [`Task`], [`TaskFn`]              |
//! | **Errors**      | Typed task and scheduler failures.                 | [`TaskError`], [`SchedulerError`] |
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use taskgate::{Config, Hooks, Scheduler, TaskError, TaskFn};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let hooks = Hooks::new().on_success(|| println!("done"));
//!     let sched = Scheduler::new(Config::default(), hooks);
//!
//!     sched.enqueue(
//!         TaskFn::arc("hello", || async {
//!             println!("Hello from taskgate!");
//!             Ok::<_, TaskError>(())
//!         }),
//!         0,
//!     );
//!
//!     sched.drain(Duration::from_secs(1)).await?;
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod hooks;
mod policies;
mod scheduler;
mod tasks;

// ---- Public re-exports ----

pub use config::Config;
pub use error::{SchedulerError, TaskError};
pub use hooks::Hooks;
pub use policies::{Backoff, Jitter};
pub use scheduler::{Scheduler, State};
pub use tasks::{BoxTaskFuture, Task, TaskFn, TaskRef, WorkItem};
