//! # Task trait.
//!
//! A [`Task`] is one asynchronous unit of work. Each call to
//! [`spawn`](Task::spawn) produces a **fresh** future, so the scheduler can
//! retry a failed task by spawning it again. The common handle type is
//! [`TaskRef`], an `Arc<dyn Task>` suitable for sharing across the runtime.
//!
//! There is no cancellation: once launched, a task runs to completion even
//! if the scheduler is stopped or cleared in the meantime.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::TaskError;

/// Boxed future produced by one task attempt.
pub type BoxTaskFuture = Pin<Box<dyn Future<Output = Result<(), TaskError>> + Send + 'static>>;

/// Shared handle to a task.
pub type TaskRef = Arc<dyn Task>;

/// # Asynchronous unit of work.
///
/// A `Task` has a stable [`name`](Task::name) (used in logs and drain
/// diagnostics) and a [`spawn`](Task::spawn) method that creates one attempt.
///
/// # Example
/// ```
/// use taskgate::{BoxTaskFuture, Task, TaskError};
///
/// struct Demo;
///
/// impl Task for Demo {
///     fn name(&self) -> &str { "demo" }
///
///     fn spawn(&self) -> BoxTaskFuture {
///         Box::pin(async {
///             // do work...
///             Ok(())
///         })
///     }
/// }
/// ```
pub trait Task: Send + Sync + 'static {
    /// Returns a stable, human-readable task name.
    fn name(&self) -> &str;

    /// Creates a new future for one attempt of this task.
    ///
    /// Called once per attempt; state shared between attempts must live in
    /// the implementor (wrap it in `Arc`/atomics explicitly).
    fn spawn(&self) -> BoxTaskFuture;
}
