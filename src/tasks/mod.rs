//! # Task abstractions and work items.
//!
//! This module provides the task-related types:
//! - [`Task`] - trait for implementing async units of work
//! - [`TaskFn`] - function-backed task implementation
//! - [`TaskRef`] - shared reference to a task (`Arc<dyn Task>`)
//! - [`WorkItem`] - a task paired with its retry budget

mod item;
mod task;
mod task_fn;

pub use item::WorkItem;
pub use task::{BoxTaskFuture, Task, TaskRef};
pub use task_fn::TaskFn;
