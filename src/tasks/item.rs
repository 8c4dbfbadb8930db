//! # Work item: a task plus its retry budget.
//!
//! A [`WorkItem`] is created on enqueue and is immutable afterwards. It is
//! owned by the scheduler's pending list until dequeued, then by the
//! in-flight registry until completion, then discarded. `retries = 0` means
//! a single attempt.

use std::fmt;

use crate::tasks::TaskRef;

/// One caller-submitted unit of work plus its retry budget.
#[derive(Clone)]
pub struct WorkItem {
    task: TaskRef,
    retries: u32,
}

impl WorkItem {
    /// Bundles a task with the number of retries allowed after the first
    /// attempt fails.
    pub fn new(task: TaskRef, retries: u32) -> Self {
        Self { task, retries }
    }

    /// The task to execute.
    pub fn task(&self) -> &TaskRef {
        &self.task
    }

    /// Retries allowed after the first attempt (total attempts = retries + 1).
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Convenience: the task's name.
    pub fn name(&self) -> &str {
        self.task.name()
    }
}

impl fmt::Debug for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkItem")
            .field("task", &self.task.name())
            .field("retries", &self.retries)
            .finish()
    }
}
