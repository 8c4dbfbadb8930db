//! Error types used by the scheduler and tasks.
//!
//! This module defines two error enums:
//!
//! - [`SchedulerError`] — errors raised by the scheduler itself.
//! - [`TaskError`] — errors raised by individual task executions.
//!
//! Task errors are never surfaced to callers as exceptions; they are routed
//! exclusively through the `on_error` hook. Both types provide `as_label`
//! for logging/metrics, and [`TaskError`] additionally exposes
//! [`is_retryable`](TaskError::is_retryable).

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by the scheduler.
///
/// These represent failures in the scheduling machinery itself, such as a
/// drain exceeding its grace period while tasks are still in flight.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// Drain grace period was exceeded; some tasks were still running.
    #[error("drain grace {grace:?} exceeded; still running: {stuck:?}")]
    GraceExceeded {
        /// The grace duration passed to `drain`.
        grace: Duration,
        /// Names of tasks that were still in flight when the grace elapsed.
        stuck: Vec<String>,
    },
}

impl SchedulerError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    /// use taskgate::SchedulerError;
    ///
    /// let err = SchedulerError::GraceExceeded { grace: Duration::from_secs(5), stuck: vec![] };
    /// assert_eq!(err.as_label(), "scheduler_grace_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SchedulerError::GraceExceeded { .. } => "scheduler_grace_exceeded",
        }
    }
}

/// # Errors produced by task execution.
///
/// A [`Fail`](TaskError::Fail) consumes retry budget; a
/// [`Fatal`](TaskError::Fatal) short-circuits any remaining attempts. A
/// panicking attempt is converted to `Fatal` by the retry wrapper.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TaskError {
    /// Task execution failed but may succeed if retried.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Non-recoverable fatal error (never retried).
    #[error("fatal error (no retry): {error}")]
    Fatal {
        /// The underlying error message.
        error: String,
    },
}

impl TaskError {
    /// Creates a retryable failure from any displayable message.
    pub fn fail(error: impl Into<String>) -> Self {
        TaskError::Fail {
            error: error.into(),
        }
    }

    /// Creates a fatal, non-retryable failure from any displayable message.
    pub fn fatal(error: impl Into<String>) -> Self {
        TaskError::Fatal {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Fatal { .. } => "task_fatal",
        }
    }

    /// Indicates whether the error type is safe to retry.
    ///
    /// # Example
    /// ```
    /// use taskgate::TaskError;
    ///
    /// assert!(TaskError::fail("boom").is_retryable());
    /// assert!(!TaskError::fatal("nope").is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        matches!(self, TaskError::Fail { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(TaskError::fail("x").as_label(), "task_failed");
        assert_eq!(TaskError::fatal("x").as_label(), "task_fatal");
        let err = SchedulerError::GraceExceeded {
            grace: Duration::from_secs(1),
            stuck: vec!["slow".into()],
        };
        assert_eq!(err.as_label(), "scheduler_grace_exceeded");
    }

    #[test]
    fn test_display_includes_message() {
        let err = TaskError::fail("disk on fire");
        assert!(err.to_string().contains("disk on fire"));
    }
}
