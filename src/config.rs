//! # Scheduler configuration.
//!
//! [`Config`] defines the scheduler's behavior: whether enqueueing triggers
//! admission immediately, how many work items may run concurrently, and the
//! backoff applied between retry attempts.
//!
//! # Example
//! ```
//! use taskgate::Config;
//!
//! let mut cfg = Config::default();
//! cfg.max_concurrent = 4;
//! cfg.auto_start = false;
//!
//! assert_eq!(cfg.concurrency_limit(), 4);
//! ```

use crate::policies::Backoff;

/// Configuration for a [`Scheduler`](crate::Scheduler).
///
/// Fixed at construction; there is no mid-run reconfiguration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Run the admission loop automatically after each enqueue.
    ///
    /// When `false`, enqueued items sit in the pending list until `start()`
    /// is called, and the scheduler is constructed in the stopped state.
    pub auto_start: bool,
    /// Maximum number of work items in flight at any instant.
    ///
    /// `0` is treated as `1`: the cap must be positive.
    pub max_concurrent: usize,
    /// Delay policy applied between retry attempts of a failing task.
    ///
    /// The default is immediate retries (no delay).
    pub backoff: Backoff,
}

impl Default for Config {
    /// Provides a default configuration:
    /// - `auto_start = true`
    /// - `max_concurrent = 10`
    /// - `backoff = Backoff::default()` (immediate retries)
    fn default() -> Self {
        Self {
            auto_start: true,
            max_concurrent: 10,
            backoff: Backoff::default(),
        }
    }
}

impl Config {
    /// The effective concurrency cap (`max_concurrent` clamped to at least 1).
    pub fn concurrency_limit(&self) -> usize {
        self.max_concurrent.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert!(cfg.auto_start);
        assert_eq!(cfg.max_concurrent, 10);
        assert_eq!(cfg.concurrency_limit(), 10);
    }

    #[test]
    fn test_zero_cap_clamps_to_one() {
        let cfg = Config {
            max_concurrent: 0,
            ..Config::default()
        };
        assert_eq!(cfg.concurrency_limit(), 1);
    }
}
