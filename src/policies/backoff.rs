//! # Backoff policy for retrying failed work items.
//!
//! [`Backoff`] controls the delay slept between retry attempts:
//! - [`Backoff::first`] the initial delay;
//! - [`Backoff::factor`] the multiplicative growth factor;
//! - [`Backoff::max`] the maximum delay cap.
//!
//! The delay for attempt `n` is `first × factor^n`, clamped to `max`, then
//! jitter is applied. The base is derived purely from the attempt number, so
//! jitter output never feeds back into subsequent calculations.
//!
//! The default policy has `first = 0`, which means retries happen
//! immediately — the retry wrapper skips the sleep entirely.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use taskgate::{Backoff, Jitter};
//!
//! let backoff = Backoff {
//!     first: Duration::from_millis(100),
//!     max: Duration::from_secs(10),
//!     factor: 2.0,
//!     jitter: Jitter::None,
//! };
//!
//! assert_eq!(backoff.delay(0), Duration::from_millis(100));
//! assert_eq!(backoff.delay(1), Duration::from_millis(200));
//! // 100ms × 2^10 = 102_400ms → capped at max=10s
//! assert_eq!(backoff.delay(10), Duration::from_secs(10));
//! ```

use std::time::Duration;

use crate::policies::jitter::Jitter;

/// Retry backoff policy.
#[derive(Clone, Copy, Debug)]
pub struct Backoff {
    /// Initial delay before the first retry (`0` = retry immediately).
    pub first: Duration,
    /// Maximum delay cap for retries.
    pub max: Duration,
    /// Multiplicative growth factor (`>= 1.0` recommended).
    pub factor: f64,
    /// Jitter applied to each computed delay.
    pub jitter: Jitter,
}

impl Default for Backoff {
    /// Returns a policy with:
    /// - `first = 0` (immediate retries);
    /// - `factor = 1.0`;
    /// - `max = 30s`;
    /// - no jitter.
    fn default() -> Self {
        Self {
            first: Duration::ZERO,
            max: Duration::from_secs(30),
            factor: 1.0,
            jitter: Jitter::None,
        }
    }
}

impl Backoff {
    /// Computes the delay for the given attempt number (0-indexed).
    ///
    /// The base delay is `first × factor^attempt`, clamped to
    /// [`Backoff::max`]; jitter is applied to the clamped base. A zero
    /// `first` yields [`Duration::ZERO`] for every attempt.
    pub fn delay(&self, attempt: u32) -> Duration {
        if self.first.is_zero() {
            return Duration::ZERO;
        }

        let max_secs = self.max.as_secs_f64();
        let exp = attempt.min(i32::MAX as u32) as i32;
        let raw = self.first.as_secs_f64() * self.factor.powi(exp);

        let base = if !raw.is_finite() || raw < 0.0 || raw > max_secs {
            self.max
        } else {
            Duration::from_secs_f64(raw)
        };

        self.jitter.apply(base)
    }
}
