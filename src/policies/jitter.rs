//! # Jitter for retry delays.
//!
//! [`Jitter`] adds randomness to backoff delays to prevent thundering herd
//! effects when many items retry simultaneously.
//!
//! - [`Jitter::None`] — no randomization, predictable delays
//! - [`Jitter::Full`] — random delay in `[0, delay]` (most aggressive)
//! - [`Jitter::Equal`] — `delay/2 + random[0, delay/2]` (balanced)

use rand::Rng;
use std::time::Duration;

/// Policy controlling randomization of retry delays.
///
/// ## Trade-offs
/// - **None**: predictable, but risks synchronized retries
/// - **Full**: maximum randomness, aggressive load spreading
/// - **Equal**: preserves ~75% of the original delay on average
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Jitter {
    /// No jitter: use the exact backoff delay.
    #[default]
    None,

    /// Full jitter: random delay in `[0, delay]`.
    Full,

    /// Equal jitter: `delay/2 + random[0, delay/2]`.
    Equal,
}

impl Jitter {
    /// Applies this jitter to the given delay.
    pub fn apply(&self, delay: Duration) -> Duration {
        match self {
            Jitter::None => delay,
            Jitter::Full => full_jitter(delay),
            Jitter::Equal => equal_jitter(delay),
        }
    }
}

/// Full jitter: random[0, delay]
fn full_jitter(delay: Duration) -> Duration {
    let ms = delay.as_millis() as u64;
    if ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::rng().random_range(0..=ms))
}

/// Equal jitter: delay/2 + random[0, delay/2]
fn equal_jitter(delay: Duration) -> Duration {
    let ms = delay.as_millis() as u64;
    if ms == 0 {
        return Duration::ZERO;
    }
    let half = ms / 2;
    let jitter = if half == 0 {
        0
    } else {
        rand::rng().random_range(0..=half)
    };
    Duration::from_millis(half + jitter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_identity() {
        let d = Duration::from_millis(250);
        assert_eq!(Jitter::None.apply(d), d);
    }

    #[test]
    fn test_zero_delay_stays_zero() {
        assert_eq!(Jitter::Full.apply(Duration::ZERO), Duration::ZERO);
        assert_eq!(Jitter::Equal.apply(Duration::ZERO), Duration::ZERO);
    }

    #[test]
    fn test_full_jitter_within_bounds() {
        let d = Duration::from_millis(1000);
        for _ in 0..100 {
            assert!(Jitter::Full.apply(d) <= d);
        }
    }

    #[test]
    fn test_equal_jitter_within_bounds() {
        let d = Duration::from_millis(1000);
        for _ in 0..100 {
            let out = Jitter::Equal.apply(d);
            assert!(out >= Duration::from_millis(500));
            assert!(out <= d);
        }
    }
}
