//! # Retry delay policies.
//!
//! - [`Backoff`] — how retry delays grow across attempts.
//! - [`Jitter`] — randomization applied to each delay.

mod backoff;
mod jitter;

pub use backoff::Backoff;
pub use jitter::Jitter;
