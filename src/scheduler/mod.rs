//! # Scheduler core: state machine, admission loop, retry wrapper.
//!
//! The only public API from this module is [`Scheduler`] and its [`State`].
//!
//! Internal modules:
//! - [`core`]: the scheduler object — pending list, in-flight registry,
//!   state transitions, and the admission loop;
//! - [`retry`]: executes one work item with bounded sequential retries;
//! - [`handle`]: registry entry for an in-flight work item;
//! - [`state`]: the Idle/Busy/Stopped lifecycle state.

mod core;
mod handle;
mod retry;
mod state;

pub use core::Scheduler;
pub use state::State;
