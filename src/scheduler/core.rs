//! # Scheduler: FIFO admission under a hard concurrency cap.
//!
//! The [`Scheduler`] owns the pending list, the in-flight registry, and the
//! lifecycle state, all guarded by one mutex so admission decisions are
//! atomic. The admission loop is iterative: it keeps launching pending items
//! while capacity allows, and completions re-enter the same loop instead of
//! recursing, so a long queue of instantly-resolving tasks never grows the
//! call stack.
//!
//! ## Admission loop
//! ```text
//! pump():
//!   loop {
//!     ├─ Stopped, or running >= cap      ─► return
//!     ├─ pending item + capacity         ─► pop front (FIFO)
//!     │        ├─ register monotonic handle, flip to Busy if needed
//!     │        └─ tokio::spawn(run_item) ─► continue loop
//!     └─ pending empty
//!              ├─ running == 0 && Busy   ─► Idle, on_idle, return
//!              └─ otherwise              ─► return (completions re-pump)
//!   }
//!
//! run_item():
//!   retry wrapper ─► unregister handle ─► on_success / on_error ─► pump()
//! ```
//!
//! ## Rules
//! - The in-flight count never exceeds the cap, even transiently.
//! - `stop()` halts admission only; in-flight items run to completion, and
//!   their completions never flip `Stopped` back to `Busy`/`Idle`.
//! - Bookkeeping always completes before hooks fire, and hooks run outside
//!   the lock, so an observer can safely call back into the scheduler.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::time;
use tracing::debug;

use crate::{
    config::Config,
    error::SchedulerError,
    hooks::Hooks,
    scheduler::{handle::RunningHandle, retry, state::State},
    tasks::{TaskRef, WorkItem},
};

/// Bookkeeping guarded by the scheduler mutex. Never held across an await.
struct Inner {
    state: State,
    pending: VecDeque<WorkItem>,
    running: HashMap<u64, RunningHandle>,
    next_handle: u64,
}

/// One admission decision, taken under the lock and acted on outside it.
enum Step {
    Launch { id: u64, item: WorkItem, woke: bool },
    Idle,
    Done,
}

/// Bounded-concurrency FIFO task queue.
///
/// Submissions append to the pending list; the admission loop launches items
/// while below [`Config::max_concurrent`] and not stopped. Completions
/// (success or exhausted retries) update bookkeeping and admit the next
/// item. See the [crate docs](crate) for the full state machine.
///
/// Operations must be called from within a tokio runtime: launched items are
/// driven by `tokio::spawn`.
pub struct Scheduler {
    cfg: Config,
    hooks: Hooks,
    inner: Mutex<Inner>,
    drained: Notify,
    me: Weak<Scheduler>,
}

impl Scheduler {
    /// Creates a scheduler in `Idle` (if `auto_start`) or `Stopped` state.
    ///
    /// Construction never fails; the configuration is normalized (a zero
    /// concurrency cap is treated as 1, missing hooks as no-ops).
    pub fn new(cfg: Config, hooks: Hooks) -> Arc<Self> {
        let state = if cfg.auto_start {
            State::Idle
        } else {
            State::Stopped
        };

        Arc::new_cyclic(|me| Self {
            cfg,
            hooks,
            inner: Mutex::new(Inner {
                state,
                pending: VecDeque::new(),
                running: HashMap::new(),
                next_handle: 0,
            }),
            drained: Notify::new(),
            me: me.clone(),
        })
    }

    /// Appends one work item to the back of the pending list.
    ///
    /// `retries` is the number of re-attempts allowed after the first
    /// failure (`0` = single attempt). Triggers the admission loop when
    /// `auto_start` is set; a stopped scheduler keeps the item pending.
    pub fn enqueue(&self, task: TaskRef, retries: u32) {
        {
            let mut inner = self.inner.lock();
            inner.pending.push_back(WorkItem::new(task, retries));
        }
        if self.cfg.auto_start {
            self.pump();
        }
    }

    /// Appends a batch of work items as one contiguous FIFO run.
    ///
    /// The batch's internal order is preserved; `retries` applies to every
    /// item. Triggers the admission loop when `auto_start` is set.
    pub fn enqueue_all(&self, tasks: impl IntoIterator<Item = TaskRef>, retries: u32) {
        {
            let mut inner = self.inner.lock();
            for task in tasks {
                inner.pending.push_back(WorkItem::new(task, retries));
            }
        }
        if self.cfg.auto_start {
            self.pump();
        }
    }

    /// Begins (or resumes) admission.
    ///
    /// Transitions `Idle`/`Stopped` → `Busy` and fires `on_busy`, then runs
    /// the admission loop. No-op when already `Busy` or when the pending
    /// list is empty.
    pub fn start(&self) {
        let started = {
            let mut inner = self.inner.lock();
            if inner.state == State::Busy || inner.pending.is_empty() {
                false
            } else {
                inner.state = State::Busy;
                true
            }
        };

        if started {
            self.hooks.fire_busy();
            self.pump();
        }
    }

    /// Halts admission of new items.
    ///
    /// In-flight items keep running to completion, but their completions
    /// admit nothing new. Fires `on_stop` on the transition; calling `stop`
    /// on an already-stopped scheduler is a no-op.
    pub fn stop(&self) {
        let stopped = {
            let mut inner = self.inner.lock();
            if inner.state == State::Stopped {
                false
            } else {
                inner.state = State::Stopped;
                true
            }
        };

        if stopped {
            debug!("scheduler stopped; admission halted");
            self.hooks.fire_stop();
        }
    }

    /// Stops the scheduler, then removes and returns all pending items.
    ///
    /// Items already in flight are unaffected and still fire their result
    /// hooks on completion.
    pub fn clear(&self) -> Vec<WorkItem> {
        self.stop();
        let mut inner = self.inner.lock();
        inner.pending.drain(..).collect()
    }

    /// Removes and returns the front pending item, if any.
    pub fn dequeue(&self) -> Option<WorkItem> {
        self.inner.lock().pending.pop_front()
    }

    /// Removes and returns all pending items in FIFO order.
    pub fn dequeue_all(&self) -> Vec<WorkItem> {
        self.inner.lock().pending.drain(..).collect()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> State {
        self.inner.lock().state
    }

    /// Number of items waiting in the pending list.
    pub fn pending_count(&self) -> usize {
        self.inner.lock().pending.len()
    }

    /// Number of items currently in flight.
    pub fn running_count(&self) -> usize {
        self.inner.lock().running.len()
    }

    /// Sorted names of the tasks currently in flight.
    pub fn running_names(&self) -> Vec<String> {
        let inner = self.inner.lock();
        let mut names: Vec<String> = inner.running.values().map(|h| h.name().to_string()).collect();
        names.sort_unstable();
        names
    }

    /// The scheduler's configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Waits until the in-flight count reaches zero, bounded by `grace`.
    ///
    /// Returns [`SchedulerError::GraceExceeded`] with the names of the tasks
    /// still running if the grace elapses first. Pending items that a
    /// stopped scheduler will never launch do not block a drain.
    pub async fn drain(&self, grace: Duration) -> Result<(), SchedulerError> {
        let quiesced = async {
            loop {
                let notified = self.drained.notified();
                tokio::pin!(notified);
                let _ = notified.as_mut().enable();

                if self.running_count() == 0 {
                    return;
                }
                notified.await;
            }
        };

        if time::timeout(grace, quiesced).await.is_err() {
            return Err(SchedulerError::GraceExceeded {
                grace,
                stuck: self.running_names(),
            });
        }
        Ok(())
    }

    /// The admission loop: launches pending items while capacity allows.
    ///
    /// Iterative by construction — each pass takes one decision under the
    /// lock and acts on it outside, so neither a long queue nor a chain of
    /// instant completions grows the stack.
    fn pump(&self) {
        loop {
            let step = {
                let mut inner = self.inner.lock();

                if inner.state == State::Stopped
                    || inner.running.len() >= self.cfg.concurrency_limit()
                {
                    Step::Done
                } else if let Some(item) = inner.pending.pop_front() {
                    let id = inner.next_handle;
                    inner.next_handle += 1;
                    inner.running.insert(id, RunningHandle::new(item.name()));

                    let woke = inner.state != State::Busy;
                    inner.state = State::Busy;
                    Step::Launch { id, item, woke }
                } else if inner.running.is_empty() && inner.state == State::Busy {
                    inner.state = State::Idle;
                    Step::Idle
                } else {
                    Step::Done
                }
            };

            match step {
                Step::Done => return,
                Step::Idle => {
                    debug!("queue drained; scheduler idle");
                    self.hooks.fire_idle();
                    return;
                }
                Step::Launch { id, item, woke } => {
                    if woke {
                        self.hooks.fire_busy();
                    }
                    debug!(task = item.name(), id, "launching work item");

                    // The upgrade only fails if the scheduler is being
                    // dropped, in which case nothing new may launch anyway.
                    if let Some(me) = self.me.upgrade() {
                        tokio::spawn(me.run_item(id, item));
                    }
                }
            }
        }
    }

    /// Drives one launched item to completion, then re-enters admission.
    async fn run_item(self: Arc<Self>, id: u64, item: WorkItem) {
        let res = retry::run_with_retries(&item, &self.cfg.backoff, &self.hooks).await;

        let elapsed = {
            let mut inner = self.inner.lock();
            inner.running.remove(&id).map(|h| h.started_at().elapsed())
        };

        match &res {
            Ok(()) => {
                debug!(task = item.name(), id, ?elapsed, "work item completed");
                self.hooks.fire_success();
            }
            Err(err) => {
                debug!(task = item.name(), id, ?elapsed, error = %err, "work item failed terminally");
                self.hooks.fire_error(err);
            }
        }

        self.pump();
        self.drained.notify_waiters();
    }
}
