//! Registry entry for an in-flight work item.

use std::sync::Arc;
use std::time::Instant;

/// Bookkeeping for one launched work item.
///
/// Keyed in the in-flight registry by a monotonic `u64` counter, so two
/// items launched in the same instant never collide.
pub(super) struct RunningHandle {
    name: Arc<str>,
    started_at: Instant,
}

impl RunningHandle {
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            started_at: Instant::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }
}
