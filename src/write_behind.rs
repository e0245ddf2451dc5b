//! Write-behind queue for remote persistence.
//!
//! DESIGN
//! ======
//! Local state is authoritative and is updated before a remote write is
//! even scheduled. Remote writes are spawned detached (see `task`) and
//! never awaited by the code that scheduled them.
//!
//! A write submitted before any executor exists is held, not dropped. It is
//! released onto the first runtime seen by a later `submit`, or run by
//! `flush`.
//!
//! CONSISTENCY
//! ===========
//! - Writes are not ordered relative to each other. Two upserts for the
//!   same key may land in either order and the last one to land wins.
//! - A failed write is reported by the submitted future itself (log or
//!   notice) and then dropped: no retry, no rollback of local state.
//! - Nothing is cancelled. A later write supersedes an earlier one only by
//!   landing after it.
//!
//! The remote copy is therefore eventually consistent at best and may stay
//! divergent forever if the last write for a key fails.

#[cfg(test)]
#[path = "write_behind_test.rs"]
mod write_behind_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;
use tracing::debug;

use crate::task::{self, BoxTask, Task};

#[derive(Default)]
struct Tracker {
    pending: AtomicUsize,
    settled: Notify,
}

/// Counts one write as pending until dropped: finished, panicked, or never run.
struct InFlight(Arc<Tracker>);

impl InFlight {
    fn new(tracker: &Arc<Tracker>) -> Self {
        tracker.pending.fetch_add(1, Ordering::AcqRel);
        Self(Arc::clone(tracker))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.pending.fetch_sub(1, Ordering::AcqRel);
        self.0.settled.notify_waiters();
    }
}

pub struct WriteBehind {
    label: &'static str,
    tracker: Arc<Tracker>,
    deferred: Vec<BoxTask>,
}

impl WriteBehind {
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self { label, tracker: Arc::default(), deferred: Vec::new() }
    }

    /// Schedule a remote write. Returns `false` when no executor is available
    /// yet and the write was held for later.
    pub fn submit<F: Task>(&mut self, write: F) -> bool {
        let in_flight = InFlight::new(&self.tracker);
        let tracked = async move {
            let _in_flight = in_flight;
            write.await;
        };

        self.release_deferred();
        match task::spawn_detached(tracked) {
            Ok(()) => true,
            Err(tracked) => {
                debug!(queue = self.label, held = self.deferred.len() + 1, "no async runtime yet; remote write held");
                self.deferred.push(Box::pin(tracked));
                false
            }
        }
    }

    /// Writes scheduled or held and not yet settled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tracker.pending.load(Ordering::Acquire)
    }

    /// Run held writes and wait for every scheduled write to settle. Used at
    /// shutdown and in tests; interactive callers never wait.
    pub async fn flush(&mut self) {
        self.release_deferred();
        for held in std::mem::take(&mut self.deferred) {
            held.await;
        }
        loop {
            let settled = self.tracker.settled.notified();
            if self.pending() == 0 {
                return;
            }
            settled.await;
        }
    }

    fn release_deferred(&mut self) {
        if self.deferred.is_empty() || !task::can_spawn() {
            return;
        }
        let held = std::mem::take(&mut self.deferred);
        debug!(queue = self.label, count = held.len(), "releasing held remote writes");
        for write in held {
            if let Err(write) = task::spawn_detached(write) {
                self.deferred.push(write);
            }
        }
    }
}

impl std::fmt::Debug for WriteBehind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteBehind")
            .field("label", &self.label)
            .field("pending", &self.pending())
            .field("held", &self.deferred.len())
            .finish()
    }
}
