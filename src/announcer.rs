//! Live-region narrator for assistive technology.
//!
//! Every call is a distinct announcement: identical consecutive text is kept,
//! order is preserved, and only the most recent `capacity` entries stay
//! exposed. Blank text is ignored.

#[cfg(test)]
#[path = "announcer_test.rs"]
mod announcer_test;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

pub const DEFAULT_ANNOUNCER_CAPACITY: usize = 5;

/// Cheap-to-clone handle; every clone appends to the same region.
#[derive(Clone, Debug)]
pub struct Announcer {
    inner: Arc<Mutex<Region>>,
    capacity: usize,
}

#[derive(Debug, Default)]
struct Region {
    entries: VecDeque<String>,
    total: u64,
}

impl Announcer {
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { inner: Arc::new(Mutex::new(Region::default())), capacity: capacity.max(1) }
    }

    /// Append an announcement. Returns `false` if the text was blank.
    pub fn announce(&self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text.trim().is_empty() {
            return false;
        }
        tracing::debug!(announcement = %text, "announce");
        let mut region = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        region.entries.push_back(text);
        region.total += 1;
        while region.entries.len() > self.capacity {
            region.entries.pop_front();
        }
        true
    }

    /// Most recent announcements, oldest first.
    #[must_use]
    pub fn recent(&self) -> Vec<String> {
        let region = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        region.entries.iter().cloned().collect()
    }

    #[must_use]
    pub fn latest(&self) -> Option<String> {
        let region = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        region.entries.back().cloned()
    }

    /// Number of announcements ever made, including ones no longer exposed.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).total
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for Announcer {
    fn default() -> Self {
        Self::new(DEFAULT_ANNOUNCER_CAPACITY)
    }
}
