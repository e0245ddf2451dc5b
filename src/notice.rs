//! Transient user-facing notices.
//!
//! DESIGN
//! ======
//! Notices never block interaction and dismiss themselves once their
//! duration has elapsed. There is no persistent error banner and no retry
//! affordance; a failure that deserves the user's attention becomes a
//! `Destructive` notice and nothing more.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoticeVariant {
    #[default]
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
    pub duration: Duration,
}

impl Notice {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Default,
            duration: Duration::from_millis(duration_ms),
        }
    }

    #[must_use]
    pub fn destructive(mut self) -> Self {
        self.variant = NoticeVariant::Destructive;
        self
    }
}

/// Shared queue of live notices. Clones observe the same queue.
#[derive(Clone, Debug, Default)]
pub struct NoticeBoard {
    inner: Arc<Mutex<Vec<(Notice, Instant)>>>,
}

impl NoticeBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, notice: Notice) {
        self.push_at(notice, Instant::now());
    }

    fn push_at(&self, notice: Notice, raised_at: Instant) {
        tracing::debug!(title = %notice.title, variant = ?notice.variant, "notice raised");
        let mut notices = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        prune(&mut notices, raised_at);
        notices.push((notice, raised_at));
    }

    /// Notices still within their duration, oldest first. Expired ones are dropped.
    #[must_use]
    pub fn active(&self) -> Vec<Notice> {
        self.active_at(Instant::now())
    }

    fn active_at(&self, now: Instant) -> Vec<Notice> {
        let mut notices = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        prune(&mut notices, now);
        notices.iter().map(|(notice, _)| notice.clone()).collect()
    }

    /// Dismiss early. Returns `false` if the notice already expired or never existed.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut notices = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let before = notices.len();
        notices.retain(|(notice, _)| notice.id != id);
        notices.len() != before
    }

    /// Take every queued notice regardless of age.
    pub fn drain(&self) -> Vec<Notice> {
        let mut notices = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        notices.drain(..).map(|(notice, _)| notice).collect()
    }

    /// Titles of every queued notice regardless of age.
    #[must_use]
    pub fn titles(&self) -> Vec<String> {
        let notices = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        notices.iter().map(|(notice, _)| notice.title.clone()).collect()
    }
}

fn prune(notices: &mut Vec<(Notice, Instant)>, now: Instant) {
    notices.retain(|(notice, raised_at)| now.duration_since(*raised_at) < notice.duration);
}
