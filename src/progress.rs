//! Course progression gate.
//!
//! DESIGN
//! ======
//! `ProgressGate` owns the completion mapping for one loaded course and the
//! current-level pointer. It is the only writer of completion facts.
//!
//! Access policy: level 1 is always open; level N is open only when every
//! level numbered below N in the same course is completed. Completing the
//! immediately preceding level is not enough on its own.
//!
//! Pointer states are "no level selected" (empty course) and "level L
//! selected". A non-empty gate starts on its lowest-numbered level and only
//! moves through `select` (to an unlocked level) or the advance inside
//! `complete`.
//!
//! CONSISTENCY
//! ===========
//! `complete` marks the level completed and advances the pointer before the
//! remote upsert is even scheduled. If the upsert fails, the user gets an
//! error notice and the local completion stands: local and remote state
//! diverge until a later write for the same level succeeds.

#[cfg(test)]
#[path = "progress_test.rs"]
mod progress_test;

use std::collections::HashMap;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{error, info};

use crate::announcer::Announcer;
use crate::auth::Session;
use crate::catalog::CourseLevel;
use crate::notice::{Notice, NoticeBoard};
use crate::write_behind::WriteBehind;

pub const LOCKED_ANNOUNCEMENT: &str = "Level locked. Complete previous levels first to unlock this content.";

// =============================================================================
// COMPLETION FACT
// =============================================================================

/// One identity's completion of one level. `completed_at` is present iff
/// `completed` is true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCompletion {
    pub user_id: String,
    pub course_id: String,
    pub level_id: String,
    pub completed: bool,
    pub completed_at: Option<OffsetDateTime>,
}

impl LevelCompletion {
    #[must_use]
    pub fn completed(user_id: &str, level: &CourseLevel, at: OffsetDateTime) -> Self {
        Self {
            user_id: user_id.to_owned(),
            course_id: level.course_id.clone(),
            level_id: level.id.clone(),
            completed: true,
            completed_at: Some(at),
        }
    }

    #[must_use]
    pub fn completed_at_rfc3339(&self) -> Option<String> {
        self.completed_at.and_then(|at| at.format(&Rfc3339).ok())
    }
}

// =============================================================================
// OUTCOMES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected,
    /// Earlier levels are incomplete; the pointer did not move.
    Locked,
    /// The level is not part of the loaded course.
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotSignedIn,
    NoCurrentLevel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompleteOutcome {
    /// Preconditions failed; nothing changed.
    Skipped(SkipReason),
    /// Marked locally; the remote upsert was scheduled.
    Recorded { level_id: String, advanced_to: Option<String> },
}

// =============================================================================
// GATE
// =============================================================================

pub struct ProgressGate {
    /// Sorted by `level_number`. Contiguous from 1 when the list came through
    /// `catalog::validate_levels`.
    levels: Vec<CourseLevel>,
    completions: HashMap<String, bool>,
    current: Option<usize>,
    session: Option<Session>,
    announcer: Announcer,
    notices: NoticeBoard,
    writes: WriteBehind,
}

impl ProgressGate {
    /// Build a gate over a level list and prior completion rows.
    /// The pointer starts on the lowest-numbered level.
    #[must_use]
    pub fn new(
        mut levels: Vec<CourseLevel>,
        completions: Vec<LevelCompletion>,
        session: Option<Session>,
        announcer: Announcer,
        notices: NoticeBoard,
    ) -> Self {
        levels.sort_by_key(|level| level.level_number);
        let completions = completions
            .into_iter()
            .map(|completion| (completion.level_id, completion.completed))
            .collect();
        let current = if levels.is_empty() { None } else { Some(0) };
        Self { levels, completions, current, session, announcer, notices, writes: WriteBehind::new("user_progress") }
    }

    #[must_use]
    pub fn levels(&self) -> &[CourseLevel] {
        &self.levels
    }

    #[must_use]
    pub fn current(&self) -> Option<&CourseLevel> {
        self.current.map(|index| &self.levels[index])
    }

    #[must_use]
    pub fn is_completed(&self, level_id: &str) -> bool {
        self.completions.get(level_id).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn is_locked(&self, level: &CourseLevel) -> bool {
        if level.level_number <= 1 {
            return false;
        }
        self.levels
            .iter()
            .filter(|earlier| earlier.course_id == level.course_id && earlier.level_number < level.level_number)
            .any(|earlier| !self.is_completed(&earlier.id))
    }

    /// Move the pointer to `level` if it is unlocked.
    pub fn select(&mut self, level: &CourseLevel) -> SelectOutcome {
        let Some(index) = self.levels.iter().position(|loaded| loaded.id == level.id) else {
            return SelectOutcome::Unknown;
        };
        let level = &self.levels[index];
        if self.is_locked(level) {
            self.notices.push(Notice::new("Level Locked", "You need to complete previous levels first.", 3000));
            self.announcer.announce(LOCKED_ANNOUNCEMENT);
            return SelectOutcome::Locked;
        }
        self.announcer.announce(format!("Level {}: {}", level.level_number, level.title));
        self.current = Some(index);
        SelectOutcome::Selected
    }

    /// Select by level number, for callers that only know the ordinal.
    pub fn select_number(&mut self, level_number: u32) -> SelectOutcome {
        match self.levels.iter().find(|level| level.level_number == level_number).cloned() {
            Some(level) => self.select(&level),
            None => SelectOutcome::Unknown,
        }
    }

    /// Mark the current level completed, advance to the next level number,
    /// and schedule the remote upsert.
    pub fn complete(&mut self) -> CompleteOutcome {
        self.complete_at(OffsetDateTime::now_utc())
    }

    fn complete_at(&mut self, now: OffsetDateTime) -> CompleteOutcome {
        let Some(session) = self.session.clone() else {
            return CompleteOutcome::Skipped(SkipReason::NotSignedIn);
        };
        let Some(index) = self.current else {
            return CompleteOutcome::Skipped(SkipReason::NoCurrentLevel);
        };
        let level = self.levels[index].clone();

        self.completions.insert(level.id.clone(), true);
        let next = level
            .level_number
            .checked_add(1)
            .and_then(|number| self.levels.iter().position(|candidate| candidate.level_number == number));
        if let Some(next) = next {
            self.current = Some(next);
        }
        info!(user_id = %session.identity.id, level_id = %level.id, "level marked complete");

        let completion = LevelCompletion::completed(&session.identity.id, &level, now);
        let announcer = self.announcer.clone();
        let notices = self.notices.clone();
        let title = level.title.clone();
        self.writes.submit(async move {
            match session.backend.upsert_progress(&session.identity, &completion).await {
                Ok(()) => {
                    notices.push(Notice::new("Level Completed", format!("Congratulations on completing {title}!"), 3000));
                    announcer.announce(format!("Level completed: {title}. You have unlocked the next level."));
                }
                Err(e) => {
                    error!(error = %e, level_id = %completion.level_id, "error marking level as complete");
                    notices.push(Notice::new("Error", "There was a problem saving your progress.", 3000).destructive());
                }
            }
        });

        CompleteOutcome::Recorded { level_id: level.id, advanced_to: next.map(|i| self.levels[i].id.clone()) }
    }

    /// Progress upserts scheduled and not yet settled.
    #[must_use]
    pub fn pending_writes(&self) -> usize {
        self.writes.pending()
    }

    /// Wait for scheduled upserts. Interactive callers never need this.
    pub async fn flush(&mut self) {
        self.writes.flush().await;
    }
}
