//! Backend types: identity, errors, and table rows.
//!
//! Rows mirror the hosted tables (`courses`, `course_levels`,
//! `user_profiles`, `user_progress`, `sign_language_data`) with snake_case
//! field names. Conversion into domain types happens here so malformed rows
//! fail in one place.

use serde::{Deserialize, Serialize};

use crate::catalog::{Course, CourseLevel, LevelContent};
use crate::progress::LevelCompletion;
use crate::signs::SignEntry;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The HTTP request could not be sent or its body not read.
    #[error("backend request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("backend response error: status {status}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("backend response parse failed: {0}")]
    Parse(String),

    /// A single-row read found nothing.
    #[error("not found: {0}")]
    NotFound(String),

    /// Sign-in or sign-up was refused; the message is user-facing.
    #[error("{0}")]
    Auth(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl BackendError {
    /// Whether the same request could succeed later.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Status { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// IDENTITY
// =============================================================================

/// An authenticated end user.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    /// Opaque user id issued by the auth service.
    pub id: String,
    pub email: Option<String>,
    /// Bearer token for row-level-secured calls.
    pub access_token: String,
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity").field("id", &self.id).field("email", &self.email).finish_non_exhaustive()
    }
}

/// Result of a sign-up request. Most deployments require email confirmation
/// before a session is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    ConfirmationSent,
    SignedIn(Identity),
}

// =============================================================================
// ROWS
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CourseRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description.unwrap_or_default(),
            image_url: row.image_url,
            category: row.category,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LevelRow {
    pub id: String,
    pub course_id: String,
    pub level_number: i64,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<serde_json::Value>,
}

impl TryFrom<LevelRow> for CourseLevel {
    type Error = BackendError;

    fn try_from(row: LevelRow) -> Result<Self, Self::Error> {
        let level_number = u32::try_from(row.level_number)
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| BackendError::Parse(format!("level {} has invalid level_number {}", row.id, row.level_number)))?;
        // Content is free-form JSON upstream; an unexpected shape renders as no sections.
        let content = row
            .content
            .and_then(|value| serde_json::from_value::<LevelContent>(value).ok())
            .unwrap_or_default();
        Ok(Self {
            id: row.id,
            course_id: row.course_id,
            level_number,
            title: row.title,
            description: row.description.unwrap_or_default(),
            content,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProgressRow {
    pub user_id: String,
    pub course_id: String,
    pub level_id: String,
    pub completed: Option<bool>,
    pub completed_at: Option<String>,
}

impl TryFrom<ProgressRow> for LevelCompletion {
    type Error = BackendError;

    /// A completed row must carry a parseable `completed_at`; the timestamp
    /// of an incomplete row is ignored.
    fn try_from(row: ProgressRow) -> Result<Self, Self::Error> {
        let completed = row.completed.unwrap_or(false);
        let completed_at = if completed {
            let raw = row
                .completed_at
                .as_deref()
                .ok_or_else(|| BackendError::Parse(format!("completed level {} has no completed_at", row.level_id)))?;
            let at = time::OffsetDateTime::parse(raw, &time::format_description::well_known::Rfc3339)
                .map_err(|e| BackendError::Parse(format!("level {} completed_at {raw:?}: {e}", row.level_id)))?;
            Some(at)
        } else {
            None
        };
        Ok(Self { user_id: row.user_id, course_id: row.course_id, level_id: row.level_id, completed, completed_at })
    }
}

/// Body of a `user_progress` upsert, conflict-resolved on `(user_id, level_id)`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ProgressUpsert<'a> {
    pub user_id: &'a str,
    pub course_id: &'a str,
    pub level_id: &'a str,
    pub completed: bool,
    pub completed_at: Option<String>,
}

impl<'a> From<&'a LevelCompletion> for ProgressUpsert<'a> {
    fn from(completion: &'a LevelCompletion) -> Self {
        Self {
            user_id: &completion.user_id,
            course_id: &completion.course_id,
            level_id: &completion.level_id,
            completed: completion.completed,
            completed_at: completion.completed_at_rfc3339(),
        }
    }
}

/// Body of a `user_profiles` upsert, conflict-resolved on `id`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ProfileUpsert<'a> {
    pub id: &'a str,
    pub accessibility_settings: &'a crate::settings::AccessibilitySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProfileRow {
    pub accessibility_settings: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SignRow {
    pub id: String,
    pub sign: String,
    pub meaning: String,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
}

impl From<SignRow> for SignEntry {
    fn from(row: SignRow) -> Self {
        Self {
            id: row.id,
            sign: row.sign,
            meaning: row.meaning,
            category: row.category,
            image_url: row.image_url,
            video_url: row.video_url,
        }
    }
}
