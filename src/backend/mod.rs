//! Hosted backend seam.
//!
//! DESIGN
//! ======
//! Auth, row storage and upsert semantics belong to an external
//! backend-as-a-service. This crate only consumes its contract through the
//! `Backend` trait; `rest::RestBackend` speaks it over HTTP and tests use an
//! in-memory double.
//!
//! Upserts are idempotent per key: profiles on `id`, progress on
//! `(user_id, level_id)`.

pub mod rest;
pub mod types;

use async_trait::async_trait;

use crate::catalog::{Course, CourseLevel};
use crate::progress::LevelCompletion;
use crate::settings::AccessibilitySettings;
use crate::signs::SignEntry;

pub use types::{BackendError, Identity, SignUpOutcome};

// Browser fetch futures are not Send.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Backend: Send + Sync {
    /// Register a new account.
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, BackendError>;

    /// Exchange credentials for an identity.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, BackendError>;

    /// Revoke the identity's session.
    async fn sign_out(&self, identity: &Identity) -> Result<(), BackendError>;

    /// Upsert `{ id, accessibility_settings }` keyed by the identity id.
    async fn upsert_profile_settings(
        &self,
        identity: &Identity,
        settings: &AccessibilitySettings,
    ) -> Result<(), BackendError>;

    /// Raw `accessibility_settings` column of the identity's profile, if any.
    /// The caller decides whether the shape is acceptable.
    async fn fetch_profile_settings(&self, identity: &Identity) -> Result<Option<serde_json::Value>, BackendError>;

    async fn fetch_course(&self, course_id: &str) -> Result<Course, BackendError>;

    /// Levels of a course ordered by `level_number` ascending.
    async fn fetch_levels(&self, course_id: &str) -> Result<Vec<CourseLevel>, BackendError>;

    /// Completion rows for the identity within one course.
    async fn fetch_progress(&self, identity: &Identity, course_id: &str) -> Result<Vec<LevelCompletion>, BackendError>;

    /// Upsert one completion fact keyed by `(user_id, level_id)`.
    async fn upsert_progress(&self, identity: &Identity, completion: &LevelCompletion) -> Result<(), BackendError>;

    async fn fetch_signs(&self) -> Result<Vec<SignEntry>, BackendError>;
}
