//! Shared test doubles: an in-memory backend with failure switches.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::auth::Session;
use crate::backend::{Backend, BackendError, Identity, SignUpOutcome};
use crate::catalog::{Course, CourseLevel, LevelContent};
use crate::progress::LevelCompletion;
use crate::settings::AccessibilitySettings;
use crate::signs::SignEntry;

/// Rows and switches behind `MemoryBackend`. Tests mutate it via `MemoryBackend::with`.
#[derive(Default)]
pub struct BackendState {
    pub courses: Vec<Course>,
    pub levels: Vec<CourseLevel>,
    pub progress: Vec<LevelCompletion>,
    pub profiles: HashMap<String, serde_json::Value>,
    pub signs: Vec<SignEntry>,

    /// Course, level, profile and sign reads fail.
    pub fail_reads: bool,
    /// Progress reads fail.
    pub fail_progress_reads: bool,
    /// Upserts and sign-out fail.
    pub fail_writes: bool,
    /// Sign-in and sign-up are refused.
    pub fail_auth: bool,
    /// Sign-up returns no session.
    pub require_confirmation: bool,

    pub profile_upserts: Vec<AccessibilitySettings>,
    pub progress_upserts: Vec<LevelCompletion>,
    pub sign_outs: usize,
}

#[derive(Default)]
pub struct MemoryBackend {
    state: Mutex<BackendState>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut BackendState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    /// Seed a course with `levels` levels numbered from 1. Level ids are `<course>-l<n>`.
    pub fn seed_course(&self, course_id: &str, title: &str, levels: u32) {
        self.with(|state| {
            state.courses.push(Course {
                id: course_id.into(),
                title: title.into(),
                description: format!("{title} from the server"),
                image_url: None,
                category: Some("technology".into()),
            });
            for n in 1..=levels {
                state.levels.push(level(course_id, n));
            }
        });
    }
}

#[must_use]
pub fn level(course_id: &str, number: u32) -> CourseLevel {
    CourseLevel {
        id: format!("{course_id}-l{number}"),
        course_id: course_id.into(),
        level_number: number,
        title: format!("Level {number} title"),
        description: String::new(),
        content: LevelContent::default(),
    }
}

#[must_use]
pub fn test_identity() -> Identity {
    Identity { id: "user-1".into(), email: Some("learner@example.com".into()), access_token: "token-1".into() }
}

#[must_use]
pub fn session_for(backend: &Arc<MemoryBackend>) -> Session {
    let backend: Arc<dyn Backend> = backend.clone();
    Session::new(test_identity(), backend)
}

fn unavailable() -> BackendError {
    BackendError::Status { status: 503, body: "unavailable".into() }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Backend for MemoryBackend {
    async fn sign_up(&self, email: &str, _password: &str) -> Result<SignUpOutcome, BackendError> {
        self.with(|state| {
            if state.fail_auth {
                return Err(BackendError::Auth("User already registered".into()));
            }
            if state.require_confirmation {
                return Ok(SignUpOutcome::ConfirmationSent);
            }
            Ok(SignUpOutcome::SignedIn(Identity { email: Some(email.into()), ..test_identity() }))
        })
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<Identity, BackendError> {
        self.with(|state| {
            if state.fail_auth {
                return Err(BackendError::Auth("Invalid login credentials".into()));
            }
            Ok(Identity { email: Some(email.into()), ..test_identity() })
        })
    }

    async fn sign_out(&self, _identity: &Identity) -> Result<(), BackendError> {
        self.with(|state| {
            state.sign_outs += 1;
            if state.fail_writes { Err(unavailable()) } else { Ok(()) }
        })
    }

    async fn upsert_profile_settings(
        &self,
        identity: &Identity,
        settings: &AccessibilitySettings,
    ) -> Result<(), BackendError> {
        self.with(|state| {
            if state.fail_writes {
                return Err(unavailable());
            }
            state.profile_upserts.push(*settings);
            state.profiles.insert(identity.id.clone(), serde_json::to_value(settings).unwrap());
            Ok(())
        })
    }

    async fn fetch_profile_settings(&self, identity: &Identity) -> Result<Option<serde_json::Value>, BackendError> {
        self.with(|state| {
            if state.fail_reads {
                return Err(unavailable());
            }
            Ok(state.profiles.get(&identity.id).cloned())
        })
    }

    async fn fetch_course(&self, course_id: &str) -> Result<Course, BackendError> {
        self.with(|state| {
            if state.fail_reads {
                return Err(BackendError::Request("connection refused".into()));
            }
            state
                .courses
                .iter()
                .find(|course| course.id == course_id)
                .cloned()
                .ok_or_else(|| BackendError::NotFound(format!("course {course_id}")))
        })
    }

    async fn fetch_levels(&self, course_id: &str) -> Result<Vec<CourseLevel>, BackendError> {
        self.with(|state| {
            if state.fail_reads {
                return Err(unavailable());
            }
            Ok(state.levels.iter().filter(|level| level.course_id == course_id).cloned().collect())
        })
    }

    async fn fetch_progress(&self, identity: &Identity, course_id: &str) -> Result<Vec<LevelCompletion>, BackendError> {
        self.with(|state| {
            if state.fail_progress_reads {
                return Err(unavailable());
            }
            Ok(state
                .progress
                .iter()
                .filter(|row| row.user_id == identity.id && row.course_id == course_id)
                .cloned()
                .collect())
        })
    }

    async fn upsert_progress(&self, _identity: &Identity, completion: &LevelCompletion) -> Result<(), BackendError> {
        self.with(|state| {
            if state.fail_writes {
                return Err(unavailable());
            }
            state.progress_upserts.push(completion.clone());
            state
                .progress
                .retain(|row| !(row.user_id == completion.user_id && row.level_id == completion.level_id));
            state.progress.push(completion.clone());
            Ok(())
        })
    }

    async fn fetch_signs(&self) -> Result<Vec<SignEntry>, BackendError> {
        self.with(|state| if state.fail_reads { Err(unavailable()) } else { Ok(state.signs.clone()) })
    }
}
