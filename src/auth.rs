//! Authentication state.
//!
//! DESIGN
//! ======
//! `Session` pairs an identity with the backend that issued it. Anything
//! that writes remotely on behalf of a user (settings, progress) takes an
//! `Option<Session>`; `None` means anonymous and keeps those writes local.
//!
//! Auth outcomes are narrated: each sign-up/sign-in/sign-out produces a
//! notice and, where the flow did, an announcement.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use tracing::{info, warn};

use crate::announcer::Announcer;
use crate::backend::{Backend, BackendError, Identity, SignUpOutcome};
use crate::notice::{Notice, NoticeBoard};

/// An authenticated identity plus the backend it is valid against.
#[derive(Clone)]
pub struct Session {
    pub identity: Identity,
    pub backend: Arc<dyn Backend>,
}

impl Session {
    #[must_use]
    pub fn new(identity: Identity, backend: Arc<dyn Backend>) -> Self {
        Self { identity, backend }
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.identity.id
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("identity", &self.identity).finish_non_exhaustive()
    }
}

/// Current user and in-flight status.
pub struct AuthState {
    backend: Arc<dyn Backend>,
    session: Option<Session>,
    pub loading: bool,
    announcer: Announcer,
    notices: NoticeBoard,
}

impl AuthState {
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>, announcer: Announcer, notices: NoticeBoard) -> Self {
        Self { backend, session: None, loading: false, announcer, notices }
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Restore a session obtained elsewhere (e.g. a cached token).
    pub fn restore(&mut self, identity: Identity) -> Session {
        let session = Session::new(identity, Arc::clone(&self.backend));
        self.session = Some(session.clone());
        session
    }

    /// Register an account. Returns the session when the backend signs the
    /// user in immediately.
    ///
    /// # Errors
    ///
    /// Returns the backend error after reporting it to the user.
    pub async fn sign_up(&mut self, email: &str, password: &str) -> Result<Option<Session>, BackendError> {
        self.loading = true;
        let result = self.backend.sign_up(email, password).await;
        self.loading = false;

        match result {
            Ok(outcome) => {
                let message = "Sign up successful! Please check your email for a confirmation link.";
                self.notices.push(Notice::new("Sign up successful!", "Please check your email for a confirmation link.", 5000));
                self.announcer.announce(message);
                info!(email, "sign up accepted");
                Ok(match outcome {
                    SignUpOutcome::ConfirmationSent => None,
                    SignUpOutcome::SignedIn(identity) => Some(self.restore(identity)),
                })
            }
            Err(e) => {
                warn!(error = %e, "sign up failed");
                self.notices.push(Notice::new("Sign up failed", e.to_string(), 5000).destructive());
                self.announcer.announce(format!("Error during sign up: {e}"));
                Err(e)
            }
        }
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns the backend error after reporting it to the user.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<Session, BackendError> {
        self.loading = true;
        let result = self.backend.sign_in(email, password).await;
        self.loading = false;

        match result {
            Ok(identity) => {
                info!(user_id = %identity.id, "signed in");
                self.notices.push(Notice::new("Sign in successful!", "Welcome back to Tech4All.", 3000));
                self.announcer.announce("Sign in successful! Welcome back to Tech4All.");
                Ok(self.restore(identity))
            }
            Err(e) => {
                warn!(error = %e, "sign in failed");
                self.notices.push(Notice::new("Sign in failed", e.to_string(), 5000).destructive());
                self.announcer.announce(format!("Error during sign in: {e}"));
                Err(e)
            }
        }
    }

    /// Drop the local session and revoke it remotely. A failed revoke is
    /// logged; the local session is gone either way.
    pub async fn sign_out(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        if let Err(e) = self.backend.sign_out(&session.identity).await {
            warn!(error = %e, user_id = %session.identity.id, "remote sign out failed");
        }
        self.notices.push(Notice::new("Signed out successfully", "You have been signed out of your account.", 3000));
    }
}
