//! HTTP client for the hosted backend.
//!
//! Rows live under `/rest/v1/<table>` (PostgREST filters such as
//! `id=eq.<value>`), auth under `/auth/v1`. Every request carries the
//! project's anon key; row-level-secured calls also carry the identity's
//! bearer token. Parsing is kept in free functions for testability.

#[cfg(test)]
#[path = "rest_test.rs"]
mod rest_test;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use super::types::{CourseRow, LevelRow, ProfileRow, ProfileUpsert, ProgressRow, ProgressUpsert, SignRow};
use super::{Backend, BackendError, Identity, SignUpOutcome};
use crate::catalog::{Course, CourseLevel};
use crate::config::BackendConfig;
use crate::progress::LevelCompletion;
use crate::settings::AccessibilitySettings;
use crate::signs::SignEntry;

const UPSERT_PREFER: &str = "resolution=merge-duplicates,return=minimal";

// =============================================================================
// CLIENT
// =============================================================================

pub struct RestBackend {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl RestBackend {
    /// Build a client from typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| BackendError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.url.clone(), anon_key: config.anon_key.clone() })
    }

    fn request(&self, method: Method, url: String, identity: Option<&Identity>) -> RequestBuilder {
        let bearer = identity.map_or(self.anon_key.as_str(), |identity| identity.access_token.as_str());
        self.http.request(method, url).header("apikey", &self.anon_key).bearer_auth(bearer)
    }

    fn table(&self, method: Method, table: &str, identity: Option<&Identity>) -> RequestBuilder {
        self.request(method, format!("{}/rest/v1/{table}", self.base_url), identity)
    }

    fn auth(&self, path: &str, identity: Option<&Identity>) -> RequestBuilder {
        self.request(Method::POST, format!("{}/auth/v1/{path}", self.base_url), identity)
    }

    async fn upsert<B: serde::Serialize + Sync>(
        &self,
        table: &str,
        on_conflict: &str,
        identity: &Identity,
        body: &B,
    ) -> Result<(), BackendError> {
        let req = self
            .table(Method::POST, table, Some(identity))
            .query(&[("on_conflict", on_conflict)])
            .header("Prefer", UPSERT_PREFER)
            .json(body);
        send_text(req).await.map(|_| ())
    }
}

async fn send_text(req: RequestBuilder) -> Result<String, BackendError> {
    let response = req.send().await.map_err(|e| BackendError::Request(e.to_string()))?;
    let status = response.status().as_u16();
    let text = response.text().await.map_err(|e| BackendError::Request(e.to_string()))?;
    if !(200..300).contains(&status) {
        return Err(BackendError::Status { status, body: text });
    }
    Ok(text)
}

async fn send_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, BackendError> {
    let text = send_text(req).await?;
    parse_json(&text)
}

/// Auth endpoints report refusals in the body; surface them as `Auth`.
async fn send_auth(req: RequestBuilder) -> Result<String, BackendError> {
    match send_text(req).await {
        Err(BackendError::Status { status, body }) if (400..500).contains(&status) => {
            Err(BackendError::Auth(auth_error_message(&body)))
        }
        other => other,
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Backend for RestBackend {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, BackendError> {
        let req = self.auth("signup", None).json(&serde_json::json!({ "email": email, "password": password }));
        let text = send_auth(req).await?;
        parse_sign_up(&text)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, BackendError> {
        let req = self
            .auth("token", None)
            .query(&[("grant_type", "password")])
            .json(&serde_json::json!({ "email": email, "password": password }));
        let text = send_auth(req).await?;
        parse_session(&text)
    }

    async fn sign_out(&self, identity: &Identity) -> Result<(), BackendError> {
        send_text(self.auth("logout", Some(identity))).await.map(|_| ())
    }

    async fn upsert_profile_settings(
        &self,
        identity: &Identity,
        settings: &AccessibilitySettings,
    ) -> Result<(), BackendError> {
        let body = ProfileUpsert { id: &identity.id, accessibility_settings: settings };
        self.upsert("user_profiles", "id", identity, &body).await
    }

    async fn fetch_profile_settings(&self, identity: &Identity) -> Result<Option<serde_json::Value>, BackendError> {
        let req = self
            .table(Method::GET, "user_profiles", Some(identity))
            .query(&[("select", "accessibility_settings".to_owned()), ("id", format!("eq.{}", identity.id))]);
        let rows: Vec<ProfileRow> = send_json(req).await?;
        Ok(rows.into_iter().next().and_then(|row| row.accessibility_settings))
    }

    async fn fetch_course(&self, course_id: &str) -> Result<Course, BackendError> {
        let req = self
            .table(Method::GET, "courses", None)
            .query(&[("select", "*".to_owned()), ("id", format!("eq.{course_id}"))]);
        let rows: Vec<CourseRow> = send_json(req).await?;
        rows.into_iter()
            .next()
            .map(Course::from)
            .ok_or_else(|| BackendError::NotFound(format!("course {course_id}")))
    }

    async fn fetch_levels(&self, course_id: &str) -> Result<Vec<CourseLevel>, BackendError> {
        let req = self.table(Method::GET, "course_levels", None).query(&[
            ("select", "*".to_owned()),
            ("course_id", format!("eq.{course_id}")),
            ("order", "level_number.asc".to_owned()),
        ]);
        let rows: Vec<LevelRow> = send_json(req).await?;
        rows.into_iter().map(CourseLevel::try_from).collect()
    }

    async fn fetch_progress(&self, identity: &Identity, course_id: &str) -> Result<Vec<LevelCompletion>, BackendError> {
        let req = self.table(Method::GET, "user_progress", Some(identity)).query(&[
            ("select", "*".to_owned()),
            ("user_id", format!("eq.{}", identity.id)),
            ("course_id", format!("eq.{course_id}")),
        ]);
        let rows: Vec<ProgressRow> = send_json(req).await?;
        rows.into_iter().map(LevelCompletion::try_from).collect()
    }

    async fn upsert_progress(&self, identity: &Identity, completion: &LevelCompletion) -> Result<(), BackendError> {
        let body = ProgressUpsert::from(completion);
        self.upsert("user_progress", "user_id,level_id", identity, &body).await
    }

    async fn fetch_signs(&self) -> Result<Vec<SignEntry>, BackendError> {
        let req = self.table(Method::GET, "sign_language_data", None).query(&[("select", "*")]);
        let rows: Vec<SignRow> = send_json(req).await?;
        Ok(rows.into_iter().map(SignEntry::from).collect())
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, BackendError> {
    serde_json::from_str(text).map_err(|e| BackendError::Parse(e.to_string()))
}

#[derive(serde::Deserialize)]
struct AuthUser {
    id: String,
    email: Option<String>,
}

#[derive(serde::Deserialize)]
struct SessionResponse {
    access_token: String,
    user: AuthUser,
}

fn parse_session(text: &str) -> Result<Identity, BackendError> {
    let session: SessionResponse = parse_json(text)?;
    Ok(Identity { id: session.user.id, email: session.user.email, access_token: session.access_token })
}

/// Sign-up returns a full session when confirmation is disabled, otherwise
/// just the pending user.
fn parse_sign_up(text: &str) -> Result<SignUpOutcome, BackendError> {
    let value: serde_json::Value = parse_json(text)?;
    if value.get("access_token").is_some() {
        return parse_session(text).map(SignUpOutcome::SignedIn);
    }
    Ok(SignUpOutcome::ConfirmationSent)
}

fn auth_error_message(body: &str) -> String {
    let value: serde_json::Value = serde_json::from_str(body).unwrap_or(serde_json::Value::Null);
    ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(serde_json::Value::as_str))
        .map_or_else(|| "Authentication failed".to_owned(), str::to_owned)
}
