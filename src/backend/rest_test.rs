use super::*;
use crate::config::Timeouts;

#[test]
fn new_builds_client_from_config() {
    let config = BackendConfig {
        url: "https://project.example.test".into(),
        anon_key: "anon".into(),
        timeouts: Timeouts { request_secs: 1, connect_secs: 1 },
    };
    let backend = RestBackend::new(&config).unwrap();
    assert_eq!(backend.base_url, "https://project.example.test");
    assert_eq!(backend.anon_key, "anon");
}

// =============================================================================
// auth parsing
// =============================================================================

#[test]
fn parse_session_reads_token_and_user() {
    let body = r#"{"access_token":"jwt","token_type":"bearer","user":{"id":"u-1","email":"a@b.test"}}"#;
    let identity = parse_session(body).unwrap();
    assert_eq!(identity.id, "u-1");
    assert_eq!(identity.email.as_deref(), Some("a@b.test"));
    assert_eq!(identity.access_token, "jwt");
}

#[test]
fn parse_session_missing_token_is_parse_error() {
    let err = parse_session(r#"{"user":{"id":"u-1"}}"#).unwrap_err();
    assert!(matches!(err, BackendError::Parse(_)));
}

#[test]
fn parse_sign_up_without_session_needs_confirmation() {
    let body = r#"{"id":"u-1","email":"a@b.test","confirmation_sent_at":"2024-01-01T00:00:00Z"}"#;
    assert_eq!(parse_sign_up(body).unwrap(), SignUpOutcome::ConfirmationSent);
}

#[test]
fn parse_sign_up_with_session_signs_in() {
    let body = r#"{"access_token":"jwt","user":{"id":"u-1","email":null}}"#;
    match parse_sign_up(body).unwrap() {
        SignUpOutcome::SignedIn(identity) => {
            assert_eq!(identity.id, "u-1");
            assert_eq!(identity.email, None);
        }
        SignUpOutcome::ConfirmationSent => panic!("expected a session"),
    }
}

#[test]
fn auth_error_message_prefers_known_keys() {
    assert_eq!(auth_error_message(r#"{"msg":"Invalid login credentials"}"#), "Invalid login credentials");
    assert_eq!(
        auth_error_message(r#"{"error":"invalid_grant","error_description":"Email not confirmed"}"#),
        "Email not confirmed"
    );
    assert_eq!(auth_error_message(r#"{"message":"User already registered"}"#), "User already registered");
    assert_eq!(auth_error_message("<html>"), "Authentication failed");
    assert_eq!(auth_error_message("{}"), "Authentication failed");
}

// =============================================================================
// row parsing
// =============================================================================

#[test]
fn level_rows_convert() {
    let body = r#"[{"id":"l1","course_id":"c","level_number":1,"title":"One","description":null,
        "content":{"sections":[{"title":"Intro","content":"Hi"}]}}]"#;
    let rows: Vec<LevelRow> = parse_json(body).unwrap();
    let level = CourseLevel::try_from(rows.into_iter().next().unwrap()).unwrap();
    assert_eq!(level.level_number, 1);
    assert_eq!(level.description, "");
    assert_eq!(level.content.sections[0].body, "Hi");
}

#[test]
fn level_row_with_odd_content_has_no_sections() {
    let body = r#"[{"id":"l1","course_id":"c","level_number":2,"title":"Two","description":"d","content":"free text"}]"#;
    let rows: Vec<LevelRow> = parse_json(body).unwrap();
    let level = CourseLevel::try_from(rows.into_iter().next().unwrap()).unwrap();
    assert!(level.content.sections.is_empty());
}

#[test]
fn level_row_with_non_positive_number_is_rejected() {
    let body = r#"[{"id":"l0","course_id":"c","level_number":0,"title":"Zero","description":null,"content":null}]"#;
    let rows: Vec<LevelRow> = parse_json(body).unwrap();
    assert!(matches!(CourseLevel::try_from(rows.into_iter().next().unwrap()), Err(BackendError::Parse(_))));
}

#[test]
fn progress_row_timestamp_only_when_completed() {
    let body = r#"[
        {"user_id":"u","course_id":"c","level_id":"l1","completed":true,"completed_at":"2024-05-01T10:00:00Z"},
        {"user_id":"u","course_id":"c","level_id":"l2","completed":false,"completed_at":"2024-05-01T10:00:00Z"},
        {"user_id":"u","course_id":"c","level_id":"l3","completed":null,"completed_at":null}
    ]"#;
    let rows: Vec<ProgressRow> = parse_json(body).unwrap();
    let completions: Vec<LevelCompletion> = rows.into_iter().map(|row| LevelCompletion::try_from(row).unwrap()).collect();
    assert!(completions[0].completed);
    assert_eq!(completions[0].completed_at_rfc3339().as_deref(), Some("2024-05-01T10:00:00Z"));
    assert!(!completions[1].completed);
    assert_eq!(completions[1].completed_at, None);
    assert!(!completions[2].completed);
}

#[test]
fn completed_progress_row_needs_a_timestamp() {
    let body = r#"[
        {"user_id":"u","course_id":"c","level_id":"l1","completed":true,"completed_at":null},
        {"user_id":"u","course_id":"c","level_id":"l2","completed":true,"completed_at":"yesterday"}
    ]"#;
    let rows: Vec<ProgressRow> = parse_json(body).unwrap();
    for row in rows {
        assert!(matches!(LevelCompletion::try_from(row), Err(BackendError::Parse(_))));
    }
}

#[test]
fn profile_upsert_body_shape() {
    let settings = AccessibilitySettings::default();
    let body = ProfileUpsert { id: "u-1", accessibility_settings: &settings };
    let value = serde_json::to_value(&body).unwrap();
    assert_eq!(value["id"], "u-1");
    assert_eq!(value["accessibility_settings"]["fontSize"], "medium");
}

#[test]
fn profile_row_without_settings() {
    let rows: Vec<ProfileRow> = parse_json(r#"[{"accessibility_settings":null}]"#).unwrap();
    assert!(rows[0].accessibility_settings.is_none());
}

#[test]
fn malformed_body_is_parse_error() {
    let err = parse_json::<Vec<CourseRow>>("not json").unwrap_err();
    assert!(matches!(err, BackendError::Parse(_)));
}

#[test]
fn retryable_errors() {
    assert!(BackendError::Request("timeout".into()).retryable());
    assert!(BackendError::Status { status: 503, body: String::new() }.retryable());
    assert!(BackendError::Status { status: 429, body: String::new() }.retryable());
    assert!(!BackendError::Status { status: 401, body: String::new() }.retryable());
    assert!(!BackendError::Auth("nope".into()).retryable());
}
