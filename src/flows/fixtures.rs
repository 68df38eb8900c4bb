//! Literal server replies used by contract mode

use crate::envelope::{failure_body, paginated_body, success_body, ErrorCode};
use serde_json::{json, Value};

pub const MOCK_USER_ID: &str = "u1";
pub const MOCK_EMAIL: &str = "test@example.com";
pub const MOCK_NAME: &str = "Test";
pub const MOCK_CREATED_AT: &str = "2026-01-01T00:00:00Z";

fn user() -> Value {
    json!({
        "id": MOCK_USER_ID,
        "email": MOCK_EMAIL,
        "name": MOCK_NAME,
        "createdAt": MOCK_CREATED_AT,
    })
}

pub fn register_ok() -> Value {
    success_body(json!({ "user": user(), "token": "jwt-token-abc" }))
}

pub fn login_ok() -> Value {
    success_body(json!({ "user": user(), "token": "jwt-token-def" }))
}

pub fn me_ok() -> Value {
    success_body(json!({
        "id": MOCK_USER_ID,
        "email": MOCK_EMAIL,
        "name": MOCK_NAME,
        "usageCount": 5,
        "createdAt": MOCK_CREATED_AT,
    }))
}

pub fn conflict() -> Value {
    failure_body(ErrorCode::Conflict.as_str(), "Record already exists, check unique fields", None)
}

pub fn invalid_credentials() -> Value {
    failure_body(ErrorCode::InvalidCredentials.as_str(), "Wrong email or password", None)
}

pub fn unauthorized() -> Value {
    failure_body(ErrorCode::Unauthorized.as_str(), "Unauthorized, please log in", None)
}

pub fn session_not_found() -> Value {
    failure_body(ErrorCode::NotFound.as_str(), "Session does not exist", None)
}

pub fn validation_error(message: &str) -> Value {
    failure_body(ErrorCode::ValidationError.as_str(), message, None)
}

pub fn analysis_session_created(id: &str) -> Value {
    success_body(json!({ "id": id, "title": null, "status": "created" }))
}

pub fn analysis_history(id: &str) -> Value {
    paginated_body(
        vec![json!({ "id": id, "title": "Test", "createdAt": "2026-01-01" })],
        1,
        10,
        1,
    )
}

pub fn rehearsal_session_created() -> Value {
    success_body(json!({
        "id": "rs-1",
        "scenario": "Frontend developer interview",
        "interviewerStyle": "behavioral",
        "firstQuestion": "Tell me about yourself.",
        "status": "active",
    }))
}

pub fn session_completed() -> Value {
    failure_body(ErrorCode::SessionCompleted.as_str(), "This interview has ended", None)
}

pub fn rehearsal_ended(session_id: &str) -> Value {
    success_body(json!({ "feedbackId": session_id, "status": "completed" }))
}

pub fn feedback_ready() -> Value {
    success_body(json!({
        "overallScore": 85,
        "strengths": ["Good communication"],
        "improvements": ["Be more specific"],
    }))
}

pub fn feedback_generating() -> Value {
    success_body(json!({
        "status": "generating",
        "message": "Feedback is still being generated, try again later",
    }))
}

pub fn rehearsal_history() -> Value {
    paginated_body(
        vec![json!({ "id": "rs-1", "scenario": "FE interview", "status": "completed" })],
        1,
        10,
        1,
    )
}

/// One sample failure body per known error code
pub fn failure_samples() -> Vec<Value> {
    ErrorCode::ALL
        .into_iter()
        .map(|code| {
            let details = matches!(code, ErrorCode::ValidationError)
                .then(|| json!([{ "field": "email" }]));
            failure_body(code.as_str(), &format!("{} sample", code), details)
        })
        .collect()
}
