//! Flow 4: structured rehearsal interview

use super::{call, call_rejected, ensure, require, require_str, CaseError, CaseResult};
use crate::envelope::{EnvelopeKind, ErrorCode};
use crate::report::TestReport;
use crate::source::{ApiRequest, ResponseSource};
use serde_json::{json, Value};

pub const SESSION_PATH: &str = "/rehearsal/session";
pub const MESSAGE_PATH: &str = "/rehearsal/message";
pub const HISTORY_PATH: &str = "/rehearsal/history";

/// Interviewer styles the server accepts
pub const INTERVIEWER_STYLES: [&str; 3] = ["behavioral", "technical", "stress"];

pub fn end_path(session_id: &str) -> String {
    format!("/rehearsal/end/{}", session_id)
}

pub fn feedback_path(session_id: &str) -> String {
    format!("/rehearsal/feedback/{}", session_id)
}

/// State of the feedback report for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackState {
    Ready,
    Generating,
}

/// `POST /rehearsal/session` → 200 with `id` and `firstQuestion`. Returns the id.
pub fn create_session(
    source: &dyn ResponseSource,
    token: &str,
    scenario: &str,
    style: &str,
    name: &str,
    report: &mut TestReport,
) -> CaseResult<String> {
    let request = ApiRequest::post(SESSION_PATH)
        .bearer(token)
        .json(json!({ "scenario": scenario, "interviewerStyle": style }));
    let body = call(source, &request, 200, EnvelopeKind::Success, name, report)?;

    let session = require(&body, "data", "session response")?;
    let id = require_str(session, "id", "session response")?.to_string();
    ensure(
        session.get("firstQuestion").is_some() || session.get("first_question").is_some(),
        "Missing firstQuestion in session",
    )?;

    report.pass(name);
    Ok(id)
}

/// A style outside [`INTERVIEWER_STYLES`] → 400 `VALIDATION_ERROR`
pub fn create_session_invalid_style(
    source: &dyn ResponseSource,
    token: &str,
    style: &str,
    name: &str,
    report: &mut TestReport,
) -> CaseResult {
    ensure(
        !INTERVIEWER_STYLES.contains(&style),
        format!("{} is a valid interviewer style", style),
    )?;
    let request = ApiRequest::post(SESSION_PATH)
        .bearer(token)
        .json(json!({ "scenario": "Test", "interviewerStyle": style }));
    call_rejected(source, &request, 400, ErrorCode::ValidationError, name, report)?;
    report.pass(name);
    Ok(())
}

/// Messaging a completed session → 400 `SESSION_COMPLETED`.
/// The server answers 400 here, not 409; both halves are checked.
pub fn message_completed_session(
    source: &dyn ResponseSource,
    token: &str,
    session_id: &str,
    name: &str,
    report: &mut TestReport,
) -> CaseResult {
    let request = ApiRequest::post(MESSAGE_PATH)
        .bearer(token)
        .json(json!({ "sessionId": session_id, "content": "One more thing..." }));
    call_rejected(source, &request, 400, ErrorCode::SessionCompleted, name, report)?;
    report.pass(name);
    Ok(())
}

/// `POST /rehearsal/end/{id}` → 200, `data.status` is `completed`
/// (`already_completed` when the session was ended earlier)
pub fn end_session(
    source: &dyn ResponseSource,
    token: &str,
    session_id: &str,
    name: &str,
    report: &mut TestReport,
) -> CaseResult {
    let request = ApiRequest::post(&end_path(session_id)).bearer(token);
    let body = call(source, &request, 200, EnvelopeKind::Success, name, report)?;

    let data = require(&body, "data", "end response")?;
    let status = require_str(data, "status", "end response")?;
    ensure(
        matches!(status, "completed" | "already_completed"),
        format!("Expected status completed, got {}", status),
    )?;

    report.pass(name);
    Ok(())
}

/// `GET /rehearsal/feedback/{id}`: 200 with scores when ready, 202 with
/// `data.status == "generating"` while the report is being produced.
/// Records nothing; callers decide which state they expect.
pub fn fetch_feedback(
    source: &dyn ResponseSource,
    token: &str,
    session_id: &str,
    name: &str,
    report: &mut TestReport,
) -> CaseResult<FeedbackState> {
    let request = ApiRequest::get(&feedback_path(session_id)).bearer(token);
    let resp = source.execute(&request)?;
    let body = resp.json().clone();

    match resp.status {
        202 => {
            crate::envelope::validate_success(&body, name, report);
            let status = body
                .get("data")
                .and_then(|d| d.get("status"))
                .and_then(Value::as_str);
            ensure(
                status == Some("generating"),
                format!("Expected data.status generating, got {:?}", status),
            )?;
            Ok(FeedbackState::Generating)
        }
        200 => {
            crate::envelope::validate_success(&body, name, report);
            let data = require(&body, "data", "feedback")?;
            require(data, "overallScore", "feedback")?;
            for key in ["strengths", "improvements"] {
                ensure(
                    require(data, key, "feedback")?.is_array(),
                    format!("{} in feedback is not a list", key),
                )?;
            }
            Ok(FeedbackState::Ready)
        }
        other => Err(CaseError::Assertion(format!(
            "Expected 200 or 202, got {}: {}",
            other,
            resp.text()
        ))),
    }
}

/// Feedback must already be available
pub fn feedback_ready(
    source: &dyn ResponseSource,
    token: &str,
    session_id: &str,
    name: &str,
    report: &mut TestReport,
) -> CaseResult {
    let state = fetch_feedback(source, token, session_id, name, report)?;
    ensure(
        state == FeedbackState::Ready,
        "Expected ready feedback, still generating",
    )?;
    report.pass(name);
    Ok(())
}

/// Feedback must still be generating
pub fn feedback_generating(
    source: &dyn ResponseSource,
    token: &str,
    session_id: &str,
    name: &str,
    report: &mut TestReport,
) -> CaseResult {
    let state = fetch_feedback(source, token, session_id, name, report)?;
    ensure(
        state == FeedbackState::Generating,
        "Expected feedback still generating, got a ready report",
    )?;
    report.pass(name);
    Ok(())
}

pub fn history(
    source: &dyn ResponseSource,
    token: &str,
    name: &str,
    report: &mut TestReport,
) -> CaseResult {
    super::history(source, HISTORY_PATH, token, name, report)
}
