//! Flow test cases
//!
//! Every check here talks to a `&dyn ResponseSource`, so the same function
//! verifies a literal fixture in contract mode and a real server in live mode.
//! On success a check appends exactly one passing outcome; failures are
//! returned to the caller as [`CaseError`].

pub mod analysis;
pub mod auth;
pub mod contract;
pub mod fixtures;
pub mod format;
pub mod rehearsal;

use crate::envelope::{self, Envelope, EnvelopeKind, ErrorCode};
use crate::report::TestReport;
use crate::source::{ApiRequest, ApiResponse, ResponseSource, SourceError};
use serde_json::Value;

/// Why a single test case did not pass
#[derive(Debug, thiserror::Error)]
pub enum CaseError {
    #[error("{0}")]
    Assertion(String),

    #[error("Exception: {0}")]
    Source(#[from] SourceError),
}

pub type CaseResult<T = ()> = Result<T, CaseError>;

/// Fail the case with `message` unless `cond` holds
pub fn ensure(cond: bool, message: impl Into<String>) -> CaseResult {
    if cond {
        Ok(())
    } else {
        Err(CaseError::Assertion(message.into()))
    }
}

pub fn expect_status(resp: &ApiResponse, expected: u16) -> CaseResult {
    ensure(
        resp.status == expected,
        format!("Expected {}, got {}: {}", expected, resp.status, resp.text()),
    )
}

/// `error.code` must equal `expected`
pub fn expect_error_code(body: &Value, expected: ErrorCode) -> CaseResult {
    let actual = body
        .get("error")
        .and_then(|e| e.get("code"))
        .and_then(Value::as_str);
    ensure(
        actual == Some(expected.as_str()),
        format!("Expected error code {}, got {:?}", expected, actual),
    )
}

/// `value[key]`, or an assertion failure naming what was missing
pub fn require<'a>(value: &'a Value, key: &str, context: &str) -> CaseResult<&'a Value> {
    value
        .get(key)
        .ok_or_else(|| CaseError::Assertion(format!("Missing {} in {}", key, context)))
}

pub fn require_str<'a>(value: &'a Value, key: &str, context: &str) -> CaseResult<&'a str> {
    require(value, key, context)?
        .as_str()
        .ok_or_else(|| CaseError::Assertion(format!("{} in {} is not a string", key, context)))
}

/// Execute `request`, check status and envelope shape, hand back the body.
/// A shape violation is recorded in the report but does not stop the case.
pub fn call(
    source: &dyn ResponseSource,
    request: &ApiRequest,
    status: u16,
    kind: EnvelopeKind,
    name: &str,
    report: &mut TestReport,
) -> CaseResult<Value> {
    let resp = source.execute(request)?;
    expect_status(&resp, status)?;
    let body = resp.json().clone();
    envelope::validate(kind, &body, name, report);
    Ok(body)
}

/// Expect a failure envelope with `status` and `code`
pub fn call_rejected(
    source: &dyn ResponseSource,
    request: &ApiRequest,
    status: u16,
    code: ErrorCode,
    name: &str,
    report: &mut TestReport,
) -> CaseResult {
    let body = call(source, request, status, EnvelopeKind::Failure, name, report)?;
    expect_error_code(&body, code)
}

/// Paginated listing with `totalPages == ceil(total / limit)`. A listing
/// whose pagination cannot be read as non-negative integers fails the case.
pub fn history(
    source: &dyn ResponseSource,
    path: &str,
    token: &str,
    name: &str,
    report: &mut TestReport,
) -> CaseResult {
    let request = ApiRequest::get(path).bearer(token);
    let body = call(source, &request, 200, EnvelopeKind::Paginated, name, report)?;

    match Envelope::classify(&body) {
        Ok(Envelope::Paginated { pagination, .. }) => ensure(
            pagination.is_consistent(),
            format!("Inconsistent pagination: {:?}", pagination),
        )?,
        // shape mismatch already recorded by the validator
        Ok(_) => {}
        Err(e) => {
            return Err(CaseError::Assertion(format!(
                "Malformed paginated body ({}): {}",
                e, body
            )))
        }
    }

    report.pass(name);
    Ok(())
}
