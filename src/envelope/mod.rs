//! Response envelope contracts
//!
//! Every API response body is exactly one of three shapes:
//! - success: `{ success: true, data }`
//! - failure: `{ success: false, error: { code, message, details? } }`
//! - paginated: `{ success: true, data: [...], pagination: { page, limit, total, totalPages } }`

pub mod builders;

use crate::report::TestReport;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;

pub use builders::{failure_body, paginated_body, success_body, total_pages};

static ERROR_CODE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][A-Z0-9_]*$").expect("error code pattern is a valid regex")
});

/// Error payload of a failure envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Pagination metadata of a paginated envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl Pagination {
    /// `page` and `limit` are at least 1 and `totalPages == ceil(total / limit)`
    pub fn is_consistent(&self) -> bool {
        self.page >= 1 && self.limit >= 1 && self.total_pages == total_pages(self.total, self.limit)
    }
}

/// A response body classified into one of the three envelope shapes
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Success { data: Value },
    Failure(ApiError),
    Paginated { data: Vec<Value>, pagination: Pagination },
}

/// Why a body is not a valid envelope
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ShapeError {
    #[error("body is not a JSON object")]
    NotAnObject,
    #[error("`success` flag is missing or not a boolean")]
    MissingSuccessFlag,
    #[error("success envelope has no `data` key")]
    MissingData,
    #[error("failure envelope `error` must contain string `code` and `message`")]
    MalformedError,
    #[error("paginated envelope `data` must be a sequence")]
    DataNotSequence,
    #[error("`pagination` must carry integer page, limit, total and totalPages")]
    MalformedPagination,
}

/// Which shape a validator expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeKind {
    Success,
    Failure,
    Paginated,
}

impl fmt::Display for EnvelopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvelopeKind::Success => write!(f, "success"),
            EnvelopeKind::Failure => write!(f, "failure"),
            EnvelopeKind::Paginated => write!(f, "paginated"),
        }
    }
}

impl Envelope {
    /// Classify a raw body. `success` picks success-like vs failure,
    /// presence of `pagination` picks paginated vs plain success.
    pub fn classify(body: &Value) -> Result<Self, ShapeError> {
        let obj = body.as_object().ok_or(ShapeError::NotAnObject)?;
        let success = obj
            .get("success")
            .and_then(Value::as_bool)
            .ok_or(ShapeError::MissingSuccessFlag)?;

        if !success {
            let error = obj
                .get("error")
                .cloned()
                .and_then(|e| serde_json::from_value::<ApiError>(e).ok())
                .ok_or(ShapeError::MalformedError)?;
            return Ok(Envelope::Failure(error));
        }

        let data = obj.get("data").ok_or(ShapeError::MissingData)?;
        match obj.get("pagination") {
            None => Ok(Envelope::Success { data: data.clone() }),
            Some(raw) => {
                let items = data.as_array().ok_or(ShapeError::DataNotSequence)?;
                let pagination = serde_json::from_value::<Pagination>(raw.clone())
                    .map_err(|_| ShapeError::MalformedPagination)?;
                Ok(Envelope::Paginated {
                    data: items.clone(),
                    pagination,
                })
            }
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Envelope::Failure(err) => Some(err),
            _ => None,
        }
    }
}

/// Known API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Unauthorized,
    ValidationError,
    NotFound,
    Conflict,
    InternalError,
    InvalidCredentials,
    SessionCompleted,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 7] = [
        ErrorCode::Unauthorized,
        ErrorCode::ValidationError,
        ErrorCode::NotFound,
        ErrorCode::Conflict,
        ErrorCode::InternalError,
        ErrorCode::InvalidCredentials,
        ErrorCode::SessionCompleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::SessionCompleted => "SESSION_COMPLETED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-empty upper-case token made of letters, digits and underscores
pub fn is_error_code_token(code: &str) -> bool {
    ERROR_CODE_TOKEN.is_match(code)
}

fn record_mismatch(kind: EnvelopeKind, body: &Value, name: &str, report: &mut TestReport) {
    let label = match kind {
        EnvelopeKind::Paginated => "paginated envelope",
        _ => "envelope",
    };
    report.fail(
        &format!("{} [{}]", name, label),
        &format!("Expected {} envelope, got: {}", kind, body),
    );
}

/// `{ success: true, data: ... }`
pub fn validate_success(body: &Value, name: &str, report: &mut TestReport) -> bool {
    let ok =
        body.get("success").and_then(Value::as_bool) == Some(true) && body.get("data").is_some();
    if !ok {
        record_mismatch(EnvelopeKind::Success, body, name, report);
    }
    ok
}

/// `{ success: false, error: { code, message } }`
pub fn validate_failure(body: &Value, name: &str, report: &mut TestReport) -> bool {
    let error = body.get("error");
    let ok = body.get("success").and_then(Value::as_bool) == Some(false)
        && error.and_then(|e| e.get("code")).is_some()
        && error.and_then(|e| e.get("message")).is_some();
    if !ok {
        record_mismatch(EnvelopeKind::Failure, body, name, report);
    }
    ok
}

/// Success envelope whose `data` is a sequence, plus integer pagination fields
pub fn validate_paginated(body: &Value, name: &str, report: &mut TestReport) -> bool {
    let pagination = body.get("pagination");
    let integer_field =
        |key: &str| pagination.and_then(|p| p.get(key)).is_some_and(|v| v.is_i64() || v.is_u64());

    let ok = body.get("success").and_then(Value::as_bool) == Some(true)
        && body.get("data").is_some_and(Value::is_array)
        && ["page", "limit", "total", "totalPages"]
            .into_iter()
            .all(integer_field);
    if !ok {
        record_mismatch(EnvelopeKind::Paginated, body, name, report);
    }
    ok
}

/// Dispatch to the validator matching `kind`
pub fn validate(kind: EnvelopeKind, body: &Value, name: &str, report: &mut TestReport) -> bool {
    match kind {
        EnvelopeKind::Success => validate_success(body, name, report),
        EnvelopeKind::Failure => validate_failure(body, name, report),
        EnvelopeKind::Paginated => validate_paginated(body, name, report),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_three_shapes() {
        let ok = Envelope::classify(&json!({"success": true, "data": {"id": "1"}})).unwrap();
        assert_eq!(ok, Envelope::Success { data: json!({"id": "1"}) });

        let err = Envelope::classify(&json!({
            "success": false,
            "error": {"code": "NOT_FOUND", "message": "missing"}
        }))
        .unwrap();
        assert_eq!(err.error().unwrap().code, "NOT_FOUND");

        let page = Envelope::classify(&json!({
            "success": true,
            "data": [],
            "pagination": {"page": 1, "limit": 10, "total": 0, "totalPages": 0}
        }))
        .unwrap();
        assert!(matches!(page, Envelope::Paginated { ref data, .. } if data.is_empty()));
        assert!(ok.error().is_none());
    }

    #[test]
    fn test_classify_rejects_broken_bodies() {
        assert_eq!(Envelope::classify(&json!([1, 2])), Err(ShapeError::NotAnObject));
        assert_eq!(
            Envelope::classify(&json!({"data": 1})),
            Err(ShapeError::MissingSuccessFlag)
        );
        assert_eq!(
            Envelope::classify(&json!({"success": true})),
            Err(ShapeError::MissingData)
        );
        assert_eq!(
            Envelope::classify(&json!({"success": false, "error": {"code": "X"}})),
            Err(ShapeError::MalformedError)
        );
        assert_eq!(
            Envelope::classify(&json!({
                "success": true,
                "data": {},
                "pagination": {"page": 1, "limit": 10, "total": 0, "totalPages": 0}
            })),
            Err(ShapeError::DataNotSequence)
        );
        assert_eq!(
            Envelope::classify(&json!({
                "success": true,
                "data": [],
                "pagination": {"page": 1, "limit": 10}
            })),
            Err(ShapeError::MalformedPagination)
        );
    }

    #[test]
    fn test_success_accepts_any_data_value() {
        let mut report = TestReport::new();
        for data in [json!(null), json!(""), json!([]), json!(42), json!({"a": 1})] {
            assert!(validate_success(&json!({"success": true, "data": data}), "s", &mut report));
        }
        assert!(report.outcomes().is_empty());
    }

    #[test]
    fn test_validators_record_diagnostics() {
        let mut report = TestReport::new();

        assert!(!validate_success(&json!({"success": false}), "Login", &mut report));
        let missing_message = json!({"success": false, "error": {"code": "X"}});
        assert!(!validate_failure(&missing_message, "Me", &mut report));
        assert!(!validate_paginated(
            &json!({"success": true, "data": [], "pagination": {"page": "1"}}),
            "History",
            &mut report
        ));

        let names: Vec<&str> = report.outcomes().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Login [envelope]", "Me [envelope]", "History [paginated envelope]"]
        );
        assert!(report.outcomes().iter().all(|o| !o.passed));
        assert!(report.outcomes()[0]
            .detail
            .as_deref()
            .unwrap()
            .starts_with("Expected success envelope, got: "));
        assert!(report.outcomes()[2]
            .detail
            .as_deref()
            .unwrap()
            .starts_with("Expected paginated envelope, got: "));
    }

    #[test]
    fn test_paginated_requires_integer_fields() {
        let mut report = TestReport::new();
        let body = paginated_body(vec![json!({"id": "1"})], 1, 10, 1);
        assert!(validate_paginated(&body, "ok", &mut report));

        let float_pages = json!({
            "success": true,
            "data": [],
            "pagination": {"page": 1, "limit": 10, "total": 0, "totalPages": 0.5}
        });
        assert!(!validate_paginated(&float_pages, "float", &mut report));
        assert_eq!(report.summary().failed, 1);
    }

    #[test]
    fn test_pagination_consistency() {
        let good = Pagination { page: 2, limit: 10, total: 25, total_pages: 3 };
        assert!(good.is_consistent());

        let wrong_pages = Pagination { total_pages: 2, ..good };
        assert!(!wrong_pages.is_consistent());

        let zero_page = Pagination { page: 0, ..good };
        assert!(!zero_page.is_consistent());
    }

    #[test]
    fn test_error_codes_are_tokens() {
        for code in ErrorCode::ALL {
            assert!(is_error_code_token(code.as_str()), "{}", code);
        }
        assert!(!is_error_code_token(""));
        assert!(!is_error_code_token("not_found"));
        assert!(!is_error_code_token("NOT FOUND"));
    }
}
