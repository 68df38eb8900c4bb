//! Flow 5: unified response format
//!
//! Pure checks over the canonical body builders; no source involved.

use super::{ensure, fixtures, CaseError, CaseResult};
use crate::envelope::{
    self, is_error_code_token, paginated_body, success_body, total_pages, Envelope, EnvelopeKind,
    ErrorCode,
};
use crate::report::TestReport;
use serde_json::{json, Value};

/// Success bodies carry `data` whatever its value
pub fn success_format(name: &str, report: &mut TestReport) -> CaseResult {
    let samples = [
        success_body(json!({ "id": "1" })),
        success_body(json!([1, 2, 3])),
        success_body(Value::Null),
        success_body(json!("string-data")),
    ];
    for (i, sample) in samples.iter().enumerate() {
        ensure(
            envelope::validate_success(sample, name, report),
            format!("Sample {}: not a success envelope", i),
        )?;
        ensure(
            matches!(Envelope::classify(sample), Ok(Envelope::Success { .. })),
            format!("Sample {}: classified as something else", i),
        )?;
    }
    report.pass(name);
    Ok(())
}

/// Failure bodies carry an upper-case `code` and a non-empty `message`
pub fn failure_format(name: &str, report: &mut TestReport) -> CaseResult {
    for (i, sample) in fixtures::failure_samples().iter().enumerate() {
        ensure(
            envelope::validate_failure(sample, name, report),
            format!("Sample {}: not a failure envelope", i),
        )?;
        let error = Envelope::classify(sample)
            .ok()
            .and_then(|e| e.error().cloned())
            .ok_or_else(|| CaseError::Assertion(format!("Sample {}: no error payload", i)))?;
        ensure(
            is_error_code_token(&error.code),
            format!("Sample {}: code {} is not upper-case", i, error.code),
        )?;
        ensure(
            !error.message.is_empty(),
            format!("Sample {}: empty message", i),
        )?;
    }
    report.pass(name);
    Ok(())
}

/// Page 2 of 25 items at 10 per page reports 3 pages
pub fn paginated_format(name: &str, report: &mut TestReport) -> CaseResult {
    let sample = paginated_body(vec![json!({ "id": "1" })], 2, 10, 25);
    ensure(
        envelope::validate(EnvelopeKind::Paginated, &sample, name, report),
        "Not a paginated envelope",
    )?;

    match Envelope::classify(&sample) {
        Ok(Envelope::Paginated { data, pagination }) => {
            ensure(data.len() == 1, format!("Expected 1 item, got {}", data.len()))?;
            ensure(pagination.page == 2, format!("page = {}", pagination.page))?;
            ensure(pagination.limit == 10, format!("limit = {}", pagination.limit))?;
            ensure(pagination.total == 25, format!("total = {}", pagination.total))?;
            ensure(
                pagination.total_pages == 3,
                format!("totalPages = {}, expected ceil(25/10) = 3", pagination.total_pages),
            )?;
            ensure(pagination.is_consistent(), "Pagination is inconsistent")?;
        }
        other => {
            return Err(CaseError::Assertion(format!(
                "Expected paginated envelope, got {:?}",
                other
            )))
        }
    }
    ensure(total_pages(1, 10) == 1, "ceil(1/10) must be 1")?;

    report.pass(name);
    Ok(())
}

/// Every known error code is a non-empty upper-case token
pub fn error_code_enumeration(name: &str, report: &mut TestReport) -> CaseResult {
    for code in ErrorCode::ALL {
        let text = code.as_str();
        ensure(!text.is_empty(), "Error code must not be empty")?;
        ensure(
            text == text.to_uppercase() && is_error_code_token(text),
            format!("Error code '{}' must be uppercase", text),
        )?;
    }
    report.pass(name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_checks_pass() {
        let mut report = TestReport::new();
        success_format("s", &mut report).unwrap();
        failure_format("f", &mut report).unwrap();
        paginated_format("p", &mut report).unwrap();
        error_code_enumeration("e", &mut report).unwrap();

        let names: Vec<&str> = report.outcomes().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["s", "f", "p", "e"]);
        assert_eq!(report.summary().failed, 0);
    }

    #[test]
    fn test_failure_samples_cover_every_code() {
        let codes: Vec<String> = fixtures::failure_samples()
            .iter()
            .map(|s| s["error"]["code"].as_str().unwrap_or_default().to_string())
            .collect();
        assert_eq!(codes.len(), ErrorCode::ALL.len());
        assert!(codes.contains(&"SESSION_COMPLETED".to_string()));
    }
}
