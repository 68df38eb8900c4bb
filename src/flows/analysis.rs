//! Flows 2 and 3: content-analysis sessions
//!
//! Both domains share one contract shape and differ only in route prefix
//! and the field their analyze endpoint requires.

use super::{call, call_rejected, require, require_str, CaseResult};
use crate::envelope::{EnvelopeKind, ErrorCode};
use crate::report::TestReport;
use crate::source::{ApiRequest, ResponseSource};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisDomain {
    Feynman,
    Layers,
}

impl AnalysisDomain {
    pub const ALL: [AnalysisDomain; 2] = [AnalysisDomain::Feynman, AnalysisDomain::Layers];

    pub fn segment(&self) -> &'static str {
        match self {
            AnalysisDomain::Feynman => "feynman",
            AnalysisDomain::Layers => "layers",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisDomain::Feynman => "Feynman",
            AnalysisDomain::Layers => "Layers",
        }
    }

    /// Report prefix, e.g. `Flow2`
    pub fn flow(&self) -> &'static str {
        match self {
            AnalysisDomain::Feynman => "Flow2",
            AnalysisDomain::Layers => "Flow3",
        }
    }

    /// Body field the analyze endpoint cannot do without
    pub fn required_field(&self) -> &'static str {
        match self {
            AnalysisDomain::Feynman => "starStory",
            AnalysisDomain::Layers => "inputText",
        }
    }

    /// Prefix for mock session ids, e.g. `fs`
    pub fn id_prefix(&self) -> &'static str {
        match self {
            AnalysisDomain::Feynman => "fs",
            AnalysisDomain::Layers => "ls",
        }
    }

    pub fn path(&self, route: &str) -> String {
        format!("/{}/{}", self.segment(), route)
    }
}

/// `POST /{domain}/session` (authenticated) → 200 with an `id`. Returns the id.
pub fn create_session(
    source: &dyn ResponseSource,
    domain: AnalysisDomain,
    token: &str,
    name: &str,
    report: &mut TestReport,
) -> CaseResult<String> {
    let request = ApiRequest::post(&domain.path("session"))
        .bearer(token)
        .json(json!({}));
    let body = call(source, &request, 200, EnvelopeKind::Success, name, report)?;
    let data = require(&body, "data", "session response")?;
    let id = require_str(data, "id", "session response")?.to_string();

    report.pass(name);
    Ok(id)
}

/// Same call without a token → 401 `UNAUTHORIZED`
pub fn create_session_unauthenticated(
    source: &dyn ResponseSource,
    domain: AnalysisDomain,
    name: &str,
    report: &mut TestReport,
) -> CaseResult {
    let request = ApiRequest::post(&domain.path("session")).json(json!({}));
    call_rejected(source, &request, 401, ErrorCode::Unauthorized, name, report)?;
    report.pass(name);
    Ok(())
}

/// `POST /{domain}/analyze` without the required field → 400 `VALIDATION_ERROR`
pub fn analyze_missing_field(
    source: &dyn ResponseSource,
    domain: AnalysisDomain,
    token: &str,
    session_id: &str,
    name: &str,
    report: &mut TestReport,
) -> CaseResult {
    let request = ApiRequest::post(&domain.path("analyze"))
        .bearer(token)
        .json(json!({ "sessionId": session_id }));
    call_rejected(source, &request, 400, ErrorCode::ValidationError, name, report)?;
    report.pass(name);
    Ok(())
}

/// `GET /{domain}/history` → paginated listing
pub fn history(
    source: &dyn ResponseSource,
    domain: AnalysisDomain,
    token: &str,
    name: &str,
    report: &mut TestReport,
) -> CaseResult {
    super::history(source, &domain.path("history"), token, name, report)
}

/// Another user's session is invisible: `GET /{domain}/session/{id}` → 404 `NOT_FOUND`
pub fn session_isolation(
    source: &dyn ResponseSource,
    domain: AnalysisDomain,
    token: &str,
    foreign_session_id: &str,
    name: &str,
    report: &mut TestReport,
) -> CaseResult {
    let request =
        ApiRequest::get(&domain.path(&format!("session/{}", foreign_session_id))).bearer(token);
    call_rejected(source, &request, 404, ErrorCode::NotFound, name, report)?;
    report.pass(name);
    Ok(())
}
