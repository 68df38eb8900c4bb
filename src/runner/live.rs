//! End-to-end sequence against a running server
//!
//! Steps share state: the token from registration authenticates every later
//! call. Soft steps record a failure and move on; any other failure ends the
//! sequence and is reported once by the caller.

use crate::flows::analysis::{self, AnalysisDomain};
use crate::flows::auth::{self, Identity};
use crate::flows::rehearsal;
use crate::flows::CaseResult;
use crate::report::TestReport;
use crate::source::ResponseSource;

/// Record a failing outcome instead of aborting
fn soft<T>(result: CaseResult<T>, name: &str, report: &mut TestReport) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            report.fail(name, &e.to_string());
            None
        }
    }
}

pub fn run_live_sequence(
    source: &dyn ResponseSource,
    identity: &Identity,
    report: &mut TestReport,
) -> CaseResult {
    log::info!("live sequence as {}", identity.email);

    // Auth
    let token = auth::register(source, identity, "Live: Register success", report)?;
    auth::register_duplicate(source, identity, "Live: Register duplicate → 409", report)?;
    auth::login(source, identity, "Live: Login success", report)?;
    auth::login_wrong_password(source, identity, "Live: Login wrong password → 401", report)?;
    auth::me(source, &token, "Live: Me (valid token)", report)?;
    auth::me_rejected(source, None, "Live: Me (no token) → 401", report)?;
    auth::me_rejected(
        source,
        Some("invalid-token"),
        "Live: Me (invalid token) → 401",
        report,
    )?;

    // Analysis sessions
    for domain in AnalysisDomain::ALL {
        let label = domain.label();

        let name = format!("Live: {} create session", label);
        soft(
            analysis::create_session(source, domain, &token, &name, report),
            &name,
            report,
        );

        analysis::create_session_unauthenticated(
            source,
            domain,
            &format!("Live: {} session (no auth) → 401", label),
            report,
        )?;
        analysis::history(source, domain, &token, &format!("Live: {} history", label), report)?;
    }

    // Rehearsal
    let name = "Live: Rehearsal create session";
    let session_id = soft(
        rehearsal::create_session(source, &token, "E2E test interview", "behavioral", name, report),
        name,
        report,
    );

    rehearsal::create_session_invalid_style(
        source,
        &token,
        "invalid_style",
        "Live: Rehearsal invalid style → 400",
        report,
    )?;
    rehearsal::history(source, &token, "Live: Rehearsal history", report)?;

    if let Some(session_id) = session_id {
        let name = "Live: Rehearsal feedback (before end) → 202";
        soft(
            rehearsal::feedback_generating(source, &token, &session_id, name, report),
            name,
            report,
        );
    }

    Ok(())
}
