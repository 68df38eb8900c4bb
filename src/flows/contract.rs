//! Contract catalogue: every flow check bound to a literal mock reply

use super::analysis::{self, AnalysisDomain};
use super::{auth, fixtures, format, rehearsal, CaseResult};
use crate::report::TestReport;
use crate::source::{make_token, MockSource};
use reqwest::Method;

type CaseFn = Box<dyn Fn(&str, &mut TestReport) -> CaseResult>;

/// One named contract test
pub struct ContractCase {
    pub name: String,
    run: CaseFn,
}

impl ContractCase {
    pub fn new(name: &str, run: impl Fn(&str, &mut TestReport) -> CaseResult + 'static) -> Self {
        Self {
            name: name.to_string(),
            run: Box::new(run),
        }
    }

    pub fn run(&self, report: &mut TestReport) -> CaseResult {
        (self.run)(&self.name, report)
    }
}

fn mock_identity() -> auth::Identity {
    auth::Identity {
        email: fixtures::MOCK_EMAIL.to_string(),
        password: "TestPass123!".to_string(),
        name: fixtures::MOCK_NAME.to_string(),
    }
}

fn mock_token() -> String {
    make_token("test-user-1")
}

/// All contract cases, in execution order
pub fn contract_cases() -> Vec<ContractCase> {
    let mut cases = auth_cases();
    for domain in AnalysisDomain::ALL {
        cases.extend(analysis_cases(domain));
    }
    cases.extend(rehearsal_cases());
    cases.extend(format_cases());
    cases
}

fn auth_cases() -> Vec<ContractCase> {
    vec![
        ContractCase::new("Flow1: Register success", |name, report| {
            let source = MockSource::reply(201, fixtures::register_ok());
            auth::register(&source, &mock_identity(), name, report).map(drop)
        }),
        ContractCase::new("Flow1: Register duplicate email", |name, report| {
            let source = MockSource::reply(409, fixtures::conflict());
            auth::register_duplicate(&source, &mock_identity(), name, report)
        }),
        ContractCase::new("Flow1: Login success", |name, report| {
            let source = MockSource::reply(200, fixtures::login_ok());
            auth::login(&source, &mock_identity(), name, report).map(drop)
        }),
        ContractCase::new("Flow1: Login wrong password", |name, report| {
            let source = MockSource::reply(401, fixtures::invalid_credentials());
            auth::login_wrong_password(&source, &mock_identity(), name, report)
        }),
        ContractCase::new("Flow1: Get me (valid token)", |name, report| {
            let source = MockSource::reply(200, fixtures::me_ok());
            auth::me(&source, &mock_token(), name, report)
        }),
        ContractCase::new("Flow1: Get me (no token)", |name, report| {
            let source = MockSource::reply(401, fixtures::unauthorized());
            auth::me_rejected(&source, None, name, report)
        }),
        ContractCase::new("Flow1: Get me (invalid token)", |name, report| {
            let source = MockSource::reply(401, fixtures::unauthorized());
            auth::me_rejected(&source, Some("invalid-token"), name, report)
        }),
    ]
}

fn analysis_cases(domain: AnalysisDomain) -> Vec<ContractCase> {
    let label = |scenario: &str| format!("{}: {} {}", domain.flow(), domain.label(), scenario);
    let session_id = format!("{}-1", domain.id_prefix());

    let created_id = session_id.clone();
    let analyze_id = session_id.clone();
    let history_id = session_id;

    vec![
        ContractCase::new(&label("create session (auth)"), move |name, report| {
            let source = MockSource::reply(200, fixtures::analysis_session_created(&created_id));
            analysis::create_session(&source, domain, &mock_token(), name, report).map(drop)
        }),
        ContractCase::new(&label("create session (no auth)"), move |name, report| {
            let source = MockSource::reply(401, fixtures::unauthorized());
            analysis::create_session_unauthenticated(&source, domain, name, report)
        }),
        ContractCase::new(
            &label(&format!("analyze (missing {})", domain.required_field())),
            move |name, report| {
                let message = format!("sessionId and {} are required", domain.required_field());
                let source = MockSource::reply(400, fixtures::validation_error(&message));
                analysis::analyze_missing_field(
                    &source,
                    domain,
                    &mock_token(),
                    &analyze_id,
                    name,
                    report,
                )
            },
        ),
        ContractCase::new(&label("history (auth)"), move |name, report| {
            let source = MockSource::reply(200, fixtures::analysis_history(&history_id));
            analysis::history(&source, domain, &mock_token(), name, report)
        }),
        ContractCase::new(&label("session isolation"), move |name, report| {
            let source = MockSource::new().route(
                Method::GET,
                &domain.path("session/other-user-session"),
                404,
                fixtures::session_not_found(),
            );
            analysis::session_isolation(
                &source,
                domain,
                &mock_token(),
                "other-user-session",
                name,
                report,
            )
        }),
    ]
}

fn rehearsal_cases() -> Vec<ContractCase> {
    vec![
        ContractCase::new("Flow4: Rehearsal create session (valid)", |name, report| {
            let source = MockSource::reply(200, fixtures::rehearsal_session_created());
            rehearsal::create_session(
                &source,
                &mock_token(),
                "Frontend developer interview",
                "behavioral",
                name,
                report,
            )
            .map(drop)
        }),
        ContractCase::new("Flow4: Rehearsal create session (invalid style)", |name, report| {
            let message = "interviewerStyle must be behavioral, technical or stress";
            let source = MockSource::reply(400, fixtures::validation_error(message));
            rehearsal::create_session_invalid_style(
                &source,
                &mock_token(),
                "invalid_style",
                name,
                report,
            )
        }),
        ContractCase::new("Flow4: Rehearsal message (completed session)", |name, report| {
            let source = MockSource::reply(400, fixtures::session_completed());
            rehearsal::message_completed_session(&source, &mock_token(), "rs-1", name, report)
        }),
        ContractCase::new("Flow4: Rehearsal end session", |name, report| {
            let source = MockSource::reply(200, fixtures::rehearsal_ended("rs-1"));
            rehearsal::end_session(&source, &mock_token(), "rs-1", name, report)
        }),
        ContractCase::new("Flow4: Rehearsal feedback (ready)", |name, report| {
            let source = MockSource::reply(200, fixtures::feedback_ready());
            rehearsal::feedback_ready(&source, &mock_token(), "rs-1", name, report)
        }),
        ContractCase::new("Flow4: Rehearsal feedback (generating)", |name, report| {
            let source = MockSource::reply(202, fixtures::feedback_generating());
            rehearsal::feedback_generating(&source, &mock_token(), "rs-1", name, report)
        }),
        ContractCase::new("Flow4: Rehearsal history", |name, report| {
            let source = MockSource::reply(200, fixtures::rehearsal_history());
            rehearsal::history(&source, &mock_token(), name, report)
        }),
    ]
}

fn format_cases() -> Vec<ContractCase> {
    vec![
        ContractCase::new("Flow5: Success response format", format::success_format),
        ContractCase::new("Flow5: Failure response format", format::failure_format),
        ContractCase::new("Flow5: Paginated response format", format::paginated_format),
        ContractCase::new("Flow5: Error code enumeration", format::error_code_enumeration),
    ]
}
