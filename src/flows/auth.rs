//! Flow 1: register, login, profile

use super::{call, call_rejected, ensure, require, require_str, CaseResult};
use crate::envelope::{EnvelopeKind, ErrorCode};
use crate::report::TestReport;
use crate::source::{ApiRequest, ResponseSource};
use serde_json::{json, Value};

pub const REGISTER_PATH: &str = "/auth/register";
pub const LOGIN_PATH: &str = "/auth/login";
pub const ME_PATH: &str = "/auth/me";

/// Field that must never leave the server
pub const CREDENTIAL_HASH_FIELD: &str = "passwordHash";

const DEFAULT_PASSWORD: &str = "TestPass123!";
const WRONG_PASSWORD: &str = "WrongPass999!";

/// Credentials used for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl Identity {
    /// Unique per call, so live runs never collide with earlier fixtures
    pub fn fresh() -> Self {
        let unique = uuid::Uuid::new_v4().simple().to_string();
        Self::with_suffix(&unique[..8])
    }

    pub fn with_suffix(suffix: &str) -> Self {
        Self {
            email: format!("e2e-test-{}@example.com", suffix),
            password: DEFAULT_PASSWORD.to_string(),
            name: format!("E2E-{}", suffix),
        }
    }

    fn register_body(&self) -> Value {
        json!({ "email": self.email, "password": self.password, "name": self.name })
    }

    fn login_body(&self, password: &str) -> Value {
        json!({ "email": self.email, "password": password })
    }
}

fn check_user(user: &Value, context: &str) -> CaseResult {
    for key in ["id", "email", "name"] {
        require(user, key, context)?;
    }
    Ok(())
}

/// `POST /auth/register` → 201 with token and user. Returns the token.
pub fn register(
    source: &dyn ResponseSource,
    identity: &Identity,
    name: &str,
    report: &mut TestReport,
) -> CaseResult<String> {
    let request = ApiRequest::post(REGISTER_PATH).json(identity.register_body());
    let body = call(source, &request, 201, EnvelopeKind::Success, name, report)?;

    let data = require(&body, "data", "register response")?;
    let token = require_str(data, "token", "register response")?.to_string();
    check_user(require(data, "user", "register response")?, "register user")?;

    report.pass(name);
    Ok(token)
}

/// Registering an already used email → 409 `CONFLICT`
pub fn register_duplicate(
    source: &dyn ResponseSource,
    identity: &Identity,
    name: &str,
    report: &mut TestReport,
) -> CaseResult {
    let request = ApiRequest::post(REGISTER_PATH).json(identity.register_body());
    call_rejected(source, &request, 409, ErrorCode::Conflict, name, report)?;
    report.pass(name);
    Ok(())
}

/// `POST /auth/login` → 200 with token; the user never carries a password hash
pub fn login(
    source: &dyn ResponseSource,
    identity: &Identity,
    name: &str,
    report: &mut TestReport,
) -> CaseResult<String> {
    let request = ApiRequest::post(LOGIN_PATH).json(identity.login_body(&identity.password));
    let body = call(source, &request, 200, EnvelopeKind::Success, name, report)?;

    let data = require(&body, "data", "login response")?;
    let token = require_str(data, "token", "login response")?.to_string();
    let user = require(data, "user", "login response")?;
    ensure(
        user.get(CREDENTIAL_HASH_FIELD).is_none(),
        format!("{} leaked in login response", CREDENTIAL_HASH_FIELD),
    )?;

    report.pass(name);
    Ok(token)
}

/// Wrong password → 401 `INVALID_CREDENTIALS`
pub fn login_wrong_password(
    source: &dyn ResponseSource,
    identity: &Identity,
    name: &str,
    report: &mut TestReport,
) -> CaseResult {
    let request = ApiRequest::post(LOGIN_PATH).json(identity.login_body(WRONG_PASSWORD));
    call_rejected(source, &request, 401, ErrorCode::InvalidCredentials, name, report)?;
    report.pass(name);
    Ok(())
}

/// `GET /auth/me` with a valid token → 200 with the profile and `usageCount`
pub fn me(
    source: &dyn ResponseSource,
    token: &str,
    name: &str,
    report: &mut TestReport,
) -> CaseResult {
    let request = ApiRequest::get(ME_PATH).bearer(token);
    let body = call(source, &request, 200, EnvelopeKind::Success, name, report)?;

    let user = require(&body, "data", "profile response")?;
    check_user(user, "profile")?;
    require(user, "usageCount", "profile")?;

    report.pass(name);
    Ok(())
}

/// `GET /auth/me` without a token, or with a bad one → 401 `UNAUTHORIZED`
pub fn me_rejected(
    source: &dyn ResponseSource,
    token: Option<&str>,
    name: &str,
    report: &mut TestReport,
) -> CaseResult {
    let request = ApiRequest::get(ME_PATH).maybe_bearer(token);
    call_rejected(source, &request, 401, ErrorCode::Unauthorized, name, report)?;
    report.pass(name);
    Ok(())
}
