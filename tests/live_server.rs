//! Live mode over real HTTP against an in-process fake API

use api_contract_tester::runner::{exit_status, run_tests, RunMode, LIVE_FATAL_NAME};
use api_contract_tester::{Config, TestReport};
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;

#[derive(Default)]
struct FakeApi {
    /// email -> (id, password, name)
    users: HashMap<String, (String, String, String)>,
    /// token -> user id
    tokens: HashMap<String, String>,
    next_id: u32,
    leak_password_hash: bool,
}

type Shared = Arc<Mutex<FakeApi>>;
type Reply = (StatusCode, Json<Value>);

fn ok(status: StatusCode, data: Value) -> Reply {
    (status, Json(json!({ "success": true, "data": data })))
}

fn err(status: StatusCode, code: &str, message: &str) -> Reply {
    (
        status,
        Json(json!({ "success": false, "error": { "code": code, "message": message } })),
    )
}

fn page(data: Vec<Value>) -> Reply {
    let total = data.len() as u64;
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": data,
            "pagination": {
                "page": 1,
                "limit": 10,
                "total": total,
                "totalPages": total.div_ceil(10),
            },
        })),
    )
}

fn caller(api: &FakeApi, headers: &HeaderMap) -> Option<String> {
    let token = headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;
    api.tokens.get(token).cloned()
}

fn user_json(api: &FakeApi, id: &str) -> Value {
    let (email, (_, password, name)) = api
        .users
        .iter()
        .find(|(_, (uid, _, _))| uid == id)
        .expect("token maps to a user");
    let mut user = json!({
        "id": id,
        "email": email,
        "name": name,
        "createdAt": "2026-01-01T00:00:00Z",
    });
    if api.leak_password_hash {
        user["passwordHash"] = json!(format!("hash:{}", password));
    }
    user
}

fn issue_token(api: &mut FakeApi, user_id: &str) -> String {
    api.next_id += 1;
    let token = format!("token-{}-{}", user_id, api.next_id);
    api.tokens.insert(token.clone(), user_id.to_string());
    token
}

async fn register(State(api): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut api = api.lock().unwrap();
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if api.users.contains_key(&email) {
        return err(StatusCode::CONFLICT, "CONFLICT", "already exists");
    }
    api.next_id += 1;
    let id = format!("u{}", api.next_id);
    let password = body["password"].as_str().unwrap_or_default().to_string();
    let name = body["name"].as_str().unwrap_or_default().to_string();
    api.users.insert(email, (id.clone(), password, name));

    let token = issue_token(&mut api, &id);
    let user = user_json(&api, &id);
    ok(StatusCode::CREATED, json!({ "user": user, "token": token }))
}

async fn login(State(api): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut api = api.lock().unwrap();
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let id = match api.users.get(email) {
        Some((id, stored, _)) if stored == password => id.clone(),
        _ => return err(StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS", "wrong email or password"),
    };
    let token = issue_token(&mut api, &id);
    let user = user_json(&api, &id);
    ok(StatusCode::OK, json!({ "user": user, "token": token }))
}

async fn me(State(api): State<Shared>, headers: HeaderMap) -> Reply {
    let api = api.lock().unwrap();
    match caller(&api, &headers) {
        Some(id) => {
            let mut user = user_json(&api, &id);
            user["usageCount"] = json!(0);
            ok(StatusCode::OK, user)
        }
        None => err(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "please log in"),
    }
}

async fn analysis_session(
    State(api): State<Shared>,
    Path(domain): Path<String>,
    headers: HeaderMap,
    Json(_body): Json<Value>,
) -> Reply {
    let mut api = api.lock().unwrap();
    if caller(&api, &headers).is_none() {
        return err(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "please log in");
    }
    api.next_id += 1;
    ok(
        StatusCode::OK,
        json!({ "id": format!("{}-{}", domain, api.next_id), "title": null, "status": "created" }),
    )
}

async fn history(State(api): State<Shared>, headers: HeaderMap) -> Reply {
    let api = api.lock().unwrap();
    if caller(&api, &headers).is_none() {
        return err(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "please log in");
    }
    page(vec![])
}

async fn rehearsal_session(
    State(api): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let api = api.lock().unwrap();
    if caller(&api, &headers).is_none() {
        return err(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "please log in");
    }
    let style = body["interviewerStyle"].as_str().unwrap_or_default();
    if !["behavioral", "technical", "stress"].contains(&style) {
        return err(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", "invalid interviewerStyle");
    }
    ok(
        StatusCode::OK,
        json!({
            "id": "rs-live",
            "scenario": body["scenario"],
            "interviewerStyle": style,
            "firstQuestion": "Tell me about yourself.",
            "status": "active",
        }),
    )
}

async fn feedback(State(api): State<Shared>, Path(_id): Path<String>, headers: HeaderMap) -> Reply {
    let api = api.lock().unwrap();
    if caller(&api, &headers).is_none() {
        return err(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "please log in");
    }
    ok(
        StatusCode::ACCEPTED,
        json!({ "status": "generating", "message": "try again later" }),
    )
}

/// Start the fake API, returning its base URL. The server lives as long as `rt`.
fn start_server(rt: &Runtime, api: FakeApi) -> String {
    let state: Shared = Arc::new(Mutex::new(api));
    let routes = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/rehearsal/session", post(rehearsal_session))
        .route("/rehearsal/history", get(history))
        .route("/rehearsal/feedback/:id", get(feedback))
        .route("/:domain/session", post(analysis_session))
        .route("/:domain/history", get(history))
        .with_state(state);
    let app = Router::new().nest("/api/v1", routes);

    let listener = rt
        .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
        .expect("bind fake API");
    let addr = listener.local_addr().expect("local addr");
    rt.spawn(async move {
        axum::serve(listener, app).await.expect("serve fake API");
    });
    format!("http://{}", addr)
}

#[test]
fn test_live_run_against_conforming_server() {
    let rt = Runtime::new().expect("tokio runtime");
    let base_url = start_server(&rt, FakeApi::default());

    let config = Config::new(Some(&base_url), "/api/v1", 5);
    let mode = RunMode::from_config(&config);
    let mut report = TestReport::new();
    run_tests(&mode, &config, &mut report);

    assert!(matches!(mode, RunMode::ContractAndLive { .. }));
    assert_eq!(report.summary().failed, 0, "{}", report.render_summary());
    let names: Vec<&str> = report.outcomes().iter().map(|o| o.name.as_str()).collect();
    assert!(names.contains(&"Live: Register success"));
    assert!(names.contains(&"Live: Me (invalid token) → 401"));
    assert!(names.contains(&"Live: Layers history"));
    assert_eq!(names.last(), Some(&"Live: Rehearsal feedback (before end) → 202"));
    assert_eq!(exit_status(report.summary().failed), 0);
}

#[test]
fn test_live_run_aborts_on_leaked_password_hash() {
    let rt = Runtime::new().expect("tokio runtime");
    let base_url = start_server(
        &rt,
        FakeApi {
            leak_password_hash: true,
            ..FakeApi::default()
        },
    );

    let config = Config::new(Some(&base_url), "/api/v1", 5);
    let mut report = TestReport::new();
    run_tests(&RunMode::from_config(&config), &config, &mut report);

    let live: Vec<_> = report
        .outcomes()
        .iter()
        .filter(|o| o.name.starts_with("Live"))
        .collect();
    let names: Vec<&str> = live.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Live: Register success", "Live: Register duplicate → 409", LIVE_FATAL_NAME]
    );
    assert_eq!(
        live[2].detail.as_deref(),
        Some("Fatal: passwordHash leaked in login response")
    );
    assert_eq!(report.summary().failed, 1);
    assert_eq!(exit_status(report.summary().failed), 1);
}
