//! In-memory response source
//!
//! Replies are literal fixtures: nothing is derived from the request
//! besides picking the matching route.

use super::{ApiRequest, ApiResponse, ResponseSource, SourceError};
use crate::envelope::{failure_body, ErrorCode};
use reqwest::Method;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;

struct Route {
    method: Method,
    path: String,
    replies: VecDeque<ApiResponse>,
}

/// Scripted source. Each route serves its replies in registration order and
/// keeps repeating the last one. Requests with no route fall back to the
/// catch-all reply, or to `404 NOT_FOUND`.
#[derive(Default)]
pub struct MockSource {
    routes: RefCell<Vec<Route>>,
    fallback: Option<ApiResponse>,
    received: RefCell<Vec<ApiRequest>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// A source that answers every request with the same fixture
    pub fn reply(status: u16, body: Value) -> Self {
        Self {
            fallback: Some(ApiResponse::new(status, body)),
            ..Self::default()
        }
    }

    /// Queue a reply for `method path`
    pub fn route(self, method: Method, path: &str, status: u16, body: Value) -> Self {
        let reply = ApiResponse::new(status, body);
        {
            let mut routes = self.routes.borrow_mut();
            match routes
                .iter_mut()
                .find(|r| r.method == method && r.path == path)
            {
                Some(route) => route.replies.push_back(reply),
                None => routes.push(Route {
                    method,
                    path: path.to_string(),
                    replies: VecDeque::from([reply]),
                }),
            }
        }
        self
    }

    /// Every request seen so far, oldest first
    pub fn received(&self) -> Vec<ApiRequest> {
        self.received.borrow().clone()
    }

    fn not_found(request: &ApiRequest) -> ApiResponse {
        ApiResponse::new(
            404,
            failure_body(
                ErrorCode::NotFound.as_str(),
                &format!("no mock route for {} {}", request.method, request.path),
                None,
            ),
        )
    }
}

impl ResponseSource for MockSource {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, SourceError> {
        log::debug!("mock {} {}", request.method, request.path);
        self.received.borrow_mut().push(request.clone());

        let mut routes = self.routes.borrow_mut();
        let scripted = routes
            .iter_mut()
            .find(|r| r.method == request.method && r.path == request.path)
            .and_then(|route| {
                if route.replies.len() > 1 {
                    route.replies.pop_front()
                } else {
                    route.replies.front().cloned()
                }
            });

        Ok(scripted
            .or_else(|| self.fallback.clone())
            .unwrap_or_else(|| Self::not_found(request)))
    }

    fn describe(&self) -> String {
        "CONTRACT (mock)".to_string()
    }
}
