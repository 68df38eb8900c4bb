//! Response sources
//!
//! A flow never knows whether its responses come from literal fixtures
//! ([`MockSource`]) or from a running server ([`LiveSource`]).

pub mod live;
pub mod mock;

use reqwest::Method;
use serde_json::Value;

pub use live::LiveSource;
pub use mock::MockSource;

/// Errors raised while obtaining a response
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request {method} {url} failed: {source}")]
    Http {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed JSON body (status {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

/// One logical API call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Route without the API prefix, e.g. `/auth/me`
    pub path: String,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            body: None,
            bearer: None,
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }

    /// Attach a token only when one is given
    pub fn maybe_bearer(self, token: Option<&str>) -> Self {
        match token {
            Some(t) => self.bearer(t),
            None => self,
        }
    }
}

/// Status code plus parsed JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Parse a raw body. An empty body is `null`.
    pub fn from_text(status: u16, text: &str) -> Result<Self, SourceError> {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).map_err(|source| SourceError::Decode { status, source })?
        };
        Ok(Self::new(status, body))
    }

    pub fn json(&self) -> &Value {
        &self.body
    }

    pub fn text(&self) -> String {
        self.body.to_string()
    }
}

/// Anything that can answer an [`ApiRequest`]
pub trait ResponseSource {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, SourceError>;

    /// Short label for logs and banners
    fn describe(&self) -> String;
}

/// Synthetic bearer token for mock mode
pub fn make_token(user_id: &str) -> String {
    format!("mock-jwt-token-{}", user_id)
}
