//! HTTP response source backed by a blocking reqwest client

use super::{ApiRequest, ApiResponse, ResponseSource, SourceError};
use reqwest::blocking::Client;
use std::time::Duration;

/// Sends each [`ApiRequest`] to `base_url + api_prefix + path`
pub struct LiveSource {
    client: Client,
    base_url: String,
    api_prefix: String,
}

impl LiveSource {
    pub fn new(base_url: &str, api_prefix: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SourceError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_prefix: api_prefix.to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.api_prefix, path)
    }
}

impl ResponseSource for LiveSource {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, SourceError> {
        let url = self.url(&request.path);
        log::debug!("{} {}", request.method, url);

        let mut builder = self.client.request(request.method.clone(), &url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let http_error = |source| SourceError::Http {
            method: request.method.clone(),
            url: url.clone(),
            source,
        };
        let response = builder.send().map_err(http_error)?;
        let status = response.status().as_u16();
        let text = response.text().map_err(http_error)?;
        log::debug!("{} {} -> {} {}", request.method, url, status, text);

        ApiResponse::from_text(status, &text)
    }

    fn describe(&self) -> String {
        format!("LIVE (BASE_URL={})", self.base_url)
    }
}
