use std::time::Duration;

/// Route prefix prepended to every logical API path
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

/// Default request timeout for live mode (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Live server base URL. `None` selects mock-only contract mode.
    pub base_url: Option<String>,

    /// Prefix joined between base URL and route
    pub api_prefix: String,

    /// Per-request timeout of the live HTTP client
    pub timeout: Duration,
}

impl Config {
    /// Build from raw settings. Blank base URLs count as absent and
    /// trailing slashes are stripped.
    pub fn new(base_url: Option<&str>, api_prefix: &str, timeout_secs: u64) -> Self {
        let base_url = base_url
            .map(|u| u.trim().trim_end_matches('/'))
            .filter(|u| !u.is_empty())
            .map(str::to_string);

        Self {
            base_url,
            api_prefix: normalize_prefix(api_prefix),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
