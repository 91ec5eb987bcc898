use std::time::Duration;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server origin without a trailing slash (default: `http://localhost:3000`).
    pub base_url: String,
    /// Bearer token identifying the caller and its account.
    pub token: Option<String>,
    /// Per-request timeout (default: 30 seconds).
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                   |
    /// |------------------------|---------------------------|
    /// | `API_BASE_URL`         | `http://localhost:3000`   |
    /// | `API_TOKEN`            | none                      |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                      |
    ///
    /// # Panics
    ///
    /// Panics if `REQUEST_TIMEOUT_SECS` is not a valid u64.
    pub fn from_env() -> Self {
        let base_url = std::env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let token = std::env::var("API_TOKEN").ok().filter(|t| !t.is_empty());

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            token,
            request_timeout: Duration::from_secs(request_timeout_secs),
        }
    }
}
