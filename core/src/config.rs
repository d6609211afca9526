//! Client configuration: backend origin and the fixed header set.
//!
//! Built once and shared by reference with every request builder; nothing in
//! it changes after construction.

use crate::error::ApiError;

/// Environment variable holding the backend origin.
pub const BACKEND_URL_VAR: &str = "BACKEND_URL";

/// Header that tells an ngrok tunnel to skip its browser interstitial page.
pub const NGROK_SKIP_BROWSER_WARNING: (&str, &str) = ("ngrok-skip-browser-warning", "true");

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Sent on every request, before any per-operation headers.
    pub headers: Vec<(String, String)>,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            headers: vec![(
                NGROK_SKIP_BROWSER_WARNING.0.to_string(),
                NGROK_SKIP_BROWSER_WARNING.1.to_string(),
            )],
        }
    }

    /// Read `BACKEND_URL`, loading a `.env` file first when one exists.
    pub fn from_env() -> Result<Self, ApiError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve `BACKEND_URL` through `lookup` instead of the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let url = lookup(BACKEND_URL_VAR)
            .ok_or_else(|| ApiError::Config(format!("{BACKEND_URL_VAR} is not set")))?;
        Self::parse(&url)
    }

    /// Validate a backend origin supplied as text.
    pub fn parse(url: &str) -> Result<Self, ApiError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ApiError::Config(format!("{BACKEND_URL_VAR} is empty")));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ApiError::Config(format!(
                "backend URL must start with http:// or https://, got {url}"
            )));
        }
        Ok(Self::new(url))
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}
