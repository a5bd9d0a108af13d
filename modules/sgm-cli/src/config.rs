use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use gdelt_client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

/// CLI configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub api_timeout: Duration,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = lookup("SGM_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let api_timeout = match lookup("SGM_API_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse()
                    .with_context(|| format!("SGM_API_TIMEOUT_SECS must be a number, got {raw:?}"))?,
            ),
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            api_url,
            api_timeout,
        })
    }

    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        self
    }

    /// Log effective settings. Userinfo in the URL is masked.
    pub fn log_redacted(&self) {
        info!(
            api_url = %redact_url(&self.api_url),
            timeout_secs = self.api_timeout.as_secs(),
            "Loaded config"
        );
    }
}

/// Mask userinfo. Only the authority is searched, so an `@` in the path or
/// query is left alone.
fn redact_url(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    let authority_start = scheme_end + 3;
    let authority_end = url[authority_start..]
        .find(['/', '?', '#'])
        .map_or(url.len(), |i| authority_start + i);

    match url[authority_start..authority_end].rfind('@') {
        Some(at) => format!(
            "{}***{}",
            &url[..authority_start],
            &url[authority_start + at..]
        ),
        None => url.to_string(),
    }
}
