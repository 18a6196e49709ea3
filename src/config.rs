//! Pipeline configuration with sensible defaults.
//!
//! Everything random or environment-dependent (the delay range, the
//! User-Agent pool, the endpoint) lives here so tests can pin it down.

use crate::error::SearchError;
use crate::http::DEFAULT_USER_AGENTS;
use std::time::Duration;
use url::Url;

/// Origin of the search engine queried by default.
pub const DEFAULT_BASE_URL: &str = "https://www.google.com";

/// Configuration for a [`SearchPipeline`](crate::pipeline::SearchPipeline).
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Engine origin. Requests go to `{base_url}/search`, and site-relative
    /// links in the results are resolved against it.
    pub base_url: String,
    /// Maximum number of records returned per search.
    pub max_results: usize,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// Random delay range in milliseconds `(min, max)` applied before every
    /// search except the first one made by a pipeline.
    pub request_delay_ms: (u64, u64),
    /// User-Agent strings; one is picked at random for each request.
    pub user_agents: Vec<String>,
    /// The fallback extractor runs when the primary one finds fewer records
    /// than this.
    pub fallback_threshold: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_results: 10,
            timeout_seconds: 10,
            request_delay_ms: (2000, 5000),
            user_agents: DEFAULT_USER_AGENTS.iter().map(|ua| ua.to_string()).collect(),
            fallback_threshold: 5,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration.
    ///
    /// Checks:
    /// - `base_url` must parse as an absolute http(s) URL
    /// - `max_results`, `timeout_seconds` and `fallback_threshold` must be > 0
    /// - `request_delay_ms.0` must be <= `request_delay_ms.1`
    /// - `user_agents` must not be empty
    pub fn validate(&self) -> Result<(), SearchError> {
        self.base()?;
        if self.max_results == 0 {
            return Err(SearchError::Config(
                "max_results must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.fallback_threshold == 0 {
            return Err(SearchError::Config(
                "fallback_threshold must be greater than 0".into(),
            ));
        }
        if self.request_delay_ms.0 > self.request_delay_ms.1 {
            return Err(SearchError::Config(
                "request_delay_ms min must be <= max".into(),
            ));
        }
        if self.user_agents.is_empty() {
            return Err(SearchError::Config(
                "at least one user agent must be configured".into(),
            ));
        }
        Ok(())
    }

    /// The parsed engine origin.
    pub fn base(&self) -> Result<Url, SearchError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| SearchError::Config(format!("invalid base_url {:?}: {e}", self.base_url)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(SearchError::Config(format!(
                "base_url must use http or https, got {other}"
            ))),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
