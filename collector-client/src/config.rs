//! Configuration types for the collector client.

use std::time::Duration;

/// Default request timeout for collector calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the collector HTTP client.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Base URL of the collector service, always ending with `/`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl CollectorConfig {
    /// Create a config for the given base URL.
    ///
    /// The URL is normalized to end with a trailing slash so endpoint paths
    /// can be appended directly.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a config with a custom request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::new(base_url)
        }
    }
}
