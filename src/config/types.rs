use serde::Deserialize;
use std::time::Duration;

/// Timeout for fetching the analyzed page (seconds)
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

/// Timeout for each link probe (seconds)
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 8;

/// Redirect hops followed when fetching the analyzed page
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Link probes allowed in flight at once
pub const DEFAULT_MAX_CONCURRENT_PROBES: usize = 10;

/// Main configuration structure for Page-Analyzer
///
/// Every table is optional; a missing table or key falls back to the
/// built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
}

/// Analysis pipeline limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Timeout for the page fetch, including body download
    #[serde(rename = "fetch-timeout-secs")]
    pub fetch_timeout_secs: u64,

    /// Timeout for each HEAD or GET link probe
    #[serde(rename = "probe-timeout-secs")]
    pub probe_timeout_secs: u64,

    /// Maximum redirects followed for the page fetch
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,

    /// Maximum number of link probes in flight
    #[serde(rename = "max-concurrent-probes")]
    pub max_concurrent_probes: usize,
}

impl AnalyzerConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            max_concurrent_probes: DEFAULT_MAX_CONCURRENT_PROBES,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Product name sent in the User-Agent header
    pub name: String,

    /// Product version sent in the User-Agent header
    pub version: String,
}

impl UserAgentConfig {
    /// Formats the header value as `name/version`
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
