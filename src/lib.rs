//! Page-Analyzer: single page structure inspection
//!
//! This crate fetches one web page and reports structural facts about it:
//! HTML version, title, heading counts, internal/external links, how many of
//! those links are unreachable, and whether the page carries a login form.

pub mod analyzer;
pub mod config;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for a page analysis
///
/// Variants that carry an HTTP status are kept apart from those that don't,
/// so callers never have to inspect a sentinel value.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid URL: {0}")]
    InvalidInput(#[from] UrlError),

    #[error("{message}")]
    Fetch { url: String, message: String },

    #[error("HTTP {status}: {message}")]
    HttpStatus {
        url: String,
        status: u16,
        message: String,
    },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl AnalysisError {
    /// Status code of the target's response, if one was obtained
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::InvalidInput(_) | Self::Fetch { .. } | Self::Client(_) => None,
        }
    }

    /// Status a presentation layer should answer with (502 when the target
    /// never produced a response)
    pub fn response_status(&self) -> u16 {
        self.status_code().unwrap_or(502)
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("failed to parse URL: {0}")]
    Parse(#[from] ::url::ParseError),

    #[error("missing host")]
    MissingHost,
}

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use analyzer::{analyze_url, AnalysisResult, Analyzer, HeadingCounts, LinkSummary};
pub use config::Config;
pub use crate::url::normalize_input;
