//! Configuration module for Page-Analyzer
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Without a file, [`Config::default`] reproduces the
//! built-in limits: 15s page fetch, 8s per link probe, 5 redirects and
//! 10 concurrent probes.
//!
//! # Example
//!
//! ```no_run
//! use page_analyzer::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("analyzer.toml")).unwrap();
//! println!("Fetch timeout: {}s", config.analyzer.fetch_timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    AnalyzerConfig, Config, UserAgentConfig, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MAX_CONCURRENT_PROBES,
    DEFAULT_MAX_REDIRECTS, DEFAULT_PROBE_TIMEOUT_SECS,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::{validate, validate_analyzer_config};
