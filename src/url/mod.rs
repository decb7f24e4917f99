//! URL handling module for Page-Analyzer
//!
//! This module turns user input into a fetchable URL and provides the
//! host comparison and dedup-key helpers used by link classification.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::same_host;
pub use normalize::{normalize_input, strip_query_and_fragment};
