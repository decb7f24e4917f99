//! Output module for rendering analysis reports
//!
//! This module handles:
//! - Plain-text reports for the terminal
//! - Markdown reports written to a file

mod markdown;
pub mod report;

pub use markdown::{format_markdown_report, write_markdown_report};
pub use report::{format_error, format_report, format_result};
