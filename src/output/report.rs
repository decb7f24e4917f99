//! Plain-text analysis reports
//!
//! Renders an analysis outcome the way a presentation layer would show it:
//! the extracted facts on success, or the mapped status and message on
//! failure.

use crate::analyzer::AnalysisResult;
use crate::AnalysisError;
use std::fmt::Write;

/// Formats the outcome of one analysis for the terminal
///
/// # Arguments
///
/// * `url` - The URL as the user entered it
/// * `outcome` - The analysis result or error
///
/// # Returns
///
/// A multi-line report ending with a newline
pub fn format_report(url: &str, outcome: &Result<AnalysisResult, AnalysisError>) -> String {
    match outcome {
        Ok(result) => format_result(url, result),
        Err(error) => format_error(url, error),
    }
}

/// Formats a successful analysis
pub fn format_result(url: &str, result: &AnalysisResult) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "=== Page Analysis ===\n");
    let _ = writeln!(out, "URL: {}", url);
    let _ = writeln!(out, "HTML version: {}", result.html_version);
    let _ = writeln!(out, "Title: {}", display_title(&result.title));
    let _ = writeln!(out);

    let _ = writeln!(out, "Headings:");
    for (tag, count) in result.headings.iter() {
        let _ = writeln!(out, "  {}: {}", tag, count);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Links:");
    let _ = writeln!(out, "  Internal: {}", result.links.internal);
    let _ = writeln!(out, "  External: {}", result.links.external);
    let _ = writeln!(out, "  Total: {}", result.links.total);
    let _ = writeln!(out, "  Inaccessible: {}", result.inaccessible);
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "Login form: {}",
        if result.has_login_form { "yes" } else { "no" }
    );

    out
}

/// Formats a failed analysis with the status a web front end would answer with
pub fn format_error(url: &str, error: &AnalysisError) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Page Analysis ===\n");
    let _ = writeln!(out, "URL: {}", url);
    let _ = writeln!(out, "Error (HTTP {}): {}", error.response_status(), error);

    out
}

fn display_title(title: &str) -> &str {
    if title.is_empty() {
        "(none)"
    } else {
        title
    }
}
