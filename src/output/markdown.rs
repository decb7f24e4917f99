//! Markdown report generation
//!
//! This module generates a markdown version of an analysis report, suitable
//! for saving next to other documentation or pasting into an issue.

use crate::analyzer::AnalysisResult;
use crate::AnalysisError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown report of one analysis to `output_path`
///
/// # Arguments
///
/// * `url` - The URL as the user entered it
/// * `outcome` - The analysis result or error
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(std::io::Error)` - Failed to create or write the file
pub fn write_markdown_report(
    url: &str,
    outcome: &Result<AnalysisResult, AnalysisError>,
    output_path: &Path,
) -> std::io::Result<()> {
    let markdown = format_markdown_report(url, outcome);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats one analysis as markdown
pub fn format_markdown_report(url: &str, outcome: &Result<AnalysisResult, AnalysisError>) -> String {
    let mut md = String::new();

    md.push_str("# Page Analysis\n\n");
    md.push_str(&format!("- **URL**: {}\n", url));

    let result = match outcome {
        Ok(result) => result,
        Err(error) => {
            md.push_str(&format!("- **Status**: {}\n", error.response_status()));
            md.push_str(&format!("- **Error**: {}\n", escape_cell(&error.to_string())));
            return md;
        }
    };

    md.push_str(&format!("- **HTML version**: {}\n", result.html_version));
    md.push_str(&format!("- **Title**: {}\n", escape_cell(&result.title)));
    md.push_str(&format!(
        "- **Login form**: {}\n\n",
        if result.has_login_form { "yes" } else { "no" }
    ));

    // Headings table
    md.push_str("## Headings\n\n");
    md.push_str("| Level | Count |\n");
    md.push_str("|-------|-------|\n");
    for (tag, count) in result.headings.iter() {
        md.push_str(&format!("| {} | {} |\n", tag, count));
    }
    md.push('\n');

    // Links table
    md.push_str("## Links\n\n");
    md.push_str("| Kind | Count |\n");
    md.push_str("|------|-------|\n");
    md.push_str(&format!("| Internal | {} |\n", result.links.internal));
    md.push_str(&format!("| External | {} |\n", result.links.external));
    md.push_str(&format!("| Total | {} |\n", result.links.total));
    md.push_str(&format!("| Inaccessible | {} |\n", result.inaccessible));

    md
}

/// Keeps page-provided text from breaking the markdown layout
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
