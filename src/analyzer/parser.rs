//! HTML parser for extracting page features
//!
//! This module handles parsing HTML content to extract:
//! - The HTML version label (doctype presence)
//! - Page title
//! - Heading counts per level
//! - Whether the page carries a login form

use crate::analyzer::links::{classify_links, ClassifiedLinks};
use crate::analyzer::result::HeadingCounts;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Version label for documents that declare a doctype
pub const HTML5_WITH_DOCTYPE: &str = "HTML5 (with doctype)";

/// Version label for documents without a doctype
pub const UNKNOWN_NO_DOCTYPE: &str = "Unknown (no doctype)";

/// Features extracted from a page's document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFeatures {
    pub html_version: String,
    pub title: String,
    pub headings: HeadingCounts,
    pub has_login_form: bool,
}

/// A parsed document together with the URL it was fetched from
///
/// Relative links on the page resolve against `base_url`, which is the
/// final URL after redirects.
pub struct ParsedPage {
    document: Html,
    base_url: Url,
}

impl ParsedPage {
    /// Parses HTML content fetched from `base_url`
    ///
    /// html5ever recovers from any malformed input, so parsing cannot fail.
    ///
    /// # Example
    ///
    /// ```
    /// use page_analyzer::analyzer::ParsedPage;
    /// use url::Url;
    ///
    /// let html = r#"<!DOCTYPE html><title>Test</title><a href="/page">Link</a>"#;
    /// let base_url = Url::parse("https://example.com/").unwrap();
    /// let page = ParsedPage::parse(html, base_url);
    /// assert_eq!(page.features().title, "Test");
    /// assert_eq!(page.links().internal, 1);
    /// ```
    pub fn parse(html: &str, base_url: Url) -> Self {
        Self {
            document: Html::parse_document(html),
            base_url,
        }
    }

    /// Extracts version, title, headings and the login-form flag
    pub fn features(&self) -> PageFeatures {
        PageFeatures {
            html_version: detect_html_version(&self.document).to_string(),
            title: extract_title(&self.document),
            headings: count_headings(&self.document),
            has_login_form: has_login_form(&self.document),
        }
    }

    /// Classifies the page's anchors as internal or external
    pub fn links(&self) -> ClassifiedLinks {
        classify_links(&self.document, &self.base_url)
    }
}

/// Labels the document by whether a doctype sits among its top-level nodes
///
/// Public and system identifiers are not inspected.
pub fn detect_html_version(document: &Html) -> &'static str {
    let has_doctype = document
        .tree
        .root()
        .children()
        .any(|node| node.value().is_doctype());

    if has_doctype {
        HTML5_WITH_DOCTYPE
    } else {
        UNKNOWN_NO_DOCTYPE
    }
}

/// Extracts the trimmed text of the first `<title>`, or an empty string
pub fn extract_title(document: &Html) -> String {
    let Ok(title_selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Counts `h1`..`h6` elements anywhere in the document
pub fn count_headings(document: &Html) -> HeadingCounts {
    let mut counts = [0usize; 6];

    for (index, tag) in HeadingCounts::TAGS.iter().enumerate() {
        if let Ok(selector) = Selector::parse(tag) {
            counts[index] = document.select(&selector).count();
        }
    }

    HeadingCounts::from_levels(counts)
}

/// Applies the login-form heuristic to every `<form>` in document order
///
/// A form qualifies when it holds a password input, or when it holds both
/// a user field and a submit control. The first qualifying form wins.
/// User fields match `name` exactly (`username`, `email`) but `id` by
/// substring (`user`, `email`).
pub fn has_login_form(document: &Html) -> bool {
    let (Ok(form_selector), Ok(password), Ok(user_field), Ok(submit)) = (
        Selector::parse("form"),
        Selector::parse(r#"input[type="password"]"#),
        Selector::parse(
            r#"input[name="username"], input[name="email"], input[id*="user"], input[id*="email"]"#,
        ),
        Selector::parse(r#"button[type="submit"], input[type="submit"]"#),
    ) else {
        return false;
    };

    document.select(&form_selector).any(|form| {
        contains(form, &password) || (contains(form, &user_field) && contains(form, &submit))
    })
}

fn contains(element: ElementRef<'_>, selector: &Selector) -> bool {
    element.select(selector).next().is_some()
}
