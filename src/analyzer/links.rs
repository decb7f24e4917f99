//! Link classification
//!
//! Walks the anchors of a document, resolves them against the page URL,
//! deduplicates them and tags each one as internal or external.

use crate::analyzer::result::LinkSummary;
use crate::url::{same_host, strip_query_and_fragment};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Prefixes of `href` values that never count as links
const SKIPPED_PREFIXES: &[&str] = &["javascript:", "mailto:", "#"];

/// Deduplicated links of a page with their classification counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedLinks {
    /// Links on the same host as the page
    pub internal: usize,

    /// Links on any other host
    pub external: usize,

    /// Unique links in first-seen order, query and fragment removed
    pub links: Vec<Url>,
}

impl ClassifiedLinks {
    pub fn summary(&self) -> LinkSummary {
        LinkSummary::new(self.internal, self.external)
    }
}

/// Classifies every `<a href>` of the document
///
/// # Link Rules
///
/// **Skip:**
/// - Empty `href` (after trimming)
/// - `javascript:` and `mailto:` links, fragment-only `#` links
/// - `href` values that don't resolve to a URL
/// - Repeats of an already-seen link (compared without query and fragment)
///
/// **Classify:** internal when the host equals `base_url`'s host, ignoring
/// ASCII case; external otherwise.
///
/// # Arguments
///
/// * `document` - The parsed page
/// * `base_url` - The final URL of the page, used to resolve relative links
pub fn classify_links(document: &Html, base_url: &Url) -> ClassifiedLinks {
    let mut classified = ClassifiedLinks::default();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return classified;
    };

    let mut seen = HashSet::new();

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(link) = resolve_link(href, base_url) else {
            continue;
        };

        if !seen.insert(link.as_str().to_string()) {
            continue;
        }

        if same_host(&link, base_url) {
            classified.internal += 1;
        } else {
            classified.external += 1;
        }
        classified.links.push(link);
    }

    tracing::debug!(
        "Classified {} unique links ({} internal, {} external)",
        classified.links.len(),
        classified.internal,
        classified.external
    );

    classified
}

/// Resolves an `href` to its absolute dedup form, or `None` if it is skipped
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || SKIPPED_PREFIXES.iter().any(|p| href.starts_with(p)) {
        return None;
    }

    // Absolute hrefs replace the base entirely
    base_url.join(href).ok().map(strip_query_and_fragment)
}
