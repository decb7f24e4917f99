//! Analyzer module for single page inspection
//!
//! This module contains the core analysis logic, including:
//! - HTTP fetching with timeout and bounded redirects
//! - HTML parsing and feature extraction
//! - Link classification and deduplication
//! - Bounded-concurrency link reachability checks
//! - Overall analysis coordination

mod checker;
mod coordinator;
mod fetcher;
mod links;
mod parser;
mod result;

pub use checker::{is_accessible, LinkChecker};
pub use coordinator::{analyze_url, Analyzer};
pub use fetcher::{
    build_http_client, build_probe_client, fetch_page, FetchedPage, MAX_ERROR_BODY_BYTES,
};
pub use links::{classify_links, ClassifiedLinks};
pub use parser::{
    count_headings, detect_html_version, extract_title, has_login_form, PageFeatures, ParsedPage,
    HTML5_WITH_DOCTYPE, UNKNOWN_NO_DOCTYPE,
};
pub use result::{AnalysisResult, HeadingCounts, LinkSummary};
