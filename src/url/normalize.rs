use crate::UrlError;
use url::Url;

/// Scheme assumed when the user leaves it out
const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// Normalizes user input into a fetchable absolute URL
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace; reject if nothing is left
/// 2. Prepend `https://` unless the input already starts with `http://` or `https://`
/// 3. Parse the URL; reject if malformed
/// 4. Reject URLs without a host
///
/// # Arguments
///
/// * `raw` - The string as typed by the user
///
/// # Returns
///
/// * `Ok(Url)` - Absolute, host-qualified URL
/// * `Err(UrlError)` - Input was empty, malformed, or hostless
///
/// # Examples
///
/// ```
/// use page_analyzer::url::normalize_input;
///
/// let url = normalize_input("  example.com/about ").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/about");
/// ```
pub fn normalize_input(raw: &str) -> Result<Url, UrlError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(UrlError::Empty);
    }

    let candidate = if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME_PREFIX, raw)
    };

    let url = Url::parse(&candidate)?;

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::MissingHost),
    }
}

/// Reduces a resolved link to its dedup key: query string and fragment removed
///
/// # Examples
///
/// ```
/// use page_analyzer::url::strip_query_and_fragment;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/a?b=1#c").unwrap();
/// assert_eq!(strip_query_and_fragment(url).as_str(), "https://example.com/a");
/// ```
pub fn strip_query_and_fragment(mut url: Url) -> Url {
    url.set_fragment(None);
    url.set_query(None);
    url
}
