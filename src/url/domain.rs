use url::Url;

/// Returns true if both URLs name the same host, ignoring ASCII case
///
/// Ports and schemes are not compared. A URL without a host never matches.
pub fn same_host(a: &Url, b: &Url) -> bool {
    match (a.host_str(), b.host_str()) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}
