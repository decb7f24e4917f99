//! HTTP fetcher implementation
//!
//! This module handles the outbound requests of an analysis:
//! - Building the page and probe HTTP clients with proper user agent strings
//! - The single GET for the analyzed page, with bounded redirects
//! - Error classification into status-carrying and status-less failures

use crate::config::{AnalyzerConfig, UserAgentConfig};
use crate::AnalysisError;
use reqwest::{redirect::Policy, Client, Response, StatusCode};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Bytes of an error response body kept as the error message
pub const MAX_ERROR_BODY_BYTES: usize = 1024;

/// The analyzed page as downloaded
#[derive(Debug)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: Url,
    /// HTTP status code
    pub status_code: u16,
    /// Page body, decoded to text
    pub body: String,
}

/// Returns true for statuses in [200, 400)
pub(crate) fn is_acceptable_status(status: StatusCode) -> bool {
    status.is_success() || status.is_redirection()
}

/// Builds the client used to fetch the analyzed page
///
/// The client applies the fetch timeout to the whole exchange, body
/// included, and refuses to follow more than `max_redirects` hops.
///
/// # Example
///
/// ```no_run
/// use page_analyzer::analyzer::build_http_client;
/// use page_analyzer::config::Config;
///
/// let config = Config::default();
/// let client = build_http_client(&config.analyzer, &config.user_agent).unwrap();
/// ```
pub fn build_http_client(
    analyzer: &AnalyzerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(analyzer.fetch_timeout())
        .redirect(Policy::limited(analyzer.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Builds the client used for link probes
pub fn build_probe_client(
    analyzer: &AnalyzerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(analyzer.probe_timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches the page to analyze
///
/// # Request Flow
///
/// | Condition | Result |
/// |-----------|--------|
/// | Status in [200, 400) | Full body returned |
/// | Status outside [200, 400) | `HttpStatus` with first 1 KiB of body |
/// | Redirect chain over the cap | `Fetch` |
/// | DNS, connect, TLS, timeout | `Fetch` |
/// | Body read failure | `Fetch` |
/// | Token cancelled | `Fetch` |
///
/// Exactly one request is sent (plus followed redirects); nothing is retried.
pub async fn fetch_page(
    client: &Client,
    url: &Url,
    cancel: &CancellationToken,
) -> Result<FetchedPage, AnalysisError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AnalysisError::Fetch {
            url: url.to_string(),
            message: "request cancelled".to_string(),
        }),
        result = send_and_read(client, url) => result,
    }
}

async fn send_and_read(client: &Client, url: &Url) -> Result<FetchedPage, AnalysisError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| fetch_error(url, &e))?;

    let status = response.status();
    let final_url = response.url().clone();
    tracing::debug!("GET {} -> {} ({})", url, status.as_u16(), final_url);

    if !is_acceptable_status(status) {
        let message = read_limited(response, MAX_ERROR_BODY_BYTES).await;
        return Err(AnalysisError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
            message,
        });
    }

    let body = response.text().await.map_err(|e| fetch_error(url, &e))?;

    Ok(FetchedPage {
        final_url,
        status_code: status.as_u16(),
        body,
    })
}

/// Reads at most `limit` bytes of the body as trimmed, lossily-decoded text
///
/// Read errors end the read early; whatever arrived is kept.
async fn read_limited(mut response: Response, limit: usize) -> String {
    let mut buf = Vec::with_capacity(limit);

    while buf.len() < limit {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                let take = (limit - buf.len()).min(chunk.len());
                buf.extend_from_slice(&chunk[..take]);
            }
            Ok(None) | Err(_) => break,
        }
    }

    String::from_utf8_lossy(&buf).trim().to_string()
}

/// Classifies a transport error into a status-less fetch failure
fn fetch_error(url: &Url, e: &reqwest::Error) -> AnalysisError {
    let message = if e.is_redirect() {
        "too many redirects".to_string()
    } else if e.is_timeout() {
        "request timeout".to_string()
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        e.to_string()
    };

    AnalysisError::Fetch {
        url: url.to_string(),
        message,
    }
}
