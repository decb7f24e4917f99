//! Analysis coordinator - sequences one page analysis
//!
//! The pipeline is linear:
//! normalize → fetch → parse/extract → classify links → check reachability.
//! The first failing stage ends the analysis with its error; no partial
//! result is ever returned.

use crate::analyzer::checker::LinkChecker;
use crate::analyzer::fetcher::{build_http_client, build_probe_client, fetch_page};
use crate::analyzer::parser::ParsedPage;
use crate::analyzer::result::AnalysisResult;
use crate::config::{AnalyzerConfig, Config};
use crate::url::normalize_input;
use crate::AnalysisError;
use reqwest::Client;
use tokio_util::sync::CancellationToken;

/// Runs page analyses with shared HTTP clients
///
/// An `Analyzer` is cheap to share: both clients pool connections
/// internally, and `analyze` takes `&self`.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
    client: Client,
    checker: LinkChecker,
}

impl Analyzer {
    /// Creates an analyzer from a validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Analyzer)` - Clients built successfully
    /// * `Err(AnalysisError)` - The HTTP client could not be initialized
    pub fn new(config: &Config) -> Result<Self, AnalysisError> {
        let client = build_http_client(&config.analyzer, &config.user_agent)?;
        let probe_client = build_probe_client(&config.analyzer, &config.user_agent)?;
        let checker = LinkChecker::new(probe_client, config.analyzer.max_concurrent_probes);

        Ok(Self {
            config: config.analyzer.clone(),
            client,
            checker,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyzes the page named by `raw`
    ///
    /// `raw` is user input: surrounding whitespace is ignored and a missing
    /// scheme defaults to `https://`. Cancelling `cancel` stops the fetch
    /// and every link probe; a cancelled analysis fails with a status-less
    /// fetch error.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use page_analyzer::{Analyzer, Config};
    /// use tokio_util::sync::CancellationToken;
    ///
    /// # async fn example() -> page_analyzer::Result<()> {
    /// let analyzer = Analyzer::new(&Config::default())?;
    /// let result = analyzer.analyze("example.com", &CancellationToken::new()).await?;
    /// println!("{} links, {} broken", result.links.total, result.inaccessible);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn analyze(
        &self,
        raw: &str,
        cancel: &CancellationToken,
    ) -> Result<AnalysisResult, AnalysisError> {
        let url = normalize_input(raw)?;
        tracing::info!("Analyzing {}", url);

        let page = fetch_page(&self.client, &url, cancel).await?;
        tracing::debug!(
            "Fetched {} ({} bytes, status {})",
            page.final_url,
            page.body.len(),
            page.status_code
        );

        // The parsed tree is not Send; keep it out of the await below
        let (features, classified) = {
            let parsed = ParsedPage::parse(&page.body, page.final_url.clone());
            (parsed.features(), parsed.links())
        };

        let inaccessible = self
            .checker
            .count_inaccessible(&classified.links, cancel)
            .await;

        if cancel.is_cancelled() {
            return Err(AnalysisError::Fetch {
                url: url.to_string(),
                message: "analysis cancelled".to_string(),
            });
        }

        let result = AnalysisResult {
            html_version: features.html_version,
            title: features.title,
            headings: features.headings,
            links: classified.summary(),
            has_login_form: features.has_login_form,
            inaccessible,
        };

        tracing::info!(
            "Analyzed {}: {} links ({} internal, {} external), {} inaccessible",
            url,
            result.links.total,
            result.links.internal,
            result.links.external,
            result.inaccessible
        );

        Ok(result)
    }
}

/// Analyzes a page with the default configuration
///
/// Builds fresh clients on every call; reuse an [`Analyzer`] when
/// analyzing many pages.
pub async fn analyze_url(
    raw: &str,
    cancel: &CancellationToken,
) -> Result<AnalysisResult, AnalysisError> {
    Analyzer::new(&Config::default())?.analyze(raw, cancel).await
}
