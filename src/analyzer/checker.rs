//! Link reachability checking
//!
//! Probes every unique link of a page with bounded concurrency and reports
//! how many of them could not be reached.

use crate::analyzer::fetcher::is_acceptable_status;
use reqwest::Client;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Probes links and counts the inaccessible ones
///
/// The checker coordinates:
/// - A global concurrency limit (probes in flight)
/// - The HEAD-then-GET probe of each link
/// - Cancellation of every in-flight probe through a shared token
#[derive(Debug, Clone)]
pub struct LinkChecker {
    /// Client with the per-probe timeout applied
    client: Client,

    /// Maximum number of probes in flight
    max_concurrent: usize,
}

impl LinkChecker {
    /// Creates a new checker
    ///
    /// A `max_concurrent` of zero is raised to one.
    pub fn new(client: Client, max_concurrent: usize) -> Self {
        Self {
            client,
            max_concurrent: max_concurrent.max(1),
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Counts links whose HEAD and fallback GET probes both fail
    ///
    /// One task is spawned per link; a semaphore keeps at most
    /// `max_concurrent` of them probing at once. Probes interrupted by
    /// `cancel` are counted neither as reachable nor as inaccessible.
    /// Dropping the returned future aborts all spawned probes.
    pub async fn count_inaccessible(&self, links: &[Url], cancel: &CancellationToken) -> usize {
        if links.is_empty() {
            return 0;
        }

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let inaccessible = Arc::new(AtomicUsize::new(0));
        let mut tasks = JoinSet::new();

        for link in links {
            let client = self.client.clone();
            let semaphore = Arc::clone(&semaphore);
            let inaccessible = Arc::clone(&inaccessible);
            let cancel = cancel.clone();
            let link = link.clone();

            tasks.spawn(async move {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {}
                    reachable = probe_with_permit(&client, &link, &semaphore) => {
                        if !reachable {
                            inaccessible.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                }
            });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::warn!("Link probe task failed: {}", e);
            }
        }

        let count = inaccessible.load(Ordering::Relaxed);
        tracing::debug!("{} of {} links inaccessible", count, links.len());
        count
    }
}

async fn probe_with_permit(client: &Client, link: &Url, semaphore: &Semaphore) -> bool {
    // The semaphore is never closed
    let Ok(_permit) = semaphore.acquire().await else {
        return false;
    };
    is_accessible(client, link).await
}

/// Probes a link with HEAD, falling back to GET
///
/// The GET fallback covers servers that reject or mishandle HEAD. A link is
/// accessible if either probe answers with a status in [200, 400).
pub async fn is_accessible(client: &Client, link: &Url) -> bool {
    if let Ok(response) = client.head(link.clone()).send().await {
        if is_acceptable_status(response.status()) {
            return true;
        }
    }

    match client.get(link.clone()).send().await {
        Ok(response) => is_acceptable_status(response.status()),
        Err(_) => false,
    }
}
