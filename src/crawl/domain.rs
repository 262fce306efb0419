// src/crawl/domain.rs
// =============================================================================
// Crawls a single root domain breadth-first.
//
// How it works:
// 1. Parse the root and seed the frontier with it (depth 0)
// 2. Keep up to `concurrency` fetches in flight, fed from the frontier one
//    depth level at a time: level d+1 starts only once all of level d has
//    finished, so every URL is reached at its shortest depth
// 3. Each finished fetch becomes a CrawlEvent on the events channel:
//    - Page: the URL was fetched; its in-scope links go back into the
//      frontier at depth + 1 (the frontier drops duplicates and anything
//      deeper than max_depth)
//    - Error: the fetch failed; the crawl keeps going
// 4. Stop when nothing is queued and nothing is in flight, or when the
//    cancellation token fires
//
// There is no timeout in here. Deciding when a crawl has hung is the
// watchdog's job; this module only honours the token it is handed.
// =============================================================================

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use url::Url;

use super::queue::{CrawlItem, Frontier};
use super::scope::ScopePolicy;
use crate::error::CrawlError;
use crate::fetcher::{FetchError, FetchedPage, Fetcher};

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Maximum hops from the root (root = 0)
    pub max_depth: usize,
    /// Fetches allowed in flight at once for one domain
    pub concurrency: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            concurrency: 10,
        }
    }
}

/// What happened to one URL during a crawl
#[derive(Debug, Clone, PartialEq)]
pub enum CrawlEvent {
    Page { url: Url, depth: usize },
    Error { url: Url, error: FetchError },
}

/// Totals for one finished crawl
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    pub pages: usize,
    pub errors: usize,
    /// The token was cancelled before the frontier ran dry
    pub cancelled: bool,
}

pub struct DomainCrawler<F> {
    fetcher: F,
    config: CrawlConfig,
}

impl<F: Fetcher> DomainCrawler<F> {
    pub fn new(fetcher: F, config: CrawlConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawls `root`, sending one event per fetched or failed URL
    ///
    /// Only an unusable root is an error. A send on a closed `events`
    /// channel is ignored: the listener has stopped caring about this crawl.
    pub async fn crawl(
        &self,
        root: &str,
        events: &UnboundedSender<CrawlEvent>,
        cancel: &CancellationToken,
    ) -> Result<CrawlSummary, CrawlError> {
        let scope = ScopePolicy::new(root)?;
        let mut frontier = Frontier::new(scope.root_url().clone(), self.config.max_depth);
        let concurrency = self.config.concurrency.max(1);

        let mut in_flight = FuturesUnordered::new();
        let mut summary = CrawlSummary::default();
        let mut level = 0;

        loop {
            if cancel.is_cancelled() {
                summary.cancelled = true;
                break;
            }

            while in_flight.len() < concurrency {
                let Some(item) = frontier.pop_at(level) else { break };
                tracing::debug!(url = %item.url, depth = item.depth, "fetching");
                in_flight.push(self.fetch(item));
            }

            if in_flight.is_empty() {
                match frontier.next_depth() {
                    Some(next) => {
                        tracing::debug!(depth = next, "level done, moving deeper");
                        level = next;
                        continue;
                    }
                    None => break,
                }
            }

            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    summary.cancelled = true;
                    break;
                }
                next = in_flight.next() => next,
            };

            let Some((item, result)) = next else { break };

            match result {
                Ok(page) => {
                    summary.pages += 1;
                    tracing::debug!(url = %item.url, status = page.status, links = page.links.len(), "fetched");
                    let _ = events.send(CrawlEvent::Page {
                        url: item.url.clone(),
                        depth: item.depth,
                    });

                    if item.depth < frontier.max_depth() {
                        for link in page.links {
                            if scope.allows(link.as_str()) {
                                frontier.push(link, item.depth + 1);
                            }
                        }
                    }
                }
                Err(error) => {
                    summary.errors += 1;
                    let _ = events.send(CrawlEvent::Error {
                        url: item.url,
                        error,
                    });
                }
            }
        }

        tracing::debug!(
            pages = summary.pages,
            errors = summary.errors,
            seen = frontier.seen_count(),
            cancelled = summary.cancelled,
            "domain crawl stopped"
        );

        Ok(summary)
    }

    async fn fetch(&self, item: CrawlItem) -> (CrawlItem, Result<FetchedPage, FetchError>) {
        let result = self.fetcher.fetch(&item.url).await;
        (item, result)
    }
}
