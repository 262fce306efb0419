// src/orchestrator.rs
// =============================================================================
// Runs the domain crawls one after another.
//
// For each root domain:
// 1. Arm a fresh watchdog with the per-domain inactivity window
// 2. Start the domain crawl and listen to its events:
//    - every event resets the watchdog
//    - pages are appended to the output, errors are logged
// 3. Whichever comes first wins: the crawl finishing or the watchdog firing
// 4. Anything that goes wrong stays with that domain; the run moves on
// 5. Tick the progress bar
//
// When every domain has been attempted the output is flushed and closed.
// =============================================================================

use std::io::Write;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use indicatif::ProgressBar;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{error, info, info_span, Instrument};

use crate::crawl::{in_scope, CrawlEvent, CrawlSummary, DomainCrawler, Watchdog};
use crate::error::CrawlError;
use crate::fetcher::Fetcher;
use crate::output::OutputSink;

/// How the processing of one root domain ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DomainStatus {
    /// The frontier was exhausted
    Completed,
    /// The watchdog saw no activity for a full window
    TimedOut,
    /// The domain could not be processed at all
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct DomainReport {
    pub root: String,
    #[serde(flatten)]
    pub status: DomainStatus,
    /// Lines written to the output for this domain
    pub pages: usize,
    /// Pages that failed to fetch
    pub errors: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub domains: Vec<DomainReport>,
}

impl RunReport {
    pub fn total_pages(&self) -> usize {
        self.domains.iter().map(|d| d.pages).sum()
    }

    pub fn count(&self, matches: impl Fn(&DomainStatus) -> bool) -> usize {
        self.domains.iter().filter(|d| matches(&d.status)).count()
    }
}

// How the race between crawl and watchdog settled
enum Settled {
    Finished(CrawlSummary),
    TimedOut,
    Failed(CrawlError),
}

// State of one root domain while it is being crawled
struct CrawlJob<'a, W: Write> {
    root: &'a str,
    watchdog: Watchdog,
    sink: &'a mut OutputSink<W>,
    pages: usize,
    errors: usize,
}

impl<'a, W: Write> CrawlJob<'a, W> {
    fn record(&mut self, event: CrawlEvent) -> Result<(), CrawlError> {
        self.watchdog.reset();

        match event {
            CrawlEvent::Page { url, depth } => {
                debug_assert!(in_scope(url.as_str(), self.root));
                tracing::debug!(url = %url, depth, "page discovered");
                self.sink.append(url.as_str())?;
                self.pages += 1;
            }
            CrawlEvent::Error { url, error } => {
                self.errors += 1;
                error!(url = %url, "[ERROR][{}] {}", self.root, error);
            }
        }

        Ok(())
    }

    fn into_report(self, status: DomainStatus) -> DomainReport {
        DomainReport {
            root: self.root.to_string(),
            status,
            pages: self.pages,
            errors: self.errors,
        }
    }
}

pub struct CrawlOrchestrator<F> {
    crawler: DomainCrawler<F>,
    domain_timeout: Duration,
}

impl<F: Fetcher> CrawlOrchestrator<F> {
    /// `domain_timeout` is the inactivity window, not a cap on total time
    pub fn new(crawler: DomainCrawler<F>, domain_timeout: Duration) -> Self {
        Self {
            crawler,
            domain_timeout,
        }
    }

    /// Crawls every root in order, then closes `sink`
    ///
    /// Per-domain failures end up in the report. Only failing to flush the
    /// output is returned as an error.
    pub async fn run<W: Write>(
        &self,
        roots: &[String],
        mut sink: OutputSink<W>,
        progress: &ProgressBar,
    ) -> std::io::Result<RunReport> {
        let mut report = RunReport::default();

        info!(
            domains = roots.len(),
            max_depth = self.crawler.config().max_depth,
            timeout_secs = self.domain_timeout.as_secs(),
            "starting run"
        );

        for root in roots {
            let span = info_span!("domain", root = %root);
            let domain = self.process_domain(root, &mut sink).instrument(span).await;
            report.domains.push(domain);
            progress.inc(1);
        }

        info!(lines = sink.lines(), "closing output");
        sink.close()?;

        Ok(report)
    }

    async fn process_domain<W: Write>(&self, root: &str, sink: &mut OutputSink<W>) -> DomainReport {
        info!("Processing {}", root);

        let timeout = self.domain_timeout;
        let fire_root = root.to_string();
        let watchdog = Watchdog::arm(timeout, move || {
            error!(timeout_secs = timeout.as_secs(), "[ERROR][{}] timeout", fire_root);
        });
        let timed_out = watchdog.token();

        let mut job = CrawlJob {
            root,
            watchdog,
            sink,
            pages: 0,
            errors: 0,
        };

        let (tx, mut rx) = mpsc::unbounded_channel();

        let settled = {
            let crawl = AssertUnwindSafe(self.crawler.crawl(root, &tx, &timed_out)).catch_unwind();
            tokio::pin!(crawl);

            loop {
                tokio::select! {
                    biased;
                    Some(event) = rx.recv() => {
                        if let Err(e) = job.record(event) {
                            break Settled::Failed(e);
                        }
                    }
                    _ = timed_out.cancelled() => break Settled::TimedOut,
                    result = &mut crawl => {
                        // Events sent right before the crawl returned (or panicked)
                        let drained = drain(&mut job, &mut rx);
                        break match (result, drained) {
                            (Err(panic), _) => Settled::Failed(CrawlError::from_panic(panic)),
                            (Ok(Err(e)), _) | (Ok(Ok(_)), Err(e)) => Settled::Failed(e),
                            (Ok(Ok(summary)), Ok(())) => Settled::Finished(summary),
                        };
                    }
                }
            }
        };

        // Settled through any path: no timer may outlive the job
        job.watchdog.disarm();

        match settled {
            Settled::Finished(summary) if summary.cancelled => job.into_report(DomainStatus::TimedOut),
            Settled::Finished(_) => {
                info!(pages = job.pages, "Found {} pages for domain: {}", job.pages, root);
                job.into_report(DomainStatus::Completed)
            }
            Settled::TimedOut => job.into_report(DomainStatus::TimedOut),
            Settled::Failed(e) => {
                error!("[!ERROR][{}] {}", root, e);
                job.into_report(DomainStatus::Failed {
                    reason: e.to_string(),
                })
            }
        }
    }
}

fn drain<W: Write>(
    job: &mut CrawlJob<'_, W>,
    rx: &mut mpsc::UnboundedReceiver<CrawlEvent>,
) -> Result<(), CrawlError> {
    while let Ok(event) = rx.try_recv() {
        job.record(event)?;
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. What does tokio::select! do here?
//    - It polls three things at once: new crawl events, the watchdog token
//      and the crawl itself, and runs the branch of whichever is ready
//    - `biased;` makes it check them top to bottom, so queued events are
//      always recorded before the crawl is polled again
//
// 2. What happens to the crawl when the watchdog wins?
//    - The crawl future is dropped when the block ends
//    - Dropping it drops every fetch still in flight, so nothing from that
//      domain can reach the output afterwards
//
// 3. Why catch_unwind?
//    - A panic inside one domain's crawl would otherwise take the whole run
//      down. Caught, it becomes a failed domain like any other.
// -----------------------------------------------------------------------------
