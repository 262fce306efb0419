// src/error.rs
// =============================================================================
// Errors that end the processing of a single root domain.
//
// Per-page failures live in `fetcher::FetchError` and never reach this type:
// they are reported as crawl events and the domain crawl keeps going.
// A `CrawlError` is caught by the orchestrator, logged against its root
// domain, and the run moves on to the next one.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// The root domain line could not be parsed as a URL
    #[error("invalid root domain '{root}': {source}")]
    InvalidRoot {
        root: String,
        #[source]
        source: url::ParseError,
    },

    /// The root parsed but has no host to scope against (e.g. `mailto:`)
    #[error("root domain '{0}' has no host")]
    RootWithoutHost(String),

    /// Appending a discovered URL to the output failed
    #[error("failed to write to output: {0}")]
    Output(#[from] std::io::Error),

    /// The crawl panicked; the payload message is kept for the log
    #[error("crawl panicked: {0}")]
    Panicked(String),
}

impl CrawlError {
    /// Builds a `Panicked` error from a `catch_unwind` payload
    pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        CrawlError::Panicked(message)
    }
}
