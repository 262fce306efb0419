// src/fetcher/mod.rs
// =============================================================================
// The Fetcher capability: given a URL, retrieve the page and hand back its
// outbound links.
//
// Submodules:
// - http: the real implementation on top of reqwest
// - html: pulls <a href> links out of an HTML document
// - mock: a scripted in-memory fetcher for tests
//
// The crawler only depends on the `Fetcher` trait, so tests can swap the
// network for a link graph held in memory.
// =============================================================================

mod html;
mod http;
#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

pub use html::extract_html_links;
pub use http::HttpFetcher;

/// A page that was fetched successfully
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTTP status code of the response (always 2xx here)
    pub status: u16,
    /// Absolute http(s) links found on the page, fragments removed
    pub links: Vec<Url>,
}

/// Why a single page could not be fetched
///
/// None of these abort a domain crawl; they are reported per page.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Server answered with a non-2xx status (404, 500, ...)
    #[error("HTTP {0}")]
    Status(u16),
    /// Request timed out
    #[error("request timed out")]
    Timeout,
    /// Redirect loop or redirect limit exceeded
    #[error("too many redirects")]
    TooManyRedirects,
    /// DNS failure, refused connection, TLS handshake failure...
    #[error("connection failed: {0}")]
    Connect(String),
    /// Anything else (body decoding, invalid response...)
    #[error("{0}")]
    Other(String),
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch one page and return its outbound links
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError>;
}

// Lets callers share one fetcher between several crawlers.
#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for std::sync::Arc<F> {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        (**self).fetch(url).await
    }
}
