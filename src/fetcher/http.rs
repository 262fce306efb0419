// src/fetcher/http.rs
// =============================================================================
// The real Fetcher: GET a page over HTTP and extract its links.
//
// Key functionality:
// - One shared reqwest Client (connection pooling, request timeout)
// - Non-2xx responses become FetchError::Status
// - Transport failures are sorted into timeout / redirect / connect / other
// - Only HTML bodies are parsed for links; images, PDFs etc. still count
//   as discovered pages but have no outbound links
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use url::Url;

use super::{extract_html_links, FetchError, FetchedPage, Fetcher};

const USER_AGENT: &str = concat!("scopecrawl/", env!("CARGO_PKG_VERSION"));

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher whose requests give up after `request_timeout`
    pub fn new(request_timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(request_timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        // Relative links resolve against where we ended up after redirects
        let final_url = response.url().clone();

        let links = if is_html(&response) {
            let body = response.text().await.map_err(categorize_error)?;
            extract_html_links(&body, &final_url)
        } else {
            Vec::new()
        };

        Ok(FetchedPage {
            status: status.as_u16(),
            links,
        })
    }
}

// A missing Content-Type is treated as HTML
fn is_html(response: &reqwest::Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.to_ascii_lowercase().contains("text/html"))
        .unwrap_or(true)
}

// Categorizes the different reqwest failures:
// - Network timeout
// - Redirect loops / too many redirects
// - Connection problems (DNS, refused, TLS)
// - Everything else
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_redirect() {
        FetchError::TooManyRedirects
    } else if error.is_connect() {
        FetchError::Connect(error.to_string())
    } else {
        FetchError::Other(error.to_string())
    }
}
