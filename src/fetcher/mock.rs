// src/fetcher/mock.rs
// =============================================================================
// A scripted Fetcher for tests.
//
// Each URL gets a script: a list of links, an HTTP status failure, a stall
// that never resolves, or a panic. An optional delay is applied before the
// outcome (use with a paused tokio clock). Unknown URLs answer 404.
// =============================================================================

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use super::{FetchError, FetchedPage, Fetcher};

#[derive(Debug, Clone)]
pub enum Outcome {
    Links(Vec<String>),
    Status(u16),
    Stall,
    Panic,
}

#[derive(Debug, Clone)]
struct Script {
    outcome: Outcome,
    delay: Duration,
}

#[derive(Default)]
pub struct ScriptedFetcher {
    scripts: HashMap<String, Script>,
    calls: Mutex<HashMap<String, usize>>,
}

// Keys go through Url so "http://a.test" and "http://a.test/" match
fn key(url: &str) -> String {
    Url::parse(url)
        .map(String::from)
        .unwrap_or_else(|_| url.to_string())
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, links: &[&str]) -> Self {
        let links = links.iter().map(|l| l.to_string()).collect();
        self.script(url, Outcome::Links(links), Duration::ZERO)
    }

    pub fn status(self, url: &str, code: u16) -> Self {
        self.script(url, Outcome::Status(code), Duration::ZERO)
    }

    pub fn stall(self, url: &str) -> Self {
        self.script(url, Outcome::Stall, Duration::ZERO)
    }

    pub fn panics(self, url: &str) -> Self {
        self.script(url, Outcome::Panic, Duration::ZERO)
    }

    pub fn script(mut self, url: &str, outcome: Outcome, delay: Duration) -> Self {
        self.scripts.insert(key(url), Script { outcome, delay });
        self
    }

    /// How many times `url` was fetched
    pub fn calls(&self, url: &str) -> usize {
        let calls = self.calls.lock().unwrap();
        calls.get(&key(url)).copied().unwrap_or(0)
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_insert(0) += 1;

        let script = self.scripts.get(url.as_str()).cloned();
        let Some(script) = script else {
            return Err(FetchError::Status(404));
        };

        if !script.delay.is_zero() {
            tokio::time::sleep(script.delay).await;
        }

        match script.outcome {
            Outcome::Links(links) => Ok(FetchedPage {
                status: 200,
                links: links.iter().filter_map(|l| Url::parse(l).ok()).collect(),
            }),
            Outcome::Status(code) => Err(FetchError::Status(code)),
            Outcome::Stall => std::future::pending().await,
            Outcome::Panic => panic!("scripted panic for {}", url),
        }
    }
}
