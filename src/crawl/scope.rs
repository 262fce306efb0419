// src/crawl/scope.rs
// =============================================================================
// Decides whether a discovered URL belongs to the root domain being crawled.
//
// Rule: a candidate is in scope if its host *contains* the root's host as a
// substring, or if the candidate string is exactly the root string.
//
// "Contains" rather than "equals" is deliberate: it lets the crawl follow
// subdomains (blog.example.com under example.com). It also admits hosts that
// merely embed the root host (notexample.com). That looseness is kept as is.
//
// The exact-match arm accepts the root string as given, before any parsing.
// Spellings of the root page that differ from it (a trailing slash, say)
// go through the host comparison like any other link.
// =============================================================================

use url::Url;

use crate::error::CrawlError;

/// Scope test for one root domain, with the root's host parsed once
#[derive(Debug, Clone)]
pub struct ScopePolicy {
    root: String,
    root_url: Url,
    root_host: String,
}

impl ScopePolicy {
    /// Parses the root domain
    ///
    /// Fails when the root is not a URL or has no host; such a root cannot
    /// be crawled at all.
    pub fn new(root: &str) -> Result<Self, CrawlError> {
        let parsed = Url::parse(root).map_err(|source| CrawlError::InvalidRoot {
            root: root.to_string(),
            source,
        })?;

        let root_host = parsed
            .host_str()
            .ok_or_else(|| CrawlError::RootWithoutHost(root.to_string()))?
            .to_string();

        Ok(Self {
            root: root.to_string(),
            root_url: parsed,
            root_host,
        })
    }

    /// The root domain parsed as a URL, where the crawl starts
    pub fn root_url(&self) -> &Url {
        &self.root_url
    }

    /// True if `candidate` may be traversed under this root
    pub fn allows(&self, candidate: &str) -> bool {
        if candidate == self.root {
            return true;
        }

        match Url::parse(candidate) {
            Ok(url) => url
                .host_str()
                .is_some_and(|host| host.contains(self.root_host.as_str())),
            Err(e) => {
                tracing::warn!(candidate, error = %e, "unparsable candidate URL, treating as out of scope");
                false
            }
        }
    }
}

/// One-shot scope test: `host(candidate)` contains `host(root)`, or
/// `candidate == root`. Unparsable input is out of scope, never an error.
pub fn in_scope(candidate: &str, root: &str) -> bool {
    if candidate == root {
        return true;
    }

    match ScopePolicy::new(root) {
        Ok(policy) => policy.allows(candidate),
        Err(e) => {
            tracing::warn!(candidate, root, error = %e, "unparsable root domain, treating as out of scope");
            false
        }
    }
}
