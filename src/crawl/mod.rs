// src/crawl/mod.rs
// =============================================================================
// This module handles crawling one root domain.
//
// Features:
// - Breadth-first crawling starting from the root URL
// - Host-substring scope rule (subdomains are followed)
// - Configurable depth limit
// - Concurrent fetches inside a domain, with deduplication
// - An inactivity watchdog that declares a crawl hung
// =============================================================================

mod domain;
mod queue;
mod scope;
mod watchdog;

pub use domain::{CrawlConfig, CrawlEvent, CrawlSummary, DomainCrawler};
pub use scope::in_scope;
pub use watchdog::Watchdog;
