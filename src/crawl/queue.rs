// src/crawl/queue.rs
// =============================================================================
// The crawl frontier: the queue of pages still to fetch for one root domain.
//
// How it works:
// 1. Start with the root URL at depth 0
// 2. The crawler pops items in FIFO order (breadth-first), one depth level
//    at a time
// 3. Links found on a page are pushed at depth + 1
// 4. A push is refused if the URL was already seen (fetched or queued)
//    or if it would go deeper than max_depth
//
// The frontier has a single owner (the domain crawler loop), so it needs no
// locking even while several fetches are in flight.
//
// Rust concepts:
// - HashSet: To track seen URLs (O(1) lookup)
// - VecDeque: Double-ended queue for breadth-first crawling
// =============================================================================

use std::collections::{HashSet, VecDeque};
use url::Url;

// Represents a page in the crawl queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlItem {
    pub url: Url,
    pub depth: usize, // How many hops from the root URL
}

#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<CrawlItem>,
    seen: HashSet<String>,
    max_depth: usize,
}

impl Frontier {
    /// Creates a frontier holding only `root` at depth 0
    pub fn new(root: Url, max_depth: usize) -> Self {
        let mut frontier = Self {
            queue: VecDeque::new(),
            seen: HashSet::new(),
            max_depth,
        };
        frontier.push(root, 0);
        frontier
    }

    /// Queues `url` at `depth` unless it was already seen or is too deep
    ///
    /// Returns true if the URL was queued.
    pub fn push(&mut self, url: Url, depth: usize) -> bool {
        if depth > self.max_depth {
            return false;
        }

        // insert() returns false when the URL is already in the set
        if !self.seen.insert(dedup_key(&url)) {
            return false;
        }

        self.queue.push_back(CrawlItem { url, depth });
        true
    }

    /// Pops the next item only if it sits at `depth`
    ///
    /// Items are queued level by level, so once this returns None the
    /// level is used up.
    pub fn pop_at(&mut self, depth: usize) -> Option<CrawlItem> {
        match self.queue.front() {
            Some(item) if item.depth == depth => self.queue.pop_front(),
            _ => None,
        }
    }

    /// Depth of the next queued item
    pub fn next_depth(&self) -> Option<usize> {
        self.queue.front().map(|item| item.depth)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Number of distinct URLs ever queued
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}

// /a#x and /a are the same page
fn dedup_key(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    url.into()
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why depth 0 for the root?
//    - Depth counts hops. With max_depth = 3 the crawl reaches pages that are
//      at most three links away from the root.
//
// 2. Why mark URLs as seen when they are queued, not when fetched?
//    - Several pages often link to the same URL. Marking on push keeps the
//      queue free of duplicates, so no URL is ever fetched twice.
//    - That is only safe because a level is fetched completely before the
//      next one starts. Then the first push of a URL is always at its
//      shortest distance from the root, even with fetches finishing out of
//      order.
// -----------------------------------------------------------------------------
