// src/fetcher/html.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// We also use the `url` crate to resolve relative links against the page
// they were found on.
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

// Extracts all crawlable links from HTML content
//
// Parameters:
//   html: the HTML content to parse
//   base: the URL the page was served from (for resolving relative links)
//
// Returns: absolute http/https URLs, in document order, fragments removed.
// Duplicates are kept; the crawl frontier deduplicates.
pub fn extract_html_links(html: &str, base: &Url) -> Vec<Url> {
    let mut links = Vec::new();

    let document = Html::parse_document(html);

    // Constant selector, parsing cannot fail in practice
    let Ok(selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(url) = resolve_link(base, href) {
                links.push(url);
            }
        }
    }

    links
}

// Resolves a link (possibly relative) to an absolute crawlable URL
//
// Examples with base = "https://example.com/page/":
//   "/docs"              -> https://example.com/docs
//   "../other#top"       -> https://example.com/other
//   "https://other.com"  -> https://other.com/
//   "#section"           -> None (same page)
//   "mailto:a@b.c"       -> None (not a page)
fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    // Skip anchors and special protocols
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    // join() handles both absolute and relative hrefs
    let mut url = base.join(href).ok()?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    url.set_fragment(None);
    Some(url)
}
