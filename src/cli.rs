// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// All configuration comes from here: where the root domains are read from,
// where discovered URLs go, where logs go, and how each crawl is bounded.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::crawl::CrawlConfig;

#[derive(Parser, Debug)]
#[command(
    name = "scopecrawl",
    version,
    about = "Discovers every reachable page under a list of root domains",
    long_about = "scopecrawl crawls each root domain in turn, staying on that domain's hosts, \
                  and writes every page it finds to an output file, one URL per line. \
                  A domain that goes quiet for too long is abandoned and the run moves on."
)]
pub struct Cli {
    /// File with one root domain URL per line
    #[arg(default_value = "rootdomains.txt")]
    pub input: PathBuf,

    /// File that receives the discovered URLs (truncated on start)
    #[arg(long, short, default_value = "targetlist.txt")]
    pub output: PathBuf,

    /// Directory for info.log and error.log
    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,

    /// Maximum number of link hops from a root domain
    ///
    /// 0 = only the root page
    /// 1 = root page + pages it links to
    /// etc.
    #[arg(long, default_value_t = 3)]
    pub max_depth: usize,

    /// Seconds without any crawl activity before a domain is abandoned
    ///
    /// Every discovered page and every failed page restarts this window,
    /// so it does not cap the total time spent on a domain.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Pages fetched at once within one domain
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub concurrency: u64,

    /// Seconds before a single HTTP request gives up
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub request_timeout_secs: u64,

    /// Print the end-of-run summary as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig {
            max_depth: self.max_depth,
            concurrency: self.concurrency as usize,
        }
    }

    pub fn domain_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
