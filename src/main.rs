// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up the log files (kept alive until run() returns)
// 3. Read the root domain list and open the output file
// 4. Crawl every root domain, one at a time
// 5. Print a summary and exit (0 = run completed, 2 = could not run)
//
// A domain that fails or times out does not change the exit code; those
// show up in the summary and in the logs.
// =============================================================================

mod cli;
mod crawl;
mod error;
mod fetcher;
mod input;
mod logging;
mod orchestrator;
mod output;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use crawl::DomainCrawler;
use fetcher::HttpFetcher;
use orchestrator::CrawlOrchestrator;
use output::OutputSink;

// One thread is enough: domains run in sequence and fetches are I/O bound.
// It also keeps the thread-scoped log subscriber in effect for every task.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Startup failures and an output that cannot be flushed
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let _log_guard = logging::init(&cli.log_dir)?;

    let roots = input::load_root_domains(&cli.input)?;
    let sink = OutputSink::create(&cli.output)
        .with_context(|| format!("failed to create output file {}", cli.output.display()))?;

    let fetcher = HttpFetcher::new(cli.request_timeout()).context("failed to build HTTP client")?;
    let crawler = DomainCrawler::new(fetcher, cli.crawl_config());
    let orchestrator = CrawlOrchestrator::new(crawler, cli.domain_timeout());

    if !cli.json {
        println!("🔍 Crawling {} root domain(s)", roots.len());
        println!("📊 Max crawl depth: {}", cli.max_depth);
    }

    let progress = report::progress_bar(roots.len() as u64);
    let result = orchestrator.run(&roots, sink, &progress).await;
    progress.finish();

    let run_report = result
        .with_context(|| format!("failed to write output file {}", cli.output.display()))?;

    report::print_report(&run_report, cli.json)?;
    if !cli.json {
        println!("\n📄 Discovered URLs written to {}", cli.output.display());
    }

    Ok(0)
}
