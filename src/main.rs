// src/main.rs
// =============================================================================
// Entry point.
//
// 1. Parse command-line arguments
// 2. Validate the starting URL (fail fast, before any network activity)
// 3. Run the crawl, printing URLs as they are found
// 4. Exit: 0 when the queue drained (even if some fetches failed),
//          130 when interrupted, 2 on a startup error
// =============================================================================

use anyhow::{Context, Result};
use clap::Parser;
use dirindex_harvest::cli::Cli;
use dirindex_harvest::config::{parse_start_url, CrawlConfig};
use dirindex_harvest::crawl::CrawlEngine;
use dirindex_harvest::fetch::HttpFetcher;
use dirindex_harvest::output::ConsoleReporter;
use std::io;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let config = CrawlConfig::from_cli(&cli)?;
    let root = parse_start_url(&cli.url)?;
    debug!(?config, %root, "starting crawl");

    let fetcher = HttpFetcher::new(&config).context("Failed to create HTTP client")?;
    let reporter = ConsoleReporter::new(cli.quiet, cli.json);
    let mut engine = CrawlEngine::new(&root, &config, fetcher, reporter);

    // Ctrl-C stops the crawl; URLs printed so far are already on stdout
    let cancel = engine.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    match engine.run().await {
        Ok(summary) => {
            info!(
                fetched = summary.fetched,
                failed = summary.failed,
                emitted = summary.emitted,
                cancelled = summary.cancelled,
                "crawl finished"
            );
            Ok(if summary.cancelled { 130 } else { 0 })
        }
        // the reader went away (e.g. piped into `head`)
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(0),
        Err(e) => Err(e).context("Failed to write output"),
    }
}

// Diagnostics for humans go through the reporter; this is for debugging the
// crawler itself. RUST_LOG wins over the flags.
fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}
