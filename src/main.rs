//! Octolink main entry point
//!
//! Command-line interface for the same-host web crawler.

use clap::Parser;
use octolink::crawler::crawl;
use octolink::output::print_url_table;
use octolink::storage::UrlStore;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Default location of the URL store, in the working directory
const DATABASE_PATH: &str = "octo_find.db";

/// Octolink: a same-host web crawler
///
/// Recursively discovers every resource reachable from the seed URL while
/// staying on its hostname, and records each discovery in a local SQLite
/// store, deduplicated across runs.
#[derive(Parser, Debug)]
#[command(name = "octolink")]
#[command(version = "1.0.0")]
#[command(about = "A same-host web crawler", long_about = None)]
struct Cli {
    /// Root target URL (https:// is assumed when no scheme is given)
    #[arg(short, long, default_value = "http://127.0.0.1")]
    url: String,

    /// Depth of web scraping, between 0 and 3
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(0..=3))]
    depth: u32,

    /// Log skip reasons and additions
    #[arg(short, long)]
    verbose: bool,

    /// Only display the database, without crawling
    #[arg(short, long)]
    show: bool,

    /// Reset the database before proceeding
    #[arg(short, long)]
    reset: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let store = UrlStore::open(Path::new(DATABASE_PATH), cli.reset)?;

    if cli.show {
        print_url_table(&store.list_all()?);
        return Ok(());
    }

    let seed = normalize_seed(&cli.url);
    let previous = store.count()?;

    let stats = crawl(&store, &seed, cli.depth).await?;

    let records = store.list_all()?;
    tracing::info!(
        "{} new URLs found / {} total URLs found.",
        records.len() as u64 - previous,
        records.len()
    );
    tracing::debug!(
        "{} candidates dispatched, {} added this run",
        stats.discovered,
        stats.added
    );

    print_url_table(&records);
    Ok(())
}

/// Sets up the tracing subscriber
///
/// Skip reasons and additions log at info level, which is only visible in
/// verbose mode.
fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("octolink=info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Prefixes the encrypted scheme when the seed URL carries none
fn normalize_seed(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}
