//! Quotes-Scroll main entry point
//!
//! This is the command-line interface for the Quotes-Scroll paginated
//! API crawler.

use clap::Parser;
use quotes_scroll::config::load_config_with_hash;
use quotes_scroll::crawler::crawl;
use quotes_scroll::output::print_stats;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Quotes-Scroll: a paginated JSON API crawler
///
/// Quotes-Scroll walks a page-indexed quotes API, projects each quote
/// to a flat record, and follows the next-page cursor until the API
/// reports no further pages.
#[derive(Parser, Debug)]
#[command(name = "quotes-scroll")]
#[command(version = "1.0.0")]
#[command(about = "A paginated JSON API crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without fetching
    #[arg(long)]
    dry_run: bool,

    /// Override the configured max-pages cap
    #[arg(long, value_name = "N", conflicts_with = "dry_run")]
    max_pages: Option<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = Some(max_pages);
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config, &config_hash).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("quotes_scroll=info,warn"),
            1 => EnvFilter::new("quotes_scroll=debug,info"),
            2 => EnvFilter::new("quotes_scroll=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn handle_dry_run(config: &quotes_scroll::config::Config) {
    println!("=== Quotes-Scroll Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Name: {}", config.crawler.name);
    println!("  API URL template: {}", config.crawler.api_url);
    println!("  Start page: {}", config.crawler.start_page);
    match config.crawler.max_pages {
        Some(cap) => println!("  Max pages: {}", cap),
        None => println!("  Max pages: unlimited (until has_next is false)"),
    }
    println!(
        "  Download delay: {}ms",
        config.crawler.download_delay_ms
    );
    println!(
        "  Retries: {} (every {}ms)",
        config.crawler.max_retries, config.crawler.retry_delay_ms
    );

    println!("\nAllowed Domains ({}):", config.crawler.allowed_domains.len());
    for domain in &config.crawler.allowed_domains {
        println!("  - {}", domain);
    }

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nOutput:");
    println!("  Format: {:?}", config.output.format);
    if !config.output.path.is_empty() {
        println!("  Path: {}", config.output.path);
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would seed the crawl at {}",
        config
            .crawler
            .api_url
            .replacen("{}", &config.crawler.start_page.to_string(), 1)
    );
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: quotes_scroll::config::Config,
    config_hash: &str,
) -> anyhow::Result<()> {
    tracing::info!(
        "Crawling '{}' into {:?} output",
        config.crawler.name,
        config.output.format
    );

    match crawl(config, config_hash).await {
        Ok(stats) => {
            tracing::info!("Crawl completed successfully");
            print_stats(&stats);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
