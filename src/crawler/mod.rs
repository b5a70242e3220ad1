//! Crawler module for paginated API fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry logic
//! - Page decoding, record projection, and cursor following
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod paginator;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, fetch_page, FetchOutcome, RetryPolicy};
pub use paginator::{
    decode_page, extract_records, next_request, parse_page, FetchRequest, PageError, PageOutput,
    QuoteRecord, UrlTemplate,
};

use crate::config::Config;
use crate::output::{build_sink, CrawlStats};
use crate::ScrollError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the record sink selected by the output configuration
/// 2. Build the HTTP client
/// 3. Walk the page chain from the start page until exhausted
/// 4. Finalize the sink and return the run statistics
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `config_hash` - Hash of the configuration file, recorded by sinks
///   with run bookkeeping
///
/// # Returns
///
/// * `Ok(CrawlStats)` - Crawl completed; what it fetched and emitted
/// * `Err(ScrollError)` - Crawl failed
pub async fn crawl(config: Config, config_hash: &str) -> Result<CrawlStats, ScrollError> {
    let sink = build_sink(&config.output, config_hash)?;
    let mut coordinator = Coordinator::new(config, sink)?;
    coordinator.run().await
}
