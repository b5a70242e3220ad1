//! Crawl statistics
//!
//! This module tracks what a crawl run did and formats a short report
//! for the end of the run.

use chrono::{DateTime, Utc};

/// Counters accumulated over one crawl run
#[derive(Debug, Clone)]
pub struct CrawlStats {
    /// Pages fetched and processed successfully
    pub pages_fetched: u64,

    /// Records emitted to the sink
    pub records_emitted: u64,

    /// Retry attempts spent on transient failures
    pub retries: u64,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished, once it has
    pub finished_at: Option<DateTime<Utc>>,
}

impl CrawlStats {
    pub fn new() -> Self {
        Self {
            pages_fetched: 0,
            records_emitted: 0,
            retries: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Records one successfully processed page
    pub fn record_page(&mut self, records: u64, retries: u64) {
        self.pages_fetched += 1;
        self.records_emitted += records;
        self.retries += retries;
    }

    /// Stamps the end of the run
    pub fn mark_finished(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Run duration in seconds, up to now if still running
    pub fn duration_seconds(&self) -> f64 {
        let end = self.finished_at.unwrap_or_else(Utc::now);
        (end - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

impl Default for CrawlStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints a run report to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_stats(stats: &CrawlStats) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Pages fetched: {}", stats.pages_fetched);
    println!("  Records emitted: {}", stats.records_emitted);
    println!("  Retries spent: {}", stats.retries);
    println!();

    let duration = stats.duration_seconds();
    let rate = if duration > 0.0 {
        stats.pages_fetched as f64 / duration
    } else {
        0.0
    };

    println!(
        "Duration: {:.1}s ({:.2} pages/sec)",
        duration, rate
    );
}
