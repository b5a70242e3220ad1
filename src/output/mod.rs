//! Output module for record sinks and run statistics
//!
//! This module handles:
//! - The `RecordSink` trait the crawler emits through
//! - JSON-lines, SQLite, and stdout sink implementations
//! - Run statistics and the end-of-run report

mod json_lines;
mod sqlite_sink;
pub mod stats;
mod traits;

pub use json_lines::{JsonLinesSink, StdoutSink};
pub use sqlite_sink::SqliteSink;
pub use stats::{print_stats, CrawlStats};
pub use traits::{RecordSink, SinkError, SinkResult};

use crate::config::{OutputConfig, OutputFormat};
use std::path::Path;

/// Builds the record sink selected by the output configuration
///
/// # Arguments
///
/// * `config` - The output section of the crawler configuration
/// * `config_hash` - Hash of the configuration file, recorded by sinks
///   that keep run bookkeeping
///
/// # Returns
///
/// * `Ok(Box<dyn RecordSink>)` - The ready sink
/// * `Err(SinkError)` - Failed to create the destination
pub fn build_sink(config: &OutputConfig, config_hash: &str) -> SinkResult<Box<dyn RecordSink>> {
    match config.format {
        OutputFormat::Jsonl => Ok(Box::new(JsonLinesSink::create(Path::new(&config.path))?)),
        OutputFormat::Sqlite => Ok(Box::new(SqliteSink::create(
            Path::new(&config.path),
            config_hash,
        )?)),
        OutputFormat::Stdout => Ok(Box::new(StdoutSink::new())),
    }
}
