//! Record sink trait and types
//!
//! This module defines the trait interface the crawler emits records
//! through, keeping the pagination loop independent of where records
//! end up (file, database, stdout).

use crate::crawler::QuoteRecord;
use thiserror::Error;

/// Errors that can occur while emitting records
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// A consumer of projected quote records
///
/// Implementations must preserve the order of records within a call and
/// across consecutive calls; the crawler relies on this to keep output
/// in page order.
pub trait RecordSink: Send {
    /// Writes a batch of records (one page's worth)
    fn write_records(&mut self, records: &[QuoteRecord]) -> SinkResult<()>;

    /// Flushes and finalizes the sink at the end of a crawl
    fn finish(&mut self) -> SinkResult<()>;
}
