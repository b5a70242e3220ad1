//! JSON-lines sinks
//!
//! One JSON object per line, in emission order. The file-backed sink
//! buffers writes and flushes on finish; the stdout sink writes through
//! for piping into other tools.

use crate::crawler::QuoteRecord;
use crate::output::traits::{RecordSink, SinkResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes records to a file, one JSON object per line
pub struct JsonLinesSink {
    writer: BufWriter<File>,
}

impl JsonLinesSink {
    /// Creates the destination file, truncating any existing content
    ///
    /// # Arguments
    ///
    /// * `path` - Destination file path
    ///
    /// # Returns
    ///
    /// * `Ok(JsonLinesSink)` - Ready to receive records
    /// * `Err(SinkError)` - Failed to create the file
    pub fn create(path: &Path) -> SinkResult<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl RecordSink for JsonLinesSink {
    fn write_records(&mut self, records: &[QuoteRecord]) -> SinkResult<()> {
        for record in records {
            serde_json::to_writer(&mut self.writer, record)?;
            self.writer.write_all(b"\n")?;
        }
        Ok(())
    }

    fn finish(&mut self) -> SinkResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes records to standard output, one JSON object per line
pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordSink for StdoutSink {
    fn write_records(&mut self, records: &[QuoteRecord]) -> SinkResult<()> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        for record in records {
            let line = serde_json::to_string(record)?;
            writeln!(handle, "{}", line)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> SinkResult<()> {
        std::io::stdout().flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<QuoteRecord> {
        vec![
            QuoteRecord {
                author_name: "Einstein".to_string(),
                text: "Q1".to_string(),
                tags: vec!["a".to_string()],
            },
            QuoteRecord {
                author_name: "Curie".to_string(),
                text: "Q2".to_string(),
                tags: vec!["b".to_string(), "c".to_string()],
            },
        ]
    }

    #[test]
    fn test_writes_one_line_per_record_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.jsonl");

        let mut sink = JsonLinesSink::create(&path).unwrap();
        sink.write_records(&sample_records()).unwrap();
        sink.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["author_name"], "Einstein");
        assert_eq!(first["tags"], serde_json::json!(["a"]));

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["text"], "Q2");
    }

    #[test]
    fn test_consecutive_batches_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.jsonl");

        let records = sample_records();
        let mut sink = JsonLinesSink::create(&path).unwrap();
        sink.write_records(&records[..1]).unwrap();
        sink.write_records(&records[1..]).unwrap();
        sink.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_empty_batch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.jsonl");

        let mut sink = JsonLinesSink::create(&path).unwrap();
        sink.write_records(&[]).unwrap();
        sink.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.is_empty());
    }
}
