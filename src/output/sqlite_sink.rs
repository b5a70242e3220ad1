//! SQLite-based record sink
//!
//! Persists records to a SQLite database with light run bookkeeping:
//! each crawl gets a row in `runs` (start/finish timestamps and the
//! config hash it ran with), and every record lands in `quotes` keyed
//! by run and emission sequence so output order survives storage.

use crate::crawler::QuoteRecord;
use crate::output::traits::{RecordSink, SinkResult};
use rusqlite::{params, Connection};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS runs (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    started_at  TEXT NOT NULL,
    finished_at TEXT,
    config_hash TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS quotes (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    run_id      INTEGER NOT NULL REFERENCES runs(id),
    seq         INTEGER NOT NULL,
    author_name TEXT NOT NULL,
    text        TEXT NOT NULL,
    tags        TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_quotes_run_seq ON quotes(run_id, seq);
";

/// Record sink backed by a SQLite database
pub struct SqliteSink {
    conn: Connection,
    run_id: i64,
    seq: i64,
}

impl SqliteSink {
    /// Opens (or creates) the database at `path` and starts a new run
    ///
    /// # Arguments
    ///
    /// * `path` - Database file path
    /// * `config_hash` - Hash of the configuration this run uses
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteSink)` - Ready to receive records
    /// * `Err(SinkError)` - Failed to open or initialize the database
    pub fn create(path: &std::path::Path, config_hash: &str) -> SinkResult<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn, config_hash)
    }

    /// In-memory variant for tests
    pub fn create_in_memory(config_hash: &str) -> SinkResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, config_hash)
    }

    fn from_connection(conn: Connection, config_hash: &str) -> SinkResult<Self> {
        conn.execute_batch(SCHEMA)?;

        let started_at = chrono::Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO runs (started_at, config_hash) VALUES (?1, ?2)",
            params![started_at, config_hash],
        )?;
        let run_id = conn.last_insert_rowid();

        Ok(Self {
            conn,
            run_id,
            seq: 0,
        })
    }

    /// Number of records stored for the current run
    pub fn count_records(&self) -> SinkResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM quotes WHERE run_id = ?1",
            params![self.run_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

impl RecordSink for SqliteSink {
    fn write_records(&mut self, records: &[QuoteRecord]) -> SinkResult<()> {
        let tx = self.conn.transaction()?;
        for record in records {
            let tags = serde_json::to_string(&record.tags)?;
            tx.execute(
                "INSERT INTO quotes (run_id, seq, author_name, text, tags)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![self.run_id, self.seq, record.author_name, record.text, tags],
            )?;
            self.seq += 1;
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> SinkResult<()> {
        let finished_at = chrono::Utc::now().to_rfc3339();
        self.conn.execute(
            "UPDATE runs SET finished_at = ?1 WHERE id = ?2",
            params![finished_at, self.run_id],
        )?;
        Ok(())
    }
}
