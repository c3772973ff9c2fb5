//! Database schema definitions for the run history
//!
//! The history database is auxiliary: it records one row per run so the
//! `--stats` mode can show how earlier runs went. The URL table itself
//! lives in the CSV file.

/// SQL schema for the history database
pub const SCHEMA_SQL: &str = r#"
-- One row per run
CREATE TABLE IF NOT EXISTS runs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    started_at TEXT NOT NULL,
    finished_at TEXT,
    config_hash TEXT NOT NULL,
    status TEXT NOT NULL,
    urls_added INTEGER NOT NULL DEFAULT 0,
    newly_indexed INTEGER NOT NULL DEFAULT 0,
    newly_not_indexed INTEGER NOT NULL DEFAULT 0,
    newly_submitted INTEGER NOT NULL DEFAULT 0,
    indexing_quota_exceeded INTEGER NOT NULL DEFAULT 0,
    submission_quota_exceeded INTEGER NOT NULL DEFAULT 0,
    error_message TEXT
);

CREATE INDEX IF NOT EXISTS idx_runs_started ON runs(started_at);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
