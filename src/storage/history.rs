//! SQLite run history
//!
//! Each run is recorded when it starts and completed (or failed) when it
//! ends, together with the counters that went into its report.

use crate::output::RunResult;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::StorageResult;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Status of a recorded run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Completed,
    Failed,
}

impl RunStatus {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "running" => Some(Self::Running),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

/// A run as stored in the history
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub id: i64,
    pub started_at: String,
    pub finished_at: Option<String>,
    pub config_hash: String,
    pub status: RunStatus,
    pub result: RunResult,
    pub error_message: Option<String>,
}

/// SQLite-backed run history
pub struct RunHistory {
    conn: Connection,
}

impl RunHistory {
    /// Opens (creating if needed) the history database at `path`
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;
        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory history (for testing)
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Records the start of a run and returns its ID
    pub fn start_run(&mut self, config_hash: &str) -> Result<i64, rusqlite::Error> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO runs (started_at, config_hash, status) VALUES (?1, ?2, ?3)",
            params![now, config_hash, RunStatus::Running.to_db_string()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Marks a run as completed and stores its counters
    pub fn complete_run(&mut self, run_id: i64, result: &RunResult) -> Result<(), rusqlite::Error> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "UPDATE runs SET status = ?1, finished_at = ?2, urls_added = ?3, newly_indexed = ?4,
             newly_not_indexed = ?5, newly_submitted = ?6, indexing_quota_exceeded = ?7,
             submission_quota_exceeded = ?8
             WHERE id = ?9",
            params![
                RunStatus::Completed.to_db_string(),
                now,
                result.urls_added as i64,
                result.newly_indexed as i64,
                result.newly_not_indexed as i64,
                result.newly_submitted as i64,
                result.indexing_quota_exceeded,
                result.submission_quota_exceeded,
                run_id
            ],
        )?;
        Ok(())
    }

    /// Marks a run as failed with the error that stopped it
    pub fn fail_run(&mut self, run_id: i64, message: &str) -> Result<(), rusqlite::Error> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "UPDATE runs SET status = ?1, finished_at = ?2, error_message = ?3 WHERE id = ?4",
            params![RunStatus::Failed.to_db_string(), now, message, run_id],
        )?;
        Ok(())
    }

    /// Gets a run by ID
    pub fn get_run(&self, run_id: i64) -> Result<Option<RunRecord>, rusqlite::Error> {
        self.conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_RUN),
                params![run_id],
                row_to_run,
            )
            .optional()
    }

    /// Gets the most recent runs, newest first
    pub fn recent_runs(&self, limit: usize) -> Result<Vec<RunRecord>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY id DESC LIMIT ?1", SELECT_RUN))?;

        let runs = stmt
            .query_map(params![limit as i64], row_to_run)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(runs)
    }
}

const SELECT_RUN: &str = "SELECT id, started_at, finished_at, config_hash, status, urls_added,
    newly_indexed, newly_not_indexed, newly_submitted, indexing_quota_exceeded,
    submission_quota_exceeded, error_message FROM runs";

fn row_to_run(row: &rusqlite::Row<'_>) -> Result<RunRecord, rusqlite::Error> {
    Ok(RunRecord {
        id: row.get(0)?,
        started_at: row.get(1)?,
        finished_at: row.get(2)?,
        config_hash: row.get(3)?,
        status: RunStatus::from_db_string(&row.get::<_, String>(4)?).unwrap_or(RunStatus::Failed),
        result: RunResult {
            urls_added: row.get::<_, i64>(5)? as usize,
            newly_indexed: row.get::<_, i64>(6)? as usize,
            newly_not_indexed: row.get::<_, i64>(7)? as usize,
            newly_submitted: row.get::<_, i64>(8)? as usize,
            indexing_quota_exceeded: row.get(9)?,
            submission_quota_exceeded: row.get(10)?,
        },
        error_message: row.get(11)?,
    })
}
