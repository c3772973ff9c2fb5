//! Storage traits and error types
//!
//! This module defines the trait interface for URL table backends and
//! associated error types.

use crate::storage::UrlTable;
use thiserror::Error;

/// Errors that can occur during URL table operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column '{0}' in URL table")]
    MissingColumn(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for URL table backends
///
/// The table is read and written in full: `save` replaces whatever was
/// persisted before. A backend with nothing persisted yet loads as an
/// empty table.
pub trait TableStore {
    /// Loads the persisted table, or an empty table on first run
    fn load(&self) -> StorageResult<UrlTable>;

    /// Replaces the persisted table with `table`
    fn save(&self, table: &UrlTable) -> StorageResult<()>;
}
