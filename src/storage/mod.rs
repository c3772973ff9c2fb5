//! Storage module for the persisted URL table and run history
//!
//! This module handles:
//! - Reading and writing the URL table (CSV file)
//! - Reconciling freshly crawled URLs with the table
//! - Recording run history in SQLite

mod csv_table;
mod history;
mod reconcile;
mod schema;
mod table;
mod traits;

pub use csv_table::{CsvTableStore, COLUMNS};
pub use history::{RunHistory, RunRecord, RunStatus};
pub use reconcile::{order_by_rules, reconcile, Reconciliation, SortPolicy};
pub use table::UrlTable;
pub use traits::{StorageError, StorageResult, TableStore};

use crate::config::Config;
use crate::url::build_sorting_rules;

/// Opens the URL table configured for this run
pub fn open_table_store(config: &Config) -> CsvTableStore {
    CsvTableStore::new(config.files.table_file())
}

/// Builds the reconciliation ordering policy from the configuration
pub fn sort_policy(config: &Config) -> SortPolicy {
    SortPolicy {
        rules: build_sorting_rules(config),
        alphabetical: config.sorting.alphabetical,
        new_urls_first: config.sorting.new_urls_first,
    }
}

/// Reconciles crawled URLs with the persisted table and saves the result
///
/// The merged table fully replaces the persisted one. Any failure reading
/// or writing the table is returned to the caller.
pub fn reconcile_and_save(
    store: &dyn TableStore,
    crawled: &[String],
    policy: &SortPolicy,
) -> StorageResult<Reconciliation> {
    let existing = store.load()?;
    let reconciliation = reconcile(&existing, crawled, policy);
    store.save(&reconciliation.table)?;

    tracing::info!(
        "URL table reconciled: {} rows ({} new)",
        reconciliation.table.len(),
        reconciliation.new_urls.len()
    );

    Ok(reconciliation)
}
