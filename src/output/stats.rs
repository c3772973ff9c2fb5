//! Statistics over the persisted URL table
//!
//! This module provides the per-status totals used by the run report and
//! the `--stats` mode.

use crate::state::{IndexingStatus, SubmittingStatus};
use crate::storage::{RunRecord, RunStatus, UrlTable};

/// Row counts by status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableStatistics {
    /// Total rows in the table
    pub total: usize,

    pub indexed: usize,
    pub not_indexed: usize,

    /// Rows whose last lookup failed
    pub index_errors: usize,

    /// Rows never looked up
    pub unchecked: usize,

    pub submitted: usize,
    pub submit_errors: usize,

    /// Rows holding cell text the indexer does not recognize
    pub unrecognized: usize,
}

impl TableStatistics {
    /// Counts the rows of `table` by status
    pub fn from_table(table: &UrlTable) -> Self {
        let mut stats = Self {
            total: table.len(),
            ..Self::default()
        };

        for record in table.iter() {
            match record.indexing_status {
                Some(IndexingStatus::Indexed) => stats.indexed += 1,
                Some(IndexingStatus::NotIndexed) => stats.not_indexed += 1,
                Some(IndexingStatus::Error) => stats.index_errors += 1,
                None if record.unrecognized.indexing_status.is_some() => {}
                None => stats.unchecked += 1,
            }
            match record.submitting_status {
                Some(SubmittingStatus::Submitted) => stats.submitted += 1,
                Some(SubmittingStatus::Error) => stats.submit_errors += 1,
                None => {}
            }
            if !record.unrecognized.is_empty() {
                stats.unrecognized += 1;
            }
        }

        stats
    }
}

/// Prints table statistics and recent runs to stdout
pub fn print_statistics(stats: &TableStatistics, runs: &[RunRecord]) {
    println!("=== URL Table ===\n");

    println!("Overview:");
    println!("  Total URLs: {}", stats.total);
    println!();

    println!("Indexing Status:");
    for (label, count) in [
        ("Indexed", stats.indexed),
        ("Not Indexed", stats.not_indexed),
        ("Error", stats.index_errors),
        ("Unchecked", stats.unchecked),
    ] {
        println!("  {}: {} ({:.1}%)", label, count, percentage(count, stats.total));
    }
    println!();

    println!("Submitting Status:");
    println!("  Submitted: {}", stats.submitted);
    println!("  Error: {}", stats.submit_errors);
    println!();

    if stats.unrecognized > 0 {
        println!(
            "Rows with unrecognized cells (left untouched): {}\n",
            stats.unrecognized
        );
    }

    if runs.is_empty() {
        println!("No recorded runs.");
        return;
    }

    println!("Recent Runs ({}):", runs.len());
    for run in runs {
        let finished = run.finished_at.as_deref().unwrap_or("-");
        match run.status {
            RunStatus::Failed => println!(
                "  #{} {} -> {} failed: {}",
                run.id,
                run.started_at,
                finished,
                run.error_message.as_deref().unwrap_or("unknown error")
            ),
            status => println!(
                "  #{} {} -> {} {}: +{} URLs, {} indexed, {} not indexed, {} submitted{}{}",
                run.id,
                run.started_at,
                finished,
                status.to_db_string(),
                run.result.urls_added,
                run.result.newly_indexed,
                run.result.newly_not_indexed,
                run.result.newly_submitted,
                if run.result.indexing_quota_exceeded {
                    " [search quota]"
                } else {
                    ""
                },
                if run.result.submission_quota_exceeded {
                    " [indexing quota]"
                } else {
                    ""
                },
            ),
        }
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total > 0 {
        (count as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}
