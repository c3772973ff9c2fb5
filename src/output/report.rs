//! Run report
//!
//! At the end of every run a plain-text block is printed and appended to the
//! results log. Each counter is shown as "now" (this run) and "overall"
//! (rows of the persisted table).

use crate::output::stats::TableStatistics;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Counters produced by one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    /// URLs added to the table by reconciliation
    pub urls_added: usize,

    /// URLs found indexed by this run's lookups
    pub newly_indexed: usize,

    /// URLs looked up this run and found not indexed
    pub newly_not_indexed: usize,

    /// URLs successfully submitted this run
    pub newly_submitted: usize,

    /// The search lookup quota ran out during verification
    pub indexing_quota_exceeded: bool,

    /// The notification quota ran out during submission
    pub submission_quota_exceeded: bool,
}

/// Formats the report block for a finished run
///
/// `finished_at` is rendered as given, e.g. `2024-05-01 12:00:00`.
pub fn format_report(result: &RunResult, totals: &TableStatistics, finished_at: &str) -> String {
    let mut block = String::new();

    block.push_str(&format!("It's done ({}).\n", finished_at));
    push_counter(&mut block, "1. URLs added from sitemap", result.urls_added, totals.total);
    push_counter(&mut block, "2. URLs indexed", result.newly_indexed, totals.indexed);
    push_counter(
        &mut block,
        "3. URLs NOT indexed",
        result.newly_not_indexed,
        totals.not_indexed,
    );
    if result.indexing_quota_exceeded {
        block.push_str("Google Quota exceeded for Indexing (Search API)\n");
    }
    push_counter(&mut block, "4. URLs submitted", result.newly_submitted, totals.submitted);
    if result.submission_quota_exceeded {
        block.push_str("Google Quota exceeded for Submitting (Index API)\n");
    }

    block
}

fn push_counter(block: &mut String, title: &str, now: usize, overall: usize) {
    block.push_str(title);
    block.push('\n');
    block.push_str(&format!("   now = {}\n   overall = {}\n", now, overall));
}

/// Appends a report block followed by a blank line to the results log
pub fn append_report(path: &Path, block: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", block)?;
    Ok(())
}
