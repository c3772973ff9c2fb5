//! Output module for run reports and table statistics
//!
//! This module handles:
//! - Formatting the end-of-run report block
//! - Appending reports to the results log
//! - Computing and printing URL table statistics

mod report;
pub mod stats;

pub use report::{append_report, format_report, RunResult};
pub use stats::{print_statistics, TableStatistics};
