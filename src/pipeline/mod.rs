//! Run pipeline
//!
//! This module drives one run end to end:
//! - Crawl the sitemap tree and reconcile the URL table
//! - Submit a bounded batch of URLs for indexing
//! - Re-check index presence of stale or unchecked URLs
//! - Report the run's counters
//!
//! Every stage runs sequentially; the table is saved after each mutating
//! stage.

mod run;
mod submit;
mod verify;

pub use run::{run, RunOptions};
pub use submit::{select_for_submission, submit_batch, SubmitOutcome, SUBMIT_TIMESTAMP_FORMAT};
pub use verify::{select_for_verification, verify_batch, VerifyOutcome};
