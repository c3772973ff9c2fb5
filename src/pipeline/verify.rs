//! Verification stage
//!
//! Looks up index presence for unchecked URLs and for "Not Indexed" URLs
//! whose last check is older than the cooldown.

use crate::api::SearchApi;
use crate::storage::UrlTable;
use chrono::NaiveDate;

/// Counters of one verification batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyOutcome {
    /// Lookups that completed
    pub checked: usize,

    /// URLs found indexed
    pub newly_indexed: usize,

    /// URLs found not indexed
    pub newly_not_indexed: usize,

    /// Lookups that failed for a non-quota reason
    pub failed: usize,

    /// The quota ran out; the rest of the batch was not checked
    pub quota_exceeded: bool,
}

/// Picks the rows due for a lookup on `today`, in table order, capped at `max`
pub fn select_for_verification(
    table: &UrlTable,
    today: NaiveDate,
    cooldown_days: i64,
    max: usize,
) -> Vec<String> {
    table
        .iter()
        .filter(|record| record.is_verification_due(today, cooldown_days))
        .take(max)
        .map(|record| record.url.clone())
        .collect()
}

/// Checks `urls` in order and records the observations dated `today`
///
/// A quota response stops the batch; URLs not yet checked keep their status.
/// Any other failure clears the row's indexing fields so it is checked again
/// on the next run.
pub async fn verify_batch(
    api: &dyn SearchApi,
    table: &mut UrlTable,
    urls: &[String],
    today: NaiveDate,
) -> VerifyOutcome {
    let mut outcome = VerifyOutcome::default();

    tracing::info!("Checking index status of {} URLs", urls.len());

    for (position, url) in urls.iter().enumerate() {
        match api.is_indexed(url).await {
            Ok(indexed) => {
                tracing::debug!(
                    "{}: {}",
                    url,
                    if indexed { "indexed" } else { "not indexed" }
                );
                if let Some(record) = table.get_mut(url) {
                    record.mark_indexed(today, indexed);
                }
                outcome.checked += 1;
                if indexed {
                    outcome.newly_indexed += 1;
                } else {
                    outcome.newly_not_indexed += 1;
                }
            }
            Err(e) if e.is_quota() => {
                tracing::warn!(
                    "Search quota exceeded at {}; {} URLs left for the next run",
                    url,
                    urls.len() - position
                );
                outcome.quota_exceeded = true;
                break;
            }
            Err(e) => {
                tracing::error!("Failed to check {}: {}", url, e);
                if let Some(record) = table.get_mut(url) {
                    record.clear_indexing();
                }
                outcome.failed += 1;
            }
        }
    }

    tracing::info!(
        "Verification finished: {} indexed, {} not indexed, {} failed{}",
        outcome.newly_indexed,
        outcome.newly_not_indexed,
        outcome.failed,
        if outcome.quota_exceeded {
            " (quota exceeded)"
        } else {
            ""
        }
    );

    outcome
}
