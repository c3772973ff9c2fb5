//! Submission stage
//!
//! Selects the URLs to notify this run and sends one "URL updated"
//! notification per URL, recording each outcome on its table row.

use crate::api::IndexingApi;
use crate::storage::UrlTable;
use chrono::Local;
use std::collections::HashSet;

/// Timestamp format of the "Date of Submitting" column
pub const SUBMIT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Counters of one submission batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Notifications accepted by the provider
    pub submitted: usize,

    /// Notifications that failed for a non-quota reason
    pub failed: usize,

    /// The quota ran out; the rest of the batch was not sent
    pub quota_exceeded: bool,
}

/// Builds this run's submission list
///
/// Order: prioritized URLs, then newly added URLs, then every other eligible
/// row in table order. Prioritized URLs are taken as given; the others must
/// be submission candidates. The list is deduplicated and capped at `max`.
pub fn select_for_submission(
    table: &UrlTable,
    prioritized: &[String],
    new_urls: &[String],
    max: usize,
    retry_failed: bool,
) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut selected = Vec::new();

    let eligible = |url: &str| {
        table
            .get(url)
            .is_some_and(|record| record.is_submission_candidate(retry_failed))
    };

    let natural = new_urls
        .iter()
        .map(String::as_str)
        .filter(|url| eligible(*url))
        .chain(
            table
                .iter()
                .filter(|record| record.is_submission_candidate(retry_failed))
                .map(|record| record.url.as_str()),
        );

    for url in prioritized.iter().map(String::as_str).chain(natural) {
        if selected.len() >= max {
            break;
        }
        if seen.insert(url) {
            selected.push(url.to_string());
        }
    }

    selected
}

/// Submits `urls` in order, annotating rows present in `table`
///
/// A quota response stops the batch at once: the URL that hit the quota and
/// every later URL keep their previous status. Any other failure marks the
/// row "Error" and the batch continues.
pub async fn submit_batch(
    api: &dyn IndexingApi,
    table: &mut UrlTable,
    urls: &[String],
) -> SubmitOutcome {
    let mut outcome = SubmitOutcome::default();

    tracing::info!("Submitting {} URLs for indexing", urls.len());

    for (position, url) in urls.iter().enumerate() {
        match api.publish(url).await {
            Ok(()) => {
                tracing::debug!("Submitted: {}", url);
                if let Some(record) = table.get_mut(url) {
                    record.mark_submitted(now_stamp());
                }
                outcome.submitted += 1;
            }
            Err(e) if e.is_quota() => {
                tracing::warn!(
                    "Indexing quota exceeded at {}; {} URLs left for the next run",
                    url,
                    urls.len() - position
                );
                outcome.quota_exceeded = true;
                break;
            }
            Err(e) => {
                tracing::error!("Failed to submit {}: {}", url, e);
                if let Some(record) = table.get_mut(url) {
                    record.mark_submit_error(now_stamp());
                }
                outcome.failed += 1;
            }
        }
    }

    tracing::info!(
        "Submission finished: {} submitted, {} failed{}",
        outcome.submitted,
        outcome.failed,
        if outcome.quota_exceeded {
            " (quota exceeded)"
        } else {
            ""
        }
    );

    outcome
}

fn now_stamp() -> String {
    Local::now().format(SUBMIT_TIMESTAMP_FORMAT).to_string()
}
