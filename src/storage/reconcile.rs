//! Reconciliation of freshly crawled URLs with the persisted table
//!
//! # Merge Steps
//!
//! 1. New URLs are crawled URLs not already in the table (crawl order kept)
//! 2. Candidates are new URLs and existing URLs, combined in the configured order
//! 3. Each sorting rule, in order, claims the candidates it matches as one partition
//!    (alphabetised when enabled); a URL matched by several rules stays in the first
//! 4. Each URL in the resulting order keeps its existing record verbatim, or
//!    gets a new record with every status unset
//!
//! URLs matched by no rule are dropped; `build_sorting_rules` adds a trailing
//! catch-all rule unless the configuration turns it off.

use crate::state::UrlRecord;
use crate::storage::UrlTable;
use crate::url::SortingRule;
use std::collections::HashSet;

/// Ordering policy for reconciliation
#[derive(Debug, Clone)]
pub struct SortPolicy {
    pub rules: Vec<SortingRule>,
    pub alphabetical: bool,
    pub new_urls_first: bool,
}

/// Result of merging a crawl into the table
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// The merged table that replaces the persisted one
    pub table: UrlTable,

    /// URLs that were not in the table before, in crawl order
    pub new_urls: Vec<String>,

    /// Number of candidate URLs no rule matched
    pub dropped: usize,
}

/// Merges crawled URLs into the existing table
///
/// `crawled` must already be deduplicated and filtered by the exclusion
/// list. Existing status fields are copied forward unchanged.
pub fn reconcile(existing: &UrlTable, crawled: &[String], policy: &SortPolicy) -> Reconciliation {
    let mut seen: HashSet<&str> = HashSet::new();
    let new_urls: Vec<String> = crawled
        .iter()
        .filter(|url| !existing.contains(url) && seen.insert(url.as_str()))
        .cloned()
        .collect();

    let existing_urls = existing.urls();
    let combined: Vec<String> = if policy.new_urls_first {
        new_urls.iter().chain(existing_urls.iter()).cloned().collect()
    } else {
        existing_urls.iter().chain(new_urls.iter()).cloned().collect()
    };

    let ordered = order_by_rules(&combined, policy);
    let dropped = combined.len() - ordered.len();
    if dropped > 0 {
        tracing::warn!(
            "{} URL(s) matched no sorting rule and were left out of the table",
            dropped
        );
    }

    let table = UrlTable::from_records(ordered.into_iter().map(|url| {
        existing
            .get(&url)
            .cloned()
            .unwrap_or_else(|| UrlRecord::new(url))
    }));

    Reconciliation {
        table,
        new_urls,
        dropped,
    }
}

/// Partitions URLs by rule order, removing repeats while keeping first occurrence
pub fn order_by_rules(urls: &[String], policy: &SortPolicy) -> Vec<String> {
    let mut ordered: Vec<String> = Vec::with_capacity(urls.len());
    let mut seen: HashSet<&str> = HashSet::with_capacity(urls.len());

    for rule in &policy.rules {
        let mut partition: Vec<&String> = urls.iter().filter(|url| rule.matches(url)).collect();
        if policy.alphabetical {
            partition.sort();
        }

        let before = ordered.len();
        for url in partition {
            if seen.insert(url.as_str()) {
                ordered.push(url.clone());
            }
        }
        tracing::debug!("Rule '{}' placed {} URL(s)", rule.name(), ordered.len() - before);
    }

    ordered
}
