//! URL handling module for Sitemap-Indexer
//!
//! This module provides the sorting-rule predicates used to order the URL
//! table, wildcard matching, and normalization of operator-supplied
//! priority URLs.

mod matcher;
mod normalize;

use crate::config::Config;

// Re-export main functions
pub use matcher::{matches_wildcard, SortingRule};
pub use normalize::{canonical_url, normalize_priority_url, parse_priority_list};

/// Builds the ordered rule list from the configuration
///
/// Rules are evaluated in configuration order. When `catch-all` is enabled
/// and the last configured rule does not already match everything, a final
/// `unmatched` rule is appended so no URL silently falls out of the table.
pub fn build_sorting_rules(config: &Config) -> Vec<SortingRule> {
    let mut rules: Vec<SortingRule> = config.sorting.rules.iter().map(SortingRule::from).collect();

    let ends_with_all = config
        .sorting
        .rules
        .last()
        .is_some_and(|r| r.kind == crate::config::RuleKind::All);

    if config.sorting.catch_all && !ends_with_all {
        rules.push(SortingRule::all("unmatched"));
    }

    rules
}

/// Returns true if the URL is on the exclusion list
///
/// `url` is expected in canonical form, as produced by the sitemap parser.
/// Exclusion entries are compared in canonical form too, so
/// `https://site.example` excludes `https://site.example/`.
pub fn is_excluded(url: &str, config: &Config) -> bool {
    config.exclude.iter().any(|excluded| match canonical_url(excluded) {
        Some(canonical) => canonical == url,
        None => excluded == url,
    })
}
