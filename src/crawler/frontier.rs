//! Sitemap frontier
//!
//! Pending sitemap locations are kept in a FIFO queue together with the set
//! of locations already taken from it. A location is handed out at most once
//! per run, so self-references and cycles between sitemap indexes terminate.

use std::collections::{HashSet, VecDeque};

/// Queue of sitemaps still to be fetched
#[derive(Debug, Default)]
pub struct SitemapFrontier {
    pending: VecDeque<String>,
    visited: HashSet<String>,
}

impl SitemapFrontier {
    /// Creates a frontier seeded with the root sitemap
    pub fn new(root: impl Into<String>) -> Self {
        let mut frontier = Self::default();
        frontier.push(root);
        frontier
    }

    /// Queues a sitemap location
    ///
    /// Returns `false` when the location was already processed; it is not
    /// queued again.
    pub fn push(&mut self, location: impl Into<String>) -> bool {
        let location = location.into();
        if self.visited.contains(&location) {
            return false;
        }
        self.pending.push_back(location);
        true
    }

    /// Takes the next unprocessed sitemap location and marks it processed
    pub fn pop_next(&mut self) -> Option<String> {
        while let Some(location) = self.pending.pop_front() {
            if self.visited.insert(location.clone()) {
                return Some(location);
            }
        }
        None
    }

    /// Number of locations handed out so far
    pub fn processed(&self) -> usize {
        self.visited.len()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
