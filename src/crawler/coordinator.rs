//! Sitemap crawl coordination
//!
//! Starting from the root sitemap, the crawl loop:
//! - Takes the next unvisited sitemap from the frontier
//! - Fetches it and archives the raw document
//! - Queues child sitemaps of an index, or collects page URLs of a URL set
//! - Drops excluded and duplicate page URLs
//!
//! A sitemap that cannot be fetched or parsed is logged and skipped; the
//! crawl itself never fails.

use crate::config::Config;
use crate::crawler::archive::archive_sitemap;
use crate::crawler::fetcher::fetch_sitemap;
use crate::crawler::frontier::SitemapFrontier;
use crate::crawler::parser::{parse_sitemap, SitemapKind};
use crate::url::is_excluded;
use reqwest::Client;
use std::collections::HashSet;

/// Result of crawling a site's sitemaps
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlOutcome {
    /// Page URLs in discovery order, without duplicates or exclusions
    pub urls: Vec<String>,

    /// Sitemaps fetched and parsed successfully
    pub sitemaps_processed: usize,

    /// Sitemaps that could not be fetched or recognized
    pub sitemaps_failed: usize,

    /// Page URLs dropped because they are on the exclusion list
    pub excluded: usize,
}

/// Walks the sitemap tree of one site
pub struct SitemapCrawler<'a> {
    client: &'a Client,
    config: &'a Config,
}

impl<'a> SitemapCrawler<'a> {
    pub fn new(client: &'a Client, config: &'a Config) -> Self {
        Self { client, config }
    }

    /// Crawls every sitemap reachable from `root`
    pub async fn crawl(&self, root: &str) -> CrawlOutcome {
        let archive_dir = self.config.files.sitemap_dir();
        let mut frontier = SitemapFrontier::new(root);
        let mut seen_urls: HashSet<String> = HashSet::new();
        let mut outcome = CrawlOutcome::default();

        tracing::info!("Crawling sitemaps from {}", root);

        while let Some(location) = frontier.pop_next() {
            tracing::debug!("Fetching sitemap: {}", location);

            let body = match fetch_sitemap(self.client, &location).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::error!("Failed to fetch sitemap {}: {}", location, e);
                    outcome.sitemaps_failed += 1;
                    continue;
                }
            };

            if let Err(e) = archive_sitemap(&archive_dir, &location, &body) {
                tracing::warn!("Failed to archive sitemap {}: {}", location, e);
            }

            let parsed = parse_sitemap(&body);
            if parsed.errors > 0 {
                tracing::warn!("{} unreadable entries in sitemap {}", parsed.errors, location);
            }

            match parsed.kind() {
                SitemapKind::Index => {
                    let mut queued = 0;
                    for child in parsed.sitemaps {
                        if frontier.push(child) {
                            queued += 1;
                        }
                    }
                    tracing::debug!("Sitemap index {}: {} child sitemaps queued", location, queued);
                }
                SitemapKind::UrlSet => {
                    let before = outcome.urls.len();
                    for url in parsed.urls {
                        if is_excluded(&url, self.config) {
                            tracing::debug!("Excluded URL: {}", url);
                            outcome.excluded += 1;
                            continue;
                        }
                        if seen_urls.insert(url.clone()) {
                            outcome.urls.push(url);
                        }
                    }
                    tracing::debug!(
                        "URL set {}: {} new URLs",
                        location,
                        outcome.urls.len() - before
                    );
                }
                SitemapKind::Unrecognized => {
                    tracing::error!("Not a sitemap index or URL set: {}", location);
                    outcome.sitemaps_failed += 1;
                    continue;
                }
            }

            outcome.sitemaps_processed += 1;
        }

        tracing::info!(
            "Crawl complete: {} URLs from {} sitemaps ({} failed, {} excluded)",
            outcome.urls.len(),
            outcome.sitemaps_processed,
            outcome.sitemaps_failed,
            outcome.excluded
        );

        outcome
    }
}

/// Crawls the configured site's root sitemap
pub async fn crawl_sitemaps(client: &Client, config: &Config) -> CrawlOutcome {
    SitemapCrawler::new(client, config)
        .crawl(&config.root_sitemap_url())
        .await
}
