//! Crawler module for sitemap discovery
//!
//! This module contains the sitemap crawling logic, including:
//! - HTTP fetching of sitemap documents
//! - Sitemap index / URL set parsing
//! - The visited-aware sitemap frontier
//! - Archiving fetched documents to the sitemap directory

mod archive;
mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use archive::{archive_file_name, archive_sitemap};
pub use coordinator::{crawl_sitemaps, CrawlOutcome, SitemapCrawler};
pub use fetcher::{build_http_client, fetch_sitemap, FetchError};
pub use frontier::SitemapFrontier;
pub use parser::{parse_sitemap, ParsedSitemap, SitemapKind};
