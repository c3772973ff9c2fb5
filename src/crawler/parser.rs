//! Sitemap document parser
//!
//! A sitemap document is either a *sitemap index* (its `<sitemap><loc>`
//! entries point at further sitemaps) or a *URL set* (its `<url><loc>`
//! entries are page URLs). Both live in the
//! `http://www.sitemaps.org/schemas/sitemap/0.9` namespace.

use sitemap::reader::{SiteMapEntity, SiteMapReader};
use std::io::Cursor;

/// What kind of document was parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapKind {
    Index,
    UrlSet,
    /// Neither sitemap references nor page URLs were found
    Unrecognized,
}

/// Locations extracted from one sitemap document
#[derive(Debug, Clone, Default)]
pub struct ParsedSitemap {
    /// Child sitemap locations (sitemap index entries)
    pub sitemaps: Vec<String>,

    /// Page locations (URL set entries)
    pub urls: Vec<String>,

    /// Entries that could not be parsed, including XML syntax errors
    pub errors: usize,
}

impl ParsedSitemap {
    pub fn kind(&self) -> SitemapKind {
        if !self.sitemaps.is_empty() {
            SitemapKind::Index
        } else if !self.urls.is_empty() {
            SitemapKind::UrlSet
        } else {
            SitemapKind::Unrecognized
        }
    }
}

/// Parses a sitemap document
///
/// Entries whose `<loc>` is missing or not an absolute URL are counted as
/// errors and skipped; the rest of the document is still used.
///
/// # Example
///
/// ```
/// use sitemap_indexer::crawler::{parse_sitemap, SitemapKind};
///
/// let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
/// <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
///   <url><loc>https://site.example/a</loc></url>
/// </urlset>"#;
/// let parsed = parse_sitemap(xml);
/// assert_eq!(parsed.kind(), SitemapKind::UrlSet);
/// assert_eq!(parsed.urls, vec!["https://site.example/a"]);
/// ```
pub fn parse_sitemap(body: &[u8]) -> ParsedSitemap {
    let mut parsed = ParsedSitemap::default();

    for entity in SiteMapReader::new(Cursor::new(body)) {
        match entity {
            SiteMapEntity::Url(url_entry) => match url_entry.loc.get_url() {
                Some(url) => parsed.urls.push(url.to_string()),
                None => {
                    tracing::debug!("Skipping URL entry without a usable location: {:?}", url_entry.loc);
                    parsed.errors += 1;
                }
            },
            SiteMapEntity::SiteMap(sitemap_entry) => match sitemap_entry.loc.get_url() {
                Some(url) => parsed.sitemaps.push(url.to_string()),
                None => {
                    tracing::debug!(
                        "Skipping sitemap entry without a usable location: {:?}",
                        sitemap_entry.loc
                    );
                    parsed.errors += 1;
                }
            },
            SiteMapEntity::Err(error) => {
                tracing::debug!("Sitemap parse error: {}", error);
                parsed.errors += 1;
            }
        }
    }

    parsed
}
