//! Local archive of fetched sitemap documents
//!
//! Each fetched sitemap is written verbatim under the sitemap directory,
//! named after the last non-empty path segment of its location. A later
//! fetch of a sitemap with the same name overwrites the earlier copy.

use std::io;
use std::path::{Path, PathBuf};
use url::Url;

const FALLBACK_NAME: &str = "sitemap.xml";

/// File name used when archiving the sitemap at `location`
pub fn archive_file_name(location: &str) -> String {
    Url::parse(location)
        .ok()
        .and_then(|url| {
            url.path_segments().and_then(|segments| {
                segments
                    .filter(|s| !s.is_empty())
                    .last()
                    .map(|s| s.to_string())
            })
        })
        .unwrap_or_else(|| FALLBACK_NAME.to_string())
}

/// Writes the raw sitemap body into `dir`, creating the directory if needed
pub fn archive_sitemap(dir: &Path, location: &str, body: &[u8]) -> io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(archive_file_name(location));
    std::fs::write(&path, body)?;
    Ok(path)
}
