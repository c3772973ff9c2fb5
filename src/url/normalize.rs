use crate::{UrlError, UrlResult};
use url::Url;

/// Returns the canonical spelling of an absolute URL
///
/// This is the form sitemap locations are stored in: the host gains a
/// trailing `/` when the path is empty, and non-ASCII characters are
/// percent-encoded. Input that does not parse returns `None`.
///
/// ```
/// use sitemap_indexer::url::canonical_url;
///
/// assert_eq!(canonical_url("https://site.example").unwrap(), "https://site.example/");
/// assert_eq!(
///     canonical_url("https://site.example/café").unwrap(),
///     "https://site.example/caf%C3%A9"
/// );
/// assert_eq!(canonical_url("/relative"), None);
/// ```
pub fn canonical_url(input: &str) -> Option<String> {
    Url::parse(input.trim()).ok().map(String::from)
}

/// Resolves an operator-supplied URL against the site base URL
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace; reject empty input
/// 2. Input starting with `http` is taken as absolute
/// 3. Anything else is a site-relative path: leading slashes are stripped
///    and the remainder is appended to the site URL with a single `/`
/// 4. The result must be an http(s) URL and is returned in its canonical
///    spelling (see [`canonical_url`]) so it matches crawled table keys
///
/// # Examples
///
/// ```
/// use sitemap_indexer::url::normalize_priority_url;
///
/// let site = "https://site.example";
/// assert_eq!(
///     normalize_priority_url("/blog/post", site).unwrap(),
///     "https://site.example/blog/post"
/// );
/// assert_eq!(
///     normalize_priority_url("https://site.example/a", site).unwrap(),
///     "https://site.example/a"
/// );
/// ```
pub fn normalize_priority_url(input: &str, site_url: &str) -> UrlResult<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UrlError::Empty);
    }

    let absolute = if input.starts_with("http") {
        input.to_string()
    } else {
        format!(
            "{}/{}",
            site_url.trim_end_matches('/'),
            input.trim_start_matches('/')
        )
    };

    let parsed = Url::parse(&absolute).map_err(|e| UrlError::Parse(format!("{}: {}", absolute, e)))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(UrlError::InvalidScheme(parsed.scheme().to_string()));
    }

    Ok(parsed.into())
}

/// Splits a comma-separated priority list and normalizes every entry
///
/// Blank entries are skipped; entries that fail to normalize are logged
/// and skipped. Duplicates are removed, keeping the first occurrence.
pub fn parse_priority_list(input: &str, site_url: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();

    for entry in input.split(',') {
        if entry.trim().is_empty() {
            continue;
        }

        match normalize_priority_url(entry, site_url) {
            Ok(url) => {
                if !urls.contains(&url) {
                    urls.push(url);
                }
            }
            Err(e) => tracing::warn!("Ignoring priority URL '{}': {}", entry.trim(), e),
        }
    }

    urls
}
