use crate::config::{RuleKind, SortingRuleConfig};
use url::Url;

/// Checks if a URL matches a `*` wildcard pattern
///
/// `*` matches any run of characters (including none); every other
/// character must match literally. Matching is case-sensitive, like the
/// table's URL keys.
///
/// # Examples
///
/// ```
/// use sitemap_indexer::url::matches_wildcard;
///
/// assert!(matches_wildcard("https://site.example/blog/*", "https://site.example/blog/post"));
/// assert!(matches_wildcard("*/docs/*.html", "https://site.example/docs/a.html"));
/// assert!(!matches_wildcard("https://site.example/blog/*", "https://site.example/shop/"));
/// ```
pub fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
    let mut parts = pattern.split('*');

    // Text before the first '*' must be a prefix
    let first = parts.next().unwrap_or("");
    let Some(mut rest) = candidate.strip_prefix(first) else {
        return false;
    };

    let remaining: Vec<&str> = parts.collect();
    let Some((last, middle)) = remaining.split_last() else {
        // No '*' at all: exact match
        return rest.is_empty();
    };

    for part in middle {
        match rest.find(part) {
            Some(idx) => rest = &rest[idx + part.len()..],
            None => return false,
        }
    }

    rest.len() >= last.len() && rest.ends_with(last)
}

/// A compiled sorting rule: a name and a predicate over URLs
#[derive(Debug, Clone)]
pub struct SortingRule {
    name: String,
    kind: RuleKind,
    value: String,
}

impl SortingRule {
    pub fn new(name: impl Into<String>, kind: RuleKind, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            value: value.into(),
        }
    }

    /// Rule that matches every URL
    pub fn all(name: impl Into<String>) -> Self {
        Self::new(name, RuleKind::All, "")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the URL belongs to this rule's partition
    pub fn matches(&self, url: &str) -> bool {
        match self.kind {
            RuleKind::All => true,
            RuleKind::Prefix => url.starts_with(&self.value),
            RuleKind::Contains => url.contains(&self.value),
            RuleKind::Suffix => url.ends_with(&self.value),
            RuleKind::Wildcard => matches_wildcard(&self.value, url),
            RuleKind::PathPrefix => Url::parse(url)
                .map(|parsed| parsed.path().starts_with(&self.value))
                .unwrap_or(false),
        }
    }
}

impl From<&SortingRuleConfig> for SortingRule {
    fn from(config: &SortingRuleConfig) -> Self {
        Self::new(config.name.clone(), config.kind, config.value.clone())
    }
}
