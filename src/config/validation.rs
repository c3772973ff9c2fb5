use crate::config::types::{
    Config, IndexingApiConfig, LimitsConfig, RuleKind, SearchApiConfig, SortingConfig,
};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Longest accepted re-check cooldown (ten years)
pub const MAX_COOLDOWN_DAYS: i64 = 3650;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_url(&config.site.url)?;
    validate_limits(&config.limits)?;
    validate_sorting(&config.sorting)?;
    validate_exclusions(&config.exclude)?;
    validate_indexing_api(&config.indexing_api)?;
    validate_search_api(&config.search_api)?;
    Ok(())
}

/// Validates the site base URL
fn validate_site_url(site: &str) -> Result<(), ConfigError> {
    let url = parse_http_url(site, "site url")?;

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "site url '{}' has no host",
            site
        )));
    }

    Ok(())
}

/// Validates per-run caps
fn validate_limits(limits: &LimitsConfig) -> Result<(), ConfigError> {
    if limits.max_indexing_urls_per_run < 1 {
        return Err(ConfigError::Validation(format!(
            "max_indexing_urls_per_run must be >= 1, got {}",
            limits.max_indexing_urls_per_run
        )));
    }

    if limits.max_submission_urls_per_run < 1 {
        return Err(ConfigError::Validation(format!(
            "max_submission_urls_per_run must be >= 1, got {}",
            limits.max_submission_urls_per_run
        )));
    }

    if !(0..=MAX_COOLDOWN_DAYS).contains(&limits.recheck_cooldown_days) {
        return Err(ConfigError::Validation(format!(
            "recheck_cooldown_days must be between 0 and {}, got {}",
            MAX_COOLDOWN_DAYS, limits.recheck_cooldown_days
        )));
    }

    Ok(())
}

/// Validates sorting rules: unique non-empty names, values where required
fn validate_sorting(sorting: &SortingConfig) -> Result<(), ConfigError> {
    let mut names = HashSet::new();

    for rule in &sorting.rules {
        if rule.name.trim().is_empty() {
            return Err(ConfigError::InvalidRule(
                "rule name cannot be empty".to_string(),
            ));
        }

        if !names.insert(rule.name.as_str()) {
            return Err(ConfigError::InvalidRule(format!(
                "duplicate rule name '{}'",
                rule.name
            )));
        }

        if rule.kind != RuleKind::All && rule.value.is_empty() {
            return Err(ConfigError::InvalidRule(format!(
                "rule '{}' of kind {:?} needs a value",
                rule.name, rule.kind
            )));
        }
    }

    Ok(())
}

/// Validates that every exclusion entry is an absolute URL
fn validate_exclusions(exclude: &[String]) -> Result<(), ConfigError> {
    for entry in exclude {
        Url::parse(entry).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid exclusion URL '{}': {}", entry, e))
        })?;
    }
    Ok(())
}

/// Validates the notification API settings
fn validate_indexing_api(api: &IndexingApiConfig) -> Result<(), ConfigError> {
    parse_http_url(&api.endpoint, "indexing-api endpoint")?;

    match (&api.access_token_env, &api.access_token_file) {
        (Some(_), Some(_)) => Err(ConfigError::Validation(
            "indexing-api takes either access-token-env or access-token-file, not both"
                .to_string(),
        )),
        (None, None) => Err(ConfigError::Validation(
            "indexing-api needs access-token-env or access-token-file".to_string(),
        )),
        (Some(var), None) if var.is_empty() => Err(ConfigError::Validation(
            "access-token-env cannot be empty".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Validates the search lookup settings
fn validate_search_api(api: &SearchApiConfig) -> Result<(), ConfigError> {
    parse_http_url(&api.endpoint, "search-api endpoint")?;

    if api.engine_id.is_empty() {
        return Err(ConfigError::Validation(
            "search-api engine-id cannot be empty".to_string(),
        ));
    }

    let has_key = api.api_key.as_deref().is_some_and(|k| !k.is_empty());
    let has_env = api.api_key_env.as_deref().is_some_and(|k| !k.is_empty());
    if !has_key && !has_env {
        return Err(ConfigError::Validation(
            "search-api needs api-key or api-key-env".to_string(),
        ));
    }

    Ok(())
}

fn parse_http_url(value: &str, what: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", what, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            what, value
        )));
    }

    Ok(url)
}
