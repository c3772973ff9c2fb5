//! Credential lookup for the notification and search APIs

use crate::config::{IndexingApiConfig, SearchApiConfig};
use crate::IndexerError;

/// Loads the OAuth access token used for URL notifications
///
/// The token comes from the configured environment variable or file; an
/// empty value counts as missing.
pub fn load_access_token(config: &IndexingApiConfig) -> Result<String, IndexerError> {
    if let Some(var) = &config.access_token_env {
        return read_env(var);
    }

    if let Some(path) = &config.access_token_file {
        let content = std::fs::read_to_string(path).map_err(|e| {
            IndexerError::Credential(format!(
                "cannot read access token file {}: {}",
                path.display(),
                e
            ))
        })?;
        return non_empty(content, || {
            format!("access token file {} is empty", path.display())
        });
    }

    Err(IndexerError::Credential(
        "no access token source configured".to_string(),
    ))
}

/// Resolves the search API key from the config or its environment variable
pub fn resolve_search_key(config: &SearchApiConfig) -> Result<String, IndexerError> {
    if let Some(key) = &config.api_key {
        return non_empty(key.clone(), || "search api-key is empty".to_string());
    }

    match &config.api_key_env {
        Some(var) => read_env(var),
        None => Err(IndexerError::Credential(
            "no search API key configured".to_string(),
        )),
    }
}

fn read_env(var: &str) -> Result<String, IndexerError> {
    let value = std::env::var(var).map_err(|_| {
        IndexerError::Credential(format!("environment variable {} is not set", var))
    })?;
    non_empty(value, || format!("environment variable {} is empty", var))
}

fn non_empty(value: String, message: impl FnOnce() -> String) -> Result<String, IndexerError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(IndexerError::Credential(message()))
    } else {
        Ok(trimmed.to_string())
    }
}
