//! HTTP fetcher for sitemap documents
//!
//! This module handles:
//! - Building the per-run HTTP client with the configured user agent
//! - GET requests for sitemap documents
//! - Error classification

use crate::config::HttpConfig;
use reqwest::Client;
use thiserror::Error;

/// Why a sitemap could not be fetched
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status
    #[error("HTTP {status_code}")]
    Status { status_code: u16 },

    /// Connection refused, DNS failure, body read failure, ...
    #[error("network error: {0}")]
    Network(String),
}

/// Builds the HTTP client shared by every component of one run
///
/// Request timeouts are left at the client defaults.
///
/// # Example
///
/// ```no_run
/// use sitemap_indexer::config::HttpConfig;
/// use sitemap_indexer::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a sitemap document and returns its raw body
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 2xx | `Ok(body)` |
/// | Other HTTP status | `FetchError::Status` |
/// | Connection/timeout/body error | `FetchError::Network` |
pub async fn fetch_sitemap(client: &Client, url: &str) -> Result<Vec<u8>, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::Network(classify_network_error(&e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status_code: status.as_u16(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    Ok(body.to_vec())
}

fn classify_network_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timeout".to_string()
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        e.to_string()
    }
}
