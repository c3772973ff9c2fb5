//! Index presence lookup
//!
//! A URL counts as indexed when a `site:<url>` query against the search
//! endpoint returns at least one item.

use crate::api::credentials::resolve_search_key;
use crate::api::error::{classify, ApiError, ProviderError};
use crate::config::SearchApiConfig;
use crate::IndexerError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Checks whether a URL is present in the search index
#[async_trait]
pub trait SearchApi: Send + Sync {
    async fn is_indexed(&self, url: &str) -> Result<bool, ApiError>;
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<serde_json::Value>,
    error: Option<ProviderError>,
}

/// HTTP implementation of [`SearchApi`]
pub struct HttpSearchClient {
    client: Client,
    endpoint: String,
    api_key: String,
    engine_id: String,
}

impl HttpSearchClient {
    pub fn new(
        client: Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        engine_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            engine_id: engine_id.into(),
        }
    }

    pub fn from_config(client: Client, config: &SearchApiConfig) -> Result<Self, IndexerError> {
        let api_key = resolve_search_key(config)?;
        Ok(Self::new(
            client,
            config.endpoint.clone(),
            api_key,
            config.engine_id.clone(),
        ))
    }
}

#[async_trait]
impl SearchApi for HttpSearchClient {
    async fn is_indexed(&self, url: &str) -> Result<bool, ApiError> {
        let query = format!("site:{}", url);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let parsed: Option<SearchResponse> = serde_json::from_slice(&body).ok();

        match parsed {
            Some(SearchResponse {
                error: Some(error), ..
            }) => Err(classify(status.as_u16(), Some(error))),
            _ if !status.is_success() => Err(classify(status.as_u16(), None)),
            Some(response) => Ok(!response.items.is_empty()),
            None => Err(ApiError::Malformed(format!(
                "unexpected search response: {}",
                String::from_utf8_lossy(&body)
            ))),
        }
    }
}
