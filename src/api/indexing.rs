//! URL notification client
//!
//! Each notification is a JSON `POST {"url": ..., "type": "URL_UPDATED"}`
//! authorized with a bearer token. The provider enforces a daily quota and
//! answers HTTP 429 (or an error body with code 429) once it is exhausted.

use crate::api::credentials::load_access_token;
use crate::api::error::{classify, ApiError, ProviderError};
use crate::config::IndexingApiConfig;
use crate::IndexerError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Requests (re)indexing of a URL
#[async_trait]
pub trait IndexingApi: Send + Sync {
    /// Sends one "URL updated" notification
    async fn publish(&self, url: &str) -> Result<(), ApiError>;
}

#[derive(Serialize)]
struct Notification<'a> {
    url: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct PublishResponse {
    error: Option<ProviderError>,
}

/// HTTP implementation of [`IndexingApi`]
pub struct HttpIndexingClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl HttpIndexingClient {
    pub fn new(client: Client, endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }

    /// Builds the client from configuration, loading the access token
    pub fn from_config(client: Client, config: &IndexingApiConfig) -> Result<Self, IndexerError> {
        let token = load_access_token(config)?;
        Ok(Self::new(client, config.endpoint.clone(), token))
    }
}

#[async_trait]
impl IndexingApi for HttpIndexingClient {
    async fn publish(&self, url: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&Notification {
                url,
                kind: "URL_UPDATED",
            })
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let parsed: Option<PublishResponse> = serde_json::from_slice(&body).ok();

        match parsed {
            Some(PublishResponse { error: Some(error) }) => {
                Err(classify(status.as_u16(), Some(error)))
            }
            _ if !status.is_success() => Err(classify(status.as_u16(), None)),
            Some(_) => Ok(()),
            None => Err(ApiError::Malformed(format!(
                "unexpected notification response: {}",
                String::from_utf8_lossy(&body)
            ))),
        }
    }
}
