use thiserror::Error;

/// Outcome of a failed notification or search call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The provider's daily quota is used up (HTTP 429 or error code 429)
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The provider rejected the request for any other reason
    #[error("provider error {code}: {message}")]
    Provider { code: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    pub fn is_quota(&self) -> bool {
        matches!(self, Self::QuotaExceeded(_))
    }
}

/// Error payload returned by the provider (`{"error": {"code": ..., "message": ...}}`)
#[derive(Debug, Clone, serde::Deserialize)]
pub(crate) struct ProviderError {
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
}

pub(crate) const QUOTA_STATUS: u16 = 429;

/// Classifies a provider error payload and/or HTTP status
///
/// HTTP 429 or an error code of 429 means quota; anything else is a provider
/// error carrying the most specific code available.
pub(crate) fn classify(status: u16, error: Option<ProviderError>) -> ApiError {
    let code = error.as_ref().and_then(|e| e.code).unwrap_or(status);
    let message = error
        .map(|e| e.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status));

    if status == QUOTA_STATUS || code == QUOTA_STATUS {
        ApiError::QuotaExceeded(message)
    } else {
        ApiError::Provider { code, message }
    }
}
