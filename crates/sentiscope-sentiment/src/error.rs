use sentiscope_core::ConfigError;
use thiserror::Error;

use crate::types::AnalysisSource;

/// Errors returned by the remote providers and the analyzer setup.
#[derive(Debug, Error)]
pub enum SentimentError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered but reported a failure.
    #[error("{provider} error: {message}")]
    Provider {
        provider: AnalysisSource,
        message: String,
    },

    #[error("{0} rejected the API key")]
    Unauthorized(AnalysisSource),

    #[error("{0} rate limit exceeded")]
    RateLimited(AnalysisSource),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
