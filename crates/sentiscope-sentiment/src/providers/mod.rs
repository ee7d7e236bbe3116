//! Remote sentiment providers.
//!
//! Each provider wraps one third-party API and normalizes its response into
//! an [`Analysis`]. [`providers_from_config`] builds the ordered list of
//! providers that have credentials configured.

mod hugging_face;
mod meaning_cloud;
mod twinword;

use std::time::Duration;

use reqwest::{Client, Url};
use sentiscope_core::AppConfig;

use crate::error::SentimentError;
use crate::types::{Analysis, AnalysisSource};

pub use hugging_face::HuggingFaceClient;
pub use meaning_cloud::MeaningCloudClient;
pub use twinword::TwinwordClient;

/// One configured remote backend.
pub enum RemoteProvider {
    MeaningCloud(MeaningCloudClient),
    HuggingFace(HuggingFaceClient),
    Twinword(TwinwordClient),
}

impl RemoteProvider {
    #[must_use]
    pub fn source(&self) -> AnalysisSource {
        match self {
            Self::MeaningCloud(_) => AnalysisSource::MeaningCloud,
            Self::HuggingFace(_) => AnalysisSource::HuggingFace,
            Self::Twinword(_) => AnalysisSource::Twinword,
        }
    }

    /// Analyze `text` with this provider.
    ///
    /// # Errors
    ///
    /// Returns the provider's [`SentimentError`] unchanged.
    pub async fn analyze(&self, text: &str) -> Result<Analysis, SentimentError> {
        match self {
            Self::MeaningCloud(client) => client.analyze(text).await,
            Self::HuggingFace(client) => client.analyze(text).await,
            Self::Twinword(client) => client.analyze(text).await,
        }
    }
}

/// Build every provider whose credential is present, in fallback order:
/// `MeaningCloud`, Hugging Face, Twinword.
///
/// # Errors
///
/// Returns [`SentimentError::Http`] if an HTTP client cannot be constructed.
pub fn providers_from_config(config: &AppConfig) -> Result<Vec<RemoteProvider>, SentimentError> {
    let timeout = config.provider_timeout_secs;
    let mut providers = Vec::new();

    if let Some(key) = &config.meaningcloud_api_key {
        providers.push(RemoteProvider::MeaningCloud(MeaningCloudClient::new(
            key, timeout,
        )?));
    }
    if let Some(token) = &config.huggingface_token {
        providers.push(RemoteProvider::HuggingFace(HuggingFaceClient::new(
            token,
            &config.huggingface_model,
            timeout,
        )?));
    }
    if let Some(key) = &config.rapidapi_key {
        providers.push(RemoteProvider::Twinword(TwinwordClient::new(key, timeout)?));
    }

    Ok(providers)
}

fn http_client(timeout_secs: u64) -> Result<Client, SentimentError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent("sentiscope/0.1")
        .build()?)
}

/// Parse `base_url`, normalized to end with exactly one slash so that
/// relative endpoint paths join beneath it.
fn parse_base_url(provider: AnalysisSource, base_url: &str) -> Result<Url, SentimentError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| SentimentError::Provider {
        provider,
        message: format!("invalid base URL '{base_url}': {e}"),
    })
}

fn join(base: &Url, provider: AnalysisSource, path: &str) -> Result<Url, SentimentError> {
    base.join(path).map_err(|e| SentimentError::Provider {
        provider,
        message: format!("invalid endpoint path '{path}': {e}"),
    })
}
