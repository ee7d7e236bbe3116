//! Client for the Twinword sentiment API, served through `RapidAPI`.

use reqwest::{Client, StatusCode, Url};
use sentiscope_core::Sentiment;
use serde::Deserialize;

use crate::error::SentimentError;
use crate::types::{Analysis, AnalysisSource};

const DEFAULT_BASE_URL: &str = "https://twinword-sentiment-analysis.p.rapidapi.com/";
const RAPIDAPI_HOST: &str = "twinword-sentiment-analysis.p.rapidapi.com";

/// Scores inside `[-0.3, 0.3]` are labelled neutral.
const NEUTRAL_BAND: f64 = 0.3;
const DEFAULT_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Deserialize)]
struct TwinwordResponse {
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    ratio: Option<f64>,
}

/// Client for Twinword's `analyze` endpoint.
pub struct TwinwordClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl TwinwordClient {
    /// Creates a client pointed at the `RapidAPI` gateway.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, SentimentError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`SentimentError::Provider`] if `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SentimentError> {
        Ok(Self {
            client: super::http_client(timeout_secs)?,
            api_key: api_key.to_owned(),
            base_url: super::parse_base_url(AnalysisSource::Twinword, base_url)?,
        })
    }

    /// Analyzes `text`.
    ///
    /// # Errors
    ///
    /// - [`SentimentError::Unauthorized`] on HTTP 403.
    /// - [`SentimentError::RateLimited`] on HTTP 429.
    /// - [`SentimentError::Provider`] on any other non-2xx status.
    /// - [`SentimentError::Http`] on network failure.
    /// - [`SentimentError::Deserialize`] if the body is not the expected shape.
    pub async fn analyze(&self, text: &str) -> Result<Analysis, SentimentError> {
        let url = super::join(&self.base_url, AnalysisSource::Twinword, "analyze/")?;

        let response = self
            .client
            .get(url)
            .query(&[("text", text)])
            .header("X-RapidAPI-Key", self.api_key.as_str())
            .header("X-RapidAPI-Host", RAPIDAPI_HOST)
            .send()
            .await?;

        match response.status() {
            StatusCode::FORBIDDEN => {
                return Err(SentimentError::Unauthorized(AnalysisSource::Twinword));
            }
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(SentimentError::RateLimited(AnalysisSource::Twinword));
            }
            status if !status.is_success() => {
                return Err(SentimentError::Provider {
                    provider: AnalysisSource::Twinword,
                    message: format!("unexpected HTTP status {status}"),
                });
            }
            _ => {}
        }

        let body = response.text().await?;
        let parsed: TwinwordResponse =
            serde_json::from_str(&body).map_err(|e| SentimentError::Deserialize {
                context: "Twinword analyze".to_string(),
                source: e,
            })?;

        Ok(normalize(&parsed))
    }
}

fn normalize(response: &TwinwordResponse) -> Analysis {
    let score = response.score.unwrap_or(0.0);
    let confidence = match response.ratio {
        Some(ratio) if ratio != 0.0 => ratio.abs().clamp(0.0, 1.0),
        _ => DEFAULT_CONFIDENCE,
    };

    Analysis {
        sentiment: Sentiment::from_score_band(score, NEUTRAL_BAND),
        score,
        confidence,
        source: AnalysisSource::Twinword,
    }
}
