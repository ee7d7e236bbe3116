//! Client for the `MeaningCloud` sentiment analysis API (v2.1).

use reqwest::{Client, Url};
use sentiscope_core::Sentiment;
use serde::Deserialize;

use crate::error::SentimentError;
use crate::types::{Analysis, AnalysisSource};

const DEFAULT_BASE_URL: &str = "https://api.meaningcloud.com/";

/// Scores inside `[-0.1, 0.1]` are labelled neutral.
const NEUTRAL_BAND: f64 = 0.1;

#[derive(Debug, Deserialize)]
struct MeaningCloudResponse {
    status: Status,
    #[serde(default)]
    score_tag: Option<String>,
    #[serde(default)]
    confidence: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Status {
    code: String,
    #[serde(default)]
    msg: String,
}

/// Client for `MeaningCloud`'s `sentiment-2.1` endpoint.
pub struct MeaningCloudClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl MeaningCloudClient {
    /// Creates a client pointed at the production API.
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
            base_url: super::parse_base_url(AnalysisSource::MeaningCloud, base_url)?,
        })
    }

    /// Analyzes `text` in English.
    ///
    /// # Errors
    ///
    /// - [`SentimentError::Http`] on network failure or non-2xx status.
    /// - [`SentimentError::Provider`] if the API reports a non-zero status code.
    /// - [`SentimentError::Deserialize`] if the body is not the expected shape.
    pub async fn analyze(&self, text: &str) -> Result<Analysis, SentimentError> {
        let url = super::join(&self.base_url, AnalysisSource::MeaningCloud, "sentiment-2.1")?;
        let form = [
            ("key", self.api_key.as_str()),
            ("txt", text),
            ("lang", "en"),
        ];

        let body = self
            .client
            .post(url)
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let response: MeaningCloudResponse =
            serde_json::from_str(&body).map_err(|e| SentimentError::Deserialize {
                context: "MeaningCloud sentiment-2.1".to_string(),
                source: e,
            })?;

        if response.status.code != "0" {
            return Err(SentimentError::Provider {
                provider: AnalysisSource::MeaningCloud,
                message: format!("status {}: {}", response.status.code, response.status.msg),
            });
        }

        let score = score_from_tag(response.score_tag.as_deref().unwrap_or("NONE"));
        let confidence = response
            .confidence
            .as_deref()
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .map_or(0.0, |pct| (pct / 100.0).clamp(0.0, 1.0));

        Ok(Analysis {
            sentiment: Sentiment::from_score_band(score, NEUTRAL_BAND),
            score,
            confidence,
            source: AnalysisSource::MeaningCloud,
        })
    }
}

/// Map a `score_tag` polarity code to a signed score.
fn score_from_tag(tag: &str) -> f64 {
    match tag.trim() {
        "P+" => 1.0,
        "P" => 0.5,
        "N" => -0.5,
        "N+" => -1.0,
        // NEU, NONE, and anything unrecognised.
        _ => 0.0,
    }
}
