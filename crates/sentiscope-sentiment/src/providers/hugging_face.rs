//! Client for the Hugging Face Inference API, using a three-class sentiment model.

use reqwest::{Client, Url};
use sentiscope_core::Sentiment;
use serde::Deserialize;

use crate::error::SentimentError;
use crate::types::{Analysis, AnalysisSource};

const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co/";

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// The API returns either `[[{label, score}, ...]]` or a flat list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl InferenceResponse {
    fn into_scores(self) -> Vec<LabelScore> {
        match self {
            Self::Nested(outer) => outer.into_iter().next().unwrap_or_default(),
            Self::Flat(scores) => scores,
        }
    }
}

/// Client for a hosted text-classification model.
pub struct HuggingFaceClient {
    client: Client,
    token: String,
    model: String,
    base_url: Url,
}

impl HuggingFaceClient {
    /// Creates a client pointed at the hosted inference API.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(token: &str, model: &str, timeout_secs: u64) -> Result<Self, SentimentError> {
        Self::with_base_url(token, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`SentimentError::Provider`] if `base_url` is not a valid URL.
    pub fn with_base_url(
        token: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SentimentError> {
        Ok(Self {
            client: super::http_client(timeout_secs)?,
            token: token.to_owned(),
            model: model.trim_matches('/').to_owned(),
            base_url: super::parse_base_url(AnalysisSource::HuggingFace, base_url)?,
        })
    }

    /// Classifies `text` with the configured model.
    ///
    /// # Errors
    ///
    /// - [`SentimentError::Http`] on network failure or non-2xx status.
    /// - [`SentimentError::Deserialize`] if the body is not a label/score list.
    pub async fn analyze(&self, text: &str) -> Result<Analysis, SentimentError> {
        let path = format!("models/{}", self.model);
        let url = super::join(&self.base_url, AnalysisSource::HuggingFace, &path)?;

        let body = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "inputs": text }))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let response: InferenceResponse =
            serde_json::from_str(&body).map_err(|e| SentimentError::Deserialize {
                context: format!("Hugging Face models/{}", self.model),
                source: e,
            })?;

        Ok(classify(&response.into_scores()))
    }
}

/// Pick the winning class from per-label probabilities.
fn classify(scores: &[LabelScore]) -> Analysis {
    let (mut positive, mut negative, mut neutral): (Option<f64>, Option<f64>, Option<f64>) =
        (None, None, None);
    for entry in scores {
        // First occurrence of a label wins.
        let slot = match entry.label.to_ascii_lowercase().as_str() {
            "label_2" | "positive" => &mut positive,
            "label_0" | "negative" => &mut negative,
            "label_1" | "neutral" => &mut neutral,
            _ => continue,
        };
        slot.get_or_insert(entry.score);
    }
    let positive = positive.unwrap_or(0.0);
    let negative = negative.unwrap_or(0.0);
    let neutral = neutral.unwrap_or(0.0);

    let (sentiment, confidence) = if positive > negative && positive > neutral {
        (Sentiment::Positive, positive)
    } else if negative > positive && negative > neutral {
        (Sentiment::Negative, negative)
    } else {
        (Sentiment::Neutral, neutral)
    };

    Analysis {
        sentiment,
        score: positive - negative,
        confidence,
        source: AnalysisSource::HuggingFace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(raw: &[(&str, f64)]) -> Vec<LabelScore> {
        raw.iter()
            .map(|&(label, score)| LabelScore {
                label: label.to_string(),
                score,
            })
            .collect()
    }

    #[test]
    fn classify_picks_highest_polar_label() {
        let analysis = classify(&scores(&[
            ("LABEL_0", 0.05),
            ("LABEL_1", 0.15),
            ("LABEL_2", 0.80),
        ]));
        assert_eq!(analysis.sentiment, Sentiment::Positive);
        assert!((analysis.score - 0.75).abs() < 1e-9);
        assert!((analysis.confidence - 0.80).abs() < 1e-9);
    }

    #[test]
    fn classify_accepts_named_labels() {
        let analysis = classify(&scores(&[("Negative", 0.7), ("neutral", 0.2), ("positive", 0.1)]));
        assert_eq!(analysis.sentiment, Sentiment::Negative);
    }

    #[test]
    fn classify_ties_fall_back_to_neutral() {
        let analysis = classify(&scores(&[("LABEL_0", 0.4), ("LABEL_2", 0.4), ("LABEL_1", 0.2)]));
        assert_eq!(analysis.sentiment, Sentiment::Neutral);
        assert!((analysis.confidence - 0.2).abs() < 1e-9);
    }

    #[test]
    fn classify_empty_is_neutral_zero() {
        let analysis = classify(&[]);
        assert_eq!(analysis.sentiment, Sentiment::Neutral);
        assert!(analysis.score.abs() < f64::EPSILON);
    }

    #[test]
    fn classify_uses_first_occurrence_of_repeated_label() {
        let analysis = classify(&scores(&[
            ("LABEL_2", 0.7),
            ("LABEL_0", 0.2),
            ("positive", 0.1),
            ("LABEL_1", 0.1),
        ]));
        assert_eq!(analysis.sentiment, Sentiment::Positive);
        assert!((analysis.confidence - 0.7).abs() < 1e-9);
        assert!((analysis.score - 0.5).abs() < 1e-9);
    }
}
