use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sentiment label attached to every analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Lowercase wire name of the label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Label for a numeric score inside a symmetric neutral band.
    ///
    /// Scores within `[-band, band]` are neutral; the band edges are
    /// inclusive.
    #[must_use]
    pub fn from_score_band(score: f64, band: f64) -> Self {
        if score > band {
            Sentiment::Positive
        } else if score < -band {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the three sentiment labels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sentiment label: '{0}'")]
pub struct ParseSentimentError(pub String);

impl FromStr for Sentiment {
    type Err = ParseSentimentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            _ => Err(ParseSentimentError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Sentiment::Negative).expect("serialize");
        assert_eq!(json, "\"negative\"");
    }

    #[test]
    fn parses_labels_case_insensitively() {
        assert_eq!("Positive".parse::<Sentiment>(), Ok(Sentiment::Positive));
        assert_eq!(" neutral ".parse::<Sentiment>(), Ok(Sentiment::Neutral));
        assert!("mixed".parse::<Sentiment>().is_err());
    }

    #[test]
    fn score_band_edges_are_neutral() {
        assert_eq!(Sentiment::from_score_band(0.3, 0.3), Sentiment::Neutral);
        assert_eq!(Sentiment::from_score_band(-0.3, 0.3), Sentiment::Neutral);
        assert_eq!(Sentiment::from_score_band(0.31, 0.3), Sentiment::Positive);
        assert_eq!(Sentiment::from_score_band(-0.31, 0.3), Sentiment::Negative);
    }
}
