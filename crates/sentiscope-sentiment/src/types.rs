use std::fmt;

use serde::{Deserialize, Serialize};
use sentiscope_core::Sentiment;

use crate::scorer::SentimentScore;

/// Where an [`Analysis`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    Local,
    MeaningCloud,
    HuggingFace,
    Twinword,
}

impl AnalysisSource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::MeaningCloud => "meaning_cloud",
            Self::HuggingFace => "hugging_face",
            Self::Twinword => "twinword",
        }
    }
}

impl fmt::Display for AnalysisSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Local => "local lexicon",
            Self::MeaningCloud => "MeaningCloud",
            Self::HuggingFace => "Hugging Face",
            Self::Twinword => "Twinword",
        };
        f.write_str(name)
    }
}

/// A normalized sentiment result, regardless of which backend produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub sentiment: Sentiment,
    /// Signed polarity; the scale depends on `source`.
    pub score: f64,
    pub confidence: f64,
    pub source: AnalysisSource,
}

impl Analysis {
    /// Wrap a local lexicon result.
    #[must_use]
    pub fn local(result: SentimentScore) -> Self {
        Self {
            sentiment: result.sentiment,
            score: result.score,
            confidence: result.confidence,
            source: AnalysisSource::Local,
        }
    }
}
