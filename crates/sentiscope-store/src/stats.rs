use serde::Serialize;
use sentiscope_core::Sentiment;

use crate::history::AnalysisRecord;

/// Per-label counts and mean confidence over a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentStats {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    /// `0.0` when there are no records.
    pub average_confidence: f64,
}

impl SentimentStats {
    #[must_use]
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a AnalysisRecord>) -> Self {
        let mut stats = Self::default();
        let mut confidence_sum = 0.0;

        for record in records {
            stats.total += 1;
            confidence_sum += record.confidence;
            match record.sentiment {
                Sentiment::Positive => stats.positive += 1,
                Sentiment::Negative => stats.negative += 1,
                Sentiment::Neutral => stats.neutral += 1,
            }
        }

        if stats.total > 0 {
            #[allow(clippy::cast_precision_loss)]
            let total = stats.total as f64;
            stats.average_confidence = confidence_sum / total;
        }
        stats
    }
}
