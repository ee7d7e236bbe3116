//! Bounded, newest-first analysis history.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use sentiscope_core::Sentiment;
use sentiscope_sentiment::{Analysis, AnalysisSource};
use serde::{Deserialize, Serialize};

use crate::stats::SentimentStats;
use crate::StoreError;

pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

// ---------------------------------------------------------------------------
// Record type
// ---------------------------------------------------------------------------

/// One stored analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: u64,
    pub text: String,
    pub sentiment: Sentiment,
    pub score: f64,
    pub confidence: f64,
    pub source: AnalysisSource,
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Capped history of analyses.
///
/// Ids start at 1 and are never reused, even after deletion or eviction.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    records: VecDeque<AnalysisRecord>,
    capacity: usize,
    next_id: u64,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryStore {
    /// Create an empty store holding at most `capacity` records (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 1,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Store an analysis as the newest record and return it.
    pub fn insert(
        &mut self,
        text: impl Into<String>,
        analysis: Analysis,
        timestamp: DateTime<Utc>,
    ) -> AnalysisRecord {
        let record = AnalysisRecord {
            id: self.next_id,
            text: text.into(),
            sentiment: analysis.sentiment,
            score: analysis.score,
            confidence: analysis.confidence,
            source: analysis.source,
            timestamp,
        };
        self.next_id += 1;

        self.records.push_front(record.clone());
        self.records.truncate(self.capacity);
        record
    }

    /// Newest-first records, optionally restricted to one label, at most `limit`.
    #[must_use]
    pub fn list(&self, filter: Option<Sentiment>, limit: usize) -> Vec<AnalysisRecord> {
        self.records
            .iter()
            .filter(|r| filter.is_none_or(|s| r.sentiment == s))
            .take(limit)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<&AnalysisRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Remove a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has this id.
    pub fn delete(&mut self, id: u64) -> Result<AnalysisRecord, StoreError> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        self.records.remove(index).ok_or(StoreError::NotFound(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> SentimentStats {
        SentimentStats::from_records(&self.records)
    }
}
