//! In-memory analysis history for Sentiscope.
//!
//! Records are kept newest-first in a bounded buffer; once the buffer is
//! full the oldest record is evicted on every insert.

pub mod history;
pub mod stats;

use thiserror::Error;

pub use history::{AnalysisRecord, HistoryStore, DEFAULT_HISTORY_CAPACITY};
pub use stats::SentimentStats;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("analysis {0} not found")]
    NotFound(u64),
}
