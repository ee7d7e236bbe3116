//! Sentiment analysis for Sentiscope.
//!
//! The core is a deterministic lexicon scorer: text is tokenized, words are
//! weighted against positive and negative tables, adjusted by nearby
//! negations and intensity modifiers, and classified by threshold rules.
//! Remote providers (`MeaningCloud`, Hugging Face, Twinword) can be layered
//! in front of it through [`SentimentAnalyzer`], which always falls back to
//! the local scorer.

pub mod analyzer;
pub mod error;
pub mod lexicon;
pub mod providers;
pub mod scorer;
pub mod types;

pub use analyzer::SentimentAnalyzer;
pub use error::SentimentError;
pub use lexicon::{LexiconConfig, LexiconEntry, Multipliers, Thresholds};
pub use providers::RemoteProvider;
pub use scorer::{score, tokenize, ScoreBreakdown, Scorer, SentimentScore};
pub use types::{Analysis, AnalysisSource};
