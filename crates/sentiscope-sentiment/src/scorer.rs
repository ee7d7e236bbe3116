//! Lexicon scorer: tokenizer, weighted matcher, context modifiers, and the
//! threshold classifier.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use sentiscope_core::{ConfigError, Sentiment};
use serde::Serialize;

use crate::lexicon::{LexiconConfig, LexiconEntry};

static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid non-word regex"));

static DEFAULT_SCORER: LazyLock<Scorer> = LazyLock::new(Scorer::default);

const MIN_CONFIDENCE: f64 = 0.3;
const MAX_CONFIDENCE: f64 = 0.95;
const SHORT_TEXT_TOKENS: usize = 3;
const LONG_TEXT_TOKENS: usize = 20;

/// Label, normalized score, and confidence for one text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentScore {
    pub sentiment: Sentiment,
    pub score: f64,
    /// Always within `[0.3, 0.95]`.
    pub confidence: f64,
}

/// Intermediate counters from one scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub token_count: usize,
    /// Tokens that contributed a nonzero weight.
    pub word_count: usize,
    /// Tokens matched against the lexicon, exactly or partially.
    pub sentiment_word_count: usize,
    pub neutral_count: usize,
    pub total_score: f64,
    pub normalized_score: f64,
    pub sentiment_density: f64,
    pub neutral_density: f64,
    pub result: SentimentScore,
}

/// Lowercase `text` and replace every non-word, non-space character by a space.
#[must_use]
pub fn clean_text(text: &str) -> String {
    NON_WORD_RE.replace_all(&text.to_lowercase(), " ").into_owned()
}

/// Split `text` into lowercase word tokens with punctuation removed.
///
/// Empty or whitespace-only input yields no tokens.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    clean_text(text)
        .split_whitespace()
        .map(ToOwned::to_owned)
        .collect()
}

/// Score `text` with the built-in lexicon.
#[must_use]
pub fn score(text: &str) -> SentimentScore {
    DEFAULT_SCORER.score(text)
}

/// Immutable scorer built from a [`LexiconConfig`].
///
/// Holds lookup indexes derived from the configuration; scoring never
/// mutates them, so one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct Scorer {
    config: LexiconConfig,
    positive: HashMap<String, f64>,
    negative: HashMap<String, f64>,
    neutral: HashSet<String>,
    negations: HashSet<String>,
    intensifiers: HashSet<String>,
    diminishers: HashSet<String>,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::build(LexiconConfig::default())
    }
}

impl Scorer {
    /// Build a scorer from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if the configuration is invalid.
    pub fn new(config: LexiconConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: LexiconConfig) -> Self {
        let table = |entries: &[LexiconEntry]| -> HashMap<String, f64> {
            let mut map = HashMap::with_capacity(entries.len());
            for entry in entries {
                // First definition wins, matching partial-match precedence.
                map.entry(entry.word.clone()).or_insert(entry.weight);
            }
            map
        };
        let set = |words: &[String]| -> HashSet<String> { words.iter().cloned().collect() };

        Self {
            positive: table(&config.positive),
            negative: table(&config.negative),
            neutral: set(&config.neutral_indicators),
            negations: set(&config.negations),
            intensifiers: set(&config.intensifiers),
            diminishers: set(&config.diminishers),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &LexiconConfig {
        &self.config
    }

    /// Classify `text`.
    #[must_use]
    pub fn score(&self, text: &str) -> SentimentScore {
        self.score_detailed(text).result
    }

    /// Classify `text` and return the counters behind the result.
    #[must_use]
    pub fn score_detailed(&self, text: &str) -> ScoreBreakdown {
        let cleaned = clean_text(text);
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();

        let mut neutral_count = self.neutral_phrase_hits(&cleaned);
        let mut sentiment_word_count = 0_usize;
        let mut word_count = 0_usize;
        let mut total_score = 0.0_f64;

        for (i, token) in tokens.iter().copied().enumerate() {
            if self.neutral.contains(token) {
                neutral_count += 1;
                continue;
            }

            let Some(weight) = self.match_weight(token) else {
                continue;
            };
            sentiment_word_count += 1;

            let window = &tokens[i.saturating_sub(2)..i];
            total_score += weight * self.context_multiplier(window);
            word_count += 1;
        }

        let token_count = tokens.len();
        #[allow(clippy::cast_precision_loss)]
        let normalized_score = if word_count > 0 {
            total_score / (word_count as f64).sqrt()
        } else {
            0.0
        };
        #[allow(clippy::cast_precision_loss)]
        let denom = token_count.max(1) as f64;
        #[allow(clippy::cast_precision_loss)]
        let sentiment_density = sentiment_word_count as f64 / denom;
        #[allow(clippy::cast_precision_loss)]
        let neutral_density = neutral_count as f64 / denom;

        let (sentiment, confidence) = self.classify(
            normalized_score,
            neutral_count,
            sentiment_density,
            neutral_density,
        );
        let confidence = adjust_for_length(confidence, token_count);

        ScoreBreakdown {
            token_count,
            word_count,
            sentiment_word_count,
            neutral_count,
            total_score,
            normalized_score,
            sentiment_density,
            neutral_density,
            result: SentimentScore {
                sentiment,
                score: normalized_score,
                confidence,
            },
        }
    }

    /// Word-count weighted hits of neutral indicators anywhere in the cleaned text.
    ///
    /// Single-word indicators found here are counted again by the per-token
    /// pass when they appear as whole tokens.
    fn neutral_phrase_hits(&self, cleaned: &str) -> usize {
        self.config
            .neutral_indicators
            .iter()
            .filter(|phrase| cleaned.contains(phrase.as_str()))
            .map(|phrase| phrase.split_whitespace().count())
            .sum()
    }

    /// Raw lexicon weight for a token, or `None` when nothing matches.
    fn match_weight(&self, token: &str) -> Option<f64> {
        if let Some(&weight) = self.positive.get(token) {
            return Some(weight);
        }
        if let Some(&weight) = self.negative.get(token) {
            return Some(weight);
        }
        if token.chars().count() < self.config.partial_min_token_len {
            return None;
        }

        let factor = self.config.multipliers.partial_match;
        if let Some(entry) = first_partial(&self.config.positive, token) {
            let weight = (entry.weight * factor).max(0.0);
            if weight != 0.0 {
                return Some(weight);
            }
        }
        if let Some(entry) = first_partial(&self.config.negative, token) {
            let weight = (entry.weight * factor).min(0.0);
            if weight != 0.0 {
                return Some(weight);
            }
        }
        None
    }

    /// Combined negation and intensity multiplier for the tokens preceding a match.
    fn context_multiplier(&self, window: &[&str]) -> f64 {
        let multipliers = &self.config.multipliers;
        let mut modifier = 1.0;

        if window.iter().any(|w| self.negations.contains(*w)) {
            modifier *= multipliers.negation;
        }

        for word in window {
            if self.intensifiers.contains(*word) {
                modifier *= multipliers.intensifier;
                break;
            }
            if self.diminishers.contains(*word) {
                modifier *= multipliers.diminisher;
                break;
            }
        }

        modifier
    }

    fn classify(
        &self,
        score: f64,
        neutral_count: usize,
        sentiment_density: f64,
        neutral_density: f64,
    ) -> (Sentiment, f64) {
        let weak = self.config.thresholds.weak;
        let strong = self.config.thresholds.strong;
        let magnitude = score.abs();

        if magnitude < weak {
            if neutral_count > 0 {
                return (Sentiment::Neutral, (0.7 + neutral_density).min(0.9));
            }
            return (Sentiment::Neutral, (0.8 - magnitude).max(0.5));
        }

        let strong_confidence = || (0.6 + (magnitude - strong) * 0.2 + sentiment_density).min(0.95);
        let mild_confidence = || (0.5 + magnitude * 0.3 + sentiment_density).min(0.85);

        if score >= strong {
            (Sentiment::Positive, strong_confidence())
        } else if score <= -strong {
            (Sentiment::Negative, strong_confidence())
        } else if score > weak {
            (Sentiment::Positive, mild_confidence())
        } else if score < -weak {
            (Sentiment::Negative, mild_confidence())
        } else {
            // Exactly on the weak threshold.
            (Sentiment::Neutral, 0.6)
        }
    }
}

fn first_partial<'a>(table: &'a [LexiconEntry], token: &str) -> Option<&'a LexiconEntry> {
    table
        .iter()
        .find(|entry| token.contains(entry.word.as_str()) || entry.word.contains(token))
}

fn adjust_for_length(confidence: f64, token_count: usize) -> f64 {
    let adjusted = if token_count < SHORT_TEXT_TOKENS {
        confidence * 0.8
    } else if token_count > LONG_TEXT_TOKENS {
        (confidence * 1.1).min(MAX_CONFIDENCE)
    } else {
        confidence
    };
    adjusted.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

#[cfg(test)]
#[path = "scorer_test.rs"]
mod tests;
