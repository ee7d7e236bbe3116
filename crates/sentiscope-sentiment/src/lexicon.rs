//! Lexicon tables, modifier sets, and scoring constants.
//!
//! [`LexiconConfig`] is the single configuration object consumed by
//! [`Scorer`](crate::scorer::Scorer). The built-in default can be replaced
//! wholesale or partially by a YAML file; any field missing from the file
//! falls back to the default.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sentiscope_core::ConfigError;

/// One weighted lexicon word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub word: String,
    pub weight: f64,
}

impl LexiconEntry {
    fn new(word: &str, weight: f64) -> Self {
        Self {
            word: word.to_string(),
            weight,
        }
    }
}

/// Label thresholds applied to the normalized score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Below this absolute score a text is neutral.
    pub weak: f64,
    /// At or above this absolute score a text is strongly polar.
    pub strong: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            weak: 0.3,
            strong: 1.0,
        }
    }
}

/// Multipliers applied by the matcher and the context modifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Multipliers {
    pub partial_match: f64,
    pub negation: f64,
    pub intensifier: f64,
    pub diminisher: f64,
}

impl Default for Multipliers {
    fn default() -> Self {
        Self {
            partial_match: 0.7,
            negation: -0.8,
            intensifier: 1.3,
            diminisher: 0.6,
        }
    }
}

/// Complete scorer configuration.
///
/// Table order is significant: partial matching takes the first entry, in
/// definition order, whose word contains or is contained in the token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    pub positive: Vec<LexiconEntry>,
    pub negative: Vec<LexiconEntry>,
    pub neutral_indicators: Vec<String>,
    pub negations: Vec<String>,
    pub intensifiers: Vec<String>,
    pub diminishers: Vec<String>,
    pub multipliers: Multipliers,
    pub thresholds: Thresholds,
    /// Tokens shorter than this (in characters) are only matched exactly.
    pub partial_min_token_len: usize,
}

const POSITIVE_WORDS: &[(&str, f64)] = &[
    // Strong
    ("amazing", 2.0),
    ("fantastic", 2.0),
    ("excellent", 2.0),
    ("outstanding", 2.0),
    ("spectacular", 2.0),
    ("incredible", 2.0),
    ("wonderful", 2.0),
    ("brilliant", 2.0),
    ("superb", 2.0),
    ("phenomenal", 2.0),
    ("marvelous", 2.0),
    ("magnificent", 2.0),
    ("exceptional", 2.0),
    ("terrific", 2.0),
    ("fabulous", 2.0),
    ("perfect", 2.0),
    ("awesome", 2.0),
    ("love", 2.0),
    // Moderate
    ("great", 1.5),
    ("good", 1.5),
    ("nice", 1.5),
    ("pleasant", 1.5),
    ("satisfied", 1.5),
    ("happy", 1.5),
    ("delighted", 1.5),
    ("impressed", 1.5),
    ("beautiful", 1.5),
    ("lovely", 1.5),
    ("enjoy", 1.5),
    ("helpful", 1.5),
    ("friendly", 1.5),
    // Mild
    ("like", 1.0),
    ("easy", 1.0),
    ("recommend", 1.0),
    ("decent", 1.0),
    ("fine", 1.0),
    ("pretty", 1.0),
    // Weak
    ("okay", 0.5),
    ("ok", 0.5),
    ("alright", 0.5),
    ("fair", 0.5),
];

const NEGATIVE_WORDS: &[(&str, f64)] = &[
    // Strong
    ("terrible", -2.0),
    ("awful", -2.0),
    ("horrible", -2.0),
    ("disgusting", -2.0),
    ("pathetic", -2.0),
    ("dreadful", -2.0),
    ("appalling", -2.0),
    ("atrocious", -2.0),
    ("abysmal", -2.0),
    ("catastrophic", -2.0),
    ("hate", -2.0),
    ("worst", -2.0),
    // Moderate
    ("bad", -1.5),
    ("poor", -1.5),
    ("disappointing", -1.5),
    ("frustrating", -1.5),
    ("annoying", -1.5),
    ("useless", -1.5),
    ("waste", -1.5),
    ("broken", -1.5),
    ("ridiculous", -1.5),
    ("stupid", -1.5),
    ("overpriced", -1.5),
    ("boring", -1.5),
    ("confusing", -1.5),
    ("crappy", -1.5),
    ("garbage", -1.5),
    // Mild
    ("dislike", -1.0),
    ("slow", -1.0),
    ("unhelpful", -1.0),
    ("rude", -1.0),
    ("inadequate", -1.0),
    ("inferior", -1.0),
    ("buggy", -1.0),
    ("irritating", -1.0),
    // Weak
    ("mediocre", -0.5),
];

const NEUTRAL_INDICATORS: &[&str] = &[
    "neutral",
    "unsure",
    "uncertain",
    "maybe",
    "perhaps",
    "somewhat",
    "kind of",
    "sort of",
    "not sure",
    "undecided",
    "mixed",
    "average",
    "moderate",
    "typical",
    "standard",
    "regular",
    "normal",
    "usual",
    "ordinary",
    "so-so",
    "meh",
    "nothing special",
    "not bad",
    "not good",
    "could be better",
    "could be worse",
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nothing", "nowhere", "neither", "nobody", "none", "hardly", "barely",
];

const INTENSIFIERS: &[&str] = &[
    "very",
    "extremely",
    "really",
    "quite",
    "pretty",
    "rather",
    "totally",
    "completely",
    "absolutely",
    "definitely",
];

const DIMINISHERS: &[&str] = &[
    "slightly", "somewhat", "a bit", "a little", "kind of", "sort of", "rather", "fairly",
];

fn entries(words: &[(&str, f64)]) -> Vec<LexiconEntry> {
    words
        .iter()
        .map(|&(word, weight)| LexiconEntry::new(word, weight))
        .collect()
}

fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            positive: entries(POSITIVE_WORDS),
            negative: entries(NEGATIVE_WORDS),
            neutral_indicators: strings(NEUTRAL_INDICATORS),
            negations: strings(NEGATIONS),
            intensifiers: strings(INTENSIFIERS),
            diminishers: strings(DIMINISHERS),
            multipliers: Multipliers::default(),
            thresholds: Thresholds::default(),
            partial_min_token_len: 4,
        }
    }
}

impl LexiconConfig {
    /// Load and validate a lexicon from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LexiconFileIo {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate a lexicon from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the text cannot be parsed or fails validation.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::LexiconFileParse` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check table signs, word normalization, and threshold ordering.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_table("positive", &self.positive, |w| w > 0.0)?;
        validate_table("negative", &self.negative, |w| w < 0.0)?;

        for (name, words) in [
            ("neutral_indicators", &self.neutral_indicators),
            ("negations", &self.negations),
            ("intensifiers", &self.intensifiers),
            ("diminishers", &self.diminishers),
        ] {
            for word in words {
                check_word(name, word)?;
            }
        }

        let Thresholds { weak, strong } = self.thresholds;
        if !(weak > 0.0 && weak < strong) {
            return Err(ConfigError::Validation(format!(
                "thresholds must satisfy 0 < weak < strong (got weak={weak}, strong={strong})"
            )));
        }

        let partial = self.multipliers.partial_match;
        if !(partial > 0.0 && partial <= 1.0) {
            return Err(ConfigError::Validation(format!(
                "partial_match multiplier must be in (0, 1] (got {partial})"
            )));
        }

        Ok(())
    }
}

fn validate_table(
    name: &str,
    table: &[LexiconEntry],
    sign_ok: impl Fn(f64) -> bool,
) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for entry in table {
        check_word(name, &entry.word)?;
        if !entry.weight.is_finite() || !sign_ok(entry.weight) {
            return Err(ConfigError::Validation(format!(
                "{name} word '{}' has weight {} with the wrong sign",
                entry.word, entry.weight
            )));
        }
        if !seen.insert(entry.word.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate {name} word: '{}'",
                entry.word
            )));
        }
    }
    Ok(())
}

fn check_word(name: &str, word: &str) -> Result<(), ConfigError> {
    if word.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "{name} contains an empty word"
        )));
    }
    if word != word.to_lowercase() || word != word.trim() {
        return Err(ConfigError::Validation(format!(
            "{name} word '{word}' must be lowercase and trimmed"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        LexiconConfig::default()
            .validate()
            .expect("default lexicon should validate");
    }

    #[test]
    fn default_tables_keep_definition_order() {
        let config = LexiconConfig::default();
        assert_eq!(config.positive.first().map(|e| e.word.as_str()), Some("amazing"));
        assert_eq!(config.negative.last().map(|e| e.word.as_str()), Some("mediocre"));
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let yaml = "thresholds:\n  weak: 0.2\n  strong: 0.9\n";
        let config = LexiconConfig::from_yaml_str(yaml).expect("valid yaml");
        assert!((config.thresholds.weak - 0.2).abs() < f64::EPSILON);
        assert_eq!(config.positive, LexiconConfig::default().positive);
    }

    #[test]
    fn yaml_replaces_tables() {
        let yaml = "\
positive:
  - { word: shiny, weight: 2.0 }
negative:
  - { word: rusty, weight: -1.0 }
";
        let config = LexiconConfig::from_yaml_str(yaml).expect("valid yaml");
        assert_eq!(config.positive.len(), 1);
        assert_eq!(config.negative[0].word, "rusty");
    }

    #[test]
    fn positive_word_with_negative_weight_is_rejected() {
        let yaml = "positive:\n  - { word: shiny, weight: -2.0 }\n";
        let err = LexiconConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref msg) if msg.contains("shiny")));
    }

    #[test]
    fn uppercase_word_is_rejected() {
        let mut config = LexiconConfig::default();
        config.negations.push("NOT".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn duplicate_word_is_rejected() {
        let mut config = LexiconConfig::default();
        config.positive.push(LexiconEntry::new("amazing", 1.0));
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref msg) if msg.contains("duplicate")));
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let mut config = LexiconConfig::default();
        config.thresholds = Thresholds {
            weak: 1.0,
            strong: 0.3,
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn yaml_round_trips_through_to_yaml() {
        let config = LexiconConfig::default();
        let yaml = config.to_yaml().expect("serialize");
        let parsed = LexiconConfig::from_yaml_str(&yaml).expect("parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = LexiconConfig::from_yaml_file(Path::new("/nonexistent/lexicon.yaml"))
            .unwrap_err();
        assert!(
            matches!(err, ConfigError::LexiconFileIo { ref path, .. } if path.contains("lexicon.yaml"))
        );
    }
}
