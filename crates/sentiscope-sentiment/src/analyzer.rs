//! Provider fallback chain ending at the local lexicon scorer.

use sentiscope_core::AppConfig;

use crate::error::SentimentError;
use crate::lexicon::LexiconConfig;
use crate::providers::{providers_from_config, RemoteProvider};
use crate::scorer::Scorer;
use crate::types::Analysis;

/// Analyzes text with the first remote provider that succeeds, or the
/// local scorer when none is configured or all fail.
pub struct SentimentAnalyzer {
    scorer: Scorer,
    providers: Vec<RemoteProvider>,
}

impl SentimentAnalyzer {
    #[must_use]
    pub fn new(scorer: Scorer, providers: Vec<RemoteProvider>) -> Self {
        Self { scorer, providers }
    }

    /// An analyzer that never calls out to remote providers.
    #[must_use]
    pub fn local(scorer: Scorer) -> Self {
        Self::new(scorer, Vec::new())
    }

    /// Build the scorer (from `lexicon_path` when set) and every provider
    /// with configured credentials.
    ///
    /// # Errors
    ///
    /// - [`SentimentError::Config`] if the lexicon file cannot be loaded.
    /// - [`SentimentError::Http`] if an HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, SentimentError> {
        let scorer = match &config.lexicon_path {
            Some(path) => {
                let lexicon = LexiconConfig::from_yaml_file(path)?;
                tracing::info!(path = %path.display(), "loaded custom lexicon");
                Scorer::new(lexicon)?
            }
            None => Scorer::default(),
        };
        let providers = providers_from_config(config)?;
        Ok(Self::new(scorer, providers))
    }

    #[must_use]
    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    #[must_use]
    pub fn providers(&self) -> &[RemoteProvider] {
        &self.providers
    }

    /// Score `text` with the local lexicon only.
    #[must_use]
    pub fn analyze_local(&self, text: &str) -> Analysis {
        Analysis::local(self.scorer.score(text))
    }

    /// Try each provider in order; fall back to the local scorer.
    ///
    /// Provider failures are logged and never surface to the caller.
    pub async fn analyze(&self, text: &str) -> Analysis {
        for provider in &self.providers {
            match provider.analyze(text).await {
                Ok(analysis) => {
                    tracing::debug!(provider = %provider.source(), "remote analysis succeeded");
                    return analysis;
                }
                Err(e) => {
                    tracing::warn!(
                        provider = %provider.source(),
                        error = %e,
                        "remote provider failed, trying next"
                    );
                }
            }
        }
        self.analyze_local(text)
    }
}
