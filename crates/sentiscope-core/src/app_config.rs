use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub history_capacity: usize,
    pub provider_timeout_secs: u64,
    pub lexicon_path: Option<PathBuf>,
    pub meaningcloud_api_key: Option<String>,
    pub huggingface_token: Option<String>,
    pub huggingface_model: String,
    pub rapidapi_key: Option<String>,
}

impl AppConfig {
    /// Whether any remote sentiment provider has credentials configured.
    #[must_use]
    pub fn has_remote_providers(&self) -> bool {
        self.meaningcloud_api_key.is_some()
            || self.huggingface_token.is_some()
            || self.rapidapi_key.is_some()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("history_capacity", &self.history_capacity)
            .field("provider_timeout_secs", &self.provider_timeout_secs)
            .field("lexicon_path", &self.lexicon_path)
            .field(
                "meaningcloud_api_key",
                &self.meaningcloud_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "huggingface_token",
                &self.huggingface_token.as_ref().map(|_| "[redacted]"),
            )
            .field("huggingface_model", &self.huggingface_model)
            .field(
                "rapidapi_key",
                &self.rapidapi_key.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
