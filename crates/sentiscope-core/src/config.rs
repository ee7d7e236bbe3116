use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Hugging Face model queried when `HUGGINGFACE_MODEL` is not set.
pub const DEFAULT_HUGGINGFACE_MODEL: &str = "cardiffnlp/twitter-roberta-base-sentiment-latest";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// `HashMap` lookup instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank values are treated as unset so `FOO=` in a .env file disables a provider.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("SENTISCOPE_ENV", "development"))?;
    let bind_addr = parse_addr("SENTISCOPE_BIND_ADDR", "0.0.0.0:5000")?;
    let log_level = or_default("SENTISCOPE_LOG_LEVEL", "info");

    let history_capacity = parse_usize("SENTISCOPE_HISTORY_CAPACITY", "100")?;
    if history_capacity == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SENTISCOPE_HISTORY_CAPACITY".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let provider_timeout_secs = parse_u64("SENTISCOPE_PROVIDER_TIMEOUT_SECS", "10")?;
    let lexicon_path = optional("SENTISCOPE_LEXICON_PATH").map(PathBuf::from);

    let meaningcloud_api_key = optional("MEANINGCLOUD_API_KEY");
    let huggingface_token = optional("HUGGINGFACE_TOKEN");
    let huggingface_model =
        optional("HUGGINGFACE_MODEL").unwrap_or_else(|| DEFAULT_HUGGINGFACE_MODEL.to_string());
    let rapidapi_key = optional("RAPIDAPI_KEY");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        history_capacity,
        provider_timeout_secs,
        lexicon_path,
        meaningcloud_api_key,
        huggingface_token,
        huggingface_model,
        rapidapi_key,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SENTISCOPE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
