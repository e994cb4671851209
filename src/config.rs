use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;

pub const API_KEY_VAR: &str = "API_KEY";
pub const BASE_URL_VAR: &str = "BASE_URL";

/// Errors raised while assembling the runtime configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    MissingVar(&'static str),

    #[error("invalid value for {field}: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },
}

/// Everything the session needs before the read loop starts.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env(cli: &Cli) -> Result<Self, ConfigError> {
        Self::from_lookup(cli, |key| std::env::var(key).ok())
    }

    /// Build the config with a custom variable lookup.
    pub fn from_lookup<F>(cli: &Cli, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingVar(key))
        };

        let api_key = required(API_KEY_VAR)?;
        let base_url = required(BASE_URL_VAR)?;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: BASE_URL_VAR,
                message: format!("'{}' is not an http(s) URL", base_url),
            });
        }

        if cli.timeout == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout",
                message: "must be at least one second".to_string(),
            });
        }

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: cli.model.clone(),
            kubeconfig: cli.kubeconfig.clone(),
            context: cli.context.clone(),
            timeout: Duration::from_secs(cli.timeout),
        })
    }
}
