//! Process configuration read from the environment (and `.env`).

use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

const DEFAULT_ALLOWED_ORIGINS: &str = "https://www.kalilovestories.com,https://kalilovestories.com";

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORT value: {0}")]
    InvalidPort(String),

    #[error("Could not read rate table: {0}")]
    RatesFile(#[from] std::io::Error),

    #[error("Malformed rate table: {0}")]
    RatesFormat(#[from] serde_json::Error),

    #[error("Invalid rate table: {0}")]
    InvalidRates(String),
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Origins allowed to call the estimator (exact match)
    pub allowed_origins: HashSet<String>,
    /// Shared secret expected in `X-Estimator-Key`; `None` disables the check
    pub public_key: Option<String>,
    /// Optional JSON rate table replacing the built-in one
    pub rates_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            allowed_origins: parse_origins(DEFAULT_ALLOWED_ORIGINS),
            public_key: None,
            rates_path: None,
        }
    }
}

impl Config {
    /// Read configuration from environment variables.
    ///
    /// - `HOST` (default `0.0.0.0`)
    /// - `PORT` (default `3000`)
    /// - `ALLOWED_ORIGINS` comma-separated origin list
    /// - `ESTIMATOR_PUBLIC_KEY` optional access key
    /// - `ESTIMATOR_RATES_PATH` optional rate table file
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => defaults.port,
        };
        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or(defaults.allowed_origins);
        let public_key = env::var("ESTIMATOR_PUBLIC_KEY")
            .ok()
            .filter(|key| !key.is_empty());
        let rates_path = env::var("ESTIMATOR_RATES_PATH")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            allowed_origins,
            public_key,
            rates_path,
        })
    }

    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.contains(origin)
    }
}

/// Split a comma-separated origin list, dropping blanks
pub fn parse_origins(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
