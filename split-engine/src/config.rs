//! Engine configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | DEFAULT_TIP_PERCENTAGE | 10 | Tip applied before the user picks one |
//! | LOG_LEVEL | info | Default tracing filter (`RUST_LOG` wins) |
//! | LOG_JSON | false | JSON log output |
//!
//! The recognition service address is read by `divup_client::ClientConfig`.

use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use crate::engine::DEFAULT_TIP_PERCENTAGE;

/// Configuration error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    /// The default tip must not be negative
    #[error("DEFAULT_TIP_PERCENTAGE must be non-negative, got {0}")]
    NegativeTip(Decimal),
}

/// Split engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Tip percentage a new session starts with
    pub default_tip_percentage: Decimal,
    /// Default log level
    pub log_level: String,
    /// Whether to emit JSON logs
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_tip_percentage: DEFAULT_TIP_PERCENTAGE,
            log_level: "info".into(),
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    ///
    /// Malformed values are logged and replaced by their defaults.
    pub fn from_env() -> Self {
        Self::try_from_env().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Invalid configuration, using defaults");
            Self::default()
        })
    }

    /// Load configuration from the environment, reporting malformed values
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let default_tip_percentage =
            parse_var(&lookup, "DEFAULT_TIP_PERCENTAGE")?.unwrap_or(defaults.default_tip_percentage);
        if default_tip_percentage < Decimal::ZERO {
            return Err(ConfigError::NegativeTip(default_tip_percentage));
        }

        Ok(Self {
            default_tip_percentage,
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_json: parse_var(&lookup, "LOG_JSON")?.unwrap_or(defaults.log_json),
        })
    }

    /// Override the default tip
    pub fn with_default_tip(mut self, tip_percentage: Decimal) -> Self {
        self.default_tip_percentage = tip_percentage;
        self
    }
}

/// Load `.env` (if present) into the process environment
pub fn load_dotenv() {
    if let Ok(path) = dotenv::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}
