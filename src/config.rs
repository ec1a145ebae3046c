use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::value_objects::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::InvalidLogFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("LISTEN_ADDR cannot be empty")]
    EmptyListenAddr,

    #[error("DEFAULT_LOCALE is not a valid locale tag: {0}")]
    InvalidLocale(String),

    #[error("LOG_FORMAT must be 'pretty' or 'json', got '{0}'")]
    InvalidLogFormat(String),

    #[error("MESSAGES_PATH does not exist: {0}")]
    MissingMessages(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Locale tag messages are resolved in
    pub default_locale: String,
    /// Optional TOML catalog merged over the bundled one
    pub messages_path: Option<PathBuf>,
    pub log_format: String,
    /// Log 4xx faults at `warn` instead of `debug`
    pub log_client_errors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            default_locale: "ko".to_string(),
            messages_path: None,
            log_format: "pretty".to_string(),
            log_client_errors: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            default_locale: std::env::var("DEFAULT_LOCALE").unwrap_or(defaults.default_locale),
            messages_path: std::env::var("MESSAGES_PATH")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            log_format: std::env::var("LOG_FORMAT").unwrap_or(defaults.log_format),
            log_client_errors: std::env::var("LOG_CLIENT_ERRORS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.log_client_errors),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.listen_addr.is_empty() {
            return Err(ConfigError::EmptyListenAddr);
        }

        self.locale()?;
        self.log_format()?;

        if let Some(path) = &self.messages_path {
            if !path.exists() {
                return Err(ConfigError::MissingMessages(path.clone()));
            }
        }

        Ok(())
    }

    pub fn locale(&self) -> Result<Locale, ConfigError> {
        Locale::parse(&self.default_locale)
            .map_err(|_| ConfigError::InvalidLocale(self.default_locale.clone()))
    }

    pub fn log_format(&self) -> Result<LogFormat, ConfigError> {
        self.log_format.parse()
    }
}
