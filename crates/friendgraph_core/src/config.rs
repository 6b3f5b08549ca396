//! Runtime configuration for the remote endpoint and logging.
//!
//! # Responsibility
//! - Validate the remote base URL and request timeout.
//! - Validate log level and directory before logging starts.
//! - Read both from `FRIENDGRAPH_*` environment variables.
//!
//! # Invariants
//! - `RemoteConfig::base_url` is an absolute `http`/`https` URL.
//! - `LogConfig::dir` is absolute and `LogConfig::level` is normalized.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const BASE_URL_VAR: &str = "FRIENDGRAPH_API_BASE_URL";
pub const TIMEOUT_MS_VAR: &str = "FRIENDGRAPH_API_TIMEOUT_MS";
pub const LOG_LEVEL_VAR: &str = "FRIENDGRAPH_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "FRIENDGRAPH_LOG_DIR";

/// Applied when no timeout is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Required environment variable is unset or blank.
    MissingVar(&'static str),
    InvalidUrl { value: String, reason: String },
    UnsupportedScheme(String),
    /// Timeout is not a positive integer of milliseconds.
    InvalidTimeout(String),
    UnsupportedLogLevel(String),
    /// Log directory is empty or relative.
    InvalidLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingVar(name) => write!(f, "environment variable `{name}` is not set"),
            Self::InvalidUrl { value, reason } => {
                write!(f, "invalid base url `{value}`: {reason}")
            }
            Self::UnsupportedScheme(scheme) => {
                write!(f, "unsupported url scheme `{scheme}`; expected http|https")
            }
            Self::InvalidTimeout(value) => {
                write!(f, "invalid timeout `{value}`; expected positive milliseconds")
            }
            Self::UnsupportedLogLevel(value) => write!(
                f,
                "unsupported log level `{value}`; expected trace|debug|info|warn|error"
            ),
            Self::InvalidLogDir(value) => {
                write!(f, "log dir must be a non-empty absolute path, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Remote graph store endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub base_url: Url,
    /// Upper bound for one request, enforced by the HTTP client.
    pub request_timeout: Duration,
}

impl RemoteConfig {
    /// Parses `base_url` with the default timeout.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim();
        let url = Url::parse(trimmed).map_err(|err| ConfigError::InvalidUrl {
            value: trimmed.to_string(),
            reason: err.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
        }
        Ok(Self {
            base_url: url,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Reads `FRIENDGRAPH_API_BASE_URL` and `FRIENDGRAPH_API_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`RemoteConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = required(&lookup, BASE_URL_VAR)?;
        let config = Self::new(&base_url)?;
        match non_blank(&lookup, TIMEOUT_MS_VAR) {
            Some(raw) => Ok(config.with_timeout(parse_timeout_ms(&raw)?)),
            None => Ok(config),
        }
    }
}

/// Logging destination and verbosity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: &'static str,
    pub dir: PathBuf,
}

impl LogConfig {
    pub fn new(level: &str, dir: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            level: normalize_level(level)?,
            dir: normalize_log_dir(dir)?,
        })
    }

    /// Reads `FRIENDGRAPH_LOG_DIR` and optional `FRIENDGRAPH_LOG_LEVEL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let dir = required(&lookup, LOG_DIR_VAR)?;
        let level = non_blank(&lookup, LOG_LEVEL_VAR);
        Self::new(level.as_deref().unwrap_or(default_log_level()), &dir)
    }
}

fn non_blank(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).filter(|value| !value.trim().is_empty())
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    non_blank(lookup, name).ok_or(ConfigError::MissingVar(name))
}

fn parse_timeout_ms(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(ConfigError::InvalidTimeout(raw.trim().to_string())),
    }
}

fn normalize_level(level: &str) -> Result<&'static str, ConfigError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(ConfigError::UnsupportedLogLevel(other.to_string())),
    }
}

fn normalize_log_dir(dir: &str) -> Result<PathBuf, ConfigError> {
    let path = PathBuf::from(dir.trim());
    if dir.trim().is_empty() || !path.is_absolute() {
        return Err(ConfigError::InvalidLogDir(dir.trim().to_string()));
    }
    Ok(path)
}
