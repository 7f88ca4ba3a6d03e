//! Observability configuration.
//!
//! | variable               | meaning                         | default |
//! |------------------------|---------------------------------|---------|
//! | `DATACLASS_LOG`        | tracing filter directives       | -       |
//! | `RUST_LOG`             | fallback filter directives      | `info`  |
//! | `DATACLASS_LOG_FORMAT` | `json` or `pretty`              | `json`  |

use core::str::FromStr;

use thiserror::Error;

pub const FILTER_VAR: &str = "DATACLASS_LOG";
pub const FALLBACK_FILTER_VAR: &str = "RUST_LOG";
pub const FORMAT_VAR: &str = "DATACLASS_LOG_FORMAT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown log format '{0}' (expected 'json' or 'pretty')")]
    UnknownFormat(String),
}

/// Output format of the fmt subscriber.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(ConfigError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    pub filter: String,
    pub format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

impl ObservabilityConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let filter = lookup(FILTER_VAR)
            .or_else(|| lookup(FALLBACK_FILTER_VAR))
            .filter(|f| !f.trim().is_empty())
            .unwrap_or(defaults.filter);

        let format = match lookup(FORMAT_VAR) {
            Some(raw) => raw.parse()?,
            None => defaults.format,
        };

        Ok(Self { filter, format })
    }
}
