//! Tracing/logging setup shared by binaries and test harnesses.

/// Initialize process-wide tracing from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
/// An unreadable configuration falls back to the defaults.
pub fn init() {
    tracing::init(&config::ObservabilityConfig::from_env().unwrap_or_default());
}

/// Initialize process-wide tracing with an explicit configuration.
pub fn init_with(config: &config::ObservabilityConfig) {
    tracing::init(config);
}

/// Environment-driven configuration.
pub mod config;

/// Subscriber installation (filters, formatting).
pub mod tracing;

pub use config::{ConfigError, LogFormat, ObservabilityConfig};
