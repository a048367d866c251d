//! Error types.
//!
//! Generation itself never fails: unplaceable periods are reported as
//! counts and events. Errors only arise at the configuration edge.

use thiserror::Error;

/// Errors raised while loading or checking an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
