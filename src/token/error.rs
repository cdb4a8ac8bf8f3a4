//! Error types for configuration loading
//!
//! The augmenters themselves never fail; the only fallible step is reading the
//! theme config once when the plugin is created.

use std::path::PathBuf;
use thiserror::Error;

/// Error raised while locating or parsing a token config file
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO errors while reading the config file
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON config parse errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// YAML config parse errors
    #[error("YAML error: {message}")]
    Yaml {
        message: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// Config file not found at the resolved path
    #[error("Config file not found: {path:?}")]
    NotFound { path: PathBuf },
}

/// Result type alias for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io {
            source: err,
            message: "IO operation failed".to_string(),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json {
            source: err,
            message: "JSON operation failed".to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Yaml {
            source: err,
            message: "YAML operation failed".to_string(),
        }
    }
}

/// Helper trait for converting IO errors with context
pub trait IoContext<T> {
    fn with_io_context(self, message: &str) -> ConfigResult<T>;
}

impl<T> IoContext<T> for Result<T, std::io::Error> {
    fn with_io_context(self, message: &str) -> ConfigResult<T> {
        self.map_err(|e| ConfigError::Io {
            message: message.to_string(),
            source: e,
        })
    }
}
