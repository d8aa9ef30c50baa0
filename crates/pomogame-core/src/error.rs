//! Core error types for pomogame-core.
//!
//! Game operations themselves never fail: invalid attempts are silent no-ops.
//! Errors only arise at the edges, when loading game rules or parsing user
//! input.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomogame-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input parsing errors
    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the rules file
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Rules file is not valid TOML for [`GameConfig`](crate::GameConfig)
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// A value parsed but is unusable
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors produced when a line of user input cannot be turned into a command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty input")]
    Empty,

    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("'{command}' needs an argument: {expected}")]
    MissingArgument {
        command: String,
        expected: &'static str,
    },

    #[error("invalid task id: {0}")]
    InvalidTaskId(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
