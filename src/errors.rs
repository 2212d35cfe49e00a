use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the planner, its stores and configuration.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Checklist item not found: {0}")]
    ItemNotFound(String),
    #[error("Contact index {index} out of range (have {len} contacts)")]
    ContactIndexOutOfRange { index: usize, len: usize },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = StdResult<T, PlannerError>;

/// Errors raised while reading or writing the planner configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),
}

impl From<std::io::Error> for PlannerError {
    fn from(err: std::io::Error) -> Self {
        PlannerError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        PlannerError::StorageError(err.to_string())
    }
}

impl From<ConfigError> for PlannerError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => PlannerError::StorageError(io.to_string()),
            ConfigError::Serde(message) => PlannerError::ConfigError(message),
        }
    }
}
