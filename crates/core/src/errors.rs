//! Error types for prompt-optimizer-rs
//!
//! One error enum covers the whole core. Presentation layers get a
//! user-facing message and a stable category string from it.

use thiserror::Error;

/// Result type alias for prompt-optimizer operations
pub type Result<T> = std::result::Result<T, OptimizerError>;

/// Main error type for the optimizer core
#[derive(Debug, Error)]
pub enum OptimizerError {
    /// Command not found in registry
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// Invalid command arguments
    #[error("Invalid arguments for command '{command}': {reason}")]
    InvalidArgs { command: String, reason: String },

    /// Rejected input (empty prompt, rating out of range)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Persisted blob exists but does not parse into records
    #[error("Failed to deserialize stored records: {0}")]
    DeserializationError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Service used before `commands::setup`
    #[error("Prompt service not initialized")]
    NotInitialized,

    /// Generic error (catch-all)
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for OptimizerError {
    fn from(err: anyhow::Error) -> Self {
        OptimizerError::Other(err.to_string())
    }
}

impl From<String> for OptimizerError {
    fn from(err: String) -> Self {
        OptimizerError::Other(err)
    }
}

impl From<&str> for OptimizerError {
    fn from(err: &str) -> Self {
        OptimizerError::Other(err.to_string())
    }
}

impl OptimizerError {
    /// Shorthand for a validation failure
    pub fn validation(reason: impl Into<String>) -> Self {
        OptimizerError::ValidationError(reason.into())
    }

    /// Shorthand for a bad argument to a named command
    pub fn invalid_args(command: &str, reason: impl Into<String>) -> Self {
        OptimizerError::InvalidArgs {
            command: command.to_string(),
            reason:  reason.into(),
        }
    }

    /// Get user-friendly error message for display in the host UI
    pub fn user_message(&self) -> String {
        match self {
            OptimizerError::CommandNotFound(cmd) => {
                format!("Command '{}' not found. Call 'ping' to check the bridge.", cmd)
            },
            OptimizerError::InvalidArgs { command, reason } => {
                format!("Invalid arguments for '{}': {}", command, reason)
            },
            OptimizerError::ValidationError(reason) => reason.clone(),
            OptimizerError::DeserializationError(err) => {
                format!("Saved history is corrupt and could not be loaded: {}", err)
            },
            OptimizerError::NotInitialized => {
                "Prompt service is not ready yet. Call setup first.".to_string()
            },
            _ => self.to_string(),
        }
    }

    /// Get error category for logging/telemetry
    pub fn category(&self) -> &'static str {
        match self {
            OptimizerError::CommandNotFound(_) => "command",
            OptimizerError::InvalidArgs { .. } => "arguments",
            OptimizerError::ValidationError(_) => "validation",
            OptimizerError::DeserializationError(_) => "deserialization",
            OptimizerError::SerdeError(_) => "serialization",
            OptimizerError::IoError(_) => "io",
            OptimizerError::ConfigError(_) => "config",
            OptimizerError::NotInitialized => "not_initialized",
            OptimizerError::Other(_) => "other",
        }
    }
}
