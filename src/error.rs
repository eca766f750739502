//! Error types for the command line tool.
//!
//! Library code reports [`crate::framework::Error`]; this layer wraps it together with
//! configuration and argument failures.

use thiserror::Error;

/// Result type alias for tool operations
pub type Result<T> = std::result::Result<T, FrameworkToolError>;

/// Main error type for all tool operations
#[derive(Error, Debug)]
pub enum FrameworkToolError {
    /// CLI argument and configuration errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Framework rule errors
    #[error("Framework error: {0}")]
    Framework(#[from] crate::framework::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Project configuration is inconsistent
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Reason for the error
        reason: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl FrameworkToolError {
    /// Shorthand for a configuration error.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Cli(CliError::InvalidConfig {
            reason: reason.into(),
        })
    }
}
