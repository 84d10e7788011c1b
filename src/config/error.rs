//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Unsupported URL scheme: {0} (expected http or https)")]
    InvalidScheme(String),

    #[error("Invalid host: {0}")]
    InvalidHost(String),

    #[error("Invalid request timeout (must be between 1 and 300 seconds)")]
    InvalidTimeout,

    #[error("Invalid webhook max age (must be greater than zero)")]
    InvalidWebhookMaxAge,
}
