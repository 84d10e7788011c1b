//! Error types for outbound IremboPay API calls.
//!
//! Every failure is returned to the immediate caller unchanged; nothing here is
//! retried or suppressed. Categories are kept apart so callers can tell a
//! network problem from a structured API rejection from a logical failure
//! reported inside a 2xx envelope.

use thiserror::Error;

use crate::config::ValidationError;

/// Structured failure returned by the API with a non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("IremboPay API error (HTTP {status}): {message}")]
pub struct ApiError {
    /// HTTP status code, always outside `200..300`.
    pub status: u16,

    /// Best-effort message: the body's `error` field, else `message`, else the raw body.
    pub message: String,

    /// Raw response body for diagnostics.
    pub body: String,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            body: body.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    pub fn is_bad_request(&self) -> bool {
        self.status == 400
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401 || self.status == 403
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

/// Errors from IremboPay client operations.
#[derive(Debug, Error)]
pub enum IremboPayError {
    /// Network, DNS, or connection failure (including reading the body).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The request did not complete within the configured timeout.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The caller cancelled the in-flight request.
    #[error("Request cancelled")]
    Cancelled,

    /// The outbound body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The request descriptor could not be turned into an HTTP request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Non-2xx response.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// 2xx response whose envelope reports `success: false`.
    #[error("API request unsuccessful: {message}")]
    Unsuccessful { message: String },

    /// Response body does not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Client configuration is invalid.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ValidationError),
}

impl IremboPayError {
    /// HTTP status code, for API errors only.
    pub fn status(&self) -> Option<u16> {
        match self {
            IremboPayError::Api(err) => Some(err.status),
            _ => None,
        }
    }

    /// The structured API error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            IremboPayError::Api(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.api_error().is_some_and(ApiError::is_not_found)
    }

    pub fn is_bad_request(&self) -> bool {
        self.api_error().is_some_and(ApiError::is_bad_request)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, IremboPayError::Cancelled)
    }
}
