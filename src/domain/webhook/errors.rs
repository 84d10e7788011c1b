//! Webhook error types for IremboPay payment notifications.
//!
//! Separates malformed deliveries (client bugs, bad headers, bad JSON) from
//! authentication failures (signature mismatch, stale or future timestamps)
//! so receivers can log replay attempts apart from integration mistakes.
//! Every variant maps to a non-2xx status so the provider re-delivers.

use http::StatusCode;
use thiserror::Error;

use super::signature::SignatureParseError;

/// Errors that occur while verifying or decoding a webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// Signature header is missing, incomplete, or unparseable.
    #[error("Malformed signature header: {0}")]
    Malformed(#[from] SignatureParseError),

    /// Signing time differs from the current time by more than the allowed age.
    #[error("Timestamp out of range: skew of {skew_ms}ms exceeds {max_age_ms}ms")]
    TimestampOutOfRange { skew_ms: u64, max_age_ms: u64 },

    /// Webhook signature verification failed.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Verified payload does not match the notification shape.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl WebhookError {
    /// True for signature mismatches and replay-window violations.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            WebhookError::InvalidSignature | WebhookError::TimestampOutOfRange { .. }
        )
    }

    /// True when the delivery could not be parsed at all.
    pub fn is_malformed(&self) -> bool {
        matches!(self, WebhookError::Malformed(_) | WebhookError::Decode(_))
    }

    /// Maps the error to the status code returned to the provider.
    ///
    /// - 400: malformed header or payload
    /// - 401: authentication failure
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::InvalidSignature | WebhookError::TimestampOutOfRange { .. } => {
                StatusCode::UNAUTHORIZED
            }
            WebhookError::Malformed(_) | WebhookError::Decode(_) => StatusCode::BAD_REQUEST,
        }
    }
}
