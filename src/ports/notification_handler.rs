//! NotificationHandler port - Interface for consuming verified payment
//! notifications.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::webhook::PaymentNotification;

/// Failure reported by a notification handler.
///
/// The webhook receiver answers with a 5xx so IremboPay re-delivers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Notification handler failed: {0}")]
pub struct HandlerError(pub String);

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Handler for verified payment notifications.
///
/// Implementations should be idempotent: IremboPay may deliver the same
/// notification more than once.
#[async_trait]
pub trait NotificationHandler: Send + Sync {
    /// Process a notification whose signature and timestamp have been verified.
    async fn handle(&self, notification: &PaymentNotification) -> Result<(), HandlerError>;
}
