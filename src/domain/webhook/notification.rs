//! Payment notification delivered by IremboPay webhooks.

use serde::{Deserialize, Serialize};

use super::errors::WebhookError;
use crate::domain::values::{Currency, PaymentMethod, PaymentStatus};

/// Payment notification decoded from a verified webhook payload.
///
/// Decoding checks shape only; values such as `amount` are passed through
/// as sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentNotification {
    pub invoice_number: String,

    pub transaction_id: String,

    pub payment_status: PaymentStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,

    pub amount: f64,

    pub currency: Currency,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,

    /// Provider-formatted payment time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_account_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_merchant_id: Option<String>,
}

impl PaymentNotification {
    /// Decodes a payload. Call only on payloads whose signature has been verified.
    pub fn decode(payload: &[u8]) -> Result<Self, WebhookError> {
        serde_json::from_slice(payload).map_err(|e| WebhookError::Decode(e.to_string()))
    }

    /// Canonical JSON encoding of the notification.
    pub fn encode(&self) -> Result<Vec<u8>, WebhookError> {
        serde_json::to_vec(self).map_err(|e| WebhookError::Decode(e.to_string()))
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status.is_paid()
    }
}
