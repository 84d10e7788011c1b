//! Mobile-money payment initiation payloads.

use serde::{Deserialize, Serialize};

use super::values::MomoProvider;

/// Request to push a mobile-money payment prompt to the payer's phone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomoPaymentRequest {
    /// Payer phone number.
    pub account_identifier: String,

    pub payment_provider: MomoProvider,

    /// Invoice being paid.
    pub invoice_number: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_reference: Option<String>,
}

impl MomoPaymentRequest {
    pub fn new(
        account_identifier: impl Into<String>,
        payment_provider: MomoProvider,
        invoice_number: impl Into<String>,
    ) -> Self {
        Self {
            account_identifier: account_identifier.into(),
            payment_provider,
            invoice_number: invoice_number.into(),
            transaction_reference: None,
        }
    }
}

/// Acknowledgment of an initiated mobile-money payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomoPaymentResponse {
    pub account_identifier: String,

    pub payment_provider: MomoProvider,

    pub invoice_number: String,

    pub amount: f64,

    /// IremboPay reference for the push request.
    pub reference_id: String,
}
