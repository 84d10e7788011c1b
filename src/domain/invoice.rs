//! Invoice payloads as exchanged with the IremboPay API.
//!
//! Field names follow the API's camelCase wire format. Amounts are opaque
//! provider values and are not validated here.

use serde::{Deserialize, Serialize};

use super::values::{Currency, InvoiceType, Language, PaymentMethod, PaymentStatus};

/// A line item on an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentItem {
    /// Product code registered with IremboPay.
    pub code: String,

    /// Number of units; the API requires at least one.
    pub quantity: u32,

    /// Price per unit.
    pub unit_amount: f64,
}

impl PaymentItem {
    pub fn new(code: impl Into<String>, quantity: u32, unit_amount: f64) -> Self {
        Self {
            code: code.into(),
            quantity,
            unit_amount,
        }
    }
}

/// Customer contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Request to create a single invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
    /// Caller-side unique transaction identifier.
    pub transaction_id: String,

    /// Payment account that receives the funds.
    pub payment_account_identifier: String,

    pub payment_items: Vec<PaymentItem>,

    /// RFC3339 expiry time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

impl InvoiceRequest {
    /// Minimal request; optional fields can be set directly on the struct.
    pub fn new(
        transaction_id: impl Into<String>,
        payment_account_identifier: impl Into<String>,
        payment_items: Vec<PaymentItem>,
    ) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            payment_account_identifier: payment_account_identifier.into(),
            payment_items,
            expiry_at: None,
            description: None,
            customer: None,
            language: None,
        }
    }
}

/// Request to group existing invoices into one batch invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchInvoiceRequest {
    pub transaction_id: String,

    /// Invoice numbers to include in the batch.
    pub invoice_numbers: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial update of an existing invoice. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInvoiceRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_at: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub payment_items: Vec<PaymentItem>,
}

/// Invoice as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub amount: f64,

    pub invoice_number: String,

    pub transaction_id: String,

    pub created_at: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<String>,

    pub payment_account_identifier: String,

    #[serde(default)]
    pub payment_items: Vec<PaymentItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type")]
    pub invoice_type: InvoiceType,

    pub payment_status: PaymentStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,

    pub currency: Currency,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,

    /// Set on batch invoices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,

    /// Invoice numbers grouped by a batch invoice.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_invoices: Vec<String>,

    /// Hosted checkout URL.
    #[serde(default)]
    pub payment_link_url: String,
}

impl Invoice {
    pub fn is_paid(&self) -> bool {
        self.payment_status.is_paid()
    }

    pub fn is_batch(&self) -> bool {
        self.invoice_type == InvoiceType::Batch
    }
}
