//! Payment gateway port for IremboPay invoice and payment operations.
//!
//! Every operation takes a `CancellationToken`; cancelling it aborts the
//! in-flight request and yields `IremboPayError::Cancelled`. Failures are
//! returned unchanged so callers can match on API status codes.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use crate::domain::{
    BatchInvoiceRequest, IdempotencyKey, Invoice, InvoiceRequest, IremboPayError,
    MomoPaymentRequest, MomoPaymentResponse, UpdateInvoiceRequest,
};

/// Port for the IremboPay payments API.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a single invoice.
    ///
    /// When `idempotency_key` is set it is sent as the `Idempotency-Key`
    /// header so retries of the same logical request are deduplicated.
    async fn create_invoice(
        &self,
        request: &InvoiceRequest,
        idempotency_key: Option<&IdempotencyKey>,
        cancel: &CancellationToken,
    ) -> Result<Invoice, IremboPayError>;

    /// Create an invoice that expires `expires_in` from now.
    async fn create_invoice_with_expiry(
        &self,
        request: &InvoiceRequest,
        expires_in: Duration,
        idempotency_key: Option<&IdempotencyKey>,
        cancel: &CancellationToken,
    ) -> Result<Invoice, IremboPayError>;

    /// Fetch an invoice by invoice number or transaction id.
    async fn get_invoice(
        &self,
        reference: &str,
        cancel: &CancellationToken,
    ) -> Result<Invoice, IremboPayError>;

    /// Apply a partial update to an unpaid invoice.
    async fn update_invoice(
        &self,
        invoice_number: &str,
        request: &UpdateInvoiceRequest,
        cancel: &CancellationToken,
    ) -> Result<Invoice, IremboPayError>;

    /// Move an invoice's expiry to `expiry_at`.
    async fn update_expiry_time(
        &self,
        invoice_number: &str,
        expiry_at: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Result<Invoice, IremboPayError>;

    /// Group existing invoices into a batch invoice.
    async fn create_batch_invoice(
        &self,
        request: &BatchInvoiceRequest,
        idempotency_key: Option<&IdempotencyKey>,
        cancel: &CancellationToken,
    ) -> Result<Invoice, IremboPayError>;

    /// Push a mobile-money payment prompt to the payer.
    async fn initiate_momo_payment(
        &self,
        request: &MomoPaymentRequest,
        idempotency_key: Option<&IdempotencyKey>,
        cancel: &CancellationToken,
    ) -> Result<MomoPaymentResponse, IremboPayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_gateway_is_object_safe() {
        fn _accepts_dyn(_gateway: &dyn PaymentGateway) {}
    }

    #[test]
    fn payment_gateway_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn PaymentGateway>();
    }
}
