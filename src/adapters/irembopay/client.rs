//! IremboPay payments client.
//!
//! Implements the `PaymentGateway` port on top of [`ApiTransport`].
//!
//! # Configuration
//!
//! ```ignore
//! let client = IremboPayClient::new(&IremboPayConfig::sandbox(secret_key))?;
//! let invoice = client.create_invoice(&request, None, &CancellationToken::new()).await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use super::credentials::Credentials;
use super::transport::{ApiRequest, ApiTransport};
use crate::config::IremboPayConfig;
use crate::domain::webhook::WebhookVerifier;
use crate::domain::{
    format_time, BatchInvoiceRequest, IdempotencyKey, Invoice, InvoiceRequest, IremboPayError,
    MomoPaymentRequest, MomoPaymentResponse, UpdateInvoiceRequest,
};
use crate::ports::PaymentGateway;

const INVOICES_PATH: &str = "/payments/invoices";
const BATCH_INVOICES_PATH: &str = "/payments/invoices/batch";
const INITIATE_PAYMENT_PATH: &str = "/payments/transactions/initiate";

/// IremboPay API client.
#[derive(Debug, Clone)]
pub struct IremboPayClient {
    transport: ApiTransport,
    verifier: Arc<WebhookVerifier>,
    webhook_max_age: Duration,
}

impl IremboPayClient {
    /// Validates `config` and builds a client for it.
    pub fn new(config: &IremboPayConfig) -> Result<Self, IremboPayError> {
        let credentials = Credentials::from_config(config)?;
        let transport = ApiTransport::new(Arc::new(credentials), config.request_timeout())?;

        Ok(Self {
            transport,
            verifier: Arc::new(WebhookVerifier::from_config(config)),
            webhook_max_age: config.webhook_max_age(),
        })
    }

    /// Underlying transport for endpoints without a typed wrapper.
    pub fn transport(&self) -> &ApiTransport {
        &self.transport
    }

    /// Verifier keyed with the same secret as this client.
    pub fn webhooks(&self) -> Arc<WebhookVerifier> {
        Arc::clone(&self.verifier)
    }

    pub fn webhook_max_age(&self) -> Duration {
        self.webhook_max_age
    }
}

fn invoice_path(reference: &str) -> Result<String, IremboPayError> {
    if reference.is_empty() {
        return Err(IremboPayError::InvalidRequest(
            "invoice reference must not be empty".to_string(),
        ));
    }
    Ok(format!("{}/{}", INVOICES_PATH, urlencoding::encode(reference)))
}

#[async_trait]
impl PaymentGateway for IremboPayClient {
    async fn create_invoice(
        &self,
        request: &InvoiceRequest,
        idempotency_key: Option<&IdempotencyKey>,
        cancel: &CancellationToken,
    ) -> Result<Invoice, IremboPayError> {
        let api_request = ApiRequest::post(INVOICES_PATH)
            .with_json_body(request)?
            .with_idempotency_key(idempotency_key);

        let invoice: Invoice = self.transport.execute(api_request, cancel).await?;

        tracing::info!(
            invoice_number = %invoice.invoice_number,
            transaction_id = %invoice.transaction_id,
            "Created IremboPay invoice"
        );
        Ok(invoice)
    }

    async fn create_invoice_with_expiry(
        &self,
        request: &InvoiceRequest,
        expires_in: Duration,
        idempotency_key: Option<&IdempotencyKey>,
        cancel: &CancellationToken,
    ) -> Result<Invoice, IremboPayError> {
        let expires_in = chrono::Duration::from_std(expires_in)
            .map_err(|e| IremboPayError::InvalidRequest(format!("expiry out of range: {}", e)))?;
        let expiry_at = Utc::now()
            .checked_add_signed(expires_in)
            .ok_or_else(|| IremboPayError::InvalidRequest("expiry out of range".to_string()))?;

        let request = InvoiceRequest {
            expiry_at: Some(format_time(expiry_at)),
            ..request.clone()
        };
        self.create_invoice(&request, idempotency_key, cancel).await
    }

    async fn get_invoice(
        &self,
        reference: &str,
        cancel: &CancellationToken,
    ) -> Result<Invoice, IremboPayError> {
        let api_request = ApiRequest::get(invoice_path(reference)?);
        self.transport.execute(api_request, cancel).await
    }

    async fn update_invoice(
        &self,
        invoice_number: &str,
        request: &UpdateInvoiceRequest,
        cancel: &CancellationToken,
    ) -> Result<Invoice, IremboPayError> {
        let api_request = ApiRequest::put(invoice_path(invoice_number)?).with_json_body(request)?;
        self.transport.execute(api_request, cancel).await
    }

    async fn update_expiry_time(
        &self,
        invoice_number: &str,
        expiry_at: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Result<Invoice, IremboPayError> {
        let request = UpdateInvoiceRequest {
            expiry_at: Some(format_time(expiry_at)),
            ..Default::default()
        };
        self.update_invoice(invoice_number, &request, cancel).await
    }

    async fn create_batch_invoice(
        &self,
        request: &BatchInvoiceRequest,
        idempotency_key: Option<&IdempotencyKey>,
        cancel: &CancellationToken,
    ) -> Result<Invoice, IremboPayError> {
        let api_request = ApiRequest::post(BATCH_INVOICES_PATH)
            .with_json_body(request)?
            .with_idempotency_key(idempotency_key);
        self.transport.execute(api_request, cancel).await
    }

    async fn initiate_momo_payment(
        &self,
        request: &MomoPaymentRequest,
        idempotency_key: Option<&IdempotencyKey>,
        cancel: &CancellationToken,
    ) -> Result<MomoPaymentResponse, IremboPayError> {
        let api_request = ApiRequest::post(INITIATE_PAYMENT_PATH)
            .with_json_body(request)?
            .with_idempotency_key(idempotency_key);

        let response: MomoPaymentResponse = self.transport.execute(api_request, cancel).await?;

        tracing::info!(
            invoice_number = %response.invoice_number,
            reference_id = %response.reference_id,
            provider = %response.payment_provider,
            "Initiated mobile money payment"
        );
        Ok(response)
    }
}
