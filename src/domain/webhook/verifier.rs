//! IremboPay webhook verification.
//!
//! A delivery is accepted only when its signing time is within `max_age` of
//! the receiver's clock (in either direction) and the HMAC-SHA256 of
//! `"<t>#<payload>"` under the account secret matches the header digest.

use std::time::Duration;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use super::errors::WebhookError;
use super::notification::PaymentNotification;
use super::signature::{compute_signature, SignatureHeader};
use crate::config::IremboPayConfig;

/// Verifier for IremboPay webhook signatures.
#[derive(Debug, Clone)]
pub struct WebhookVerifier {
    secret: SecretString,
}

impl WebhookVerifier {
    /// Creates a verifier keyed with the account secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
        }
    }

    pub fn from_config(config: &IremboPayConfig) -> Self {
        Self::new(config.secret_key.clone())
    }

    /// Checks that the header's signing time is within `max_age` of now.
    ///
    /// Returns `Ok(false)` for a stale or future timestamp and an error only
    /// when the header cannot be parsed.
    pub fn verify_timestamp(&self, header: &str, max_age: Duration) -> Result<bool, WebhookError> {
        self.verify_timestamp_at(header, max_age, Utc::now())
    }

    /// [`verify_timestamp`](Self::verify_timestamp) against an explicit clock.
    pub fn verify_timestamp_at(
        &self,
        header: &str,
        max_age: Duration,
        now: DateTime<Utc>,
    ) -> Result<bool, WebhookError> {
        let header = SignatureHeader::parse(header)?;
        Ok(check_freshness(&header, max_age, now).is_ok())
    }

    /// Recomputes the signature over `payload` and compares it in constant time.
    ///
    /// Returns `Ok(false)` on mismatch and an error only when the header
    /// cannot be parsed.
    pub fn verify_signature(&self, header: &str, payload: &[u8]) -> Result<bool, WebhookError> {
        let header = SignatureHeader::parse(header)?;
        Ok(self.signature_matches(&header, payload))
    }

    /// Verifies timestamp then signature, then decodes the notification.
    ///
    /// # Errors
    ///
    /// - `Malformed` - header could not be parsed
    /// - `TimestampOutOfRange` - signing time outside the allowed window
    /// - `InvalidSignature` - digest mismatch
    /// - `Decode` - payload is not a payment notification
    pub fn verify_and_decode(
        &self,
        header: &str,
        payload: &[u8],
        max_age: Duration,
    ) -> Result<PaymentNotification, WebhookError> {
        self.verify_and_decode_at(header, payload, max_age, Utc::now())
    }

    /// [`verify_and_decode`](Self::verify_and_decode) against an explicit clock.
    pub fn verify_and_decode_at(
        &self,
        header: &str,
        payload: &[u8],
        max_age: Duration,
        now: DateTime<Utc>,
    ) -> Result<PaymentNotification, WebhookError> {
        let header = SignatureHeader::parse(header).map_err(|e| {
            tracing::warn!(error = %e, "Malformed webhook signature header");
            WebhookError::from(e)
        })?;

        if let Err(e) = check_freshness(&header, max_age, now) {
            tracing::warn!(
                timestamp_ms = header.timestamp_ms,
                error = %e,
                "Rejected webhook with out-of-range timestamp"
            );
            return Err(e);
        }

        if !self.signature_matches(&header, payload) {
            tracing::warn!(
                timestamp_ms = header.timestamp_ms,
                "Webhook signature verification failed"
            );
            return Err(WebhookError::InvalidSignature);
        }

        let notification = PaymentNotification::decode(payload)?;

        tracing::info!(
            invoice_number = %notification.invoice_number,
            payment_status = %notification.payment_status,
            "Verified IremboPay webhook"
        );

        Ok(notification)
    }

    /// Signs `payload` as IremboPay would at `timestamp_ms`.
    pub fn sign(&self, timestamp_ms: u64, payload: &[u8]) -> SignatureHeader {
        let digest = compute_signature(
            self.secret.expose_secret().as_bytes(),
            &timestamp_ms.to_string(),
            payload,
        );
        SignatureHeader::new(timestamp_ms, &digest)
    }

    fn signature_matches(&self, header: &SignatureHeader, payload: &[u8]) -> bool {
        let expected = compute_signature(
            self.secret.expose_secret().as_bytes(),
            header.timestamp_text(),
            payload,
        );
        let provided = header.signature_bytes();
        if expected.len() != provided.len() {
            return false;
        }
        expected.ct_eq(&provided).into()
    }
}

fn check_freshness(
    header: &SignatureHeader,
    max_age: Duration,
    now: DateTime<Utc>,
) -> Result<(), WebhookError> {
    let skew = i128::from(now.timestamp_millis()) - i128::from(header.timestamp_ms);
    let skew_ms = u64::try_from(skew.unsigned_abs()).unwrap_or(u64::MAX);
    let max_age_ms = u64::try_from(max_age.as_millis()).unwrap_or(u64::MAX);

    if skew_ms > max_age_ms {
        return Err(WebhookError::TimestampOutOfRange { skew_ms, max_age_ms });
    }
    Ok(())
}
