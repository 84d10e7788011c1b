//! Axum receiver for IremboPay payment notifications.
//!
//! The endpoint answers `200 OK` only after the notification has been verified
//! and the handler has accepted it; any other outcome returns a non-2xx status
//! so IremboPay re-delivers.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::domain::webhook::{
    SignatureParseError, WebhookError, WebhookVerifier, SIGNATURE_HEADER,
};
use crate::ports::{HandlerError, NotificationHandler};

/// Shared state for the webhook receiver.
#[derive(Clone)]
pub struct WebhookState {
    pub verifier: Arc<WebhookVerifier>,
    pub handler: Arc<dyn NotificationHandler>,
    pub max_age: Duration,
}

impl WebhookState {
    pub fn new(
        verifier: Arc<WebhookVerifier>,
        handler: Arc<dyn NotificationHandler>,
        max_age: Duration,
    ) -> Self {
        Self {
            verifier,
            handler,
            max_age,
        }
    }
}

/// Create the webhook router.
///
/// # Routes
/// - `POST /irembopay` - Handle IremboPay payment notifications
pub fn webhook_routes(state: WebhookState) -> Router {
    Router::new()
        .route("/irembopay", post(handle_irembopay_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// POST /irembopay - Handle an IremboPay payment notification
pub async fn handle_irembopay_webhook(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, WebhookApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(WebhookError::Malformed(SignatureParseError::MissingHeader))?;

    let notification = state
        .verifier
        .verify_and_decode(signature, &body, state.max_age)?;

    state.handler.handle(&notification).await.map_err(|e| {
        tracing::error!(
            invoice_number = %notification.invoice_number,
            error = %e,
            "Notification handler failed"
        );
        WebhookApiError::Handler(e)
    })?;

    Ok(StatusCode::OK)
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Error body returned to the provider.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error_code: String,
    pub message: String,
}

/// API error type that converts webhook failures to HTTP responses.
#[derive(Debug)]
pub enum WebhookApiError {
    Verification(WebhookError),
    Handler(HandlerError),
}

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self::Verification(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            WebhookApiError::Verification(err) => {
                let code = match err {
                    WebhookError::Malformed(_) => "MALFORMED_SIGNATURE",
                    WebhookError::TimestampOutOfRange { .. } => "TIMESTAMP_OUT_OF_RANGE",
                    WebhookError::InvalidSignature => "INVALID_WEBHOOK_SIGNATURE",
                    WebhookError::Decode(_) => "INVALID_PAYLOAD",
                };
                (err.status_code(), code, err.to_string())
            }
            WebhookApiError::Handler(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Notification could not be processed".to_string(),
            ),
        };

        let body = ErrorResponse {
            error_code: error_code.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_maps_missing_header_to_400() {
        let err = WebhookApiError::from(WebhookError::Malformed(SignatureParseError::MissingHeader));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_maps_invalid_signature_to_401() {
        let err = WebhookApiError::from(WebhookError::InvalidSignature);
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn api_error_maps_stale_timestamp_to_401() {
        let err = WebhookApiError::from(WebhookError::TimestampOutOfRange {
            skew_ms: 400_000,
            max_age_ms: 300_000,
        });
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn api_error_maps_decode_to_400() {
        let err = WebhookApiError::from(WebhookError::Decode("bad".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_maps_handler_failure_to_500() {
        let err = WebhookApiError::Handler(HandlerError::new("database unavailable"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
