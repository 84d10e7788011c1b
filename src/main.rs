//! IremboPay webhook receiver.
//!
//! Serves `POST /webhooks/irembopay`, verifies each delivery, and logs the
//! resulting payment notification.
//!
//! # Environment
//!
//! - `IREMBOPAY__SECRET_KEY` and the other `IREMBOPAY__*` settings
//! - `WEBHOOK_ADDR` - listen address (default `0.0.0.0:8080`)
//! - `RUST_LOG` - log filter (default `info`)
//! - `LOG_FORMAT` - `json` for JSON lines

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use irembopay::adapters::{webhook_routes, WebhookState};
use irembopay::ports::{HandlerError, NotificationHandler};
use irembopay::{IremboPayConfig, PaymentNotification, WebhookVerifier};

const DEFAULT_ADDR: &str = "0.0.0.0:8080";

/// Logs each verified notification.
struct LoggingNotificationHandler;

#[async_trait]
impl NotificationHandler for LoggingNotificationHandler {
    async fn handle(&self, notification: &PaymentNotification) -> Result<(), HandlerError> {
        tracing::info!(
            invoice_number = %notification.invoice_number,
            transaction_id = %notification.transaction_id,
            payment_status = %notification.payment_status,
            amount = notification.amount,
            currency = %notification.currency,
            "Payment notification received"
        );
        Ok(())
    }
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = IremboPayConfig::load()?;
    tracing::info!(environment = %config.environment, host = config.resolved_host(), "Configuration loaded");

    let state = WebhookState::new(
        Arc::new(WebhookVerifier::from_config(&config)),
        Arc::new(LoggingNotificationHandler),
        config.webhook_max_age(),
    );
    let app = Router::new().nest("/webhooks", webhook_routes(state));

    let addr = std::env::var("WEBHOOK_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Webhook receiver listening");

    axum::serve(listener, app).await?;
    Ok(())
}
