//! IremboPay - Client library for the IremboPay payment API
//!
//! Creates and manages invoices, initiates mobile-money payments, and
//! verifies the signed payment notifications IremboPay delivers by webhook.
//!
//! ```ignore
//! let config = IremboPayConfig::load()?;
//! let client = IremboPayClient::new(&config)?;
//! let invoice = client.get_invoice("880419623157", &CancellationToken::new()).await?;
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::IremboPayClient;
pub use config::{Environment, IremboPayConfig};
pub use domain::webhook::{PaymentNotification, WebhookError, WebhookVerifier};
pub use domain::{IdempotencyKey, IremboPayError};
pub use ports::{NotificationHandler, PaymentGateway};
