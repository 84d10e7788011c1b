//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PaymentGateway` - Outbound IremboPay payments API
//! - `NotificationHandler` - Consumer of verified webhook notifications

mod notification_handler;
mod payment_gateway;

pub use notification_handler::{HandlerError, NotificationHandler};
pub use payment_gateway::PaymentGateway;
