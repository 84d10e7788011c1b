//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `irembopay` - Outbound IremboPay API client
//! - `http` - Inbound webhook receiver

pub mod http;
pub mod irembopay;

pub use http::{webhook_routes, WebhookState};
pub use irembopay::{ApiRequest, ApiTransport, Credentials, IremboPayClient};
