//! IremboPay API adapter.
//!
//! - `credentials` - Validated host, version, and secret
//! - `transport` - Request execution and response classification
//! - `client` - `PaymentGateway` implementation

mod client;
mod credentials;
mod transport;

pub use client::IremboPayClient;
pub use credentials::{Credentials, API_VERSION_HEADER, SECRET_KEY_HEADER};
pub use transport::{ApiRequest, ApiTransport};
