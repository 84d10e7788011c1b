//! Domain layer: IremboPay wire types and the pure logic around them.
//!
//! # Module Organization
//!
//! - `errors` - Outbound call failures (`IremboPayError`, `ApiError`)
//! - `values` - Wire enums (status, currency, payment method, ...)
//! - `invoice` - Invoice requests and responses
//! - `payment` - Mobile-money payment initiation
//! - `idempotency` - Deterministic idempotency keys
//! - `timestamp` - RFC3339 helpers
//! - `webhook` - Signature codec, verifier, and payment notifications

pub mod errors;
pub mod idempotency;
pub mod invoice;
pub mod payment;
pub mod timestamp;
pub mod values;
pub mod webhook;

pub use errors::{ApiError, IremboPayError};
pub use idempotency::{derive_key, IdempotencyKey, IDEMPOTENCY_KEY_HEADER};
pub use invoice::{
    BatchInvoiceRequest, Customer, Invoice, InvoiceRequest, PaymentItem, UpdateInvoiceRequest,
};
pub use payment::{MomoPaymentRequest, MomoPaymentResponse};
pub use timestamp::{format_time, parse_time};
pub use values::{Currency, InvoiceType, Language, MomoProvider, PaymentMethod, PaymentStatus};
