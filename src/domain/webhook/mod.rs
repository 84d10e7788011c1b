//! Inbound webhook handling: signature codec, verification, and the
//! notification payload.

mod errors;
mod notification;
mod signature;
mod verifier;

pub use errors::WebhookError;
pub use notification::PaymentNotification;
pub use signature::{
    compute_signature, SignatureHeader, SignatureParseError, SIGNATURE_HEADER, SIGNATURE_HEX_LEN,
};
pub use verifier::WebhookVerifier;
