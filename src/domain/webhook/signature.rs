//! IremboPay signature header codec.
//!
//! The `irembopay-signature` header carries exactly two fields:
//!
//! ```text
//! t=<unix epoch milliseconds>,s=<hex HMAC-SHA256>
//! ```
//!
//! Fields may appear in either order and surrounding whitespace is ignored.
//! Anything else (a missing field, a third field, an empty value, bad digits
//! or bad hex) is rejected so verification fails closed.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Name of the header carrying the signature on webhook deliveries.
pub const SIGNATURE_HEADER: &str = "irembopay-signature";

/// Length of a hex-encoded HMAC-SHA256 digest.
pub const SIGNATURE_HEX_LEN: usize = 64;

/// Error parsing the signature header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureParseError {
    /// Header is empty or missing.
    #[error("Missing irembopay-signature header")]
    MissingHeader,

    /// Header does not have exactly two fields.
    #[error("Expected 2 comma-separated fields, found {0}")]
    FieldCount(usize),

    /// A field is not of the form `key=value`.
    #[error("Invalid field: {0}")]
    InvalidField(String),

    /// A field key other than `t` or `s`.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// The same key appears twice.
    #[error("Duplicate field: {0}")]
    DuplicateField(&'static str),

    /// Missing or empty `t=` component.
    #[error("Missing timestamp (t=) in signature")]
    MissingTimestamp,

    /// Missing or empty `s=` component.
    #[error("Missing signature (s=) in header")]
    MissingSignature,

    /// `t` is not a non-negative integer fitting in 64 bits.
    #[error("Invalid timestamp format")]
    InvalidTimestamp,

    /// `s` is not 64 hex digits.
    #[error("Invalid signature format (expected 64 hex digits)")]
    InvalidSignatureFormat,
}

/// Parsed `irembopay-signature` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Milliseconds since the Unix epoch at which the delivery was signed.
    pub timestamp_ms: u64,

    /// Lowercase hex HMAC-SHA256 digest.
    pub signature: String,

    /// Timestamp digits exactly as transmitted; they are part of the signed string.
    timestamp_text: String,
}

impl SignatureHeader {
    /// Builds a header from a timestamp and raw digest bytes.
    pub fn new(timestamp_ms: u64, digest: &[u8]) -> Self {
        Self {
            timestamp_ms,
            signature: hex::encode(digest),
            timestamp_text: timestamp_ms.to_string(),
        }
    }

    /// Parse a header value into its components.
    ///
    /// # Format
    ///
    /// ```text
    /// t=<timestamp>,s=<signature>
    /// ```
    pub fn parse(header: &str) -> Result<Self, SignatureParseError> {
        if header.trim().is_empty() {
            return Err(SignatureParseError::MissingHeader);
        }

        let fields: Vec<&str> = header.split(',').collect();
        if fields.len() != 2 {
            return Err(SignatureParseError::FieldCount(fields.len()));
        }

        let mut timestamp: Option<&str> = None;
        let mut signature: Option<&str> = None;

        for field in fields {
            let field = field.trim();
            let (key, value) = field
                .split_once('=')
                .ok_or_else(|| SignatureParseError::InvalidField(field.to_string()))?;

            let (name, slot) = match key.trim() {
                "t" => ("t", &mut timestamp),
                "s" => ("s", &mut signature),
                other => return Err(SignatureParseError::UnknownField(other.to_string())),
            };
            if slot.is_some() {
                return Err(SignatureParseError::DuplicateField(name));
            }
            *slot = Some(value.trim());
        }

        let timestamp_text = timestamp
            .filter(|t| !t.is_empty())
            .ok_or(SignatureParseError::MissingTimestamp)?;
        let signature = signature
            .filter(|s| !s.is_empty())
            .ok_or(SignatureParseError::MissingSignature)?;

        if !timestamp_text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SignatureParseError::InvalidTimestamp);
        }
        let timestamp_ms: u64 = timestamp_text
            .parse()
            .map_err(|_| SignatureParseError::InvalidTimestamp)?;

        if signature.len() != SIGNATURE_HEX_LEN || !signature.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(SignatureParseError::InvalidSignatureFormat);
        }

        Ok(Self {
            timestamp_ms,
            signature: signature.to_ascii_lowercase(),
            timestamp_text: timestamp_text.to_string(),
        })
    }

    /// Signing time, if representable.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.timestamp_ms)
            .ok()
            .and_then(DateTime::from_timestamp_millis)
    }

    /// Timestamp digits as they appear in the signed string.
    pub fn timestamp_text(&self) -> &str {
        &self.timestamp_text
    }

    /// Digest bytes. Empty only if the header was built by hand with bad hex.
    pub fn signature_bytes(&self) -> Vec<u8> {
        hex::decode(&self.signature).unwrap_or_default()
    }
}

impl std::fmt::Display for SignatureHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t={},s={}", self.timestamp_text, self.signature)
    }
}

impl std::str::FromStr for SignatureHeader {
    type Err = SignatureParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Computes HMAC-SHA256 over `"<timestamp>#<payload>"` keyed with `secret`.
pub fn compute_signature(secret: &[u8], timestamp: &str, payload: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(timestamp.as_bytes());
    mac.update(b"#");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}
