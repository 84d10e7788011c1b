//! Deterministic idempotency keys for retried creation calls.
//!
//! A key is derived from an operation tag (e.g. `"invoice"`) and a
//! caller-supplied identifier (e.g. an order number). Identical inputs always
//! yield the identical key, across processes and restarts, so a caller that
//! retries a creation request after a timeout lets the API de-duplicate it.
//!
//! The key is not verified cryptographically by this library; hashing only
//! keeps keys fixed-length and free of caller-controlled characters.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// HTTP header carrying the idempotency key.
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Deterministic key identifying one logical creation request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Derives the key for `(operation_tag, identifier)`.
    ///
    /// Format: `<operation_tag>-<sha256 hex>`, where the digest covers both
    /// inputs, each prefixed with its big-endian `u64` byte length so that no
    /// two distinct pairs hash the same byte string.
    pub fn derive(operation_tag: &str, identifier: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update((operation_tag.len() as u64).to_be_bytes());
        hasher.update(operation_tag.as_bytes());
        hasher.update((identifier.len() as u64).to_be_bytes());
        hasher.update(identifier.as_bytes());
        let digest = hasher.finalize();

        Self(format!("{}-{}", operation_tag, hex::encode(digest)))
    }

    /// Wraps a key obtained elsewhere (e.g. persisted from an earlier attempt).
    pub fn from_raw(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IdempotencyKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Free-function form of [`IdempotencyKey::derive`].
pub fn derive_key(operation_tag: &str, identifier: &str) -> String {
    IdempotencyKey::derive(operation_tag, identifier).into_inner()
}
