//! Error types for the persisted parts of the arcade
//!
//! The physics cores never fail at runtime; only storage and account
//! handling surface errors to callers.

use thiserror::Error;

/// Failure reading or writing the key-value store
#[derive(Debug, Error)]
pub enum StoreError {
    /// No storage backend (private browsing, no window)
    #[error("storage is not available")]
    Unavailable,
    /// The backend rejected a write (quota, permissions)
    #[error("failed to write key `{key}`: {reason}")]
    Write { key: String, reason: String },
    /// Stored JSON could not be encoded or decoded
    #[error("invalid stored data: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Account operations in the wooden fish game
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    /// Login attempted with a blank user name
    #[error("user name must not be empty")]
    EmptyName,
}

/// A name that does not match any variant of a parsed enum
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {what} `{name}`")]
pub struct UnknownName {
    pub what: &'static str,
    pub name: String,
}
