//! # Error Types — Canonicalization and Digest Errors
//!
//! Defines the low-level error types shared by every crate in the trust
//! core. Higher layers (`repomesh-model`, `repomesh-log`, ...) wrap these
//! via `#[from]` into their own concern-specific error enums, following the
//! teacher's layered `MsezError` design.

use thiserror::Error;

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Error parsing or validating a fixed-width hex string (a digest or a
/// signature, most commonly).
#[derive(Error, Debug)]
pub enum HexError {
    /// The string did not have the expected length.
    #[error("expected {expected} hex chars, got {actual}")]
    WrongLength {
        /// Expected character count.
        expected: usize,
        /// Actual character count.
        actual: usize,
    },

    /// The string contained non-hex characters.
    #[error("invalid hex digit in {0:?}")]
    InvalidDigit(String),
}
