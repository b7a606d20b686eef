//! Cryptographic error types, following the teacher's `CryptoError` design.

use thiserror::Error;

/// Error in cryptographic operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Signature verification failed.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// Key parsing failed.
    #[error("key error: {0}")]
    KeyError(String),

    /// Digest or hash-input computation failed.
    #[error("digest error: {0}")]
    DigestError(String),

    /// Base64 decode failed.
    #[error("base64 decode error: {0}")]
    Base64Error(String),
}
