//! # Content Digest
//!
//! Defines `ContentDigest`, the output type of SHA-256 digest computation
//! over `CanonicalBytes` (computed in `repomesh-crypto`, which depends on
//! this crate).
//!
//! ## Security Invariant
//!
//! `ContentDigest` carries an algorithm tag so that future digest schemes
//! cannot be silently confused with SHA-256 ones, mirroring the teacher's
//! `DigestAlgorithm` forward-compatibility pattern. The trust core spec
//! (`spec.md` §4.1) only ever uses SHA-256; the tag exists for the same
//! reason the teacher carries one for Poseidon2 — to make a future
//! algorithm addition an exhaustive-match compile error everywhere a digest
//! is consumed.

use serde::{Deserialize, Serialize};

/// The hash algorithm used to produce a content digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestAlgorithm {
    /// SHA-256 — the only algorithm the trust core currently uses.
    Sha256,
}

/// A content-addressed digest with its algorithm tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest {
    /// The hash algorithm that produced this digest.
    pub algorithm: DigestAlgorithm,
    /// The raw 32-byte digest value.
    pub bytes: [u8; 32],
}

impl ContentDigest {
    /// Create a new content digest from raw bytes and algorithm.
    pub fn new(algorithm: DigestAlgorithm, bytes: [u8; 32]) -> Self {
        Self { algorithm, bytes }
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}",
            match self.algorithm {
                DigestAlgorithm::Sha256 => "sha256",
            },
            self.to_hex()
        )
    }
}
