//! # Hex32 — 64-Character Hex Digest Newtype
//!
//! Wraps a 32-byte value rendered as a lowercase 64-character hex string.
//! Used for `canonicalHash`, `artifacts[].sha256`, Merkle roots, and
//! manifest hashes throughout `spec.md` — anywhere a "64 hex chars" field
//! is named. Following the teacher's newtype discipline (`EntityId`,
//! `CorridorId`, ...): no bare `String` is passed where a validated digest
//! string is expected.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::HexError;

/// A 32-byte value rendered as lowercase hex (64 characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hex32([u8; 32]);

impl Hex32 {
    /// Wrap raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Access the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render as a lowercase 64-character hex string.
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.0)
    }

    /// Parse from a hex string, case-insensitively, trimming whitespace.
    pub fn from_hex(s: &str) -> Result<Self, HexError> {
        let s = s.trim();
        if s.len() != 64 {
            return Err(HexError::WrongLength {
                expected: 64,
                actual: s.len(),
            });
        }
        let bytes = hex_to_bytes(s)?;
        let mut out = [0u8; 32];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl std::fmt::Display for Hex32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Hex32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hex32 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Encode bytes as lowercase hex.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decode a hex string (even length, case-insensitive) into bytes.
pub fn hex_to_bytes(s: &str) -> Result<Vec<u8>, HexError> {
    let s = s.trim();
    if s.len() % 2 != 0 {
        return Err(HexError::InvalidDigit(s.to_string()));
    }
    (0..s.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&s[i..i + 2], 16).map_err(|_| HexError::InvalidDigit(s.to_string()))
        })
        .collect()
}

/// Whether `s` is exactly 64 lowercase-or-uppercase hex characters.
pub fn is_hex64(s: &str) -> bool {
    let s = s.trim();
    s.len() == 64 && s.bytes().all(|b| b.is_ascii_hexdigit())
}
