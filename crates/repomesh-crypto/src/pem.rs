//! # Minimal Ed25519 Public-Key PEM Decoding
//!
//! Participant manifests carry `publicKey` as PEM (`spec.md` §3). Rather
//! than pull in a full ASN.1/X.509 dependency for one fixed-shape key
//! type, this strips PEM armor and recognizes exactly the two byte shapes
//! an Ed25519 public key PEM can take:
//!
//! - 32 bytes: the raw key, unwrapped.
//! - 44 bytes: a DER `SubjectPublicKeyInfo` wrapping the raw key behind
//!   the fixed 12-byte Ed25519 OID prefix
//!   (`302a300506032b6570032100`), which every Ed25519 SPKI producer emits
//!   byte-for-byte identically since the algorithm has no parameters.
//!
//! Any other decoded length is rejected — this is not a general DER
//! parser, deliberately.

use crate::base64;
use crate::ed25519::Ed25519PublicKey;
use crate::error::CryptoError;

const ED25519_SPKI_PREFIX: [u8; 12] = [
    0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x21, 0x00,
];

/// Decode an Ed25519 public key from a PEM-armored block.
pub fn decode_ed25519_public_key_pem(pem: &str) -> Result<Ed25519PublicKey, CryptoError> {
    let body = strip_pem_armor(pem)?;
    let bytes = base64::decode(&body)?;

    match bytes.len() {
        32 => {
            let mut arr = [0u8; 32];
            arr.copy_from_slice(&bytes);
            Ok(Ed25519PublicKey::from_bytes(arr))
        }
        44 if bytes[..12] == ED25519_SPKI_PREFIX => {
            let mut arr = [0u8; 32];
            arr.copy_from_slice(&bytes[12..]);
            Ok(Ed25519PublicKey::from_bytes(arr))
        }
        other => Err(CryptoError::KeyError(format!(
            "unrecognized Ed25519 public key PEM body length: {other} bytes"
        ))),
    }
}

fn strip_pem_armor(pem: &str) -> Result<String, CryptoError> {
    let mut body = String::new();
    let mut in_block = false;
    for line in pem.lines() {
        let line = line.trim();
        if line.starts_with("-----BEGIN") {
            in_block = true;
            continue;
        }
        if line.starts_with("-----END") {
            in_block = false;
            continue;
        }
        if in_block {
            body.push_str(line);
        }
    }
    if body.is_empty() {
        return Err(CryptoError::KeyError(
            "no PEM body found between BEGIN/END markers".to_string(),
        ));
    }
    Ok(body)
}
