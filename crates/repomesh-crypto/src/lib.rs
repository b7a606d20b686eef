//! # repomesh-crypto — Cryptographic Primitives for the Trust Core
//!
//! Ed25519 signing/verification, SHA-256 digests, and the base64 codec
//! `signature.value` needs.
//!
//! ## Key Design Principles
//!
//! 1. **Digest-target signing.** Event authorship signatures are taken
//!    over the raw bytes of a canonical hash (`sign_digest`), not over
//!    canonical JSON — see [`ed25519`] for the full rationale.
//! 2. **No hand-rolled crypto.** Ed25519 and SHA-256 come from
//!    `ed25519-dalek` and `sha2`; this crate only adapts their APIs to
//!    the trust core's newtypes.
//!
//! ## Crate Policy
//!
//! - Depends only on `repomesh-core` among workspace crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod base64;
pub mod ed25519;
pub mod error;
pub mod pem;
pub mod sha256;

pub use ed25519::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
pub use error::CryptoError;
pub use pem::decode_ed25519_public_key_pem;
pub use sha256::{sha256_digest, sha256_hex};
