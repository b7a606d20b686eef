//! # repomesh-core — Foundational Types for the Trust Core
//!
//! The bedrock crate of the repomesh trust-verification core. Defines the
//! primitives every other crate depends on: deterministic canonicalization,
//! content digests, UTC timestamps, and hex-digest newtypes.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** All digest and signature computation
//!    flows through `CanonicalBytes::new()`. No raw `serde_json::to_vec()`
//!    for signed or hashed data, ever.
//! 2. **Hex newtypes for hash-shaped strings.** `Hex32` wraps the 64-hex-char
//!    fields named throughout `spec.md` (canonical hashes, artifact
//!    digests, Merkle roots) so a bare `String` is never passed where a
//!    validated digest is expected.
//! 3. **UTC-only timestamps, millisecond precision**, matching the event
//!    schema's `timestamp` field exactly (§3).
//!
//! ## Crate Policy
//!
//! - No dependency on other `repomesh-*` crates — this is the leaf of the
//!   dependency DAG.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod hex;
pub mod temporal;

pub use canonical::CanonicalBytes;
pub use digest::{ContentDigest, DigestAlgorithm};
pub use error::{CanonicalizationError, HexError};
pub use hex::Hex32;
pub use temporal::Timestamp;
