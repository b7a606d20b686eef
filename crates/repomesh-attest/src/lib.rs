//! # repomesh-attest — Attestation Aggregator (C4)
//!
//! Groups `AttestationPublished` sources by `(repo, version, check-kind)`,
//! dedupes by signer, and resolves consensus under the governing
//! [`repomesh_model::VerifierPolicy`] (`spec.md` §4.4). Disputes are
//! surfaced separately and never feed back into consensus.
//!
//! ## Key Design Principles
//!
//! - `Consensus::Untrusted` (a `trusted-set` check with no trusted
//!   survivors) and `PolicyNoTrustedSources` are values, not errors —
//!   `spec.md` §7 is explicit that this is not a terminal failure.
//! - Disputes are collected independently of consensus resolution
//!   ([`dispute::collect_disputes`]); a malformed dispute is skipped, never
//!   propagated as a batch-wide failure.
//!
//! ## Crate Policy
//!
//! - Depends on `repomesh-core` and `repomesh-model`.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod consensus;
pub mod dispute;
pub mod error;

pub use consensus::{aggregate_attestations, AttestationSource, CheckConsensus, Consensus};
pub use dispute::{collect_disputes, Dispute};
pub use error::AttestError;
