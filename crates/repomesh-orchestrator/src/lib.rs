//! # repomesh-orchestrator — Verification Orchestrator (C6)
//!
//! The six exposed predicates of `spec.md` §6, each a plain library
//! function returning a structured `{ok, ...}` result: `appendBatch`
//! ([`append::append_batch`]), `emitAnchor` ([`emit::emit_anchor`]),
//! `aggregateAttestations` ([`aggregate::aggregate`]), `computeScores`
//! ([`score::compute_scores`]), `verifyRelease` ([`verify::verify_release`]),
//! and `verifyAnchor` ([`verify::verify_anchor_proof`]). This crate never
//! exits the process or owns a CLI surface — it composes every other
//! crate's primitives and never duplicates their logic.
//!
//! ## Key Design Principles
//!
//! - Every predicate is read-only except `appendBatch` and `emitAnchor`,
//!   which are the only two that mutate the log / submit to the external
//!   ledger — and both do so through the same trait seams
//!   (`repomesh_log::AppendOnlyLog`, [`contracts::LedgerClient`]) the rest
//!   of this crate already relies on, so there is exactly one path that
//!   touches external state.
//! - External I/O (`LedgerClient`, `SigningKeyProvider`, `EvidenceFetcher`)
//!   always goes through [`retry::with_retry`] — a bare call to a consumed
//!   contract method never appears directly in this crate's own logic.
//!
//! ## Crate Policy
//!
//! - Depends on every other `repomesh-*` crate plus `tokio` (bounded use:
//!   timeouts and backoff for external I/O, never a network stack).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod aggregate;
pub mod append;
pub mod contracts;
pub mod emit;
pub mod error;
pub mod retry;
pub mod score;
pub mod verify;

pub use aggregate::{aggregate, AggregationResult};
pub use append::{append_batch, AppendBatchResult};
pub use contracts::{EvidenceFetcher, LedgerClient, SigningKeyProvider};
pub use emit::{emit_anchor, EmitAnchorResult};
pub use error::OrchestratorError;
pub use score::{compute_scores, ScoreResult};
pub use verify::{
    verify_anchor_proof, verify_release, AnchorProofResult, AnchorStatus, AttestationVerification,
    VerificationResult,
};
