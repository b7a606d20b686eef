//! C6 (verification orchestrator) error type, following the teacher's
//! layered per-concern error enum pattern (`spec.md` §7): orchestrator-only
//! concerns get their own variants, everything already owned by an
//! upstream crate folds in via `#[from]` rather than being re-described
//! here.

use repomesh_anchor::AnchorError;
use repomesh_log::AdmissionError;
use repomesh_model::C1Error;
use thiserror::Error;

/// Failure modes of `verify_release` and `verify_anchor_proof` (`spec.md`
/// §4.6).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrchestratorError {
    /// No `ReleasePublished` event exists for `(repo, version)`.
    #[error("no release published event found for {repo}@{version}")]
    ReleaseNotFound { repo: String, version: String },

    /// C1 verification of the release event (or one of its attestations)
    /// failed.
    #[error("release verification failed: {0}")]
    ReleaseVerification(#[from] C1Error),

    /// A partition's manifest, memo, or Merkle reconstruction failed —
    /// folded in from `repomesh-anchor` rather than duplicated (covers
    /// `ManifestUnavailable`, `ManifestTampered`, `PartitionLeafCountMismatch`,
    /// `RootMismatch`, `MemoDecodeFailed`, `MemoTooLarge`).
    #[error(transparent)]
    Anchor(#[from] AnchorError),

    /// Batch admission into the append-only log failed — folded in from
    /// `repomesh-log` rather than duplicated (`appendBatch`, `spec.md` §4.2).
    #[error(transparent)]
    Admission(#[from] AdmissionError),

    /// `emitAnchor` found nothing to anchor: the selected partition has no
    /// events, so no manifest can be materialized (`spec.md` §4.3).
    #[error("partition {partition_id:?} is empty, nothing to anchor")]
    EmptyPartition { partition_id: String },

    /// An anchor-proof memo was missing a field required to reconstruct
    /// its partition (`spec.md` §4.6 "Anchor-proof replay").
    #[error("anchor-proof memo missing required field: {field}")]
    AnchorProofMissingField { field: String },

    /// A replayed memo's schema version (`v`) does not match the version
    /// this core materializes manifests under.
    #[error("anchor-proof memo version mismatch: expected {expected}, got {actual}")]
    AnchorProofVersionMismatch { expected: u32, actual: u32 },

    /// The external ledger could not be reached after retry
    /// (warn-class, `spec.md` §7).
    #[error("ledger unavailable: {0}")]
    LedgerUnavailable(String),

    /// An evidence URI could not be fetched after retry
    /// (warn-class, `spec.md` §7).
    #[error("evidence unavailable at {uri}: {reason}")]
    EvidenceUnavailable { uri: String, reason: String },

    /// A signing key could not be obtained from the signing-key provider
    /// after retry (warn-class, `spec.md` §7): `emitAnchor` can be rerun
    /// once the provider recovers, since ledger submission already
    /// succeeded by this point and is idempotent against the same memo.
    #[error("signing key {key_id} unavailable: {reason}")]
    SigningKeyUnavailable { key_id: String, reason: String },
}

impl OrchestratorError {
    /// Whether this failure is warn-class (`spec.md` §7): the enclosing
    /// operation degrades to "unverifiable right now" rather than a hard
    /// failure. Mirrors `AnchorError::is_warn` and
    /// `AttestError`'s warn-as-value treatment of `Untrusted` consensus.
    pub fn is_warn(&self) -> bool {
        match self {
            OrchestratorError::LedgerUnavailable(_) => true,
            OrchestratorError::EvidenceUnavailable { .. } => true,
            OrchestratorError::SigningKeyUnavailable { .. } => true,
            OrchestratorError::Anchor(inner) => inner.is_warn(),
            _ => false,
        }
    }
}
