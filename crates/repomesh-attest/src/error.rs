//! C4 (attestation aggregator) error type, following the teacher's layered
//! per-concern error enum pattern (`spec.md` §7).
//!
//! `spec.md` §7 names no attestation-specific error kind beyond noting that
//! `PolicyNoTrustedSources` is *not* an error (it surfaces as
//! `Consensus::Untrusted`). The one failure mode genuinely local to this
//! crate — a dispute event's `notes` tail not parsing into a target hash —
//! is intentionally non-fatal to aggregation (disputes are "observational",
//! `spec.md` §4.4): [`crate::dispute::collect_disputes`] skips a malformed
//! dispute rather than erroring the whole batch. This type exists so that
//! callers who *do* want to inspect why a specific dispute was skipped can.

use thiserror::Error;

/// Failure modes local to attestation aggregation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttestError {
    /// A `attestation.dispute` event's `notes` JSON tail did not carry a
    /// parseable target `canonicalHash`.
    #[error("malformed dispute target in event notes: {reason}")]
    MalformedDisputeTarget { reason: String },
}
