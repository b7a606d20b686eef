//! # `aggregateAttestations`
//!
//! `spec.md` §6: the attestation-aggregation predicate, composing
//! `repomesh_attest::aggregate_attestations` (per-check consensus) and
//! `repomesh_attest::collect_disputes` (observational, never feeding back
//! into consensus) into a single result — `spec.md` §4.4 treats disputes as
//! a sibling output of aggregation, not an input to it.

use repomesh_attest::{aggregate_attestations, collect_disputes, CheckConsensus, Dispute};
use repomesh_model::{Event, ManifestSet, VerifierPolicy};

/// `aggregateAttestations`'s result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationResult {
    pub ok: bool,
    pub consensus: Vec<CheckConsensus>,
    pub disputes: Vec<Dispute>,
}

/// Aggregate every `AttestationPublished` event in `events` into per-check
/// consensus, and surface any disputes alongside it (`spec.md` §4.4).
pub fn aggregate(events: &[Event], manifests: &ManifestSet, policy: &VerifierPolicy) -> AggregationResult {
    AggregationResult {
        ok: true,
        consensus: aggregate_attestations(events, manifests, policy),
        disputes: collect_disputes(events),
    }
}
