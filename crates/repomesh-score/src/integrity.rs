//! # Integrity Score
//!
//! `spec.md` §4.5 "Integrity score": six weighted boolean checks, capped at
//! 100.

use repomesh_attest::{CheckConsensus, Consensus};
use repomesh_model::{Event, EventType, RepoId, Verdict, VersionTag};

/// Points awarded unconditionally to any release accepted into the log.
pub const POINTS_SIGNED: u32 = 15;
/// Points awarded iff the release's artifact list is non-empty.
pub const POINTS_HAS_ARTIFACTS: u32 = 15;
/// Points awarded iff no `PolicyViolation` targets this `(repo, version)`.
pub const POINTS_NO_POLICY_VIOLATIONS: u32 = 15;
/// Points awarded iff `sbom.present` consensus is `pass`, or the release's
/// own attestations list names `sbom`/`sbom.present`.
pub const POINTS_SBOM_PRESENT: u32 = 20;
/// Points awarded symmetrically for `provenance.present`.
pub const POINTS_PROVENANCE_PRESENT: u32 = 20;
/// Points awarded iff `signature.chain` consensus is `pass`.
pub const POINTS_SIGNATURE_CHAIN: u32 = 15;

fn consensus_is_pass(consensus: &[CheckConsensus], repo: &RepoId, version: &VersionTag, check: &str) -> bool {
    consensus.iter().any(|c| {
        c.repo == *repo
            && c.version == *version
            && c.check_kind == check
            && matches!(c.consensus, Consensus::Verdict(Verdict::Pass))
    })
}

fn release_names_inline(release: &Event, names: &[&str]) -> bool {
    release
        .attestations
        .iter()
        .any(|a| names.contains(&a.kind.as_str()))
}

fn has_policy_violation(events: &[Event], repo: &RepoId, version: &VersionTag) -> bool {
    events
        .iter()
        .any(|e| e.event_type == EventType::PolicyViolation && e.repo == *repo && e.version == *version)
}

/// Compute the integrity score (0-100) for a `ReleasePublished` event,
/// given the full event log (for the policy-violation scan) and the
/// attestation consensus results (`spec.md` §4.5).
pub fn integrity_score(release: &Event, events: &[Event], consensus: &[CheckConsensus]) -> u32 {
    let mut score = POINTS_SIGNED;

    if !release.artifacts.is_empty() {
        score += POINTS_HAS_ARTIFACTS;
    }
    if !has_policy_violation(events, &release.repo, &release.version) {
        score += POINTS_NO_POLICY_VIOLATIONS;
    }
    if consensus_is_pass(consensus, &release.repo, &release.version, "sbom.present")
        || release_names_inline(release, &["sbom", "sbom.present"])
    {
        score += POINTS_SBOM_PRESENT;
    }
    if consensus_is_pass(consensus, &release.repo, &release.version, "provenance.present")
        || release_names_inline(release, &["provenance", "provenance.present"])
    {
        score += POINTS_PROVENANCE_PRESENT;
    }
    if consensus_is_pass(consensus, &release.repo, &release.version, "signature.chain") {
        score += POINTS_SIGNATURE_CHAIN;
    }

    score.min(100)
}
