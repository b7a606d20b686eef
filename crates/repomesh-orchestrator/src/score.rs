//! # `computeScores`
//!
//! `spec.md` §6: the scoring predicate, composing `repomesh_score`'s three
//! independent computations — integrity score, assurance score, and
//! coverage projection — for one release under a resolved profile.

use repomesh_attest::CheckConsensus;
use repomesh_model::{AssuranceWeights, Event, EventType, Overrides, Profile, RepoId, VersionTag};
use repomesh_score::{assurance_score, coverage_projection, integrity_score, CoverageProjection};

use crate::error::OrchestratorError;

/// `computeScores`'s result (`spec.md` §4.5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreResult {
    pub ok: bool,
    pub repo: RepoId,
    pub version: VersionTag,
    pub integrity: u32,
    pub assurance: u32,
    pub coverage: CoverageProjection,
}

/// Compute the full score triple for a release's `ReleasePublished` event
/// under `profile` (layered over `overrides`, if any), given the full
/// event log (for the integrity score's policy-violation scan) and the
/// attestation consensus already resolved for it by `aggregateAttestations`.
pub fn compute_scores(
    repo: &RepoId,
    version: &VersionTag,
    events: &[Event],
    profile: &Profile,
    overrides: Option<&Overrides>,
    base_default: AssuranceWeights,
    consensus: &[CheckConsensus],
) -> Result<ScoreResult, OrchestratorError> {
    let release = events
        .iter()
        .find(|e| {
            e.event_type == EventType::ReleasePublished && e.repo == *repo && e.version == *version
        })
        .ok_or_else(|| OrchestratorError::ReleaseNotFound {
            repo: repo.to_string(),
            version: version.to_string(),
        })?;

    let integrity = integrity_score(release, events, consensus);
    let assurance = assurance_score(repo, version, profile, overrides, base_default, consensus);
    let coverage = coverage_projection(repo, version, profile, consensus);

    Ok(ScoreResult {
        ok: true,
        repo: repo.clone(),
        version: version.clone(),
        integrity,
        assurance,
        coverage,
    })
}
