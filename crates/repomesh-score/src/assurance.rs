//! # Assurance Score
//!
//! `spec.md` §4.5 "Assurance score": per-required-check consensus-weighted
//! scoring, normalized to 0-100.

use repomesh_attest::{CheckConsensus, Consensus};
use repomesh_config::effective_assurance_weights;
use repomesh_model::{AssuranceWeights, Overrides, Profile, RepoId, Verdict, VersionTag};

fn consensus_for<'a>(
    consensus: &'a [CheckConsensus],
    repo: &RepoId,
    version: &VersionTag,
    check: &str,
) -> Option<&'a Consensus> {
    consensus
        .iter()
        .find(|c| c.repo == *repo && c.version == *version && c.check_kind == check)
        .map(|c| &c.consensus)
}

/// Weight awarded for a resolved consensus value. `Mixed`/`Untrusted`
/// consensus awards 0 — neither maps onto a `pass`/`warn`/`fail` weight
/// (`spec.md` §4.5 only names those three).
fn awarded_weight(consensus: Option<&Consensus>, weights: AssuranceWeights) -> u32 {
    match consensus {
        Some(Consensus::Verdict(Verdict::Pass)) => weights.pass,
        Some(Consensus::Verdict(Verdict::Warn)) => weights.warn,
        Some(Consensus::Verdict(Verdict::Fail)) => weights.fail,
        Some(Consensus::Mixed) | Some(Consensus::Untrusted) | None => 0,
    }
}

/// Compute the assurance score (0-100, normalized) for a release under the
/// effective profile/overrides configuration (`spec.md` §4.5).
///
/// `base_default` is the fallback weight set applied to a required check
/// with no profile- or override-level weight entry.
pub fn assurance_score(
    repo: &RepoId,
    version: &VersionTag,
    profile: &Profile,
    overrides: Option<&Overrides>,
    base_default: AssuranceWeights,
    consensus: &[CheckConsensus],
) -> u32 {
    let required = &profile.required_checks.assurance;
    if required.is_empty() {
        return 0;
    }

    let mut raw_sum: u64 = 0;
    let mut pass_weight_sum: u64 = 0;

    for check in required {
        let weights = effective_assurance_weights(base_default, profile, overrides, check);
        let resolved = consensus_for(consensus, repo, version, check);
        raw_sum += awarded_weight(resolved, weights) as u64;
        pass_weight_sum += weights.pass as u64;
    }

    if pass_weight_sum == 0 {
        return 0;
    }
    if pass_weight_sum == 100 {
        return raw_sum.min(100) as u32;
    }
    (((raw_sum * 100) / pass_weight_sum).min(100)) as u32
}
