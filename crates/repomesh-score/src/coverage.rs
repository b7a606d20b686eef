//! # Coverage Projection
//!
//! `spec.md` §4.5 "Coverage projection": `expectedChecks`, `completedChecks`,
//! `missingChecks` for a release, compared against the profile's required
//! assurance-check set.
//!
//! Resolved scope: coverage projection is computed over
//! `requiredChecks.assurance` — the set that actually has a per-check
//! consensus entry to compare against. The three intrinsic integrity
//! checks that are never attestation-backed (`signed`, `hasArtifacts`,
//! `noPolicyViolations`) are always knowable directly from the event log
//! and so never appear as "missing"; `spec.md` §4.5 does not name a
//! distinct coverage projection over `requiredChecks.integrity`.

use std::collections::BTreeSet;

use repomesh_attest::CheckConsensus;
use repomesh_model::{Profile, RepoId, VersionTag};

/// The expected/completed/missing check-kind sets for one release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageProjection {
    pub expected_checks: BTreeSet<String>,
    pub completed_checks: BTreeSet<String>,
    pub missing_checks: BTreeSet<String>,
}

/// Compute the coverage projection for a release under `profile`
/// (`spec.md` §4.5). A required check counts as completed if it has *any*
/// consensus entry, regardless of whether that consensus resolved to
/// `Untrusted`/`Mixed` — "completed" means observed, not "passed".
pub fn coverage_projection(
    repo: &RepoId,
    version: &VersionTag,
    profile: &Profile,
    consensus: &[CheckConsensus],
) -> CoverageProjection {
    let expected_checks = profile.required_checks.assurance.clone();

    let observed: BTreeSet<String> = consensus
        .iter()
        .filter(|c| c.repo == *repo && c.version == *version)
        .map(|c| c.check_kind.clone())
        .collect();

    let completed_checks: BTreeSet<String> =
        expected_checks.intersection(&observed).cloned().collect();
    let missing_checks: BTreeSet<String> = expected_checks
        .difference(&completed_checks)
        .cloned()
        .collect();

    CoverageProjection {
        expected_checks,
        completed_checks,
        missing_checks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repomesh_attest::{AttestationSource, Consensus};
    use repomesh_model::{RequiredChecks, Verdict};
    use std::collections::BTreeSet as Set;

    fn profile_requiring(checks: &[&str]) -> Profile {
        Profile {
            name: "test".to_string(),
            required_evidence: Default::default(),
            required_checks: RequiredChecks {
                integrity: Default::default(),
                assurance: checks.iter().map(|s| s.to_string()).collect::<Set<_>>(),
            },
            scoring: Default::default(),
        }
    }

    #[test]
    fn test_all_required_checks_completed() {
        let repo = RepoId::parse("acme/widgets").unwrap();
        let version = VersionTag::parse("1.0.0").unwrap();
        let profile = profile_requiring(&["license.audit", "security.scan"]);
        let consensus = vec![
            CheckConsensus {
                repo: repo.clone(),
                version: version.clone(),
                check_kind: "license.audit".to_string(),
                consensus: Consensus::Verdict(Verdict::Pass),
                sources: vec![],
            },
            CheckConsensus {
                repo: repo.clone(),
                version: version.clone(),
                check_kind: "security.scan".to_string(),
                consensus: Consensus::Verdict(Verdict::Fail),
                sources: vec![],
            },
        ];
        let projection = coverage_projection(&repo, &version, &profile, &consensus);
        assert!(projection.missing_checks.is_empty());
        assert_eq!(projection.completed_checks.len(), 2);
    }

    #[test]
    fn test_partial_coverage_reports_missing() {
        let repo = RepoId::parse("acme/widgets").unwrap();
        let version = VersionTag::parse("1.0.0").unwrap();
        let profile = profile_requiring(&["license.audit", "security.scan"]);
        let consensus = vec![CheckConsensus {
            repo: repo.clone(),
            version: version.clone(),
            check_kind: "license.audit".to_string(),
            consensus: Consensus::Verdict(Verdict::Pass),
            sources: vec![] as Vec<AttestationSource>,
        }];
        let projection = coverage_projection(&repo, &version, &profile, &consensus);
        assert_eq!(projection.completed_checks, Set::from(["license.audit".to_string()]));
        assert_eq!(projection.missing_checks, Set::from(["security.scan".to_string()]));
    }

    #[test]
    fn test_unrelated_release_does_not_contaminate_coverage() {
        let repo = RepoId::parse("acme/widgets").unwrap();
        let version = VersionTag::parse("1.0.0").unwrap();
        let other_repo = RepoId::parse("acme/other").unwrap();
        let profile = profile_requiring(&["license.audit"]);
        let consensus = vec![CheckConsensus {
            repo: other_repo,
            version: version.clone(),
            check_kind: "license.audit".to_string(),
            consensus: Consensus::Verdict(Verdict::Pass),
            sources: vec![],
        }];
        let projection = coverage_projection(&repo, &version, &profile, &consensus);
        assert!(projection.completed_checks.is_empty());
        assert_eq!(projection.missing_checks.len(), 1);
    }
}
