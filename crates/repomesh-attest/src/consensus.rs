//! # Consensus Resolution
//!
//! `spec.md` §4.4: grouping `AttestationPublished` sources by
//! `(repo, version, check-kind)`, deduping by `(kind, signerNode)` keeping
//! the earliest observation, and resolving a single consensus verdict under
//! the governing [`CheckPolicy`].

use std::collections::{BTreeMap, HashMap};

use repomesh_core::Timestamp;
use repomesh_model::{
    parse_attestor_uri, CheckPolicy, ConflictPolicy, Event, EventType, ManifestSet, PolicyMode,
    RepoId, Verdict, VerifierPolicy, VersionTag,
};

/// A single deduplicated attestation observation feeding a consensus
/// computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttestationSource {
    /// The participant id the signing key resolved to (`spec.md` §4.4
    /// "signerNode").
    pub signer_node: String,
    pub verdict: Verdict,
    pub observed_at: Timestamp,
}

/// The resolved consensus for one `(repo, version, check-kind)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consensus {
    /// Every surviving source agreed, or a conflict policy settled on this
    /// verdict.
    Verdict(Verdict),
    /// `fail-wins` with no `fail`/`warn` but non-unanimous survivors (not
    /// reachable from a correctly-populated source set, since any all-pass
    /// set is unanimous and handled before conflict-policy dispatch; kept
    /// as a defensive terminal case rather than panicking).
    Mixed,
    /// `mode = trusted-set` and no source's signer is in `trustedNodes`
    /// (`spec.md` §7: surfaces as a value, not a terminal error).
    Untrusted,
}

/// The full result for one `(repo, version, check-kind)` group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConsensus {
    pub repo: RepoId,
    pub version: VersionTag,
    pub check_kind: String,
    pub consensus: Consensus,
    pub sources: Vec<AttestationSource>,
}

/// The default policy applied to a check kind with no configured entry in
/// the [`VerifierPolicy`]: open participation, `fail-wins` resolution.
/// `spec.md` §3/§4.4 assume every check-kind in play has a configured
/// policy; this default keeps aggregation total over an incomplete policy
/// document instead of inventing a new error kind not named in §7.
fn default_check_policy() -> CheckPolicy {
    CheckPolicy {
        mode: PolicyMode::Open,
        trusted_nodes: Default::default(),
        conflict_policy: ConflictPolicy::FailWins,
        quorum: 0,
    }
}

/// Extract `(check_kind, verdict)` from an `AttestationPublished` event's
/// attestation list: URI form first (`repomesh:attestor:<kind>:<verdict>`),
/// falling back to the structured `notes` prefix `"<kind>: <verdict> — ..."`
/// (`spec.md` §4.4). Entries that match neither are skipped rather than
/// failing the batch — attestation aggregation never blocks on a single
/// malformed source.
fn extract_verdicts(event: &Event) -> Vec<(String, Verdict)> {
    let mut out = Vec::new();
    for reference in &event.attestations {
        if reference.kind == "attestation.dispute" {
            continue;
        }
        if let Some((kind, verdict)) = parse_attestor_uri(&reference.uri) {
            out.push((kind.to_string(), verdict));
            continue;
        }
        if let Some(verdict) = parse_notes_prefix(&reference.kind, &event.notes) {
            out.push((reference.kind.clone(), verdict));
        }
    }
    out
}

/// Parse the `"<kind>: <verdict> — <reason>"` prefix form (first line of
/// `notes`, since later lines may carry an unrelated JSON tail).
fn parse_notes_prefix(kind: &str, notes: &str) -> Option<Verdict> {
    let first_line = notes.lines().next()?;
    let rest = first_line.strip_prefix(kind)?.strip_prefix(':')?;
    let verdict_token = rest.trim().split_whitespace().next()?;
    verdict_token.parse().ok()
}

/// Resolve the consensus verdict for `check_kind` over a deduplicated
/// source list, under `policy` (`spec.md` §4.4).
fn resolve(sources: &[AttestationSource], policy: &CheckPolicy) -> Consensus {
    let trusted: Vec<&AttestationSource> = match policy.mode {
        PolicyMode::Open => sources.iter().collect(),
        PolicyMode::TrustedSet => sources
            .iter()
            .filter(|s| policy.trusted_nodes.contains(&s.signer_node))
            .collect(),
    };

    if trusted.is_empty() {
        return Consensus::Untrusted;
    }

    let first = trusted[0].verdict;
    if trusted.iter().all(|s| s.verdict == first) {
        return Consensus::Verdict(first);
    }

    match policy.conflict_policy {
        ConflictPolicy::FailWins => {
            if trusted.iter().any(|s| s.verdict == Verdict::Fail) {
                Consensus::Verdict(Verdict::Fail)
            } else if trusted.iter().any(|s| s.verdict == Verdict::Warn) {
                Consensus::Verdict(Verdict::Warn)
            } else {
                Consensus::Mixed
            }
        }
        ConflictPolicy::Majority => {
            let mut counts: HashMap<Verdict, usize> = HashMap::new();
            for s in &trusted {
                *counts.entry(s.verdict).or_insert(0) += 1;
            }
            let max = *counts.values().max().unwrap_or(&0);
            // Safety tiebreak fail > warn > pass among verdicts at max count.
            [Verdict::Fail, Verdict::Warn, Verdict::Pass]
                .into_iter()
                .find(|v| counts.get(v) == Some(&max))
                .map(Consensus::Verdict)
                .unwrap_or(Consensus::Mixed)
        }
        ConflictPolicy::QuorumPass => {
            let pass_count = trusted.iter().filter(|s| s.verdict == Verdict::Pass).count();
            if pass_count as u32 >= policy.quorum {
                Consensus::Verdict(Verdict::Pass)
            } else {
                Consensus::Verdict(Verdict::Fail)
            }
        }
    }
}

/// Aggregate every `AttestationPublished` event into per-
/// `(repo, version, check-kind)` consensus results (`spec.md` §4.4).
///
/// `events` should be the full admitted log (or a relevant slice); only
/// `AttestationPublished` events with a signature resolvable against
/// `manifests` contribute sources.
pub fn aggregate_attestations(
    events: &[Event],
    manifests: &ManifestSet,
    policy: &VerifierPolicy,
) -> Vec<CheckConsensus> {
    let mut groups: BTreeMap<(RepoId, VersionTag, String), Vec<AttestationSource>> =
        BTreeMap::new();

    for event in events {
        if event.event_type != EventType::AttestationPublished {
            continue;
        }
        let Some(signature) = event.signature.as_ref() else {
            continue;
        };
        let Some((manifest, _)) = manifests.resolve_key(&signature.key_id) else {
            continue;
        };
        let signer_node = manifest.id.clone();

        for (kind, verdict) in extract_verdicts(event) {
            let key = (event.repo.clone(), event.version.clone(), kind);
            let sources = groups.entry(key).or_default();
            match sources.iter_mut().find(|s| s.signer_node == signer_node) {
                Some(existing) if event.timestamp < existing.observed_at => {
                    existing.verdict = verdict;
                    existing.observed_at = event.timestamp;
                }
                Some(_) => {}
                None => sources.push(AttestationSource {
                    signer_node,
                    verdict,
                    observed_at: event.timestamp,
                }),
            }
        }
    }

    groups
        .into_iter()
        .map(|((repo, version, check_kind), sources)| {
            let check_policy = policy
                .policy_for(&check_kind)
                .cloned()
                .unwrap_or_else(default_check_policy);
            let consensus = resolve(&sources, &check_policy);
            CheckConsensus {
                repo,
                version,
                check_kind,
                consensus,
                sources,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use repomesh_core::Hex32;
    use repomesh_model::{AttestationRef, Maintainer, ParticipantKind, ParticipantManifest, Signature};
    use std::collections::BTreeMap as Map;
    use std::collections::BTreeSet;

    fn manifest(id: &str, key_id: &str) -> ParticipantManifest {
        ParticipantManifest {
            id: id.to_string(),
            kind: ParticipantKind::Attestor,
            provides: BTreeSet::new(),
            consumes: BTreeSet::new(),
            maintainers: vec![Maintainer {
                name: "n".to_string(),
                key_id: key_id.to_string(),
                public_key_pem: String::new(),
                contact: String::new(),
            }],
        }
    }

    fn attestation_event(
        repo: &str,
        version: &str,
        key_id: &str,
        kind: &str,
        verdict: Verdict,
        ts: &str,
    ) -> Event {
        Event {
            event_type: EventType::AttestationPublished,
            repo: RepoId::parse(repo).unwrap(),
            version: VersionTag::parse(version).unwrap(),
            commit: "deadbeef".to_string(),
            timestamp: Timestamp::parse(ts).unwrap(),
            artifacts: vec![],
            attestations: vec![AttestationRef {
                kind: kind.to_string(),
                uri: format!("repomesh:attestor:{kind}:{verdict}"),
            }],
            notes: String::new(),
            signature: Some(Signature {
                alg: "ed25519".to_string(),
                key_id: key_id.to_string(),
                value: repomesh_crypto::Ed25519Signature::from_bytes([0u8; 64]),
                canonical_hash: Hex32::from_bytes([0u8; 32]),
            }),
        }
    }

    fn policy_for(check: &str, mode: PolicyMode, conflict: ConflictPolicy, quorum: u32) -> VerifierPolicy {
        let mut checks = Map::new();
        checks.insert(
            check.to_string(),
            CheckPolicy {
                mode,
                trusted_nodes: BTreeSet::from(["verifier-a".to_string(), "verifier-b".to_string()]),
                conflict_policy: conflict,
                quorum,
            },
        );
        VerifierPolicy { checks }
    }

    #[test]
    fn test_unanimous_sources_agree() {
        let events = vec![
            attestation_event("acme/widgets", "1.0.0", "key-a", "license.audit", Verdict::Pass, "2026-01-01T00:00:00.000Z"),
        ];
        let manifests = ManifestSet::new(vec![manifest("verifier-a", "key-a")]);
        let policy = policy_for("license.audit", PolicyMode::Open, ConflictPolicy::FailWins, 0);
        let result = aggregate_attestations(&events, &manifests, &policy);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].consensus, Consensus::Verdict(Verdict::Pass));
    }

    #[test]
    fn test_fail_wins_on_disagreement() {
        let events = vec![
            attestation_event("acme/widgets", "1.0.0", "key-a", "license.audit", Verdict::Pass, "2026-01-01T00:00:00.000Z"),
            attestation_event("acme/widgets", "1.0.0", "key-b", "license.audit", Verdict::Fail, "2026-01-01T00:00:01.000Z"),
        ];
        let manifests = ManifestSet::new(vec![
            manifest("verifier-a", "key-a"),
            manifest("verifier-b", "key-b"),
        ]);
        let policy = policy_for("license.audit", PolicyMode::Open, ConflictPolicy::FailWins, 0);
        let result = aggregate_attestations(&events, &manifests, &policy);
        assert_eq!(result[0].consensus, Consensus::Verdict(Verdict::Fail));
    }

    #[test]
    fn test_majority_ties_resolve_to_fail() {
        let events = vec![
            attestation_event("acme/widgets", "1.0.0", "key-a", "license.audit", Verdict::Pass, "2026-01-01T00:00:00.000Z"),
            attestation_event("acme/widgets", "1.0.0", "key-b", "license.audit", Verdict::Fail, "2026-01-01T00:00:01.000Z"),
        ];
        let manifests = ManifestSet::new(vec![
            manifest("verifier-a", "key-a"),
            manifest("verifier-b", "key-b"),
        ]);
        let policy = policy_for("license.audit", PolicyMode::Open, ConflictPolicy::Majority, 0);
        let result = aggregate_attestations(&events, &manifests, &policy);
        assert_eq!(result[0].consensus, Consensus::Verdict(Verdict::Fail));
    }

    #[test]
    fn test_quorum_pass_requires_threshold() {
        let events = vec![
            attestation_event("acme/widgets", "1.0.0", "key-a", "license.audit", Verdict::Pass, "2026-01-01T00:00:00.000Z"),
            attestation_event("acme/widgets", "1.0.0", "key-b", "license.audit", Verdict::Pass, "2026-01-01T00:00:01.000Z"),
        ];
        let manifests = ManifestSet::new(vec![
            manifest("verifier-a", "key-a"),
            manifest("verifier-b", "key-b"),
        ]);
        let policy = policy_for("license.audit", PolicyMode::Open, ConflictPolicy::QuorumPass, 2);
        let result = aggregate_attestations(&events, &manifests, &policy);
        assert_eq!(result[0].consensus, Consensus::Verdict(Verdict::Pass));

        let policy3 = policy_for("license.audit", PolicyMode::Open, ConflictPolicy::QuorumPass, 3);
        let result3 = aggregate_attestations(&events, &manifests, &policy3);
        assert_eq!(result3[0].consensus, Consensus::Verdict(Verdict::Fail));
    }

    #[test]
    fn test_trusted_set_excludes_untrusted_signer() {
        let events = vec![attestation_event(
            "acme/widgets", "1.0.0", "key-c", "license.audit", Verdict::Pass, "2026-01-01T00:00:00.000Z",
        )];
        let manifests = ManifestSet::new(vec![manifest("verifier-c", "key-c")]);
        let policy = policy_for("license.audit", PolicyMode::TrustedSet, ConflictPolicy::FailWins, 0);
        let result = aggregate_attestations(&events, &manifests, &policy);
        assert_eq!(result[0].consensus, Consensus::Untrusted);
    }

    #[test]
    fn test_dedup_by_signer_keeps_earliest() {
        let events = vec![
            attestation_event("acme/widgets", "1.0.0", "key-a", "license.audit", Verdict::Pass, "2026-01-02T00:00:00.000Z"),
            attestation_event("acme/widgets", "1.0.0", "key-a", "license.audit", Verdict::Fail, "2026-01-01T00:00:00.000Z"),
        ];
        let manifests = ManifestSet::new(vec![manifest("verifier-a", "key-a")]);
        let policy = policy_for("license.audit", PolicyMode::Open, ConflictPolicy::FailWins, 0);
        let result = aggregate_attestations(&events, &manifests, &policy);
        assert_eq!(result[0].sources.len(), 1);
        assert_eq!(result[0].consensus, Consensus::Verdict(Verdict::Fail));
    }

    #[test]
    fn test_unresolvable_signer_is_skipped() {
        let events = vec![attestation_event(
            "acme/widgets", "1.0.0", "key-unknown", "license.audit", Verdict::Pass, "2026-01-01T00:00:00.000Z",
        )];
        let manifests = ManifestSet::new(vec![]);
        let policy = policy_for("license.audit", PolicyMode::Open, ConflictPolicy::FailWins, 0);
        let result = aggregate_attestations(&events, &manifests, &policy);
        assert!(result.is_empty());
    }

    #[test]
    fn test_notes_prefix_fallback_parses_verdict() {
        let mut event = attestation_event(
            "acme/widgets", "1.0.0", "key-a", "sbom.present", Verdict::Pass, "2026-01-01T00:00:00.000Z",
        );
        event.attestations = vec![AttestationRef {
            kind: "sbom.present".to_string(),
            uri: "not-a-uri".to_string(),
        }];
        event.notes = "sbom.present: warn — missing license field".to_string();
        let manifests = ManifestSet::new(vec![manifest("verifier-a", "key-a")]);
        let policy = policy_for("sbom.present", PolicyMode::Open, ConflictPolicy::FailWins, 0);
        let result = aggregate_attestations(&events_singleton(event), &manifests, &policy);
        assert_eq!(result[0].consensus, Consensus::Verdict(Verdict::Warn));
    }

    fn events_singleton(e: Event) -> Vec<Event> {
        vec![e]
    }
}
