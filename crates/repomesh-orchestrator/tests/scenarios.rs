//! End-to-end scenario coverage for the six worked examples this crate's
//! predicates are expected to agree on: a single signed release, a
//! bit-flipped commit, a two-leaf Merkle root, anchor inclusion, a
//! disagreeing pair of verifiers under each conflict policy, and an
//! anchor-memo replay round trip.
//!
//! These mocks are deliberately re-declared here rather than reused from
//! `repomesh_orchestrator::contracts::mocks`: that module is
//! `#[cfg(test)]`-gated inside the library crate and isn't visible to an
//! external integration-test binary.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Mutex;
use std::time::Duration;

use repomesh_anchor::{merkle_root, ManifestStore};
use repomesh_attest::aggregate_attestations;
use repomesh_attest::consensus::Consensus;
use repomesh_core::{Hex32, Timestamp};
use repomesh_crypto::{sha256_digest, Ed25519KeyPair};
use repomesh_model::{
    Artifact, AttestationRef, CheckPolicy, ConflictPolicy, Event, EventType, Maintainer,
    ParticipantKind, ParticipantManifest, PolicyMode, ManifestSet, RepoId, Signature, VerifierPolicy,
    Verdict, VersionTag,
};
use repomesh_orchestrator::contracts::{LedgerClient, SigningKeyProvider};
use repomesh_orchestrator::{emit_anchor, verify_anchor_proof, verify_release, AnchorStatus};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("mock failure: {0}")]
struct MockError(String);

#[derive(Default)]
struct MemStore(HashMap<String, Vec<u8>>);

impl ManifestStore for MemStore {
    type Error = std::convert::Infallible;
    fn load(&self, file_name: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(self.0.get(file_name).cloned())
    }
    fn store(&mut self, file_name: &str, bytes: &[u8]) -> Result<(), Self::Error> {
        self.0.insert(file_name.to_string(), bytes.to_vec());
        Ok(())
    }
}

#[derive(Default)]
struct MockSigningKeyProvider {
    seeds: HashMap<String, [u8; 32]>,
}

impl SigningKeyProvider for MockSigningKeyProvider {
    type Error = MockError;
    async fn seed_for(&self, key_id: &str, _timeout: Duration) -> Result<[u8; 32], Self::Error> {
        self.seeds
            .get(key_id)
            .copied()
            .ok_or_else(|| MockError(format!("no seed for key {key_id}")))
    }
}

#[derive(Default)]
struct InMemoryLedger {
    memos_by_tx: Mutex<HashMap<String, String>>,
    next_tx: Mutex<u64>,
}

impl LedgerClient for InMemoryLedger {
    type Error = MockError;

    async fn submit_memo(&self, memo_hex: &str, _timeout: Duration) -> Result<String, Self::Error> {
        let mut next = self.next_tx.lock().expect("mock mutex poisoned");
        let tx_hash = format!("tx-{:016x}", *next);
        *next += 1;
        self.memos_by_tx
            .lock()
            .expect("mock mutex poisoned")
            .insert(tx_hash.clone(), memo_hex.to_string());
        Ok(tx_hash)
    }

    async fn fetch_memo(&self, tx_hash: &str, _timeout: Duration) -> Result<Option<String>, Self::Error> {
        Ok(self.memos_by_tx.lock().expect("mock mutex poisoned").get(tx_hash).cloned())
    }
}

fn maintainer_manifest(id: &str, key_id: &str, key_pair: &Ed25519KeyPair) -> ParticipantManifest {
    let pem = format!(
        "-----BEGIN PUBLIC KEY-----\n{}\n-----END PUBLIC KEY-----\n",
        repomesh_crypto::base64::encode(key_pair.public_key().as_bytes())
    );
    ParticipantManifest {
        id: id.to_string(),
        kind: ParticipantKind::Registry,
        provides: BTreeSet::new(),
        consumes: BTreeSet::new(),
        maintainers: vec![Maintainer {
            name: "maintainer".to_string(),
            key_id: key_id.to_string(),
            public_key_pem: pem,
            contact: "maintainer@example.com".to_string(),
        }],
    }
}

fn signed_release(
    repo: &str,
    version: &str,
    commit: &str,
    ts: &str,
    key_id: &str,
    key_pair: &Ed25519KeyPair,
) -> Event {
    let mut event = Event {
        event_type: EventType::ReleasePublished,
        repo: RepoId::parse(repo).unwrap(),
        version: VersionTag::parse(version).unwrap(),
        commit: commit.to_string(),
        timestamp: Timestamp::parse(ts).unwrap(),
        artifacts: vec![Artifact {
            name: "dist.tgz".to_string(),
            sha256: Hex32::from_bytes([1u8; 32]),
            uri: "https://example.com/dist.tgz".to_string(),
        }],
        attestations: vec![],
        notes: String::new(),
        signature: None,
    };
    let hash = event.canonical_hash();
    event.signature = Some(Signature {
        alg: "ed25519".to_string(),
        key_id: key_id.to_string(),
        value: key_pair.sign_digest(&hash),
        canonical_hash: hash,
    });
    event
}

fn attestation_event(
    repo: &str,
    version: &str,
    ts: &str,
    key_id: &str,
    key_pair: &Ed25519KeyPair,
    kind: &str,
    verdict: Verdict,
) -> Event {
    let mut event = Event {
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
        signature: None,
    };
    let hash = event.canonical_hash();
    event.signature = Some(Signature {
        alg: "ed25519".to_string(),
        key_id: key_id.to_string(),
        value: key_pair.sign_digest(&hash),
        canonical_hash: hash,
    });
    event
}

/// Scenario 1: a single signed release is verifiable end to end.
#[test]
fn single_signed_release_is_verifiable() {
    let key_pair = Ed25519KeyPair::from_seed(&[1u8; 32]);
    let release = signed_release(
        "acme/widgets",
        "1.0.0",
        "deadbeefcafebabe",
        "2026-01-01T00:00:00.000Z",
        "key-maintainer",
        &key_pair,
    );
    let manifests = ManifestSet::new(vec![maintainer_manifest(
        "acme/widgets",
        "key-maintainer",
        &key_pair,
    )]);
    let store = MemStore::default();

    let result = verify_release(
        &release.repo,
        &release.version,
        &[release],
        &manifests,
        &store,
        false,
    )
    .unwrap();

    assert!(result.ok);
    assert_eq!(result.anchor, AnchorStatus::NotRequested);
    assert!(result.attestations.is_empty());
}

/// Scenario 2: a bit-flipped `commit` after signing leaves the recorded
/// `canonicalHash` stale, and verification surfaces the mismatch rather
/// than silently accepting the tampered event.
#[test]
fn bit_flip_after_signing_is_detected() {
    let key_pair = Ed25519KeyPair::from_seed(&[2u8; 32]);
    let mut release = signed_release(
        "acme/widgets",
        "1.0.0",
        "deadbeefcafebabe",
        "2026-01-01T00:00:00.000Z",
        "key-maintainer",
        &key_pair,
    );
    release.commit = "ffffffffffffffff".to_string();

    let manifests = ManifestSet::new(vec![maintainer_manifest(
        "acme/widgets",
        "key-maintainer",
        &key_pair,
    )]);
    let store = MemStore::default();

    let result = verify_release(
        &release.repo,
        &release.version,
        &[release],
        &manifests,
        &store,
        false,
    );
    assert!(result.is_err(), "tampered commit must fail verification");
}

/// Scenario 3: the Merkle root of a two-leaf partition is the SHA-256 of
/// the two leaves concatenated in order, exactly as the anchor engine
/// builds it for any even-sized level.
#[test]
fn two_leaf_merkle_root_matches_direct_concatenation() {
    let a = Hex32::from_bytes([0xaa; 32]);
    let b = Hex32::from_bytes([0xbb; 32]);

    let mut bytes = Vec::with_capacity(64);
    bytes.extend_from_slice(a.as_bytes());
    bytes.extend_from_slice(b.as_bytes());
    let expected = Hex32::from_bytes(sha256_digest(&bytes).bytes);

    let root = merkle_root(&[a, b]).unwrap();
    assert_eq!(root, expected);
}

/// Scenario 4: three releases anchored in the genesis partition all
/// resolve to `AnchorStatus::Anchored` once the anchor event is emitted.
#[tokio::test]
async fn anchored_releases_resolve_inclusion() {
    let key_pair = Ed25519KeyPair::from_seed(&[3u8; 32]);
    let releases = vec![
        signed_release("acme/a", "1.0.0", "commit-a", "2026-01-01T00:00:00.000Z", "key-m", &key_pair),
        signed_release("acme/b", "1.0.0", "commit-b", "2026-01-02T00:00:00.000Z", "key-m", &key_pair),
        signed_release("acme/c", "1.0.0", "commit-c", "2026-01-03T00:00:00.000Z", "key-m", &key_pair),
    ];

    let mut store = MemStore::default();
    let ledger = InMemoryLedger::default();
    let mut keys = MockSigningKeyProvider::default();
    keys.seeds.insert("node-key".to_string(), [9u8; 32]);

    let anchor_repo = RepoId::parse("repomesh/ledger").unwrap();
    let anchor_version = VersionTag::parse("genesis").unwrap();

    let emitted = emit_anchor(
        &releases,
        &mut store,
        &ledger,
        &keys,
        "testnet",
        "wallet-1",
        None,
        None,
        "node-key",
        &anchor_repo,
        &anchor_version,
        Timestamp::now(),
    )
    .await
    .unwrap();
    assert!(emitted.ok);

    let manifests = ManifestSet::new(vec![
        maintainer_manifest("acme/a", "key-m", &key_pair),
        maintainer_manifest("acme/b", "key-m", &key_pair),
        maintainer_manifest("acme/c", "key-m", &key_pair),
    ]);
    let mut events = releases.clone();
    events.push(emitted.event.clone());

    for release in &releases {
        let result = verify_release(
            &release.repo,
            &release.version,
            &events,
            &manifests,
            &store,
            true,
        )
        .unwrap();
        assert!(matches!(result.anchor, AnchorStatus::Anchored { .. }));
    }
}

/// Scenario 5: two verifiers disagree on `license.audit` for the same
/// release; `fail-wins`, `majority`, and `quorum-pass` each resolve the
/// disagreement differently.
#[test]
fn disagreeing_verifiers_resolve_per_conflict_policy() {
    let key_a = Ed25519KeyPair::from_seed(&[4u8; 32]);
    let key_b = Ed25519KeyPair::from_seed(&[5u8; 32]);

    let events = vec![
        attestation_event(
            "acme/widgets",
            "1.0.0",
            "2026-01-01T00:00:00.000Z",
            "key-a",
            &key_a,
            "license.audit",
            Verdict::Pass,
        ),
        attestation_event(
            "acme/widgets",
            "1.0.0",
            "2026-01-01T00:01:00.000Z",
            "key-b",
            &key_b,
            "license.audit",
            Verdict::Fail,
        ),
    ];

    let manifests = ManifestSet::new(vec![
        maintainer_manifest("verifier-a", "key-a", &key_a),
        maintainer_manifest("verifier-b", "key-b", &key_b),
    ]);

    let policy_for = |conflict_policy: ConflictPolicy| {
        let mut checks = BTreeMap::new();
        checks.insert(
            "license.audit".to_string(),
            CheckPolicy {
                mode: PolicyMode::Open,
                trusted_nodes: BTreeSet::new(),
                conflict_policy,
                quorum: 2,
            },
        );
        VerifierPolicy { checks }
    };

    let fail_wins = aggregate_attestations(&events, &manifests, &policy_for(ConflictPolicy::FailWins));
    assert_eq!(fail_wins.len(), 1);
    assert_eq!(fail_wins[0].consensus, Consensus::Verdict(Verdict::Fail));

    let majority = aggregate_attestations(&events, &manifests, &policy_for(ConflictPolicy::Majority));
    assert_eq!(majority.len(), 1);
    // one pass, one fail, no warn: majority's fail>warn>pass tiebreak settles on fail.
    assert_eq!(majority[0].consensus, Consensus::Verdict(Verdict::Fail));

    let quorum_pass = aggregate_attestations(&events, &manifests, &policy_for(ConflictPolicy::QuorumPass));
    assert_eq!(quorum_pass.len(), 1);
    // quorum is 2 and only one source passed, so quorum-pass cannot be satisfied.
    assert_eq!(quorum_pass[0].consensus, Consensus::Verdict(Verdict::Fail));
}

/// Scenario 6: an emitted anchor's memo can be independently replayed from
/// `tx_hash` alone, against the same originating event set.
#[tokio::test]
async fn anchor_memo_replay_matches_emission() {
    let key_pair = Ed25519KeyPair::from_seed(&[6u8; 32]);
    let releases = vec![
        signed_release("acme/a", "1.0.0", "commit-a", "2026-01-01T00:00:00.000Z", "key-m", &key_pair),
        signed_release("acme/b", "1.0.0", "commit-b", "2026-01-02T00:00:00.000Z", "key-m", &key_pair),
    ];

    let mut store = MemStore::default();
    let ledger = InMemoryLedger::default();
    let mut keys = MockSigningKeyProvider::default();
    keys.seeds.insert("node-key".to_string(), [8u8; 32]);

    let anchor_repo = RepoId::parse("repomesh/ledger").unwrap();
    let anchor_version = VersionTag::parse("genesis").unwrap();

    let emitted = emit_anchor(
        &releases,
        &mut store,
        &ledger,
        &keys,
        "testnet",
        "wallet-1",
        None,
        None,
        "node-key",
        &anchor_repo,
        &anchor_version,
        Timestamp::now(),
    )
    .await
    .unwrap();

    let proof = verify_anchor_proof(&emitted.tx_hash, &ledger, &releases).await.unwrap();

    assert!(proof.ok);
    assert_eq!(proof.tx_hash, emitted.tx_hash);
    assert_eq!(proof.partition_id, emitted.partition_id);
    assert_eq!(proof.count, releases.len() as u64);
}
