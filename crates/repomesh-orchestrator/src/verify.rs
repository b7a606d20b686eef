//! # Release and Anchor-Proof Verification
//!
//! `spec.md` §4.6 "Verification Orchestrator (C6)": `verifyRelease` and
//! `verifyAnchor`, the two read-only predicates that compose every other
//! component's output into a single answer for an external caller — never
//! mutating the log, never touching the ledger except to replay a proof.

use repomesh_anchor::manifest::{compute_manifest_hash, MANIFEST_SCHEMA_VERSION, MERKLE_ALGO};
use repomesh_anchor::{
    merkle_root, partition_leaves, select_partition_events, AnchorError, AnchorEventNotes,
    LedgerMemo, ManifestStore, PartitionId,
};
use repomesh_core::Hex32;
use repomesh_model::{
    parse_attestor_uri, resolve_authority, verify_event, Event, EventType, ManifestSet,
    PartitionManifest, PartitionManifestBase, RepoId, Verdict, VersionTag,
};

use crate::contracts::LedgerClient;
use crate::error::OrchestratorError;
use crate::retry::{with_retry, DEFAULT_TIMEOUT};

/// The resolved verdict recorded for one attestation entry on the release
/// (`spec.md` §4.4's `parse_attestor_uri` form; entries that don't parse
/// to a verdict, such as `ledger.anchor` or `attestation.dispute`, are
/// excluded rather than reported with a placeholder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttestationVerification {
    pub check_kind: String,
    pub signer_key_id: String,
    pub signature_valid: bool,
    pub verdict: Option<Verdict>,
}

/// Whether, and where, a release is covered by a materialized anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorStatus {
    /// Caller did not ask for anchor-inclusion checking.
    NotRequested,
    /// No anchor event yet covers this release's partition.
    NotAnchoredYet,
    /// The release's canonical hash is a leaf of a verified, tamper-free
    /// manifest.
    Anchored {
        partition_id: String,
        manifest_path: String,
        root: Hex32,
    },
}

/// `verifyRelease`'s full result (`spec.md` §4.6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    pub ok: bool,
    pub repo: RepoId,
    pub version: VersionTag,
    pub attestations: Vec<AttestationVerification>,
    pub anchor: AnchorStatus,
}

/// Verify a single release: locate its unique `ReleasePublished` event,
/// check its C1 signature and target-maintainer authority, record every
/// attestation's verdict and signature validity, and — if `check_anchor`
/// is set — walk the anchor events to confirm partition inclusion
/// (`spec.md` §4.6, steps 1-4).
///
/// `manifest_store` supplies the persisted partition manifests the anchor
/// walk needs to load; reusing [`ManifestStore`] rather than a second,
/// parallel manifest-loading abstraction keeps the anchor/orchestrator
/// boundary consistent.
pub fn verify_release<S: ManifestStore>(
    repo: &RepoId,
    version: &VersionTag,
    events: &[Event],
    manifests: &ManifestSet,
    manifest_store: &S,
    check_anchor: bool,
) -> Result<VerificationResult, OrchestratorError>
where
    S::Error: std::fmt::Display,
{
    let release = events
        .iter()
        .find(|e| {
            e.event_type == EventType::ReleasePublished && e.repo == *repo && e.version == *version
        })
        .ok_or_else(|| OrchestratorError::ReleaseNotFound {
            repo: repo.to_string(),
            version: version.to_string(),
        })?;

    verify_event(release, manifests)?;
    resolve_authority(release, manifests)?;

    let attestations = collect_attestation_verifications(release, repo, version, events, manifests);

    let anchor = if check_anchor {
        resolve_anchor_status(release, events, manifest_store)?
    } else {
        AnchorStatus::NotRequested
    };

    Ok(VerificationResult {
        ok: true,
        repo: repo.clone(),
        version: version.clone(),
        attestations,
        anchor,
    })
}

fn collect_attestation_verifications(
    release: &Event,
    repo: &RepoId,
    version: &VersionTag,
    events: &[Event],
    manifests: &ManifestSet,
) -> Vec<AttestationVerification> {
    let _ = release;
    let mut out = Vec::new();
    for event in events {
        if event.event_type != EventType::AttestationPublished
            || event.repo != *repo
            || event.version != *version
        {
            continue;
        }
        let Some(signature) = event.signature.as_ref() else {
            continue;
        };
        let signature_valid = verify_event(event, manifests).is_ok();
        for reference in &event.attestations {
            if reference.kind == "ledger.anchor" || reference.kind == "attestation.dispute" {
                continue;
            }
            let verdict = parse_attestor_uri(&reference.uri).map(|(_, v)| v);
            out.push(AttestationVerification {
                check_kind: reference.kind.clone(),
                signer_key_id: signature.key_id.clone(),
                signature_valid,
                verdict,
            });
        }
    }
    out
}

/// Walk the event log's `ledger.anchor` events, newest first, looking for
/// one whose partition's manifest both contains `release`'s canonical
/// hash as a leaf and is internally self-consistent
/// (`spec.md` §4.3 "self-binding").
fn resolve_anchor_status<S: ManifestStore>(
    release: &Event,
    events: &[Event],
    manifest_store: &S,
) -> Result<AnchorStatus, OrchestratorError>
where
    S::Error: std::fmt::Display,
{
    let release_hash = release.canonical_hash();

    let mut anchor_events: Vec<&Event> = events
        .iter()
        .filter(|e| {
            e.event_type == EventType::AttestationPublished
                && e.attestations.iter().any(|a| a.kind == "ledger.anchor")
        })
        .collect();
    anchor_events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    for anchor_event in anchor_events {
        let Ok(notes) = AnchorEventNotes::parse_from_notes(&anchor_event.notes) else {
            continue;
        };

        let bytes = manifest_store
            .load(&notes.manifest_path)
            .map_err(|e| {
                OrchestratorError::Anchor(AnchorError::ManifestUnavailable {
                    partition_id: notes.partition_id.clone(),
                    reason: e.to_string(),
                })
            })?
            .ok_or_else(|| {
                OrchestratorError::Anchor(AnchorError::ManifestUnavailable {
                    partition_id: notes.partition_id.clone(),
                    reason: "manifest file not found".to_string(),
                })
            })?;
        let manifest: PartitionManifest = serde_json::from_slice(&bytes).map_err(|e| {
            OrchestratorError::Anchor(AnchorError::ManifestUnavailable {
                partition_id: notes.partition_id.clone(),
                reason: e.to_string(),
            })
        })?;

        let partition = PartitionId::parse(&notes.partition_id);
        let partition_events = select_partition_events(events, &partition).map_err(OrchestratorError::Anchor)?;
        let leaves = partition_leaves(&partition_events);

        if !leaves.contains(&release_hash) {
            continue;
        }

        let recomputed = compute_manifest_hash(&manifest.base);
        if recomputed != manifest.manifest_hash {
            return Err(OrchestratorError::Anchor(AnchorError::ManifestTampered {
                partition_id: notes.partition_id.clone(),
                stored: manifest.manifest_hash.to_hex(),
                recomputed: recomputed.to_hex(),
            }));
        }

        return Ok(AnchorStatus::Anchored {
            partition_id: notes.partition_id.clone(),
            manifest_path: notes.manifest_path.clone(),
            root: manifest.base.root,
        });
    }

    Ok(AnchorStatus::NotAnchoredYet)
}

/// `verifyAnchor`'s result: an independently-replayed anchor proof
/// (`spec.md` §4.6 "Anchor-proof replay").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorProofResult {
    pub ok: bool,
    pub tx_hash: String,
    pub partition_id: String,
    pub root: Hex32,
    pub manifest_hash: Hex32,
    pub count: u64,
}

/// Fetch the memo attached to `tx_hash` from the external ledger, then
/// independently recompute the partition's leaf count, Merkle root, and
/// manifest hash from `events` and compare against the memo's claims
/// (`spec.md` §4.6): "Missing fields, memo version mismatch, count
/// mismatch, root mismatch, or manifest-hash mismatch each map to their
/// own distinct failure kind."
pub async fn verify_anchor_proof<L: LedgerClient>(
    tx_hash: &str,
    ledger: &L,
    events: &[Event],
) -> Result<AnchorProofResult, OrchestratorError>
where
    L::Error: std::fmt::Display,
{
    let memo_hex = with_retry(|| ledger.fetch_memo(tx_hash, DEFAULT_TIMEOUT))
        .await
        .map_err(|e| OrchestratorError::LedgerUnavailable(e.to_string()))?
        .ok_or_else(|| OrchestratorError::AnchorProofMissingField {
            field: "memo".to_string(),
        })?;

    let memo = LedgerMemo::decode_hex(&memo_hex).map_err(OrchestratorError::Anchor)?;

    if memo.v != MANIFEST_SCHEMA_VERSION {
        return Err(OrchestratorError::AnchorProofVersionMismatch {
            expected: MANIFEST_SCHEMA_VERSION,
            actual: memo.v,
        });
    }

    let partition = PartitionId::parse(&memo.p);
    let partition_events = select_partition_events(events, &partition).map_err(OrchestratorError::Anchor)?;
    let leaves = partition_leaves(&partition_events);

    if leaves.len() as u64 != memo.c {
        return Err(OrchestratorError::Anchor(AnchorError::PartitionLeafCountMismatch {
            expected: memo.c,
            actual: leaves.len() as u64,
        }));
    }

    let root = merkle_root(&leaves).ok_or_else(|| OrchestratorError::AnchorProofMissingField {
        field: "leaves".to_string(),
    })?;
    if root != memo.r {
        return Err(OrchestratorError::Anchor(AnchorError::RootMismatch {
            expected: memo.r.to_hex(),
            actual: root.to_hex(),
        }));
    }

    let prev = memo.parsed_prev().map_err(OrchestratorError::Anchor)?;
    let base = PartitionManifestBase {
        v: memo.v,
        algo: MERKLE_ALGO.to_string(),
        partition_id: memo.p.clone(),
        network: memo.n.clone(),
        prev,
        range: [leaves[0], *leaves.last().expect("count matched memo.c and root resolved, so leaves is non-empty")],
        count: leaves.len() as u64,
        root,
    };
    let manifest_hash = compute_manifest_hash(&base);
    if manifest_hash != memo.h {
        return Err(OrchestratorError::Anchor(AnchorError::ManifestTampered {
            partition_id: memo.p.clone(),
            stored: memo.h.to_hex(),
            recomputed: manifest_hash.to_hex(),
        }));
    }

    Ok(AnchorProofResult {
        ok: true,
        tx_hash: tx_hash.to_string(),
        partition_id: memo.p,
        root,
        manifest_hash,
        count: memo.c,
    })
}
