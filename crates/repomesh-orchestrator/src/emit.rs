//! # `emitAnchor`
//!
//! `spec.md` §4.3 "Anchor-event emission": partition, materialize the
//! manifest, submit its memo to the external ledger, and construct the
//! resulting `ledger.anchor` `AttestationPublished` event — end to end,
//! composing `repomesh-anchor` (partitioning, manifest, memo) with the
//! `LedgerClient`/`SigningKeyProvider` consumed contracts.
//!
//! `spec.md` §4.3's failure semantics are load-bearing here: a transient
//! ledger-submission failure must leave no anchor event at all (this
//! function returns before constructing one), while a successful
//! submission followed by a failed event construction is recoverable by
//! re-running `emit_anchor` with the same inputs — re-materialization is
//! idempotent and ledger submission of the same memo bytes is the
//! caller's to retry against the `(repo, version, type)` uniqueness
//! constraint at the log layer.
//!
//! Resolved scope: an anchor event is an `Event` like any other, so it
//! needs a `(repo, version)` pair even though an anchor covers every repo
//! in its partition. `spec.md` does not name one; this crate takes it as
//! an explicit parameter (`anchor_repo`, `anchor_version`) rather than
//! inventing a hardcoded sentinel, leaving the choice of nominal identity
//! (e.g. a platform pseudo-repo keyed by network) to the caller.

use repomesh_anchor::manifest::MERKLE_ALGO;
use repomesh_anchor::{materialize_and_store, next_partition_id, partition_leaves, select_partition_events, AnchorEventNotes, LedgerMemo, ManifestStore};
use repomesh_core::{Hex32, Timestamp};
use repomesh_crypto::Ed25519KeyPair;
use repomesh_model::{AttestationRef, Event, EventType, RepoId, Signature, VersionTag};
use tracing::{info, instrument};

use crate::contracts::{LedgerClient, SigningKeyProvider};
use crate::error::OrchestratorError;
use crate::retry::{with_retry, DEFAULT_TIMEOUT};

/// `emitAnchor`'s result: the constructed, signed `ledger.anchor` event
/// and the partition it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitAnchorResult {
    pub ok: bool,
    pub event: Event,
    pub partition_id: String,
    pub tx_hash: String,
}

/// Materialize, submit, and emit the next anchor (`spec.md` §4.3).
///
/// `last_anchor_timestamp` is the timestamp of the most recently emitted
/// anchor event, if any (`repomesh_anchor::next_partition_id`'s input);
/// `prev_root` is that anchor's Merkle root, chained into the new
/// manifest's `prev` field. `wallet_address` identifies the self-payment
/// sender on `network`. `signer_key_id` names the key the emitting node
/// signs the resulting event with, fetched through `keys`.
#[allow(clippy::too_many_arguments)]
#[instrument(skip(events, manifest_store, ledger, keys), fields(network, anchor_repo = %anchor_repo, anchor_version = %anchor_version))]
pub async fn emit_anchor<S, L, K>(
    events: &[Event],
    manifest_store: &mut S,
    ledger: &L,
    keys: &K,
    network: &str,
    wallet_address: &str,
    last_anchor_timestamp: Option<&Timestamp>,
    prev_root: Option<Hex32>,
    signer_key_id: &str,
    anchor_repo: &RepoId,
    anchor_version: &VersionTag,
    now: Timestamp,
) -> Result<EmitAnchorResult, OrchestratorError>
where
    S: ManifestStore,
    S::Error: std::fmt::Display,
    L: LedgerClient,
    L::Error: std::fmt::Display,
    K: SigningKeyProvider,
    K::Error: std::fmt::Display,
{
    let partition = next_partition_id(last_anchor_timestamp);
    let partition_events = select_partition_events(events, &partition).map_err(OrchestratorError::Anchor)?;
    let leaves = partition_leaves(&partition_events);
    if leaves.is_empty() {
        return Err(OrchestratorError::EmptyPartition {
            partition_id: partition.to_id_string(),
        });
    }

    let (manifest, manifest_path) =
        materialize_and_store(manifest_store, &partition, network, prev_root, &leaves)
            .map_err(OrchestratorError::Anchor)?;

    let memo = LedgerMemo::from_manifest_fields(
        &manifest.base.partition_id,
        network,
        manifest.base.root,
        manifest.manifest_hash,
        manifest.base.count,
        manifest.base.prev,
        Some(manifest.base.range),
    );
    let memo_hex = memo.encode_hex().map_err(OrchestratorError::Anchor)?;

    let tx_hash = with_retry(|| ledger.submit_memo(&memo_hex, DEFAULT_TIMEOUT))
        .await
        .map_err(|e| OrchestratorError::LedgerUnavailable(e.to_string()))?;

    let notes = AnchorEventNotes {
        tx_hash: tx_hash.clone(),
        network: network.to_string(),
        wallet_address: wallet_address.to_string(),
        partition_id: manifest.base.partition_id.clone(),
        merkle_root: manifest.base.root,
        algo: MERKLE_ALGO.to_string(),
        prev: manifest.base.prev,
        range: manifest.base.range,
        manifest_path: manifest_path.clone(),
    };
    let rendered_notes = notes
        .render("anchor published")
        .map_err(OrchestratorError::Anchor)?;

    let mut event = Event {
        event_type: EventType::AttestationPublished,
        repo: anchor_repo.clone(),
        version: anchor_version.clone(),
        commit: tx_hash.clone(),
        timestamp: now,
        artifacts: vec![],
        attestations: vec![AttestationRef {
            kind: "ledger.anchor".to_string(),
            uri: "repomesh:attestor:ledger.anchor:pass".to_string(),
        }],
        notes: rendered_notes,
        signature: None,
    };

    let seed = with_retry(|| keys.seed_for(signer_key_id, DEFAULT_TIMEOUT))
        .await
        .map_err(|e| OrchestratorError::SigningKeyUnavailable {
            key_id: signer_key_id.to_string(),
            reason: e.to_string(),
        })?;
    let key_pair = Ed25519KeyPair::from_seed(&seed);
    let hash = event.canonical_hash();
    event.signature = Some(Signature {
        alg: "ed25519".to_string(),
        key_id: signer_key_id.to_string(),
        value: key_pair.sign_digest(&hash),
        canonical_hash: hash,
    });

    info!(partition_id = %manifest.base.partition_id, tx_hash = %tx_hash, "anchor emitted");

    Ok(EmitAnchorResult {
        ok: true,
        event,
        partition_id: manifest.base.partition_id,
        tx_hash,
    })
}
