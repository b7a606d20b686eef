//! # Manifest Materialization
//!
//! `spec.md` §4.3 "Manifest materialization" and §6 "Manifest files":
//! builds the self-binding [`PartitionManifest`], sanitizes a
//! `partitionId` into a stable file-name component, and enforces the
//! write-once-per-partition conflict rule via a small [`ManifestStore`]
//! abstraction so this crate never hard-codes a filesystem path.

use repomesh_core::{CanonicalBytes, Hex32};
use repomesh_model::{PartitionManifest, PartitionManifestBase};
use tracing::{info, instrument, warn};

use crate::error::AnchorError;
use crate::partition::PartitionId;
use crate::tree::merkle_root;

/// Schema version of the partition-manifest shape (`spec.md` §3 `v`).
pub const MANIFEST_SCHEMA_VERSION: u32 = 1;

/// The only Merkle algorithm this core speaks (`spec.md` §3 `algo`).
pub const MERKLE_ALGO: &str = "sha256-merkle-v1";

/// A minimal persistence seam for partition manifests: load an existing
/// manifest's stored bytes by file name, or store freshly materialized
/// bytes. Kept trait-based (rather than a hard-coded filesystem path) the
/// same way `repomesh-orchestrator`'s consumed contracts are traits —
/// this crate never touches a real filesystem or database itself.
pub trait ManifestStore {
    /// The error type surfaced by a failed load or store.
    type Error;

    /// Load the raw bytes previously stored at `file_name`, if any.
    fn load(&self, file_name: &str) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Store `bytes` at `file_name`, overwriting nothing (the caller has
    /// already checked for a conflict).
    fn store(&mut self, file_name: &str, bytes: &[u8]) -> Result<(), Self::Error>;
}

/// Derive a filesystem-safe file-name component from a `partitionId`
/// selector string. `since:<iso-ts>` and date selectors both contain `:`,
/// which is not a safe path character on every target filesystem; this
/// replaces every non-alphanumeric, non-hyphen, non-dot character with
/// `_`.
pub fn sanitize_partition_id(partition_id: &str) -> String {
    partition_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '.' { c } else { '_' })
        .collect()
}

/// Compute `manifestHash = SHA-256(canonical_utf8_bytes(manifest_base))`
/// (`spec.md` §4.3).
pub fn compute_manifest_hash(base: &PartitionManifestBase) -> Hex32 {
    let canonical = CanonicalBytes::new(base).expect(
        "PartitionManifestBase serialization cannot fail: no floats, no non-string map keys",
    );
    let digest = repomesh_crypto::sha256_digest(&canonical);
    Hex32::from_bytes(digest.bytes)
}

/// Build the complete, self-binding manifest for a partition (`spec.md`
/// §4.3 "Manifest materialization").
///
/// `leaves` must be non-empty and in partition order; `prev` is the
/// previous anchor's root, or `None` for a genesis/first anchor.
pub fn build_manifest(
    partition: &PartitionId,
    network: &str,
    prev: Option<Hex32>,
    leaves: &[Hex32],
) -> Option<PartitionManifest> {
    let root = merkle_root(leaves)?;
    let base = PartitionManifestBase {
        v: MANIFEST_SCHEMA_VERSION,
        algo: MERKLE_ALGO.to_string(),
        partition_id: partition.to_id_string(),
        network: network.to_string(),
        prev,
        range: [leaves[0], *leaves.last().unwrap()],
        count: leaves.len() as u64,
        root,
    };
    let manifest_hash = compute_manifest_hash(&base);
    Some(PartitionManifest {
        base,
        manifest_hash,
    })
}

/// Render a manifest as the pretty-printed, two-space-indented file form
/// (`spec.md` §6): same values as the canonical form used for
/// `manifestHash`, but human-readable.
pub fn render_pretty(manifest: &PartitionManifest) -> String {
    serde_json::to_string_pretty(manifest).expect("PartitionManifest serialization cannot fail")
}

/// Materialize a manifest and persist it through `store`, enforcing the
/// write-once-per-`partitionId` rule (`spec.md` §4.3, §5 "Anchor
/// production is serial per partition"): if a manifest already exists at
/// the derived file name, its bytes must match byte-for-byte or this
/// fails with `ManifestConflict`.
#[instrument(skip(store, leaves), fields(partition_id = %partition.to_id_string(), leaf_count = leaves.len()))]
pub fn materialize_and_store<S: ManifestStore>(
    store: &mut S,
    partition: &PartitionId,
    network: &str,
    prev: Option<Hex32>,
    leaves: &[Hex32],
) -> Result<(PartitionManifest, String), AnchorError>
where
    S::Error: std::fmt::Display,
{
    let partition_id = partition.to_id_string();
    let manifest = build_manifest(partition, network, prev, leaves).ok_or_else(|| {
        AnchorError::ManifestUnavailable {
            partition_id: partition_id.clone(),
            reason: "partition has no leaves".to_string(),
        }
    })?;
    let file_name = format!("{}.json", sanitize_partition_id(&partition_id));
    let pretty = render_pretty(&manifest);

    let existing = store
        .load(&file_name)
        .map_err(|e| AnchorError::ManifestUnavailable {
            partition_id: partition_id.clone(),
            reason: e.to_string(),
        })?;

    if let Some(existing_bytes) = existing {
        if existing_bytes != pretty.as_bytes() {
            warn!(partition_id = %partition_id, "manifest conflict: rematerialization differs from stored bytes");
            return Err(AnchorError::ManifestConflict { partition_id });
        }
        return Ok((manifest, file_name));
    }

    store
        .store(&file_name, pretty.as_bytes())
        .map_err(|e| AnchorError::ManifestUnavailable {
            partition_id: partition_id.clone(),
            reason: e.to_string(),
        })?;
    info!(partition_id = %partition_id, root = %manifest.base.root.to_hex(), "materialized partition manifest");
    Ok((manifest, file_name))
}
