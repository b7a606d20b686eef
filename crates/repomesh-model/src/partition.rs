//! # Partition Manifest
//!
//! `spec.md` §3 "Partition manifest". The shape lives here; construction,
//! self-binding-hash computation, and write-once conflict detection are
//! `repomesh-anchor`'s job (§4.3) — this crate only owns the serde shape
//! and the field list that `manifestHash` is computed over.

use repomesh_core::Hex32;
use serde::{Deserialize, Serialize};

/// `spec.md` §3 "Partition manifest", minus `manifestHash` — this is the
/// exact field set `manifestHash` is computed over (the "manifest base").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionManifestBase {
    pub v: u32,
    pub algo: String,
    #[serde(rename = "partitionId")]
    pub partition_id: String,
    pub network: String,
    pub prev: Option<Hex32>,
    pub range: [Hex32; 2],
    pub count: u64,
    pub root: Hex32,
}

/// The complete, self-binding partition manifest
/// (`manifest_base ∪ {manifestHash}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionManifest {
    #[serde(flatten)]
    pub base: PartitionManifestBase,
    #[serde(rename = "manifestHash")]
    pub manifest_hash: Hex32,
}
