//! # Partition Merkle Tree
//!
//! `spec.md` §4.3 "Merkle construction": a plain bottom-up binary tree over
//! a partition's leaf hashes, with odd levels resolved by duplicating the
//! final node (`H(h || h)`). Partitions are materialized once and never
//! appended to incrementally, so there is no domain-separation prefix: a
//! parent node is exactly `SHA-256(left || right)`.

use repomesh_core::Hex32;
use sha2::{Digest, Sha256};

fn node_hash(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// Compute the Merkle root of a non-empty ordered leaf list.
///
/// The root of a single-leaf partition is that leaf's own bytes (`spec.md`
/// §4.3). Returns `None` for an empty leaf list — partitions with zero
/// events are not materializable, and the caller (manifest construction)
/// treats that as a precondition failure rather than a silent empty root.
pub fn merkle_root(leaves: &[Hex32]) -> Option<Hex32> {
    if leaves.is_empty() {
        return None;
    }
    let mut level: Vec<[u8; 32]> = leaves.iter().map(|h| *h.as_bytes()).collect();
    while level.len() > 1 {
        if level.len() % 2 == 1 {
            level.push(*level.last().unwrap());
        }
        level = level
            .chunks(2)
            .map(|pair| node_hash(&pair[0], &pair[1]))
            .collect();
    }
    Some(Hex32::from_bytes(level[0]))
}
