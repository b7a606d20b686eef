//! C3 (anchor engine) error type, following the teacher's layered
//! per-concern error enum pattern (`spec.md` §7).

use thiserror::Error;

/// Failure modes of partition selection, Merkle construction, manifest
/// materialization, and memo encode/decode (`spec.md` §4.3).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnchorError {
    /// A manifest already exists for this `partitionId` with different bytes.
    #[error("manifest conflict for partition {partition_id:?}: existing manifest differs")]
    ManifestConflict { partition_id: String },

    /// A manifest referenced during verification could not be loaded.
    #[error("manifest unavailable for partition {partition_id:?}: {reason}")]
    ManifestUnavailable { partition_id: String, reason: String },

    /// A loaded manifest's stored `manifestHash` disagrees with the hash
    /// recomputed from its own base fields.
    #[error("manifest tampered for partition {partition_id:?}: stored {stored}, recomputed {recomputed}")]
    ManifestTampered {
        partition_id: String,
        stored: String,
        recomputed: String,
    },

    /// The external-ledger memo could not be decoded into the compact
    /// `{v,p,n,r,h,c,pv,rg}` shape.
    #[error("memo decode failed: {0}")]
    MemoDecodeFailed(String),

    /// The encoded memo exceeds the 700-byte transport bound.
    #[error("memo too large: {size} bytes (limit {limit})")]
    MemoTooLarge { size: usize, limit: usize },

    /// The recomputed leaf count for a partition disagrees with the
    /// manifest's (or memo's) recorded count.
    #[error("partition leaf count mismatch: expected {expected}, got {actual}")]
    PartitionLeafCountMismatch { expected: u64, actual: u64 },

    /// The recomputed Merkle root disagrees with the manifest's (or
    /// memo's) recorded root.
    #[error("root mismatch: expected {expected}, got {actual}")]
    RootMismatch { expected: String, actual: String },

    /// The external ledger could not be reached (warn-class, `spec.md` §7).
    #[error("external ledger unavailable: {0}")]
    ExternalLedgerUnavailable(String),

    /// A `since:<iso-ts>` partition selector did not resolve to exactly one
    /// anchor-publishing event with that timestamp. Not one of `spec.md`
    /// §7's named kinds — it is a precondition of "next partition"
    /// resolution (§4.3) rather than a user-facing admission/verification
    /// failure, so it gets its own variant instead of overloading one of
    /// the named ones.
    #[error("partition selector since:{timestamp} did not resolve to a unique anchor event (found {found})")]
    AmbiguousSincePartition { timestamp: String, found: usize },
}

impl AnchorError {
    /// Whether this failure is warn-class (`spec.md` §7): reported, but
    /// not a fatal outcome for the enclosing operation.
    pub fn is_warn(&self) -> bool {
        matches!(self, AnchorError::ExternalLedgerUnavailable(_))
    }
}
