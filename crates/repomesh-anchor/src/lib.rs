//! # repomesh-anchor — Anchor Engine (C3)
//!
//! Partitions the append-only log, builds the partition Merkle tree,
//! materializes the self-binding manifest, encodes/decodes the compact
//! external-ledger memo, and renders the `ledger.anchor` anchor-event
//! `notes` tail — `spec.md` §4.3 end to end.
//!
//! ## Key Design Principles
//!
//! - The partition tree ([`tree::merkle_root`]) is a plain, domain-free
//!   binary Merkle tree. Anchors are materialized once per partition,
//!   never appended to incrementally, so an incremental-append
//!   accumulator is not the right tool here.
//! - Manifest materialization is write-once per `partitionId`
//!   ([`manifest::materialize_and_store`]): re-materializing the same
//!   partition with the same inputs is idempotent, but a conflicting
//!   re-materialization is a hard [`error::AnchorError::ManifestConflict`].
//! - The external ledger itself is never touched by this crate — ledger
//!   submission and transaction lookup live behind a `LedgerClient` trait
//!   in `repomesh-orchestrator` (§10.5 consumed contracts); this crate
//!   only knows how to build and parse the memo bytes that cross that
//!   boundary.
//!
//! ## Crate Policy
//!
//! - Depends on `repomesh-core`, `repomesh-crypto`, and `repomesh-model`.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod manifest;
pub mod memo;
pub mod partition;
pub mod tree;

pub use error::AnchorError;
pub use manifest::{build_manifest, materialize_and_store, ManifestStore};
pub use memo::{AnchorEventNotes, LedgerMemo};
pub use partition::{next_partition_id, partition_leaves, select_partition_events, PartitionId};
pub use tree::merkle_root;
