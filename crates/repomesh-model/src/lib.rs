//! # repomesh-model — Wire Types for the Trust Core
//!
//! Event, participant-manifest, profile/override, partition-manifest, and
//! verifier-policy types, plus canonical hashing, event signing and
//! verification (C1's data-model half — the cryptographic half lives in
//! `repomesh-crypto`), and embedded JSON Schema validation of the event
//! shape.
//!
//! ## Key Design Principles
//!
//! 1. **One canonical-hash function.** `Event::canonical_hash` is the only
//!    path that produces the hash embedded in `signature.canonicalHash`;
//!    no other code in this workspace recomputes it independently.
//! 2. **Key resolution is manifest-current, not event-historical** — see
//!    [`manifest::ManifestSet::resolve_key`] and `DESIGN.md`'s Open
//!    Question 2 resolution.
//!
//! ## Crate Policy
//!
//! - Depends on `repomesh-core` and `repomesh-crypto` only.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod event;
pub mod manifest;
pub mod partition;
pub mod policy;
pub mod profile;
pub mod schema;

pub use error::C1Error;
pub use event::{
    parse_attestor_uri, resolve_authority, verify_event, Artifact, AttestationRef, Event,
    EventType, RepoId, Signature, Verdict, VersionTag,
};
pub use manifest::{Maintainer, ManifestSet, ParticipantKind, ParticipantManifest};
pub use partition::{PartitionManifest, PartitionManifestBase};
pub use policy::{CheckPolicy, ConflictPolicy, PolicyMode, VerifierPolicy};
pub use profile::{AssuranceWeights, Overrides, Profile, RequiredChecks, ScoringConfig};
