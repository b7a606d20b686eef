//! # repomesh-score — Scoring Engine (C5)
//!
//! Profile-parameterized integrity and assurance scores, and coverage
//! projection, over a release's aggregated attestation state (`spec.md`
//! §4.5). Effective-configuration layering (base default → profile →
//! target override) is delegated to
//! `repomesh_config::effective_assurance_weights`.
//!
//! ## Key Design Principles
//!
//! - Integrity and assurance scores are both bounded to `[0, 100]`
//!   (`spec.md` §8 "scoring bounded") — `integrity_score` sums six
//!   checks that already total exactly 100 at full marks, and
//!   `assurance_score` normalizes explicitly rather than relying on the
//!   weight configuration happening to sum to 100.
//!
//! ## Crate Policy
//!
//! - Depends on `repomesh-core`, `repomesh-model`, `repomesh-config`, and
//!   `repomesh-attest`.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod assurance;
pub mod coverage;
pub mod integrity;

pub use assurance::assurance_score;
pub use coverage::{coverage_projection, CoverageProjection};
pub use integrity::integrity_score;
