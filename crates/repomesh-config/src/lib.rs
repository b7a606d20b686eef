//! # repomesh-config — Profile, Overrides, and Policy Loading
//!
//! Loads `Profile`, `Overrides`, and `VerifierPolicy` documents from YAML
//! and layers them per `spec.md` §4.5. Three named profiles (`baseline`,
//! `open-source`, `regulated`) ship as embedded YAML fixtures and are
//! loadable by name or from an arbitrary path; anything else must be
//! loaded from a path.
//!
//! ## Crate Policy
//!
//! - Depends on `repomesh-model` only.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod policy;
pub mod profile;

pub use error::ConfigError;
pub use policy::load_verifier_policy_from_path;
pub use profile::{
    effective_assurance_weights, load_builtin, load_from_path, load_overrides_from_path,
};
