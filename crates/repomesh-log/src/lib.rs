//! # repomesh-log — Append-Only Event Log (C2)
//!
//! The admission-gated log of `spec.md` §4.2: a sequence of UTF-8 lines, one
//! event per line, in insertion order, with the seven admission checks run
//! as a single all-or-nothing batch.
//!
//! ## Crate Policy
//!
//! - Depends on `repomesh-core` and `repomesh-model` only.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod cache;
pub mod error;
pub mod log;

pub use cache::{CachedLogReader, LogSource};
pub use error::AdmissionError;
pub use log::AppendOnlyLog;
