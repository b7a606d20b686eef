//! Admission-pipeline errors, following the teacher's layered error
//! design: concern-specific variants here, cryptographic/hash failures
//! folded in via `#[from] C1Error`.

use repomesh_model::C1Error;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    /// A line at `index` in the proposed batch does not match the
    /// already-committed line at that index.
    #[error("log rewrite detected at line {index}: existing committed line would change")]
    LogRewrite { index: usize },

    /// A new line failed to parse as JSON.
    #[error("malformed event at line {index}: {message}")]
    MalformedEvent { index: usize, message: String },

    /// A new line parsed as JSON but failed schema conformance.
    #[error("schema violation at line {index}: {message}")]
    SchemaViolation { index: usize, message: String },

    /// An event's timestamp falls outside `now - 1y ..= now + 1h`.
    #[error("timestamp out of admission window at line {index}: {timestamp}")]
    TimestampOutOfRange { index: usize, timestamp: String },

    /// `(repo, version, type)` (or, for `AttestationPublished`,
    /// `(repo, version, type, signerKeyId)`) already appears in the log.
    #[error(
        "duplicate event at line {index}: {repo}@{version} ({event_type}) already admitted"
    )]
    DuplicateEvent {
        index: usize,
        repo: String,
        version: String,
        event_type: String,
    },

    /// Content-hash agreement or signature verification failed
    /// (`spec.md` §4.1, via `repomesh_model::verify_event` /
    /// `resolve_authority`).
    #[error("verification failed at line {index}: {source}")]
    Verification {
        index: usize,
        #[source]
        source: C1Error,
    },
}
