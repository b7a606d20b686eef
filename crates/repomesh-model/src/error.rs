//! C1 (canonicalizer + signer) error type, following the teacher's
//! per-concern error enum pattern.

use thiserror::Error;

/// Failure modes of canonical-hash recomputation and signature
/// verification (`spec.md` §4.1).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum C1Error {
    /// The embedded `canonicalHash` does not match the recomputed one.
    #[error("canonical hash mismatch: embedded {embedded}, computed {computed}")]
    CanonicalHashMismatch {
        /// The hash carried on the event.
        embedded: String,
        /// The hash recomputed from the event's other fields.
        computed: String,
    },

    /// `signature.value` does not verify against the resolved key.
    #[error("signature invalid for keyId {key_id}")]
    SignatureInvalid {
        /// The `keyId` the signature claimed to be from.
        key_id: String,
    },

    /// `signature.keyId` does not resolve to any registered participant.
    #[error("unknown key id: {key_id}")]
    UnknownKey {
        /// The unresolved `keyId`.
        key_id: String,
    },

    /// The signer is not authorized to author this event type for this
    /// target (key-resolution authority rule, `spec.md` §4.1 final ¶).
    #[error("key {key_id} is not a maintainer of target repo {repo}")]
    NotTargetMaintainer {
        /// The signing key id.
        key_id: String,
        /// The target repo it attempted to sign a release for.
        repo: String,
    },

    /// Malformed key material (bad PEM, wrong length, ...).
    #[error("key error: {0}")]
    KeyError(String),
}
