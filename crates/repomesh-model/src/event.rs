//! # Event — the Fundamental Record
//!
//! `spec.md` §3 "Event" plus §4.1 canonical hashing and signing/
//! verification.

use repomesh_core::{CanonicalBytes, Hex32, Timestamp};
use repomesh_crypto::Ed25519Signature;
use serde::{Deserialize, Serialize};

use crate::error::C1Error;
use crate::manifest::ManifestSet;

/// The closed set of event types `spec.md` §3 names. Unknown values fail
/// deserialization (`serde`'s default enum behavior), surfacing as
/// `AdmissionError::MalformedEvent` at the log layer rather than a schema
/// violation — matching the admission order of `spec.md` §4.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    ReleasePublished,
    AttestationPublished,
    PolicyViolation,
    BreakingChangeDetected,
    HealthCheckFailed,
    DependencyVulnFound,
    InterfaceUpdated,
}

/// Target identity, `"<org>/<name>"`. Validated non-empty on both sides
/// of the slash at construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepoId(String);

impl RepoId {
    /// Parse and validate a `"<org>/<name>"` identity string.
    pub fn parse(s: impl Into<String>) -> Result<Self, String> {
        let s = s.into();
        match s.split_once('/') {
            Some((org, name)) if !org.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self(s))
            }
            _ => Err(format!(
                "repo id must be of the form \"<org>/<name>\" with non-empty parts, got {s:?}"
            )),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RepoId {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<RepoId> for String {
    fn from(r: RepoId) -> String {
        r.0
    }
}

impl std::fmt::Display for RepoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An opaque, non-empty version string. The core only needs stable
/// equality and uniqueness across versions, never range comparison, so
/// this does not parse or validate semver structure — doing so would
/// require a semver-parsing dependency the core has no other use for.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionTag(String);

impl VersionTag {
    pub fn parse(s: impl Into<String>) -> Result<Self, String> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err("version tag must not be empty".to_string());
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VersionTag {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<VersionTag> for String {
    fn from(v: VersionTag) -> String {
        v.0
    }
}

impl std::fmt::Display for VersionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single build artifact reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub name: String,
    pub sha256: Hex32,
    pub uri: String,
}

/// An attestation-list entry. For `AttestationPublished` events, `kind`
/// carries the check kind (e.g. `license.audit`) and `uri` carries
/// `"repomesh:attestor:<kind>:<pass|warn|fail>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub uri: String,
}

/// An attestation verdict, extracted from an attestation URI or notes
/// prefix (`spec.md` §4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

impl std::str::FromStr for Verdict {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pass" => Ok(Verdict::Pass),
            "warn" => Ok(Verdict::Warn),
            "fail" => Ok(Verdict::Fail),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Verdict::Pass => "pass",
            Verdict::Warn => "warn",
            Verdict::Fail => "fail",
        })
    }
}

/// Parse a `repomesh:attestor:<kind>:<pass|warn|fail>` attestation URI.
/// Returns `(kind, verdict)` on success.
pub fn parse_attestor_uri(uri: &str) -> Option<(&str, Verdict)> {
    let rest = uri.strip_prefix("repomesh:attestor:")?;
    let (kind, verdict_str) = rest.rsplit_once(':')?;
    let verdict: Verdict = verdict_str.parse().ok()?;
    Some((kind, verdict))
}

/// An Ed25519 authorship proof over an event's canonical hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub alg: String,
    #[serde(rename = "keyId")]
    pub key_id: String,
    pub value: Ed25519Signature,
    #[serde(rename = "canonicalHash")]
    pub canonical_hash: Hex32,
}

/// The fundamental record (`spec.md` §3 "Event").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub repo: RepoId,
    pub version: VersionTag,
    pub commit: String,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
    #[serde(default)]
    pub attestations: Vec<AttestationRef>,
    #[serde(default)]
    pub notes: String,
    pub signature: Option<Signature>,
}

impl Event {
    /// Split `notes` on its first newline and attempt to parse the
    /// remainder as JSON. Absence of a newline, or a non-JSON remainder,
    /// yields `None` — non-anchor events are not required to carry a
    /// structured tail.
    pub fn notes_metadata(&self) -> Option<serde_json::Value> {
        let (_, tail) = self.notes.split_once('\n')?;
        serde_json::from_str(tail).ok()
    }

    /// This event with `signature` cleared, as used for canonical-hash
    /// computation (`spec.md` §4.1).
    fn without_signature(&self) -> Event {
        let mut e = self.clone();
        e.signature = None;
        e
    }

    /// Recompute `SHA-256(canonical_utf8_bytes(event_minus_signature))`.
    pub fn canonical_hash(&self) -> Hex32 {
        let without_sig = self.without_signature();
        let canonical = CanonicalBytes::new(&without_sig)
            .expect("Event serialization cannot fail: no floats, no non-string map keys");
        let digest = repomesh_crypto::sha256_digest(&canonical);
        Hex32::from_bytes(digest.bytes)
    }
}

/// Verify an event's canonical hash and signature (`spec.md` §4.1
/// "Verification").
///
/// Does not check key-resolution authority — see [`resolve_authority`]
/// for the separate `ReleasePublished` self-signing rule.
pub fn verify_event(event: &Event, manifests: &ManifestSet) -> Result<(), C1Error> {
    let signature = event.signature.as_ref().ok_or_else(|| C1Error::UnknownKey {
        key_id: String::new(),
    })?;

    let computed = event.canonical_hash();
    if computed != signature.canonical_hash {
        return Err(C1Error::CanonicalHashMismatch {
            embedded: signature.canonical_hash.to_hex(),
            computed: computed.to_hex(),
        });
    }

    let (_, maintainer) = manifests
        .resolve_key(&signature.key_id)
        .ok_or_else(|| C1Error::UnknownKey {
            key_id: signature.key_id.clone(),
        })?;

    let public_key = maintainer
        .public_key()
        .map_err(|_| C1Error::UnknownKey {
            key_id: signature.key_id.clone(),
        })?;

    repomesh_crypto::ed25519::verify_digest_with_public_key(
        &computed,
        &signature.value,
        &public_key,
    )
    .map_err(|_| C1Error::SignatureInvalid {
        key_id: signature.key_id.clone(),
    })
}

/// Enforce the key-resolution authority rule (`spec.md` §4.1 final ¶):
/// for `ReleasePublished`, the signer must be a maintainer of the
/// *target* repo's own manifest; every other event type accepts any
/// registered participant's key (already checked by [`verify_event`]'s
/// `resolve_key` lookup).
pub fn resolve_authority(event: &Event, manifests: &ManifestSet) -> Result<(), C1Error> {
    let signature = event.signature.as_ref().ok_or_else(|| C1Error::UnknownKey {
        key_id: String::new(),
    })?;

    if event.event_type == EventType::ReleasePublished
        && !manifests.is_maintainer_of(event.repo.as_str(), &signature.key_id)
    {
        return Err(C1Error::NotTargetMaintainer {
            key_id: signature.key_id.clone(),
            repo: event.repo.to_string(),
        });
    }

    Ok(())
}
