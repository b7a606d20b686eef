//! # Participant Manifests
//!
//! `spec.md` §3 "Participant manifest": the network's registry of signing
//! authority. `ManifestSet::resolve_key` is the single place key lookup
//! happens, and per Open Question 2 (`spec.md` §9, resolved in
//! `DESIGN.md`) it always consults the *current* manifest set — a
//! rotated-out key's historical signatures continue to verify for as
//! long as its maintainer entry remains in some manifest. No per-event
//! key-fingerprint snapshot is taken.

use std::collections::BTreeSet;

use repomesh_crypto::Ed25519PublicKey;
use serde::{Deserialize, Serialize};

use crate::error::C1Error;

/// The role a participant plays in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantKind {
    Registry,
    Attestor,
    Policy,
    Oracle,
    Compute,
    Settlement,
    Governance,
    Identity,
}

/// A maintainer's signing identity within a manifest.
///
/// `keyId` must be unique within the manifest it belongs to — this is an
/// invariant of `ParticipantManifest::maintainers`, not separately
/// enforced by this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maintainer {
    pub name: String,
    #[serde(rename = "keyId")]
    pub key_id: String,
    #[serde(rename = "publicKey")]
    pub public_key_pem: String,
    pub contact: String,
}

impl Maintainer {
    /// Decode this maintainer's PEM-armored public key.
    pub fn public_key(&self) -> Result<Ed25519PublicKey, C1Error> {
        repomesh_crypto::decode_ed25519_public_key_pem(&self.public_key_pem)
            .map_err(|e| C1Error::KeyError(e.to_string()))
    }
}

/// A participant's manifest (`spec.md` §3 "Participant manifest").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantManifest {
    /// `"<org>/<name>"`, unique in the network.
    pub id: String,
    pub kind: ParticipantKind,
    #[serde(default)]
    pub provides: BTreeSet<String>,
    #[serde(default)]
    pub consumes: BTreeSet<String>,
    pub maintainers: Vec<Maintainer>,
}

impl ParticipantManifest {
    /// Find a maintainer entry by `keyId` within this manifest.
    pub fn find_maintainer(&self, key_id: &str) -> Option<&Maintainer> {
        self.maintainers.iter().find(|m| m.key_id == key_id)
    }
}

/// The full set of registered participant manifests — the key registry
/// used for both signature verification and key-resolution authority.
#[derive(Debug, Clone, Default)]
pub struct ManifestSet {
    manifests: Vec<ParticipantManifest>,
}

impl ManifestSet {
    /// Build a manifest set from a list of participant manifests.
    pub fn new(manifests: Vec<ParticipantManifest>) -> Self {
        Self { manifests }
    }

    /// All manifests in the set.
    pub fn manifests(&self) -> &[ParticipantManifest] {
        &self.manifests
    }

    /// Look up a manifest by participant id (`"<org>/<name>"`).
    pub fn find(&self, id: &str) -> Option<&ParticipantManifest> {
        self.manifests.iter().find(|m| m.id == id)
    }

    /// Resolve a `keyId` to its owning manifest and maintainer entry.
    ///
    /// Consults every manifest currently in the set, regardless of
    /// whether the key has since been rotated out elsewhere — this is
    /// the resolved behavior for Open Question 2.
    pub fn resolve_key(&self, key_id: &str) -> Option<(&ParticipantManifest, &Maintainer)> {
        self.manifests.iter().find_map(|m| {
            m.find_maintainer(key_id).map(|maintainer| (m, maintainer))
        })
    }

    /// Whether `key_id` belongs to a maintainer of the manifest with the
    /// given participant `id` (used for the `ReleasePublished`
    /// self-signing rule).
    pub fn is_maintainer_of(&self, id: &str, key_id: &str) -> bool {
        self.find(id)
            .map(|m| m.find_maintainer(key_id).is_some())
            .unwrap_or(false)
    }
}
