//! # Verifier Policy
//!
//! `spec.md` §3 "Verifier policy" — per-check consensus configuration
//! consumed by `repomesh-attest`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Whether a check accepts attestations from any participant or only a
/// `trustedNodes` allowlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyMode {
    Open,
    TrustedSet,
}

/// How disagreeing verdicts resolve to a single consensus
/// (`spec.md` §4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictPolicy {
    FailWins,
    Majority,
    QuorumPass,
}

/// The per-check policy governing consensus resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckPolicy {
    pub mode: PolicyMode,
    #[serde(default, rename = "trustedNodes")]
    pub trusted_nodes: BTreeSet<String>,
    #[serde(rename = "conflictPolicy")]
    pub conflict_policy: ConflictPolicy,
    #[serde(default)]
    pub quorum: u32,
}

/// The full verifier policy document: one [`CheckPolicy`] per check kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierPolicy {
    #[serde(flatten)]
    pub checks: std::collections::BTreeMap<String, CheckPolicy>,
}

impl VerifierPolicy {
    /// Look up the policy governing a given check kind.
    pub fn policy_for(&self, check_kind: &str) -> Option<&CheckPolicy> {
        self.checks.get(check_kind)
    }
}
