//! # Profile & Overrides
//!
//! `spec.md` §3 "Profile" and "Overrides". Plain serde structs; loading
//! named/path-based profile documents from YAML is `repomesh-config`'s
//! job (§10.3) — this crate only owns the shape.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Per-verdict weight overrides for a single assurance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssuranceWeights {
    pub pass: u32,
    pub warn: u32,
    pub fail: u32,
}

/// The set of checks a profile requires, split by scoring dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredChecks {
    #[serde(default)]
    pub integrity: BTreeSet<String>,
    #[serde(default)]
    pub assurance: BTreeSet<String>,
}

/// Scoring-related configuration carried by a profile or an override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default, rename = "assuranceWeights")]
    pub assurance_weights: BTreeMap<String, AssuranceWeights>,
}

/// A named configuration bundle (`baseline`, `open-source`, `regulated`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default, rename = "requiredEvidence")]
    pub required_evidence: BTreeSet<String>,
    #[serde(default, rename = "requiredChecks")]
    pub required_checks: RequiredChecks,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// How an unknown license should be treated (`license.treatUnknownAs`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownLicenseTreatment {
    Warn,
    Fail,
}

/// A justified ignored vulnerability entry
/// (`security.ignoreVulns`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoredVuln {
    pub id: String,
    pub justification: String,
}

/// Per-target leaf document layered atop a profile (`spec.md` §3
/// "Overrides"; precedence in §4.5: base < profile < target override).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overrides {
    #[serde(default, rename = "license.allowlistAdd")]
    pub license_allowlist_add: BTreeSet<String>,
    #[serde(default, rename = "license.allowlistRemove")]
    pub license_allowlist_remove: BTreeSet<String>,
    #[serde(default, rename = "license.treatUnknownAs")]
    pub license_treat_unknown_as: Option<UnknownLicenseTreatment>,
    #[serde(default, rename = "security.ignoreVulns")]
    pub security_ignore_vulns: Vec<IgnoredVuln>,
    #[serde(default, rename = "security.failOnSeverities")]
    pub security_fail_on_severities: BTreeSet<String>,
    #[serde(default)]
    pub scoring: ScoringConfig,
}
