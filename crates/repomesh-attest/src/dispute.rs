//! # Dispute Surfacing
//!
//! `spec.md` §4.4 "Disputes": an `attestation.dispute` attestation event
//! references another attestation's `canonicalHash` in its `notes`. It is
//! surfaced alongside the aggregate but never alters consensus —
//! observational only.
//!
//! Resolved ambiguity: `spec.md` does not pin down the exact shape of the
//! dispute's `notes` reference. Following the convention the anchor engine
//! already uses for its own `notes` tail (`spec.md` §4.3: human text, a
//! separating newline, then a JSON object), a dispute's `notes` carries
//! `{"disputes": "<64-hex target canonicalHash>"}` as that JSON tail.

use repomesh_core::Hex32;
use repomesh_model::{Event, EventType, RepoId, VersionTag};

use crate::error::AttestError;

/// One surfaced dispute: the disputing event's own canonical hash, and the
/// target attestation's canonical hash it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispute {
    pub repo: RepoId,
    pub version: VersionTag,
    pub disputing_event_hash: Hex32,
    pub target_hash: Hex32,
}

/// Parse the `{"disputes": "<hex>"}` JSON tail out of a dispute event's
/// `notes`.
fn parse_dispute_target(notes: &str) -> Result<Hex32, AttestError> {
    let value = notes
        .split_once('\n')
        .map(|(_, tail)| tail)
        .unwrap_or(notes);
    let parsed: serde_json::Value = serde_json::from_str(value).map_err(|e| {
        AttestError::MalformedDisputeTarget {
            reason: e.to_string(),
        }
    })?;
    let hex = parsed
        .get("disputes")
        .and_then(|v| v.as_str())
        .ok_or_else(|| AttestError::MalformedDisputeTarget {
            reason: "missing \"disputes\" field".to_string(),
        })?;
    Hex32::from_hex(hex).map_err(|e| AttestError::MalformedDisputeTarget {
        reason: e.to_string(),
    })
}

/// Collect every surfaced, parseable dispute out of a slice of events.
/// Malformed dispute notes are skipped (logged via `tracing`), matching
/// the "observational, non-blocking" nature of disputes.
pub fn collect_disputes(events: &[Event]) -> Vec<Dispute> {
    events
        .iter()
        .filter(|e| e.event_type == EventType::AttestationPublished)
        .filter(|e| e.attestations.iter().any(|a| a.kind == "attestation.dispute"))
        .filter_map(|e| match parse_dispute_target(&e.notes) {
            Ok(target_hash) => Some(Dispute {
                repo: e.repo.clone(),
                version: e.version.clone(),
                disputing_event_hash: e.canonical_hash(),
                target_hash,
            }),
            Err(err) => {
                tracing::warn!(repo = %e.repo, version = %e.version, error = %err, "skipping malformed dispute");
                None
            }
        })
        .collect()
}
