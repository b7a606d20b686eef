//! # Append-Only Event Log
//!
//! `spec.md` §4.2: a sequence of UTF-8 lines, one event per line, in
//! insertion order. [`AppendOnlyLog`] holds the committed lines and their
//! parsed [`Event`]s in memory — a thin in-memory model of "the log",
//! deliberately storage-agnostic (a caller backing this with a real file
//! reads it in, offers the full candidate content to [`AppendOnlyLog::admit_batch`],
//! and persists the committed lines on success).

use std::collections::HashSet;

use repomesh_core::Timestamp;
use repomesh_model::{resolve_authority, verify_event, Event, EventType, ManifestSet};
use tracing::{instrument, warn};

use crate::error::AdmissionError;

/// Admission-uniqueness key (`spec.md` §4.2 item 5, extended per the
/// resolved Open Question 1 for `AttestationPublished`).
type UniquenessKey = (String, String, String, Option<String>);

fn uniqueness_key(event: &Event) -> UniquenessKey {
    let event_type = format!("{:?}", event.event_type);
    let signer = event.signature.as_ref().map(|s| s.key_id.clone());
    let extra = matches!(event.event_type, EventType::AttestationPublished).then_some(signer).flatten();
    (event.repo.to_string(), event.version.to_string(), event_type, extra)
}

/// An in-memory, admission-gated append-only event log.
#[derive(Debug, Default)]
pub struct AppendOnlyLog {
    lines: Vec<String>,
    events: Vec<Event>,
    seen_keys: HashSet<UniquenessKey>,
}

impl AppendOnlyLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// The committed lines, in insertion order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The committed, parsed events, in insertion order — parallel to
    /// [`Self::lines`].
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Admit a batch of new lines against a proposed full log content.
    ///
    /// `proposed_lines` is the *entire* candidate log (previously
    /// committed lines followed by the new lines to append) — this is
    /// what lets admission check 1 detect a rewrite of history, not just
    /// validate an already-trusted suffix. Runs the seven checks of
    /// `spec.md` §4.2 in order; any failure leaves the log completely
    /// untouched. Returns the number of newly admitted lines.
    #[instrument(skip(self, proposed_lines, manifests), fields(batch_len = proposed_lines.len()))]
    pub fn admit_batch(
        &mut self,
        proposed_lines: &[String],
        manifests: &ManifestSet,
        now: Timestamp,
    ) -> Result<usize, AdmissionError> {
        if proposed_lines.len() < self.lines.len() {
            warn!(index = 0, "proposed log is shorter than the committed log");
            return Err(AdmissionError::LogRewrite { index: 0 });
        }
        for (index, existing) in self.lines.iter().enumerate() {
            if proposed_lines[index] != *existing {
                warn!(index, "committed line would change under the proposed batch");
                return Err(AdmissionError::LogRewrite { index });
            }
        }

        let new_lines = &proposed_lines[self.lines.len()..];
        let mut seen = self.seen_keys.clone();
        let mut parsed = Vec::with_capacity(new_lines.len());

        for (offset, line) in new_lines.iter().enumerate() {
            let index = self.lines.len() + offset;

            let value: serde_json::Value =
                serde_json::from_str(line).map_err(|source| AdmissionError::MalformedEvent {
                    index,
                    message: source.to_string(),
                })?;
            repomesh_model::validate_event_json(&value).map_err(|violation| {
                AdmissionError::SchemaViolation {
                    index,
                    message: violation.to_string(),
                }
            })?;
            let event: Event = serde_json::from_value(value).map_err(|source| {
                AdmissionError::MalformedEvent {
                    index,
                    message: source.to_string(),
                }
            })?;

            if !event.timestamp.is_within_admission_window(now) {
                return Err(AdmissionError::TimestampOutOfRange {
                    index,
                    timestamp: event.timestamp.to_iso8601(),
                });
            }

            let key = uniqueness_key(&event);
            if !seen.insert(key) {
                return Err(AdmissionError::DuplicateEvent {
                    index,
                    repo: event.repo.to_string(),
                    version: event.version.to_string(),
                    event_type: format!("{:?}", event.event_type),
                });
            }

            verify_event(&event, manifests)
                .map_err(|source| AdmissionError::Verification { index, source })?;
            resolve_authority(&event, manifests)
                .map_err(|source| AdmissionError::Verification { index, source })?;

            parsed.push(event);
        }

        let admitted = new_lines.len();
        self.lines.extend_from_slice(new_lines);
        self.events.extend(parsed);
        self.seen_keys = seen;
        Ok(admitted)
    }
}
