//! # Partition Selection
//!
//! `spec.md` §4.3 "Partitioning": the four selectors (`all`, `genesis`,
//! `<yyyy-mm-dd>`, `since:<iso-ts>`) and the leaf-set extraction that feeds
//! [`crate::tree::merkle_root`].

use repomesh_core::{Hex32, Timestamp};
use repomesh_model::Event;

use crate::error::AnchorError;

/// A parsed partition selector (`spec.md` §4.3 "Partitioning").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionId {
    /// Every event in the log.
    All,
    /// Synonym for `All` when no prior anchor exists.
    Genesis,
    /// Events whose ISO timestamp starts with this `YYYY-MM-DD` prefix.
    Date(String),
    /// Events strictly after the unique anchor event with this exact
    /// timestamp.
    Since(String),
}

impl PartitionId {
    /// Parse the selector string, recognizing all four forms.
    pub fn parse(s: &str) -> Self {
        if s == "all" {
            PartitionId::All
        } else if s == "genesis" {
            PartitionId::Genesis
        } else if let Some(ts) = s.strip_prefix("since:") {
            PartitionId::Since(ts.to_string())
        } else {
            PartitionId::Date(s.to_string())
        }
    }

    /// Render back to the wire-form selector string used as `partitionId`
    /// in a manifest and as a file-name component.
    pub fn to_id_string(&self) -> String {
        match self {
            PartitionId::All => "all".to_string(),
            PartitionId::Genesis => "genesis".to_string(),
            PartitionId::Date(d) => d.clone(),
            PartitionId::Since(ts) => format!("since:{ts}"),
        }
    }
}

/// The selector for the next partition to materialize: `since:<ts of the
/// last anchor>` if any anchor exists, otherwise `genesis` (`spec.md`
/// §4.3 "Partitioning").
pub fn next_partition_id(last_anchor_timestamp: Option<&Timestamp>) -> PartitionId {
    match last_anchor_timestamp {
        Some(ts) => PartitionId::Since(ts.to_iso8601()),
        None => PartitionId::Genesis,
    }
}

/// Select the ordered slice of events belonging to `partition` out of the
/// full event log.
pub fn select_partition_events<'a>(
    events: &'a [Event],
    partition: &PartitionId,
) -> Result<Vec<&'a Event>, AnchorError> {
    match partition {
        PartitionId::All | PartitionId::Genesis => Ok(events.iter().collect()),
        PartitionId::Date(prefix) => Ok(events
            .iter()
            .filter(|e| e.timestamp.to_iso8601().starts_with(prefix.as_str()))
            .collect()),
        PartitionId::Since(ts) => {
            let matches: Vec<usize> = events
                .iter()
                .enumerate()
                .filter(|(_, e)| e.timestamp.to_iso8601() == *ts)
                .map(|(i, _)| i)
                .collect();
            if matches.len() != 1 {
                return Err(AnchorError::AmbiguousSincePartition {
                    timestamp: ts.clone(),
                    found: matches.len(),
                });
            }
            let index = matches[0];
            Ok(events[index + 1..].iter().collect())
        }
    }
}

/// Extract the canonical-hash leaves for a partition's events, in
/// partition order (`spec.md` §4.3 "Leaf set" — the 64-hex-char filter is
/// vacuous since every admitted event's hash is already a validated
/// [`Hex32`], but is applied here anyway as the defensive check the
/// specification calls for).
pub fn partition_leaves(partition_events: &[&Event]) -> Vec<Hex32> {
    partition_events
        .iter()
        .map(|e| e.canonical_hash())
        .filter(|hash| repomesh_core::hex::is_hex64(&hash.to_hex()))
        .collect()
}
