//! # Temporal Types — UTC Timestamps with Millisecond Precision
//!
//! Defines `Timestamp`, matching `spec.md` §3's `timestamp: UTC instant with
//! millisecond precision, ISO-8601`. Unlike the teacher's `Timestamp` (which
//! truncates to whole seconds for its own JCS datetime-normalization rule),
//! this type preserves milliseconds — the event schema requires it.
//!
//! ## Security Invariant
//!
//! All timestamps are UTC. There is no constructor that accepts a naive or
//! offset datetime without first converting to UTC, so a mis-zoned
//! timestamp cannot silently enter canonicalized, signed event data.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// A UTC timestamp truncated to millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to
    /// milliseconds.
    pub fn now() -> Self {
        Self(Utc::now().trunc_subsecs(3))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating to
    /// milliseconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt.trunc_subsecs(3))
    }

    /// Parse an ISO-8601 UTC timestamp (e.g. `2026-01-15T12:00:00.000Z`).
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        let dt = DateTime::parse_from_rfc3339(s)?;
        Ok(Self::from_utc(dt.with_timezone(&Utc)))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render as ISO-8601 with a `Z` suffix and millisecond precision.
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
    }

    /// Whether `self` falls in `[now - 1 year, now + 1 hour]`, the
    /// admission window of `spec.md` §4.2 item 4.
    pub fn is_within_admission_window(&self, now: Timestamp) -> bool {
        let earliest = now.0 - Duration::days(365);
        let latest = now.0 + Duration::hours(1);
        self.0 >= earliest && self.0 <= latest
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}
